//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end against a temporary plan file.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test, pointed at a plan file inside `dir`.
fn seatplan(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("seatplan").unwrap();
    cmd.current_dir(dir.path()).env_remove("SEATPLAN_PLAN").arg("--plan").arg("plan.json");
    cmd
}

fn read_plan(dir: &assert_fs::TempDir) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.path().join("plan.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wedding seating planner"));
}

#[test]
fn test_version_flag() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_guest_help() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp)
        .args(["guest", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Add a guest"));
}

// ============================================================================
// Guest & Table Tests
// ============================================================================

#[test]
fn test_add_guest_persists_plan() {
    let temp = assert_fs::TempDir::new().unwrap();

    seatplan(&temp)
        .args(["guest", "add", "Ana", "--tag", "Family"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added guest Ana"));

    temp.child("plan.json").assert(predicate::path::exists());
    let plan = read_plan(&temp);
    assert_eq!(plan["guests"][0]["name"], "Ana");
    assert_eq!(plan["guests"][0]["tags"][0], "Family");
    assert!(plan["lastUpdated"].is_string());
}

#[test]
fn test_empty_guest_name_rejected() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp)
        .args(["guest", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn test_blank_table_rename_rejected() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["table", "add", "Head"]).assert().success();

    seatplan(&temp)
        .args(["table", "edit", "Head", "--name", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table name cannot be empty"));

    seatplan(&temp).args(["table", "edit", "Head", "--name", " Top table "]).assert().success();
    let plan = read_plan(&temp);
    assert_eq!(plan["tables"][0]["name"], "Top table");
}

#[test]
fn test_bulk_add_from_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("guests.txt").write_str("Ana, Family\nBen, Family\n\nCara, Friends\n").unwrap();

    seatplan(&temp)
        .args(["guest", "bulk", "guests.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 3 guests"));

    seatplan(&temp)
        .args(["guest", "list", "--tag", "Family"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 guests"));
}

#[test]
fn test_bulk_add_from_stdin() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp)
        .args(["guest", "bulk"])
        .write_stdin("Ana, Family\nBen\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 guests"));
}

#[test]
fn test_manual_assignment_flow() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["guest", "add", "Ana"]).assert().success();
    seatplan(&temp).args(["table", "add", "Head", "--capacity", "1"]).assert().success();

    seatplan(&temp)
        .args(["assign", "Ana", "Head"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seated Ana at Head (1/1)"));

    let plan = read_plan(&temp);
    assert_eq!(plan["tables"][0]["guests"][0], plan["guests"][0]["id"]);
    assert_eq!(plan["guests"][0]["tableId"], plan["tables"][0]["id"]);

    seatplan(&temp).args(["unassign", "Ana"]).assert().success();
    let plan = read_plan(&temp);
    assert!(plan["guests"][0].get("tableId").is_none());
    assert!(plan["tables"][0]["guests"].as_array().unwrap().is_empty());
}

#[test]
fn test_overbooking_warns_but_succeeds() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["guest", "add", "Ana"]).assert().success();
    seatplan(&temp).args(["guest", "add", "Ben"]).assert().success();
    seatplan(&temp).args(["table", "add", "Head", "-c", "1"]).assert().success();
    seatplan(&temp).args(["assign", "Ana", "Head"]).assert().success();

    seatplan(&temp)
        .args(["assign", "Ben", "Head"])
        .assert()
        .success()
        .stdout(predicate::str::contains("over capacity"));
}

#[test]
fn test_unknown_guest_is_an_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["table", "add", "Head"]).assert().success();
    seatplan(&temp)
        .args(["assign", "Nobody", "Head"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No guest named 'Nobody'"));
}

#[test]
fn test_delete_table_unseats_guests() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["guest", "add", "Ana"]).assert().success();
    seatplan(&temp).args(["table", "quick", "standard"]).assert().success();
    seatplan(&temp).args(["assign", "Ana", "Table 1"]).assert().success();

    seatplan(&temp)
        .args(["table", "rm", "Table 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 guests unseated"));

    let plan = read_plan(&temp);
    assert!(plan["tables"].as_array().unwrap().is_empty());
    assert!(plan["guests"][0].get("tableId").is_none());
}

#[test]
fn test_quick_add_numbering() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["table", "quick", "standard"]).assert().success();
    seatplan(&temp).args(["table", "quick", "vip"]).assert().success();
    seatplan(&temp)
        .args(["table", "quick", "large"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added table Table 2 (round, 10 seats)"));
}

#[test]
fn test_place_clamps_coordinates() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["table", "add", "Head"]).assert().success();
    seatplan(&temp).args(["table", "place", "Head", "150", "-20"]).assert().success();

    let plan = read_plan(&temp);
    assert_eq!(plan["tables"][0]["position"]["x"], 100.0);
    assert_eq!(plan["tables"][0]["position"]["y"], 0.0);
}

// ============================================================================
// Auto-Assign Tests
// ============================================================================

#[test]
fn test_auto_assign_groups_by_tag() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp)
        .args(["guest", "bulk"])
        .write_stdin("Ana, Family\nBen, Family\nCara, Friends\n")
        .assert()
        .success();

    seatplan(&temp)
        .arg("auto-assign")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 2 tables and seated 3 guests."))
        .stdout(predicate::str::contains("Family 1 (2/8)"))
        .stdout(predicate::str::contains("Friends 1 (1/8)"));

    seatplan(&temp)
        .arg("auto-assign")
        .assert()
        .success()
        .stdout(predicate::str::contains("All guests already have a table."));
}

#[test]
fn test_show_and_stats() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp)
        .args(["guest", "bulk"])
        .write_stdin("Ana, Family\nBen\n")
        .assert()
        .success();
    seatplan(&temp).args(["table", "add", "Family 1"]).assert().success();
    seatplan(&temp).args(["assign", "Ana", "Family 1"]).assert().success();

    seatplan(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - Ana (Family)"))
        .stdout(predicate::str::contains("Unassigned (1):"));

    seatplan(&temp)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available seats: 7"));
}

// ============================================================================
// Export & Import Tests
// ============================================================================

#[test]
fn test_export_csv_to_stdout() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["guest", "add", "Ana", "-t", "Family"]).assert().success();

    seatplan(&temp)
        .args(["export", "csv", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Guest Name,Tags,Table\n"))
        .stdout(predicate::str::contains(r#""Ana","Family","Unassigned""#));
}

#[test]
fn test_export_json_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["guest", "add", "Ana"]).assert().success();

    seatplan(&temp)
        .args(["export", "json", "-o", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seating-plan-"));

    let exported = std::fs::read_dir(temp.path().join("out")).unwrap().count();
    assert_eq!(exported, 1);
}

#[test]
fn test_import_round_trip() {
    let source = assert_fs::TempDir::new().unwrap();
    seatplan(&source)
        .args(["guest", "bulk"])
        .write_stdin("Ana, Family\nBen, Friends\n")
        .assert()
        .success();
    seatplan(&source).arg("auto-assign").assert().success();
    let original = read_plan(&source);

    let target = assert_fs::TempDir::new().unwrap();
    target.child("import.json").write_str(&original.to_string()).unwrap();
    seatplan(&target)
        .args(["import", "import.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 guests and 2 tables"));

    let imported = read_plan(&target);
    assert_eq!(imported["guests"], original["guests"]);
    assert_eq!(imported["tables"], original["tables"]);
}

#[test]
fn test_import_rejects_malformed_plan() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["guest", "add", "Ana"]).assert().success();
    temp.child("bad.json").write_str("{ \"guests\": 42 }").unwrap();

    seatplan(&temp)
        .args(["import", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rejected plan file"));

    let plan = read_plan(&temp);
    assert_eq!(plan["guests"][0]["name"], "Ana");
}

#[test]
fn test_rejected_saved_plan_is_kept_as_backup() {
    let temp = assert_fs::TempDir::new().unwrap();
    let stale = r#"{"guests": [{"id": "g1", "name": "Ana", "tags": [], "tableId": "gone"}],
                    "tables": [], "lastUpdated": "2024-01-01T00:00:00Z"}"#;
    temp.child("plan.json").write_str(stale).unwrap();

    seatplan(&temp).args(["guest", "add", "Ben"]).assert().success();

    temp.child("plan.json.bak").assert(stale);
    let plan = read_plan(&temp);
    assert_eq!(plan["guests"].as_array().unwrap().len(), 1);
    assert_eq!(plan["guests"][0]["name"], "Ben");
}

#[test]
fn test_clear_with_confirmation_flag() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp).args(["guest", "add", "Ana"]).assert().success();

    seatplan(&temp).args(["clear"]).write_stdin("n\n").assert().success().stdout(
        predicate::str::contains("Cancelled"),
    );
    temp.child("plan.json").assert(predicate::path::exists());

    seatplan(&temp).args(["clear", "-y"]).assert().success();
    temp.child("plan.json").assert(predicate::path::missing());
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let temp = assert_fs::TempDir::new().unwrap();
    seatplan(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seatplan"));
}
