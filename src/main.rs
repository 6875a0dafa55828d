//! Seatplan - wedding seating planner for your terminal.
//!
//! Every command loads the saved plan, applies its change through the seating
//! store, and writes the settled plan back once at the end.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use seatplan::core::{
    layout, parse_tags, AutoAssignOutcome, Config, Guest, GuestUpdate, Occupancy, TablePreset,
    TableType, TableUpdate,
};
use seatplan::export::{export_filename, ExportFormat};
use seatplan::{App, APP_NAME};

/// Wedding seating planner
#[derive(Parser)]
#[command(name = "seatplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Plan file to use instead of the configured one
    #[arg(long, global = true, env = "SEATPLAN_PLAN")]
    plan: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage guests
    Guest {
        #[command(subcommand)]
        operation: GuestOperation,
    },

    /// Manage tables
    Table {
        #[command(subcommand)]
        operation: TableOperation,
    },

    /// Seat a guest at a table
    Assign {
        /// Guest name or id
        guest: String,

        /// Table name or id
        table: String,
    },

    /// Remove a guest from their table
    Unassign {
        /// Guest name or id
        guest: String,
    },

    /// Seat all unassigned guests at new tables, grouped by first tag
    AutoAssign,

    /// Show every table with its guests
    Show,

    /// Show seating statistics
    Stats,

    /// Export the plan as JSON or CSV
    Export {
        /// Export format (json, csv)
        format: ExportFormat,

        /// Directory to write the file to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Replace the plan with an exported JSON file
    Import {
        /// Plan file to import
        file: PathBuf,
    },

    /// Delete all guests and tables
    Clear {
        /// Don't ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Guest operations.
#[derive(Subcommand)]
enum GuestOperation {
    /// Add a guest
    Add {
        /// Guest name
        name: String,

        /// Tag (repeatable); the first tag drives auto-assign
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Add guests from lines of "Name, tag1, tag2" (stdin when no file)
    Bulk {
        /// File with one guest per line
        file: Option<PathBuf>,
    },

    /// Change a guest's name or tags
    Edit {
        /// Guest name or id
        guest: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New comma-separated tags (replaces the old ones)
        #[arg(long)]
        tags: Option<String>,
    },

    /// Delete a guest
    Rm {
        /// Guest name or id
        guest: String,
    },

    /// List guests
    List {
        /// Only guests without a table
        #[arg(short, long)]
        unassigned: bool,

        /// Only guests with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only guests whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

/// Table operations.
#[derive(Subcommand)]
enum TableOperation {
    /// Add a table
    Add {
        /// Table name
        name: String,

        /// Table shape (round, rectangle)
        #[arg(long = "type", default_value = "round")]
        table_type: TableType,

        /// Seat count (defaults by shape)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        capacity: Option<u32>,
    },

    /// Add a table from a preset (standard, large, vip, head)
    Quick {
        /// Preset name
        preset: TablePreset,
    },

    /// Change a table's name, shape or capacity
    Edit {
        /// Table name or id
        table: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New shape
        #[arg(long = "type")]
        table_type: Option<TableType>,

        /// New seat count
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        capacity: Option<u32>,
    },

    /// Delete a table and unseat its guests
    Rm {
        /// Table name or id
        table: String,
    },

    /// Place a table in the room (percent of width and height, clamped to 0-100)
    #[command(allow_negative_numbers = true)]
    Place {
        /// Table name or id
        table: String,

        /// Horizontal position in percent
        x: f64,

        /// Vertical position in percent
        y: f64,
    },

    /// Arrange all tables on a grid
    Arrange,

    /// List tables
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            cmd_completions(shell);
        }
        Commands::Config { path } => {
            cmd_config(path)?;
        }
        command => {
            let config = Config::load()?;
            let mut app = App::open(config, cli.plan.as_deref())?;
            run(&mut app, command)?;
            app.persist();
        }
    }

    Ok(())
}

/// Dispatch a plan command.
fn run(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Guest { operation } => cmd_guest(app, operation),
        Commands::Table { operation } => cmd_table(app, operation),
        Commands::Assign { guest, table } => cmd_assign(app, &guest, &table),
        Commands::Unassign { guest } => cmd_unassign(app, &guest),
        Commands::AutoAssign => {
            cmd_auto_assign(app);
            Ok(())
        }
        Commands::Show => {
            cmd_show(app);
            Ok(())
        }
        Commands::Stats => {
            cmd_stats(app);
            Ok(())
        }
        Commands::Export { format, output, stdout } => {
            cmd_export(app, format, output.as_deref(), stdout)
        }
        Commands::Import { file } => cmd_import(app, &file),
        Commands::Clear { yes } => cmd_clear(app, yes),
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}

/// Handle guest commands.
fn cmd_guest(app: &mut App, operation: GuestOperation) -> Result<()> {
    match operation {
        GuestOperation::Add { name, tags } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("Guest name cannot be empty");
            }
            let tags: Vec<String> = tags.iter().flat_map(|t| parse_tags(t)).collect();
            let id = app.store.add_guest(name, tags);
            println!("Added guest {name} ({id})");
        }
        GuestOperation::Bulk { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Could not read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let added = app.store.add_guests_bulk(&text);
            println!("Added {} guests", added.len());
        }
        GuestOperation::Edit { guest, name, tags } => {
            let id = app.resolve_guest(&guest)?;
            let mut update = GuestUpdate::default();
            if let Some(name) = name {
                let name = name.trim();
                if name.is_empty() {
                    anyhow::bail!("Guest name cannot be empty");
                }
                update = update.name(name);
            }
            if let Some(tags) = tags {
                update = update.tags(parse_tags(&tags));
            }
            if update.is_empty() {
                anyhow::bail!("Nothing to change; pass --name and/or --tags");
            }
            app.store.update_guest(&id, update);
            println!("Updated guest {guest}");
        }
        GuestOperation::Rm { guest } => {
            let id = app.resolve_guest(&guest)?;
            app.store.delete_guest(&id);
            println!("Deleted guest {guest}");
        }
        GuestOperation::List { unassigned, tag, search, format } => {
            let search = search.unwrap_or_default().to_lowercase();
            let guests: Vec<&Guest> = if unassigned {
                app.store.unassigned_matching(&search, tag.as_deref())
            } else {
                app.store
                    .guests()
                    .iter()
                    .filter(|g| g.name.to_lowercase().contains(&search))
                    .filter(|g| tag.as_deref().is_none_or(|t| g.has_tag(t)))
                    .collect()
            };

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&guests)?),
                _ => {
                    for guest in &guests {
                        println!(
                            "{:<28} {:<30} {}",
                            guest.name,
                            guest.tags_display(),
                            table_label(app, guest)
                        );
                    }
                    println!("\nTotal: {} guests", guests.len());
                }
            }
        }
    }
    Ok(())
}

/// Handle table commands.
fn cmd_table(app: &mut App, operation: TableOperation) -> Result<()> {
    match operation {
        TableOperation::Add { name, table_type, capacity } => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("Table name cannot be empty");
            }
            let capacity = capacity.unwrap_or_else(|| table_type.default_capacity());
            let id = app.store.add_table(name, table_type, capacity);
            println!("Added table {name} ({table_type}, {capacity} seats, {id})");
        }
        TableOperation::Quick { preset } => {
            let id = app.store.quick_add_table(preset);
            if let Some(table) = app.store.table(&id) {
                println!("Added table {} ({}, {} seats)", table.name, table.table_type, table.capacity);
            }
        }
        TableOperation::Edit { table, name, table_type, capacity } => {
            let id = app.resolve_table(&table)?;
            let name = match name {
                Some(name) if name.trim().is_empty() => {
                    anyhow::bail!("Table name cannot be empty")
                }
                name => name.map(|n| n.trim().to_string()),
            };
            let update = TableUpdate { name, table_type, capacity };
            if update.is_empty() {
                anyhow::bail!("Nothing to change; pass --name, --type and/or --capacity");
            }
            app.store.update_table(&id, update);
            println!("Updated table {table}");
        }
        TableOperation::Rm { table } => {
            let id = app.resolve_table(&table)?;
            let unseated = app.store.table(&id).map_or(0, |t| t.seated());
            app.store.delete_table(&id);
            println!("Deleted table {table} ({unseated} guests unseated)");
        }
        TableOperation::Place { table, x, y } => {
            let id = app.resolve_table(&table)?;
            let (x, y) = (layout::clamp_percent(x), layout::clamp_percent(y));
            app.store.update_table_position(&id, x, y);
            println!("Placed {table} at ({x:.1}%, {y:.1}%)");
        }
        TableOperation::Arrange => {
            app.store.auto_arrange();
            println!("Arranged {} tables", app.store.tables().len());
        }
        TableOperation::List { format } => match format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(app.store.tables())?),
            _ => {
                for table in app.store.tables() {
                    let position = table
                        .position
                        .map(|p| format!("({:.1}%, {:.1}%)", p.x, p.y))
                        .unwrap_or_else(|| "unplaced".to_string());
                    println!(
                        "{:<24} {:<10} {:>3}/{:<3} {:<10} {}",
                        table.name,
                        table.table_type,
                        table.seated(),
                        table.capacity,
                        occupancy_label(table.occupancy()),
                        position
                    );
                }
                println!("\nTotal: {} tables", app.store.tables().len());
            }
        },
    }
    Ok(())
}

/// Seat a guest.
fn cmd_assign(app: &mut App, guest: &str, table: &str) -> Result<()> {
    let guest_id = app.resolve_guest(guest)?;
    let table_id = app.resolve_table(table)?;
    app.store.assign_guest_to_table(&guest_id, &table_id);

    if let Some(t) = app.store.table(&table_id) {
        println!("Seated {guest} at {} ({}/{})", t.name, t.seated(), t.capacity);
        if t.occupancy() == Occupancy::OverCapacity {
            println!("Warning: {} is over capacity", t.name);
        }
    }
    Ok(())
}

/// Unseat a guest.
fn cmd_unassign(app: &mut App, guest: &str) -> Result<()> {
    let guest_id = app.resolve_guest(guest)?;
    if app.store.remove_guest_from_table(&guest_id) {
        println!("Removed {guest} from their table");
    } else {
        println!("{guest} has no table");
    }
    Ok(())
}

/// Run auto-assignment.
fn cmd_auto_assign(app: &mut App) {
    let AutoAssignOutcome::Assigned { tables, guests_assigned } = app.auto_assign() else {
        println!("All guests already have a table.");
        return;
    };

    println!("Created {} tables and seated {} guests.", tables.len(), guests_assigned);
    for id in &tables {
        if let Some(t) = app.store.table(id) {
            println!("  {} ({}/{})", t.name, t.seated(), t.capacity);
        }
    }
}

/// Print every table and its guests, then the unassigned guests.
fn cmd_show(app: &App) {
    for table in app.store.tables() {
        println!(
            "{} [{}] {}/{} {}",
            table.name,
            table.table_type,
            table.seated(),
            table.capacity,
            occupancy_label(table.occupancy())
        );
        for guest in app.store.guests_at(&table.id) {
            if guest.tags.is_empty() {
                println!("  - {}", guest.name);
            } else {
                println!("  - {} ({})", guest.name, guest.tags_display());
            }
        }
    }

    let unassigned = app.store.unassigned_guests();
    println!("\nUnassigned ({}):", unassigned.len());
    for guest in unassigned {
        println!("  - {}", guest.name);
    }
}

/// Print seating statistics.
fn cmd_stats(app: &App) {
    let stats = app.store.stats();
    println!("Guests:          {}", stats.guests);
    println!("  seated:        {}", stats.seated);
    println!("  unassigned:    {}", stats.unassigned);
    println!("Tables:          {}", stats.tables);
    println!("Total capacity:  {}", stats.total_capacity);
    println!("Available seats: {}", stats.available_seats);

    if !stats.over_capacity.is_empty() {
        println!("\nOver capacity:");
        for id in &stats.over_capacity {
            if let Some(t) = app.store.table(id) {
                println!("  {} ({}/{})", t.name, t.seated(), t.capacity);
            }
        }
    }

    let tags = app.store.all_tags();
    if !tags.is_empty() {
        println!("\nTags: {}", tags.join(", "));
    }
}

/// Export the plan.
fn cmd_export(app: &App, format: ExportFormat, output: Option<&Path>, stdout: bool) -> Result<()> {
    let content = app.export(format)?;

    if stdout {
        print!("{content}");
        io::stdout().flush()?;
        return Ok(());
    }

    let dir = output
        .map(Path::to_path_buf)
        .or_else(|| app.config.export.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(export_filename(chrono::Utc::now().date_naive(), format));
    std::fs::write(&path, content)
        .with_context(|| format!("Could not write {}", path.display()))?;
    println!("Exported {}", path.display());
    Ok(())
}

/// Import a plan file.
fn cmd_import(app: &mut App, file: &Path) -> Result<()> {
    let content = App::read_import(file)?;
    app.import_json(&content)
        .with_context(|| format!("Rejected plan file {}", file.display()))?;
    println!(
        "Imported {} guests and {} tables",
        app.store.guests().len(),
        app.store.tables().len()
    );
    Ok(())
}

/// Clear everything.
fn cmd_clear(app: &mut App, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        print!("Delete all guests and tables? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled");
            return Ok(());
        }
    }

    app.clear_all();
    println!("Cleared all guests and tables");
    Ok(())
}

/// Show configuration.
fn cmd_config(show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::config_dir() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, APP_NAME, &mut io::stdout());
}

fn table_label(app: &App, guest: &Guest) -> String {
    guest
        .table_id
        .as_ref()
        .and_then(|id| app.store.table(id))
        .map_or_else(|| app.config.export.unassigned_label.clone(), |t| t.name.clone())
}

fn occupancy_label(occupancy: Occupancy) -> &'static str {
    match occupancy {
        Occupancy::Available => "",
        Occupancy::Full => "full",
        Occupancy::OverCapacity => "OVER CAPACITY",
    }
}
