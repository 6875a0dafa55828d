//! Property tests for the seating store.
//!
//! Random sequences of mutations must leave guests and tables pointing at
//! each other consistently.

use proptest::prelude::*;

use seatplan::core::{
    AutoAssigner, GuestId, GuestUpdate, TableId, TablePreset, TableType, TableUpdate,
};
use seatplan::SeatingStore;

#[derive(Debug, Clone)]
enum Op {
    AddGuest(String, Option<String>),
    AddTable(u32),
    QuickAdd(usize),
    UpdateGuest(usize, Option<String>, Option<Vec<String>>),
    UpdateTable(usize, Option<String>, Option<TableType>, Option<u32>),
    UpdateTablePosition(usize, f64, f64),
    Assign(usize, usize),
    Unassign(usize),
    DeleteGuest(usize),
    DeleteTable(usize),
    AutoAssign,
    Arrange,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => ("[A-Z][a-z]{1,6}", prop::option::of("Family|Friends|Work|Mixed"))
            .prop_map(|(name, tag)| Op::AddGuest(name, tag)),
        1 => (0u32..4).prop_map(Op::AddTable),
        1 => (0usize..4).prop_map(Op::QuickAdd),
        1 => (
            0usize..32,
            prop::option::of("[A-Z][a-z]{1,6}"),
            prop::option::of(prop::collection::vec("Family|Friends|Work|Mixed|", 0..3)),
        )
            .prop_map(|(g, name, tags)| Op::UpdateGuest(g, name, tags)),
        1 => (
            0usize..32,
            prop::option::of("[A-Z][a-z]{1,6}"),
            prop::option::of(prop_oneof![Just(TableType::Round), Just(TableType::Rectangle)]),
            prop::option::of(0u32..12),
        )
            .prop_map(|(t, name, kind, capacity)| Op::UpdateTable(t, name, kind, capacity)),
        1 => (0usize..32, -20.0f64..120.0, -20.0f64..120.0)
            .prop_map(|(t, x, y)| Op::UpdateTablePosition(t, x, y)),
        4 => (0usize..32, 0usize..32).prop_map(|(g, t)| Op::Assign(g, t)),
        1 => (0usize..32).prop_map(Op::Unassign),
        1 => (0usize..32).prop_map(Op::DeleteGuest),
        1 => (0usize..32).prop_map(Op::DeleteTable),
        1 => Just(Op::AutoAssign),
        1 => Just(Op::Arrange),
    ]
}

fn guest_at(store: &SeatingStore, index: usize) -> Option<GuestId> {
    let guests = store.guests();
    (!guests.is_empty()).then(|| guests[index % guests.len()].id.clone())
}

fn table_at(store: &SeatingStore, index: usize) -> Option<TableId> {
    let tables = store.tables();
    (!tables.is_empty()).then(|| tables[index % tables.len()].id.clone())
}

fn apply(store: &mut SeatingStore, op: Op) {
    match op {
        Op::AddGuest(name, tag) => {
            store.add_guest(name, tag.into_iter().collect());
        }
        Op::AddTable(capacity) => {
            store.add_table("T", TableType::Round, capacity);
        }
        Op::QuickAdd(preset) => {
            store.quick_add_table(TablePreset::ALL[preset % TablePreset::ALL.len()]);
        }
        Op::UpdateGuest(g, name, tags) => {
            if let Some(g) = guest_at(store, g) {
                store.update_guest(&g, GuestUpdate { name, tags });
            }
        }
        Op::UpdateTable(t, name, table_type, capacity) => {
            if let Some(t) = table_at(store, t) {
                store.update_table(&t, TableUpdate { name, table_type, capacity });
            }
        }
        Op::UpdateTablePosition(t, x, y) => {
            if let Some(t) = table_at(store, t) {
                store.update_table_position(&t, x, y);
            }
        }
        Op::Assign(g, t) => {
            if let (Some(g), Some(t)) = (guest_at(store, g), table_at(store, t)) {
                store.assign_guest_to_table(&g, &t);
            }
        }
        Op::Unassign(g) => {
            if let Some(g) = guest_at(store, g) {
                store.remove_guest_from_table(&g);
            }
        }
        Op::DeleteGuest(g) => {
            if let Some(g) = guest_at(store, g) {
                store.delete_guest(&g);
            }
        }
        Op::DeleteTable(t) => {
            if let Some(t) = table_at(store, t) {
                store.delete_table(&t);
            }
        }
        Op::AutoAssign => {
            AutoAssigner::new().run(store);
        }
        Op::Arrange => store.auto_arrange(),
    }
}

proptest! {
    #[test]
    fn random_operations_keep_plan_consistent(ops in prop::collection::vec(op(), 0..64)) {
        let mut store = SeatingStore::new();
        for op in ops {
            apply(&mut store, op);
            prop_assert!(store.to_plan().validate().is_ok());
        }

        let exported = seatplan::export::to_json(store.guests(), store.tables()).unwrap();
        let imported = seatplan::export::from_json(&exported);
        prop_assert!(imported.is_ok());
        let imported = imported.unwrap();
        prop_assert_eq!(imported.guests.as_slice(), store.guests());
        prop_assert_eq!(imported.tables.as_slice(), store.tables());

        let stats = store.stats();
        prop_assert_eq!(stats.seated + stats.unassigned, stats.guests);
    }

    #[test]
    fn updates_keep_seating_and_position(ops in prop::collection::vec(op(), 1..48), g in 0usize..32, t in 0usize..32) {
        let mut store = SeatingStore::new();
        for op in ops {
            apply(&mut store, op);
        }
        if let (Some(g), Some(t)) = (guest_at(&store, g), table_at(&store, t)) {
            let seat = store.guest(&g).unwrap().table_id.clone();
            let table = store.table(&t).unwrap().clone();

            store.update_guest(&g, GuestUpdate::default().name("Renamed").tags(Vec::new()));
            store.update_table(&t, TableUpdate::default().capacity(0).table_type(TableType::Rectangle));

            prop_assert_eq!(&store.guest(&g).unwrap().table_id, &seat);
            let updated = store.table(&t).unwrap();
            prop_assert_eq!(&updated.guests, &table.guests);
            prop_assert_eq!(updated.position, table.position);
            prop_assert_eq!(updated.capacity, 1);
            prop_assert!(store.to_plan().validate().is_ok());
        }
    }

    #[test]
    fn assign_is_idempotent(ops in prop::collection::vec(op(), 1..32), g in 0usize..32, t in 0usize..32) {
        let mut store = SeatingStore::new();
        for op in ops {
            apply(&mut store, op);
        }
        if let (Some(g), Some(t)) = (guest_at(&store, g), table_at(&store, t)) {
            store.assign_guest_to_table(&g, &t);
            let tables = store.tables().to_vec();
            let revision = store.revision();

            store.assign_guest_to_table(&g, &t);
            prop_assert_eq!(store.tables(), tables.as_slice());
            prop_assert_eq!(store.revision(), revision);
        }
    }

    #[test]
    fn auto_assign_seats_everyone(names in prop::collection::vec(
        ("[A-Z][a-z]{1,6}", prop::option::of("Family|Friends|Work")), 0..40
    )) {
        let mut store = SeatingStore::new();
        for (name, tag) in names {
            store.add_guest(name, tag.into_iter().collect());
        }
        let existing = store.tables().len();

        let outcome = AutoAssigner::new().run(&mut store);
        prop_assert!(store.unassigned_guests().is_empty());
        prop_assert_eq!(store.tables().len(), existing + outcome.tables_created());
        prop_assert!(store.tables().iter().all(|t| t.seated() <= t.capacity as usize));
        prop_assert!(store.to_plan().validate().is_ok());
    }

    #[test]
    fn delete_table_unseats_only_its_guests(ops in prop::collection::vec(op(), 1..48), t in 0usize..32) {
        let mut store = SeatingStore::new();
        for op in ops {
            apply(&mut store, op);
        }
        if let Some(t) = table_at(&store, t) {
            let seated_elsewhere = store
                .guests()
                .iter()
                .filter(|g| g.table_id.as_ref().is_some_and(|id| id != &t))
                .count();

            store.delete_table(&t);
            prop_assert!(store.guests().iter().all(|g| g.table_id.as_ref() != Some(&t)));
            prop_assert_eq!(store.stats().seated, seated_elsewhere);
        }
    }
}
