//! Plan persistence.
//!
//! Storage is best-effort: `load` yields `None` for a missing or unreadable
//! plan, and `save`/`clear` log failures instead of returning them. The
//! in-memory store stays authoritative either way. `FileStorage` moves a
//! plan it rejects to `<path>.bak` rather than leaving it to be overwritten.

mod file;

pub use file::FileStorage;

use crate::core::Plan;

/// Persistence adapter for a whole plan.
pub trait PlanStorage: std::fmt::Debug {
    /// Previously saved plan, or `None` if there is none or it cannot be read.
    fn load(&self) -> Option<Plan>;

    /// Write the plan, replacing what was saved before.
    fn save(&mut self, plan: &Plan);

    /// Delete the saved plan.
    fn clear(&mut self);
}

/// Keeps the saved plan in memory. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    plan: Option<Plan>,
    saves: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already saved plan.
    pub fn with_plan(plan: Plan) -> Self {
        Self { plan: Some(plan), saves: 0 }
    }

    /// Number of writes so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PlanStorage for MemoryStorage {
    fn load(&self) -> Option<Plan> {
        self.plan.clone()
    }

    fn save(&mut self, plan: &Plan) {
        self.plan = Some(plan.clone());
        self.saves += 1;
    }

    fn clear(&mut self) {
        self.plan = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert!(storage.load().is_none());

        storage.save(&Plan::default());
        assert!(storage.load().is_some());
        assert_eq!(storage.save_count(), 1);

        storage.clear();
        assert!(storage.load().is_none());
    }
}
