//! In-memory sink for tests

use super::{PersistenceOutcome, PersistenceSink};
use std::sync::Mutex;

/// Records every event in memory and always reports `Applied`
///
/// Used by tests to assert what the core handed to the persistence boundary.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(String, String)>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in call order, as (account, detail) pairs
    pub fn records(&self) -> Vec<(String, String)> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PersistenceSink for MemorySink {
    fn record(&self, account_id: &str, detail: &str) -> PersistenceOutcome {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((account_id.to_string(), detail.to_string()));
        PersistenceOutcome::Applied
    }

    fn update_credential(&self, account_id: &str, _new_pin: u32) -> PersistenceOutcome {
        self.record(account_id, "PIN updated")
    }
}
