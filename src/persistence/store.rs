//! File-backed and unavailable store implementations

use super::{PersistenceOutcome, PersistenceRecord, PersistenceSink};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Append-only JSON-lines store
///
/// Each record is serialized to one JSON line and appended to the file. Any
/// failure along the way (file unwritable, disk full, serialization error)
/// degrades that single write; later writes are attempted independently.
#[derive(Debug, Clone)]
pub struct JsonLineStore {
    path: PathBuf,
}

impl JsonLineStore {
    /// Create a store appending to the given path
    ///
    /// The file is created on first write; nothing is touched up front.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, record: &PersistenceRecord) -> PersistenceOutcome {
        match self.try_append(record) {
            Ok(()) => PersistenceOutcome::Applied,
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    account = %record.account,
                    %error,
                    "persistence write degraded"
                );
                PersistenceOutcome::Degraded
            }
        }
    }

    fn try_append(&self, record: &PersistenceRecord) -> std::io::Result<()> {
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl PersistenceSink for JsonLineStore {
    fn record(&self, account_id: &str, detail: &str) -> PersistenceOutcome {
        self.append(&PersistenceRecord::now(account_id, detail))
    }

    fn update_credential(&self, account_id: &str, _new_pin: u32) -> PersistenceOutcome {
        // the event is mirrored, the secret is not
        self.append(&PersistenceRecord::now(account_id, "PIN updated"))
    }
}

/// A store that is never reachable
///
/// Models the external store being down or its driver missing: every write
/// degrades, and the ledger keeps working off its in-memory history alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl PersistenceSink for UnavailableStore {
    fn record(&self, account_id: &str, detail: &str) -> PersistenceOutcome {
        debug!(account = account_id, detail, "external store unavailable; record dropped");
        PersistenceOutcome::Degraded
    }

    fn update_credential(&self, account_id: &str, _new_pin: u32) -> PersistenceOutcome {
        debug!(account = account_id, "external store unavailable; credential record dropped");
        PersistenceOutcome::Degraded
    }
}
