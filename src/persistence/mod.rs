//! Best-effort persistence gateway
//!
//! Ledger events are mirrored to an external durable store that may be
//! unavailable. The gateway is an observability and audit sink, never a
//! source of truth: every write returns an explicit two-outcome result and
//! failures are absorbed right here, logged and dropped. No retry, no
//! queueing, no reconciliation — the ledger's in-memory history stays
//! authoritative and complete regardless.
//!
//! # Components
//!
//! - [`PersistenceSink`] - the gateway contract
//! - [`JsonLineStore`] - append-only JSON-lines file store
//! - [`UnavailableStore`] - a store that is never reachable (driver-missing
//!   fallback behavior)
//! - [`MemorySink`] - in-memory sink for tests

mod memory;
mod store;

pub use memory::MemorySink;
pub use store::{JsonLineStore, UnavailableStore};

use serde::Serialize;

/// Result of one persistence attempt
///
/// `Degraded` means the write was lost from the external store's perspective;
/// it must never propagate as an error of the ledger operation that
/// triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOutcome {
    /// The external store accepted the write
    Applied,
    /// The write failed and was dropped at this boundary
    Degraded,
}

/// The ephemeral record handed to a sink
///
/// The core does not retain or reconcile these after the call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistenceRecord {
    /// Account identifier (username)
    pub account: String,
    /// Free-text event description, e.g. `Deposited Rs500 (Balance: Rs10500)`
    pub detail: String,
    /// Seconds since the Unix epoch at the time of the call
    pub unix_ts: u64,
}

impl PersistenceRecord {
    /// Build a record stamped with the current time
    pub fn now(account: &str, detail: &str) -> Self {
        let unix_ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        PersistenceRecord {
            account: account.to_string(),
            detail: detail.to_string(),
            unix_ts,
        }
    }
}

/// Best-effort write-through of ledger events to an external store
///
/// Implementations must be callable from both the interactive path and the
/// settlement tasks, must never panic, never block indefinitely, and never
/// report failure any louder than the `Degraded` outcome.
pub trait PersistenceSink: Send + Sync {
    /// Attempt a single event write; failures are absorbed as `Degraded`
    fn record(&self, account_id: &str, detail: &str) -> PersistenceOutcome;

    /// Mirror a credential change; same best-effort semantics
    ///
    /// Independent of ledger correctness. Implementations record the event,
    /// not the secret itself.
    fn update_credential(&self, account_id: &str, new_pin: u32) -> PersistenceOutcome;
}
