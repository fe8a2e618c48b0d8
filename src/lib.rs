//! Account Ledger & Deferred Settlement Engine
//! # Overview
//!
//! This library models a single-account banking ledger that stays correct
//! under concurrent interactive operations (deposit, withdraw) and deferred
//! asynchronous operations (cheque clearing), with best-effort mirroring of
//! every committed mutation to an external store that may be unavailable.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (StatementEntry, LedgerError, etc.)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Authoritative balance and history, one lock per account
//!   - [`core::directory`] - Username to ledger resolution and creation
//!   - [`core::settlement`] - Deferred cheque clearing with cancellation
//!   - [`core::engine`] - The facade orchestrating the above
//! - [`persistence`] - Best-effort external-store gateway (never authoritative)
//! - [`io`] - Session script parsing and history export
//!
//! # Concurrency model
//!
//! Each ledger owns one mutex; every mutation is a single atomic balance
//! update plus history append under that lock, so interactive callers and
//! background settlement tasks serialize per account and never interleave
//! their read-modify-write sequences. Ledgers for different accounts never
//! block one another. Settlement tasks hold no lock during their clearing
//! delay and apply their credit exactly once, or not at all if cancelled
//! first.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod persistence;
pub mod types;

pub use core::{
    AccountDirectory, InterestQuote, Ledger, LedgerEngine, SettlementHandle, SettlementOutcome,
    SettlementState, SettlementTask,
};
pub use persistence::{
    JsonLineStore, MemorySink, PersistenceOutcome, PersistenceRecord, PersistenceSink,
    UnavailableStore,
};
pub use types::{Amount, LedgerError, OperationKind, StatementEntry};
