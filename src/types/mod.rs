//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `entry`: statement history entries and operation kinds
//! - `error`: error types for the ledger engine

pub mod entry;
pub mod error;

pub use entry::{Amount, OperationKind, StatementEntry};
pub use error::LedgerError;
