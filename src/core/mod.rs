//! Core business logic module
//!
//! This module contains the ledger and settlement components:
//! - `ledger` - authoritative balance and history, one mutex per account
//! - `directory` - username to ledger resolution and creation
//! - `settlement` - deferred cheque clearing tasks with cancellation
//! - `interest` - fixed-rate simple-interest quotes
//! - `engine` - the facade the presentation layer talks to

pub mod directory;
pub mod engine;
pub mod interest;
pub mod ledger;
pub mod settlement;

pub use directory::AccountDirectory;
pub use engine::LedgerEngine;
pub use interest::{simple_interest, InterestQuote};
pub use ledger::Ledger;
pub use settlement::{SettlementHandle, SettlementOutcome, SettlementState, SettlementTask};
