//! Statement history types
//!
//! This module defines the immutable statement entries that make up an
//! account's transaction history, and the operation kinds they describe.

use serde::Serialize;
use std::fmt;

/// Whole-rupee amount used throughout the ledger
///
/// The ledger works in whole currency units only; fractional amounts never
/// enter the balance or the history.
pub type Amount = i64;

/// The kind of mutation a statement entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperationKind {
    /// Interactive credit
    Deposit,
    /// Interactive debit
    Withdraw,
    /// Deferred credit applied by a settlement task after the cheque cleared
    ChequeClear,
}

/// One immutable line of an account's history
///
/// Entries are appended by the ledger under its own lock and never modified
/// afterwards. `seq` is the creation order within the ledger: the mini
/// statement is the highest-`seq` suffix, the full export is all entries in
/// ascending `seq` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementEntry {
    /// Creation order within the owning ledger (0-based)
    pub seq: u64,

    /// What kind of mutation this entry records
    pub kind: OperationKind,

    /// The amount that was credited or debited
    pub amount: Amount,

    /// The balance immediately after this mutation was applied
    pub balance_after: Amount,
}

impl fmt::Display for StatementEntry {
    /// Render the entry in the statement line format
    ///
    /// - `Deposited Rs<amount> (Balance: Rs<balance>)`
    /// - `Withdrew Rs<amount> (Balance: Rs<balance>)`
    /// - `Cheque cleared: Rs<amount>`
    ///
    /// The same text is handed to the persistence gateway as the event
    /// description, so display and audit mirror stay consistent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OperationKind::Deposit => write!(
                f,
                "Deposited Rs{} (Balance: Rs{})",
                self.amount, self.balance_after
            ),
            OperationKind::Withdraw => write!(
                f,
                "Withdrew Rs{} (Balance: Rs{})",
                self.amount, self.balance_after
            ),
            OperationKind::ChequeClear => write!(f, "Cheque cleared: Rs{}", self.amount),
        }
    }
}
