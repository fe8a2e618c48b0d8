//! Authoritative balance and history for one account
//!
//! This module provides the `Ledger` struct, the single shared mutable
//! resource of the engine. One ledger instance exists per account, and every
//! mutation on it goes through one mutex owned by that instance.
//!
//! # Design
//!
//! The interactive path (deposit, withdraw) and the deferred settlement path
//! (cheque clearing) both mutate the same ledger. Each mutation is a single
//! locked read-modify-write: the balance update and the history append happen
//! in the same critical section, so no caller can ever observe one without
//! the other. Ledgers for different accounts have independent locks and never
//! block one another.
//!
//! The lock is only held for the in-memory update. Persistence and any other
//! I/O happen outside it, at the engine boundary.

use crate::types::{Amount, LedgerError, OperationKind, StatementEntry};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Balance and history guarded by the ledger's mutex
#[derive(Debug)]
struct LedgerState {
    balance: Amount,
    history: Vec<StatementEntry>,
}

/// Authoritative state for one account
///
/// Create one per account and share it via `Arc`. All mutating operations
/// serialize through the internal mutex; reads take a consistent snapshot
/// under the same lock.
#[derive(Debug)]
pub struct Ledger {
    state: Mutex<LedgerState>,
}

impl Ledger {
    /// Create a ledger with a non-negative opening balance
    pub fn new(initial_balance: Amount) -> Self {
        debug_assert!(initial_balance >= 0, "opening balance must be non-negative");
        Ledger {
            state: Mutex::new(LedgerState {
                balance: initial_balance,
                history: Vec::new(),
            }),
        }
    }

    // Mutations cannot panic between the balance write and the history push,
    // so state behind a poisoned lock is still internally consistent.
    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Credit the account interactively
    ///
    /// Atomically increments the balance and appends a deposit entry.
    /// Always succeeds for a positive amount that does not overflow.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0` (no state change)
    /// - `Overflow` if the balance would exceed `i64::MAX` (no state change)
    pub fn deposit(&self, amount: Amount) -> Result<StatementEntry, LedgerError> {
        self.credit(amount, OperationKind::Deposit)
    }

    /// Credit the account from a cleared cheque
    ///
    /// Identical balance effect to [`deposit`](Self::deposit), but the history
    /// entry records the cheque clearing. Called exactly once by a settlement
    /// task after its delay has elapsed uninterrupted.
    pub fn clear_cheque(&self, amount: Amount) -> Result<StatementEntry, LedgerError> {
        self.credit(amount, OperationKind::ChequeClear)
    }

    fn credit(&self, amount: Amount, kind: OperationKind) -> Result<StatementEntry, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::invalid_amount(amount));
        }

        let mut state = self.lock();
        let new_balance = state
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::overflow("credit"))?;

        let entry = StatementEntry {
            seq: state.history.len() as u64,
            kind,
            amount,
            balance_after: new_balance,
        };
        state.balance = new_balance;
        state.history.push(entry.clone());
        Ok(entry)
    }

    /// Debit the account
    ///
    /// Atomically decrements the balance and appends a withdrawal entry.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0` (no state change)
    /// - `InsufficientFunds` if `amount > balance` (no state change; the
    ///   balance can never go negative)
    pub fn withdraw(&self, amount: Amount) -> Result<StatementEntry, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::invalid_amount(amount));
        }

        let mut state = self.lock();
        if amount > state.balance {
            return Err(LedgerError::insufficient_funds(state.balance, amount));
        }

        let new_balance = state.balance - amount;
        let entry = StatementEntry {
            seq: state.history.len() as u64,
            kind: OperationKind::Withdraw,
            amount,
            balance_after: new_balance,
        };
        state.balance = new_balance;
        state.history.push(entry.clone());
        Ok(entry)
    }

    /// Current balance
    pub fn balance(&self) -> Amount {
        self.lock().balance
    }

    /// Consistent copy of balance and full history
    ///
    /// Taken under the ledger lock, so the snapshot never reflects a
    /// half-applied mutation: the balance always matches the last history
    /// entry's `balance_after` (or the opening balance if history is empty).
    pub fn snapshot(&self) -> (Amount, Vec<StatementEntry>) {
        let state = self.lock();
        (state.balance, state.history.clone())
    }

    /// The last `n` entries in chronological order
    ///
    /// Returns fewer entries if the history is shorter. The underlying
    /// history is not truncated or mutated.
    pub fn recent_history(&self, n: usize) -> Vec<StatementEntry> {
        let state = self.lock();
        let start = state.history.len().saturating_sub(n);
        state.history[start..].to_vec()
    }
}
