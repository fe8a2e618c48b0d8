//! Ledger engine facade
//!
//! This module provides the `LedgerEngine`, which orchestrates the account
//! directory, the per-account ledgers, the settlement tasks, and the
//! persistence gateway behind one API. The presentation layer (CLI, GUI,
//! whatever) only ever talks to this facade.
//!
//! Every committed mutation is mirrored to the persistence sink *after* the
//! ledger lock has been released; a degraded mirror never fails, delays, or
//! rolls back the operation that triggered it.

use crate::core::directory::AccountDirectory;
use crate::core::interest::{simple_interest, InterestQuote};
use crate::core::settlement::{SettlementHandle, SettlementTask};
use crate::io::export::write_history;
use crate::persistence::PersistenceSink;
use crate::types::{Amount, LedgerError, StatementEntry};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates directory, ledgers, settlements and persistence
pub struct LedgerEngine {
    directory: AccountDirectory,
    sink: Arc<dyn PersistenceSink>,
}

impl LedgerEngine {
    /// Balance threshold below which the balance report carries an alert
    pub const LOW_BALANCE_FLOOR: Amount = 500;

    /// Number of entries in a mini statement
    pub const MINI_STATEMENT_LEN: usize = 5;

    /// Create an engine mirroring events to the given sink
    pub fn new(sink: Arc<dyn PersistenceSink>) -> Self {
        Self {
            directory: AccountDirectory::new(),
            sink,
        }
    }

    /// Open an account with an opening balance and PIN
    ///
    /// # Errors
    ///
    /// `AccountExists` for a duplicate username, `InvalidAmount` for a
    /// negative opening balance.
    pub fn open_account(
        &self,
        username: &str,
        pin: u32,
        initial_balance: Amount,
    ) -> Result<(), LedgerError> {
        self.directory.create(username, pin, initial_balance)?;
        self.sink.record(
            username,
            &format!("Account created - initial balance Rs{initial_balance}"),
        );
        Ok(())
    }

    /// Deposit into an account
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `InvalidAmount`, `Overflow`.
    pub fn deposit(&self, username: &str, amount: Amount) -> Result<StatementEntry, LedgerError> {
        let ledger = self.directory.resolve(username)?;
        let entry = ledger.deposit(amount)?;
        // mirror outside the ledger lock, best effort
        self.sink.record(username, &entry.to_string());
        Ok(entry)
    }

    /// Withdraw from an account
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `InvalidAmount`, `InsufficientFunds`.
    pub fn withdraw(&self, username: &str, amount: Amount) -> Result<StatementEntry, LedgerError> {
        let ledger = self.directory.resolve(username)?;
        let entry = ledger.withdraw(amount)?;
        self.sink.record(username, &entry.to_string());
        Ok(entry)
    }

    /// Current balance
    pub fn balance(&self, username: &str) -> Result<Amount, LedgerError> {
        Ok(self.directory.resolve(username)?.balance())
    }

    /// The last five statement entries, oldest first
    pub fn mini_statement(&self, username: &str) -> Result<Vec<StatementEntry>, LedgerError> {
        Ok(self
            .directory
            .resolve(username)?
            .recent_history(Self::MINI_STATEMENT_LEN))
    }

    /// Export the full history to a text file, one entry per line
    ///
    /// Entries are written oldest first, newline-terminated, with no header
    /// or trailing metadata. Returns the number of entries written.
    pub fn export_history(&self, username: &str, path: &Path) -> Result<usize, LedgerError> {
        let ledger = self.directory.resolve(username)?;
        let (_, history) = ledger.snapshot();
        write_history(path, &history)?;
        Ok(history.len())
    }

    /// Change an account's PIN, mirroring the event best-effort
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `WrongPin` (the PIN is left unchanged).
    pub fn change_pin(
        &self,
        username: &str,
        old_pin: u32,
        new_pin: u32,
    ) -> Result<(), LedgerError> {
        self.directory.change_pin(username, old_pin, new_pin)?;
        self.sink.update_credential(username, new_pin);
        Ok(())
    }

    /// Schedule a cheque deposit and return its settlement handle
    ///
    /// The credit is applied asynchronously after `delay`; the caller resumes
    /// immediately and may keep operating on the same account. See
    /// [`SettlementTask::schedule`] for the task's contract.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for a non-positive cheque amount, `AccountNotFound`
    /// for an unknown username. Both are rejected before anything is spawned.
    pub fn deposit_cheque(
        &self,
        username: &str,
        amount: Amount,
        delay: Duration,
    ) -> Result<SettlementHandle, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::invalid_amount(amount));
        }
        let ledger = self.directory.resolve(username)?;
        Ok(SettlementTask::schedule(
            ledger,
            amount,
            delay,
            Arc::clone(&self.sink),
            username.to_string(),
        ))
    }

    /// Simple-interest projection over the account's current balance
    ///
    /// # Errors
    ///
    /// `AccountNotFound`, `InvalidTerm` for zero years.
    pub fn interest_quote(&self, username: &str, years: u32) -> Result<InterestQuote, LedgerError> {
        let balance = self.balance(username)?;
        simple_interest(balance, years)
    }
}
