//! Username to ledger directory
//!
//! This module provides the `AccountDirectory`, which maps usernames to their
//! ledgers and PINs using a concurrent map. It is an injected service, not a
//! process-wide singleton: the engine owns one and hands ledger references to
//! whoever needs them.
//!
//! # Thread Safety
//!
//! `DashMap` gives fine-grained per-key locking, so lookups and creations for
//! different accounts never contend. The directory itself holds no ledger
//! lock; callers go through the returned `Arc<Ledger>` and its own mutex.

use crate::core::ledger::Ledger;
use crate::types::{Amount, LedgerError};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Directory entry: the account's ledger plus its PIN
///
/// The core never inspects the PIN except through [`AccountDirectory::change_pin`];
/// authentication is the presentation layer's concern.
#[derive(Debug)]
struct AccountRecord {
    ledger: Arc<Ledger>,
    pin: u32,
}

/// Concurrent map of usernames to account records
#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: DashMap<String, AccountRecord>,
}

impl AccountDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Open a new account with an opening balance and PIN
    ///
    /// # Errors
    ///
    /// - `AccountExists` if the username is already taken
    /// - `InvalidAmount` if the opening balance is negative
    pub fn create(
        &self,
        username: &str,
        pin: u32,
        initial_balance: Amount,
    ) -> Result<Arc<Ledger>, LedgerError> {
        if initial_balance < 0 {
            return Err(LedgerError::invalid_amount(initial_balance));
        }

        match self.accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Err(LedgerError::account_exists(username)),
            Entry::Vacant(vacant) => {
                let ledger = Arc::new(Ledger::new(initial_balance));
                vacant.insert(AccountRecord {
                    ledger: Arc::clone(&ledger),
                    pin,
                });
                Ok(ledger)
            }
        }
    }

    /// Resolve a username to its ledger
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if no account exists under this username.
    pub fn resolve(&self, username: &str) -> Result<Arc<Ledger>, LedgerError> {
        self.accounts
            .get(username)
            .map(|record| Arc::clone(&record.ledger))
            .ok_or_else(|| LedgerError::account_not_found(username))
    }

    /// Change an account's PIN after verifying the current one
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the username is unknown
    /// - `WrongPin` if `old_pin` does not match; the PIN is left unchanged
    pub fn change_pin(&self, username: &str, old_pin: u32, new_pin: u32) -> Result<(), LedgerError> {
        let mut record = self
            .accounts
            .get_mut(username)
            .ok_or_else(|| LedgerError::account_not_found(username))?;

        if record.pin != old_pin {
            return Err(LedgerError::wrong_pin(username));
        }
        record.pin = new_pin;
        Ok(())
    }

    /// Number of open accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the directory has no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resolve_returns_same_ledger() {
        let directory = AccountDirectory::new();

        let created = directory.create("priyanshu", 1234, 10000).unwrap();
        let resolved = directory.resolve("priyanshu").unwrap();

        assert!(Arc::ptr_eq(&created, &resolved));
        assert_eq!(resolved.balance(), 10000);
    }

    #[test]
    fn test_create_duplicate_username_is_rejected() {
        let directory = AccountDirectory::new();
        directory.create("priyanshu", 1234, 10000).unwrap();

        let result = directory.create("priyanshu", 9999, 500);

        assert_eq!(
            result.unwrap_err(),
            LedgerError::account_exists("priyanshu")
        );
        // the original account is untouched
        assert_eq!(directory.resolve("priyanshu").unwrap().balance(), 10000);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_create_rejects_negative_opening_balance() {
        let directory = AccountDirectory::new();

        let result = directory.create("priyanshu", 1234, -1);

        assert!(matches!(
            result.unwrap_err(),
            LedgerError::InvalidAmount { .. }
        ));
        assert!(directory.is_empty());
    }

    #[test]
    fn test_resolve_unknown_username() {
        let directory = AccountDirectory::new();

        let result = directory.resolve("nobody");

        assert_eq!(result.unwrap_err(), LedgerError::account_not_found("nobody"));
    }

    #[test]
    fn test_change_pin_with_correct_old_pin() {
        let directory = AccountDirectory::new();
        directory.create("priyanshu", 1234, 10000).unwrap();

        directory.change_pin("priyanshu", 1234, 4321).unwrap();

        // old PIN no longer works, new one does
        assert_eq!(
            directory.change_pin("priyanshu", 1234, 1111).unwrap_err(),
            LedgerError::wrong_pin("priyanshu")
        );
        directory.change_pin("priyanshu", 4321, 1234).unwrap();
    }

    #[test]
    fn test_change_pin_with_wrong_old_pin() {
        let directory = AccountDirectory::new();
        directory.create("priyanshu", 1234, 10000).unwrap();

        let result = directory.change_pin("priyanshu", 1111, 4321);

        assert_eq!(result.unwrap_err(), LedgerError::wrong_pin("priyanshu"));
    }

    #[test]
    fn test_ledgers_for_different_accounts_are_independent() {
        let directory = AccountDirectory::new();
        let alice = directory.create("alice", 1111, 100).unwrap();
        let bob = directory.create("bob", 2222, 200).unwrap();

        alice.deposit(50).unwrap();

        assert_eq!(alice.balance(), 150);
        assert_eq!(bob.balance(), 200);
        assert!(bob.snapshot().1.is_empty());
    }

    #[test]
    fn test_concurrent_creates_race_to_one_account() {
        use std::thread;

        let directory = Arc::new(AccountDirectory::new());
        let mut handles = vec![];

        for _ in 0..10 {
            let directory = Arc::clone(&directory);
            handles.push(thread::spawn(move || {
                // exactly one thread wins; the rest get AccountExists
                directory.create("priyanshu", 1234, 10000).is_ok()
            }));
        }

        let winners: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();

        assert_eq!(winners, 1);
        assert_eq!(directory.len(), 1);
    }
}
