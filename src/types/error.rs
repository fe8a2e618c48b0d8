//! Error types for the ledger engine
//!
//! This module defines all error conditions that ledger operations can
//! surface to their callers.
//!
//! # Error Categories
//!
//! - **Validation errors**: non-positive or unparseable amounts, invalid years
//! - **Ledger errors**: insufficient funds (the balance is left untouched)
//! - **Directory errors**: unknown or duplicate accounts, wrong PIN
//! - **Settlement errors**: a cheque credit cancelled before it committed
//! - **I/O and parse errors**: export failures, malformed script lines
//!
//! Degraded persistence is deliberately *not* represented here: a failed
//! external-store write is an observability event, never an error of the
//! ledger operation that triggered it.

use thiserror::Error;

/// Main error type for the ledger engine
///
/// Every variant is recoverable at the boundary that invoked the operation;
/// none of them leaves the ledger in a partially-mutated state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount is non-positive or failed to parse as a whole number
    ///
    /// Rejected before any state changes.
    #[error("Invalid amount '{amount}': must be a positive whole number")]
    InvalidAmount {
        /// The offending amount as written by the caller
        amount: String,
    },

    /// Withdrawal amount exceeds the current balance
    ///
    /// Balance and history are left unchanged.
    #[error("Insufficient balance: available Rs{available}, requested Rs{requested}")]
    InsufficientFunds {
        /// Balance at the time of the attempt
        available: i64,
        /// Requested withdrawal amount
        requested: i64,
    },

    /// Directory lookup miss
    #[error("Account not found: {username}")]
    AccountNotFound {
        /// The username that was looked up
        username: String,
    },

    /// An account with this username already exists
    #[error("Account already exists: {username}")]
    AccountExists {
        /// The username that was already taken
        username: String,
    },

    /// PIN verification failed for a credential change
    #[error("Incorrect PIN for {username}")]
    WrongPin {
        /// The account whose PIN check failed
        username: String,
    },

    /// A scheduled cheque credit was cancelled before it committed
    ///
    /// The ledger was not mutated; the cheque amount was never applied.
    #[error("Cheque settlement of Rs{amount} was cancelled before clearing")]
    SettlementAborted {
        /// The cheque amount that was never credited
        amount: i64,
    },

    /// Years argument for the interest calculator is invalid
    #[error("Invalid years '{years}': must be a positive whole number")]
    InvalidTerm {
        /// The offending years value as written by the caller
        years: String,
    },

    /// Balance arithmetic would overflow
    ///
    /// The mutation is rejected to keep the ledger consistent.
    #[error("Arithmetic overflow in {operation}")]
    Overflow {
        /// The operation that would overflow
        operation: String,
    },

    /// A session script line could not be understood
    #[error("Parse error: {message}")]
    ParseError {
        /// Description of what was wrong with the line
        message: String,
    },

    /// I/O error while exporting history or reading a script
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: i64, requested: i64) -> Self {
        LedgerError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(username: &str) -> Self {
        LedgerError::AccountNotFound {
            username: username.to_string(),
        }
    }

    /// Create an AccountExists error
    pub fn account_exists(username: &str) -> Self {
        LedgerError::AccountExists {
            username: username.to_string(),
        }
    }

    /// Create a WrongPin error
    pub fn wrong_pin(username: &str) -> Self {
        LedgerError::WrongPin {
            username: username.to_string(),
        }
    }

    /// Create a SettlementAborted error
    pub fn settlement_aborted(amount: i64) -> Self {
        LedgerError::SettlementAborted { amount }
    }

    /// Create an InvalidTerm error
    pub fn invalid_term(years: impl ToString) -> Self {
        LedgerError::InvalidTerm {
            years: years.to_string(),
        }
    }

    /// Create an Overflow error
    pub fn overflow(operation: &str) -> Self {
        LedgerError::Overflow {
            operation: operation.to_string(),
        }
    }

    /// Create a ParseError
    pub fn parse_error(message: impl ToString) -> Self {
        LedgerError::ParseError {
            message: message.to_string(),
        }
    }
}
