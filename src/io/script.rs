//! Session script parsing
//!
//! The CLI drives the engine from a plain text script, one command per line.
//! Blank lines and lines starting with `#` are skipped. Parsing is separated
//! from execution so a malformed line can be reported and skipped without
//! stopping the session.
//!
//! # Grammar
//!
//! ```text
//! open <username> <pin> <initial-balance>
//! deposit <username> <amount>
//! withdraw <username> <amount>
//! balance <username>
//! statement <username>
//! export <username> <path>
//! cheque <username> <amount> [delay-ms]
//! cancel
//! pin <username> <old-pin> <new-pin>
//! interest <username> <years>
//! ```

use crate::types::{Amount, LedgerError};
use std::path::PathBuf;

/// One parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open an account
    Open {
        username: String,
        pin: u32,
        initial_balance: Amount,
    },
    /// Interactive deposit
    Deposit { username: String, amount: Amount },
    /// Interactive withdrawal
    Withdraw { username: String, amount: Amount },
    /// Print the balance (with a low-balance alert)
    Balance { username: String },
    /// Print the mini statement (last five entries)
    Statement { username: String },
    /// Export the full history to a file
    Export { username: String, path: PathBuf },
    /// Schedule a cheque deposit; optional per-command clearing delay
    Cheque {
        username: String,
        amount: Amount,
        delay_ms: Option<u64>,
    },
    /// Request cancellation of every settlement still outstanding
    Cancel,
    /// Change an account's PIN
    ChangePin {
        username: String,
        old_pin: u32,
        new_pin: u32,
    },
    /// Simple-interest projection over the current balance
    Interest { username: String, years: u32 },
}

/// Parse one script line
///
/// Returns `Ok(None)` for blank lines and `#` comments.
///
/// # Errors
///
/// - `InvalidAmount` when an amount token is not a whole number (the caller
///   never reaches the ledger with it)
/// - `InvalidTerm` when a years token is not a whole number
/// - `ParseError` for unknown commands, wrong arity, or bad PIN tokens
pub fn parse_line(line: &str) -> Result<Option<Command>, LedgerError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let command = match (tokens[0], &tokens[1..]) {
        ("open", [username, pin, balance]) => Command::Open {
            username: (*username).to_string(),
            pin: parse_pin(pin)?,
            initial_balance: parse_amount(balance)?,
        },
        ("deposit", [username, amount]) => Command::Deposit {
            username: (*username).to_string(),
            amount: parse_amount(amount)?,
        },
        ("withdraw", [username, amount]) => Command::Withdraw {
            username: (*username).to_string(),
            amount: parse_amount(amount)?,
        },
        ("balance", [username]) => Command::Balance {
            username: (*username).to_string(),
        },
        ("statement", [username]) => Command::Statement {
            username: (*username).to_string(),
        },
        ("export", [username, path]) => Command::Export {
            username: (*username).to_string(),
            path: PathBuf::from(path),
        },
        ("cheque", [username, amount]) => Command::Cheque {
            username: (*username).to_string(),
            amount: parse_amount(amount)?,
            delay_ms: None,
        },
        ("cheque", [username, amount, delay_ms]) => Command::Cheque {
            username: (*username).to_string(),
            amount: parse_amount(amount)?,
            delay_ms: Some(delay_ms.parse().map_err(|_| {
                LedgerError::parse_error(format!("invalid delay '{delay_ms}'"))
            })?),
        },
        ("cancel", []) => Command::Cancel,
        ("pin", [username, old_pin, new_pin]) => Command::ChangePin {
            username: (*username).to_string(),
            old_pin: parse_pin(old_pin)?,
            new_pin: parse_pin(new_pin)?,
        },
        ("interest", [username, years]) => Command::Interest {
            username: (*username).to_string(),
            years: years
                .parse()
                .map_err(|_| LedgerError::invalid_term(years))?,
        },
        (command, args) => {
            return Err(LedgerError::parse_error(format!(
                "unknown command '{command}' with {} argument(s)",
                args.len()
            )))
        }
    };

    Ok(Some(command))
}

fn parse_amount(token: &str) -> Result<Amount, LedgerError> {
    token
        .parse::<Amount>()
        .map_err(|_| LedgerError::invalid_amount(token))
}

fn parse_pin(token: &str) -> Result<u32, LedgerError> {
    token
        .parse::<u32>()
        .map_err(|_| LedgerError::parse_error(format!("invalid PIN '{token}'")))
}
