//! Ledger engine CLI
//!
//! Executes a banking session script against the ledger engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- session.txt
//! cargo run -- --store events.jsonl session.txt
//! cargo run -- --cheque-delay-ms 500 session.txt
//! ```
//!
//! The program reads commands from the script file (one per line), executes
//! them against a fresh engine, prints each outcome, and waits for all
//! outstanding cheque settlements before exiting.
//!
//! Malformed lines and recoverable operation errors (insufficient funds,
//! unknown account, invalid amounts) are reported to stderr and the session
//! continues. Only fatal errors (unreadable script) terminate the run.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (script not found or not readable)

use atm_ledger::cli::{self, CliArgs};
use atm_ledger::io::script::{parse_line, Command};
use atm_ledger::persistence::{JsonLineStore, PersistenceSink, UnavailableStore};
use atm_ledger::{LedgerEngine, LedgerError, SettlementHandle, SettlementOutcome};
use std::fs;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = cli::parse_args();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), LedgerError> {
    // Omitting --store models the external store being down: every mirror
    // write degrades and the session keeps working off in-memory state.
    let sink: Arc<dyn PersistenceSink> = match &args.store {
        Some(path) => Arc::new(JsonLineStore::new(path.clone())),
        None => Arc::new(UnavailableStore),
    };
    let engine = LedgerEngine::new(sink);

    let script = fs::read_to_string(&args.script)?;
    let default_delay = Duration::from_millis(args.cheque_delay_ms);
    let mut pending: Vec<SettlementHandle> = Vec::new();

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("line {line_no}: {e}");
                continue;
            }
        };
        if let Err(e) = execute(&engine, command, default_delay, &mut pending) {
            eprintln!("line {line_no}: {e}");
        }
    }

    // Every scheduled cheque gets a definitive outcome before exit.
    let outcomes =
        futures::future::join_all(pending.into_iter().map(SettlementHandle::outcome)).await;
    for outcome in outcomes {
        match outcome {
            SettlementOutcome::Completed {
                amount,
                new_balance,
            } => println!("Cheque of Rs{amount} cleared (Balance: Rs{new_balance})"),
            SettlementOutcome::Aborted { amount } => {
                println!("{}", LedgerError::settlement_aborted(amount))
            }
        }
    }

    Ok(())
}

fn execute(
    engine: &LedgerEngine,
    command: Command,
    default_delay: Duration,
    pending: &mut Vec<SettlementHandle>,
) -> Result<(), LedgerError> {
    match command {
        Command::Open {
            username,
            pin,
            initial_balance,
        } => {
            engine.open_account(&username, pin, initial_balance)?;
            println!("Account created for {username} with balance Rs{initial_balance}");
        }
        Command::Deposit { username, amount } => {
            let entry = engine.deposit(&username, amount)?;
            println!("{entry}");
        }
        Command::Withdraw { username, amount } => {
            let entry = engine.withdraw(&username, amount)?;
            println!("{entry}");
        }
        Command::Balance { username } => {
            let balance = engine.balance(&username)?;
            println!("Your balance is Rs{balance}");
            if balance < LedgerEngine::LOW_BALANCE_FLOOR {
                println!(
                    "Alert: Balance below Rs{}!",
                    LedgerEngine::LOW_BALANCE_FLOOR
                );
            }
        }
        Command::Statement { username } => {
            let entries = engine.mini_statement(&username)?;
            if entries.is_empty() {
                println!("No transactions yet.");
            } else {
                println!("Last {} transactions:", entries.len());
                for entry in &entries {
                    println!("{entry}");
                }
            }
        }
        Command::Export { username, path } => {
            let count = engine.export_history(&username, &path)?;
            println!("Exported {count} entries to {}", path.display());
        }
        Command::Cheque {
            username,
            amount,
            delay_ms,
        } => {
            let delay = delay_ms.map(Duration::from_millis).unwrap_or(default_delay);
            let handle = engine.deposit_cheque(&username, amount, delay)?;
            println!("Cheque of Rs{amount} received. Clearing in background...");
            pending.push(handle);
        }
        Command::Cancel => {
            // no-op for settlements that have already committed
            for handle in pending.iter() {
                handle.cancel();
            }
            println!(
                "Requested cancellation of {} outstanding settlement(s)",
                pending.len()
            );
        }
        Command::ChangePin {
            username,
            old_pin,
            new_pin,
        } => {
            engine.change_pin(&username, old_pin, new_pin)?;
            println!("PIN updated.");
        }
        Command::Interest { username, years } => {
            let quote = engine.interest_quote(&username, years)?;
            println!("{quote}");
        }
    }
    Ok(())
}
