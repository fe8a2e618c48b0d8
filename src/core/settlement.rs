//! Deferred cheque settlement
//!
//! This module models a cheque deposit as a delayed, all-or-nothing credit.
//! `SettlementTask::schedule` spawns one tokio task per cheque and returns a
//! handle immediately; the caller keeps operating on the ledger while the
//! cheque clears in the background.
//!
//! # Design
//!
//! ```text
//! SettlementHandle                      spawned task
//!     ├── CancellationToken  ────────►  select! { cancelled, sleep(delay) }
//!     ├── AtomicU8 state     ◄────────  Pending → Settling → Completed/Aborted
//!     └── oneshot::Receiver  ◄────────  SettlementOutcome (sent exactly once)
//! ```
//!
//! The task holds no ledger lock during its delay; it only serializes with
//! other mutations at the moment it applies the credit. Cancellation before
//! the delay elapses means no credit at all. Once the credit is committed,
//! cancellation is a no-op. Dropping the handle does not cancel the task:
//! a received cheque clears even if nobody is watching.
//!
//! Multiple settlements for the same account run concurrently with no
//! ordering or deduplication between them; the final balance is the sum of
//! all applied credits regardless of completion order.

use crate::core::ledger::Ledger;
use crate::persistence::PersistenceSink;
use crate::types::Amount;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Lifecycle state of a settlement task
///
/// `Completed` and `Aborted` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementState {
    /// Scheduled, delay not yet elapsed
    Pending = 0,
    /// Delay elapsed, credit being applied
    Settling = 1,
    /// Credit committed to the ledger
    Completed = 2,
    /// Cancelled before commit; no credit was applied
    Aborted = 3,
}

impl SettlementState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SettlementState::Pending,
            1 => SettlementState::Settling,
            2 => SettlementState::Completed,
            _ => SettlementState::Aborted,
        }
    }
}

/// Definitive report of what a settlement task did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The credit was applied exactly once
    Completed {
        /// The cheque amount that was credited
        amount: Amount,
        /// Ledger balance immediately after the credit
        new_balance: Amount,
    },
    /// The task ended without touching the ledger
    Aborted {
        /// The cheque amount that was never credited
        amount: Amount,
    },
}

/// Observer handle for one scheduled settlement
///
/// Lets the originating caller cancel the task, poll its state, and await its
/// definitive outcome. Dropping the handle neither cancels nor blocks the
/// settlement.
#[derive(Debug)]
pub struct SettlementHandle {
    amount: Amount,
    state: Arc<AtomicU8>,
    cancel: CancellationToken,
    outcome: oneshot::Receiver<SettlementOutcome>,
}

impl SettlementHandle {
    /// Current lifecycle state (snapshot; may advance immediately after)
    pub fn state(&self) -> SettlementState {
        SettlementState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// The cheque amount this settlement was scheduled for
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Request cancellation
    ///
    /// Takes effect only if the credit has not been committed yet; after
    /// commit this is a no-op and the credit stands.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the task's definitive outcome
    ///
    /// The observer is always told whether the credit happened or not. If the
    /// task itself died without reporting, that is treated as an abort: the
    /// credit demonstrably did not complete its protocol.
    pub async fn outcome(self) -> SettlementOutcome {
        match self.outcome.await {
            Ok(outcome) => outcome,
            Err(_) => SettlementOutcome::Aborted {
                amount: self.amount,
            },
        }
    }
}

/// Factory for deferred cheque-clearing tasks
pub struct SettlementTask;

impl SettlementTask {
    /// Schedule a cheque credit and return immediately
    ///
    /// After `delay` elapses uninterrupted, the spawned task credits `ledger`
    /// exactly once via [`Ledger::clear_cheque`], mirrors a
    /// `"Cheque cleared: Rs<amount>"` record to the persistence sink (best
    /// effort), and reports `Completed`. If cancelled first, it reports
    /// `Aborted` and applies nothing; it never retries.
    ///
    /// The caller must have validated `amount > 0`; a non-positive amount is
    /// rejected by the ledger at commit time and surfaces as `Aborted`.
    ///
    /// # Arguments
    ///
    /// * `ledger` - the shared ledger to credit (not owned by the task)
    /// * `amount` - positive cheque amount
    /// * `delay` - clearing delay; no lock is held while it runs
    /// * `sink` - persistence gateway for the best-effort audit record
    /// * `account_id` - account identifier used in the audit record
    pub fn schedule(
        ledger: Arc<Ledger>,
        amount: Amount,
        delay: Duration,
        sink: Arc<dyn PersistenceSink>,
        account_id: String,
    ) -> SettlementHandle {
        let state = Arc::new(AtomicU8::new(SettlementState::Pending as u8));
        let cancel = CancellationToken::new();
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let task_state = Arc::clone(&state);
        let task_cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = task_cancel.cancelled() => {
                    task_state.store(SettlementState::Aborted as u8, Ordering::Release);
                    info!(account = %account_id, amount, "cheque settlement cancelled before clearing");
                    let _ = outcome_tx.send(SettlementOutcome::Aborted { amount });
                }
                _ = tokio::time::sleep(delay) => {
                    task_state.store(SettlementState::Settling as u8, Ordering::Release);
                    match ledger.clear_cheque(amount) {
                        Ok(entry) => {
                            // mirror after the commit, outside the ledger lock
                            sink.record(&account_id, &entry.to_string());
                            task_state.store(SettlementState::Completed as u8, Ordering::Release);
                            info!(
                                account = %account_id,
                                amount,
                                balance = entry.balance_after,
                                "cheque cleared"
                            );
                            let _ = outcome_tx.send(SettlementOutcome::Completed {
                                amount,
                                new_balance: entry.balance_after,
                            });
                        }
                        Err(error) => {
                            task_state.store(SettlementState::Aborted as u8, Ordering::Release);
                            warn!(account = %account_id, amount, %error, "cheque credit rejected");
                            let _ = outcome_tx.send(SettlementOutcome::Aborted { amount });
                        }
                    }
                }
            }
        });

        SettlementHandle {
            amount,
            state,
            cancel,
            outcome: outcome_rx,
        }
    }
}
