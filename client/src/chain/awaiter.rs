//! # Transaction Awaiter
//!
//! Polls the chain client until a submitted transaction shows up in a
//! receipt, or a deadline says to stop waiting. The machinery is a small,
//! explicit state machine per invocation:
//!
//! ```text
//!              ┌──────────► Resolved   (receipt found)
//!              │
//!   Polling ───┼──────────► TimedOut   (deadline fired first)
//!              │
//!              ├──────────► Failed     (transport error on a tick)
//!              │
//!              └──────────► Cancelled  (caller aborted early)
//! ```
//!
//! ## Guarantees
//!
//! - **Exactly one terminal transition.** Transitions go through a mutex;
//!   whoever moves the state out of `Polling` first determines the outcome,
//!   and everyone else observes that and stands down.
//! - **No orphaned timers.** Every terminal path cancels the underlying
//!   timer, and the timer's own `Drop` releases its scheduler registration
//!   even if the awaiting future is dropped mid-poll.
//! - **Independent invocations.** Timer keys carry a per-call nonce, so two
//!   concurrent awaits on the same hash poll independently; neither can
//!   replace the other's timer.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::chain::client::{ChainClient, Receipt, TxHash};
use crate::chain::error::AwaitError;
use crate::chain::scheduler::{PollTimer, Scheduler, TimerEvent, TimerKey, TokioScheduler};
use crate::config;

// ---------------------------------------------------------------------------
// Options and State
// ---------------------------------------------------------------------------

/// Timing knobs for one await invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwaitOptions {
    /// Gap between receipt queries.
    pub poll_interval: Duration,
    /// Total budget before the await times out.
    pub timeout: Duration,
}

impl Default for AwaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: config::DEFAULT_POLL_INTERVAL,
            timeout: config::DEFAULT_TX_MINED_TIMEOUT,
        }
    }
}

/// Lifecycle of one await invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AwaitState {
    /// Timers armed, receipt not seen yet.
    Polling,
    /// Receipt found; the await fulfilled.
    Resolved,
    /// Deadline fired while still polling.
    TimedOut,
    /// A poll tick hit a transport error.
    Failed,
    /// The caller aborted the await early.
    Cancelled,
}

/// Shared per-invocation record: the key, the state cell, and the wakeup
/// used by [`TransactionAwaiter::cancel`].
#[derive(Debug)]
struct PollState {
    key: TimerKey,
    state: Mutex<AwaitState>,
    cancelled: Notify,
}

impl PollState {
    fn new(key: TimerKey) -> Self {
        Self {
            key,
            state: Mutex::new(AwaitState::Polling),
            cancelled: Notify::new(),
        }
    }

    /// Moves out of `Polling` into `to`. Returns whether this call won the
    /// transition; a `false` means some other path already went terminal.
    fn transition(&self, to: AwaitState) -> bool {
        let mut state = self.state.lock();
        if *state == AwaitState::Polling {
            *state = to;
            true
        } else {
            false
        }
    }

    fn current(&self) -> AwaitState {
        *self.state.lock()
    }
}

/// A caller-facing view of one outstanding await, as returned by
/// [`TransactionAwaiter::in_flight`]. Cheap to clone; used to cancel.
#[derive(Debug, Clone)]
pub struct PollHandle {
    state: Arc<PollState>,
}

impl PollHandle {
    /// The transaction hash this await polls for.
    pub fn tx_hash(&self) -> TxHash {
        self.state.key.tx_hash()
    }

    /// The invocation's current lifecycle state.
    pub fn state(&self) -> AwaitState {
        self.state.current()
    }
}

// ---------------------------------------------------------------------------
// TransactionAwaiter
// ---------------------------------------------------------------------------

/// Waits for transaction inclusion by bounded polling.
///
/// Owns its scheduler instance outright — injecting a scheduler is how the
/// test suite runs the whole state machine on a paused clock.
pub struct TransactionAwaiter<C, S = TokioScheduler> {
    client: Arc<C>,
    scheduler: S,
    in_flight: Arc<DashMap<TimerKey, Arc<PollState>>>,
}

impl<C: ChainClient> TransactionAwaiter<C> {
    /// Creates an awaiter on the ambient tokio clock.
    pub fn new(client: Arc<C>) -> Self {
        Self::with_scheduler(client, TokioScheduler::new())
    }
}

impl<C: ChainClient, S: Scheduler> TransactionAwaiter<C, S> {
    /// Creates an awaiter with an explicit scheduler instance.
    pub fn with_scheduler(client: Arc<C>, scheduler: S) -> Self {
        Self {
            client,
            scheduler,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Awaits inclusion with the default poll interval (1s) and timeout
    /// (60s).
    pub async fn await_mined(&self, tx_hash: &str) -> Result<Receipt, AwaitError> {
        self.await_mined_with(tx_hash, AwaitOptions::default()).await
    }

    /// Awaits inclusion of `tx_hash`, polling every
    /// `options.poll_interval` until a receipt appears or
    /// `options.timeout` elapses.
    ///
    /// The hash is validated synchronously: a malformed hash fails with
    /// [`AwaitError::InvalidHash`] before any timer is armed.
    pub async fn await_mined_with(
        &self,
        tx_hash: &str,
        options: AwaitOptions,
    ) -> Result<Receipt, AwaitError> {
        let hash = TxHash::from_hex(tx_hash)
            .map_err(|_| AwaitError::InvalidHash(tx_hash.to_string()))?;

        let key = TimerKey::new(hash);
        let state = Arc::new(PollState::new(key.clone()));
        self.in_flight.insert(key.clone(), Arc::clone(&state));
        let _entry = InFlightEntry {
            in_flight: Arc::clone(&self.in_flight),
            key: key.clone(),
        };

        let mut timer = self
            .scheduler
            .schedule(key, options.poll_interval, options.timeout);

        debug!(
            %hash,
            interval_ms = options.poll_interval.as_millis() as u64,
            timeout_ms = options.timeout.as_millis() as u64,
            "awaiting transaction inclusion"
        );

        loop {
            tokio::select! {
                biased;
                // Cancellation requested through `cancel()`; the state is
                // already `Cancelled` by the time the notify fires.
                _ = state.cancelled.notified() => {
                    timer.cancel();
                    return Err(AwaitError::Cancelled(hash.to_hex()));
                }
                event = timer.wait() => match event {
                    TimerEvent::Tick => {
                        match self.client.transaction_receipt(&hash).await {
                            Ok(Some(receipt)) => {
                                timer.cancel();
                                if state.transition(AwaitState::Resolved) {
                                    info!(%hash, block = receipt.block_number, "transaction mined");
                                    return Ok(receipt);
                                }
                                // Lost to a concurrent cancel.
                                return Err(AwaitError::Cancelled(hash.to_hex()));
                            }
                            Ok(None) => {
                                debug!(%hash, "transaction not yet mined");
                            }
                            Err(transport) => {
                                timer.cancel();
                                if state.transition(AwaitState::Failed) {
                                    warn!(%hash, error = %transport, "receipt query failed");
                                    return Err(AwaitError::Transport(transport));
                                }
                                return Err(AwaitError::Cancelled(hash.to_hex()));
                            }
                        }
                    }
                    TimerEvent::Deadline => {
                        timer.cancel();
                        if state.transition(AwaitState::TimedOut) {
                            warn!(%hash, "timed out awaiting transaction inclusion");
                            return Err(AwaitError::TimedOut(hash.to_hex()));
                        }
                        return Err(AwaitError::Cancelled(hash.to_hex()));
                    }
                    TimerEvent::Cancelled => {
                        state.transition(AwaitState::Cancelled);
                        return Err(AwaitError::Cancelled(hash.to_hex()));
                    }
                }
            }
        }
    }

    /// Cancels an outstanding await. The waiting caller observes
    /// [`AwaitError::Cancelled`]; the timer is released immediately.
    ///
    /// Returns `false` if the await had already reached a terminal state.
    pub fn cancel(&self, handle: &PollHandle) -> bool {
        if !handle.state.transition(AwaitState::Cancelled) {
            return false;
        }
        self.scheduler.cancel(&handle.state.key);
        // notify_one stores a permit, so a cancel landing between two polls
        // of the select is observed on the next loop iteration.
        handle.state.cancelled.notify_one();
        true
    }

    /// Handles for every await currently polling.
    pub fn in_flight(&self) -> Vec<PollHandle> {
        self.in_flight
            .iter()
            .map(|entry| PollHandle {
                state: Arc::clone(entry.value()),
            })
            .collect()
    }
}

/// Removes the in-flight record on every exit path, including a dropped
/// future.
struct InFlightEntry {
    in_flight: Arc<DashMap<TimerKey, Arc<PollState>>>,
    key: TimerKey,
}

impl Drop for InFlightEntry {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}
