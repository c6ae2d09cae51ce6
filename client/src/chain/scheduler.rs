//! # Scheduler Abstraction
//!
//! The awaiter needs two timers per invocation: a repeating poll tick and a
//! one-shot deadline. It gets them from a [`Scheduler`] rather than calling
//! `tokio::time` directly, for two reasons:
//!
//! - **Ownership.** Every awaiter instance owns its own scheduler. There is
//!   no process-wide timer registry; tests inject whatever timing they want.
//! - **Per-call keys.** Each `await_mined` invocation schedules under a key
//!   made of the transaction hash plus a fresh UUID. Two concurrent awaits
//!   on the same hash therefore own independent timers — scheduling a
//!   second one never replaces the first.
//!
//! A scheduled timer is a single object yielding [`TimerEvent`]s. Merging
//! the tick and deadline into one `wait()` keeps the firing order
//! deterministic: cancellation is observed first, then the deadline, then a
//! tick. On an exact tick/deadline tie, the deadline wins.

use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior, Sleep};
use uuid::Uuid;

use crate::chain::client::TxHash;

// ---------------------------------------------------------------------------
// Keys and Events
// ---------------------------------------------------------------------------

/// Identifies one timer: the awaited transaction plus a per-invocation
/// nonce, so concurrent awaits on the same hash never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerKey {
    hash: TxHash,
    invocation: Uuid,
}

impl TimerKey {
    /// Creates a fresh key for one await invocation.
    pub fn new(hash: TxHash) -> Self {
        Self {
            hash,
            invocation: Uuid::new_v4(),
        }
    }

    /// The transaction hash this timer polls for.
    pub fn tx_hash(&self) -> TxHash {
        self.hash
    }
}

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.hash, self.invocation)
    }
}

/// What a timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The repeating poll interval elapsed.
    Tick,
    /// The one-shot deadline elapsed. Fires at most once.
    Deadline,
    /// The timer was cancelled out from under the waiter.
    Cancelled,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// One armed timer: a repeating tick plus a one-shot deadline.
#[async_trait]
pub trait PollTimer: Send {
    /// Waits for the next event. After cancellation, always returns
    /// [`TimerEvent::Cancelled`] immediately.
    async fn wait(&mut self) -> TimerEvent;

    /// Stops the timer and releases its scheduler registration. Idempotent.
    fn cancel(&mut self);
}

/// Hands out keyed timers. One instance per awaiter — never shared
/// process-wide state.
pub trait Scheduler: Send + Sync {
    type Timer: PollTimer;

    /// Arms a timer: repeating ticks every `interval`, one deadline after
    /// `deadline`. The first tick fires one full interval after arming.
    fn schedule(&self, key: TimerKey, interval: Duration, deadline: Duration) -> Self::Timer;

    /// Cancels the timer registered under `key`, if any. Returns whether a
    /// live timer was found.
    fn cancel(&self, key: &TimerKey) -> bool;
}

// ---------------------------------------------------------------------------
// Tokio implementation
// ---------------------------------------------------------------------------

/// [`Scheduler`] backed by `tokio::time`. Runs against the ambient runtime
/// clock, which makes it deterministic under `tokio::time::pause` in tests.
#[derive(Debug, Clone, Default)]
pub struct TokioScheduler {
    registry: Arc<DashMap<TimerKey, watch::Sender<bool>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently armed timers.
    pub fn active(&self) -> usize {
        self.registry.len()
    }
}

impl Scheduler for TokioScheduler {
    type Timer = TokioPollTimer;

    fn schedule(&self, key: TimerKey, interval: Duration, deadline: Duration) -> TokioPollTimer {
        let (tx, rx) = watch::channel(false);
        self.registry.insert(key.clone(), tx);

        // First tick one interval from now, mirroring setInterval semantics:
        // the awaiter never polls at t=0.
        let mut ticks = interval_at(Instant::now() + interval, interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        TokioPollTimer {
            ticks,
            deadline: Box::pin(tokio::time::sleep(deadline)),
            cancelled: rx,
            registry: Arc::clone(&self.registry),
            key,
            finished: false,
        }
    }

    fn cancel(&self, key: &TimerKey) -> bool {
        match self.registry.remove(key) {
            Some((_, tx)) => {
                let _ = tx.send(true);
                true
            }
            None => false,
        }
    }
}

/// Timer handed out by [`TokioScheduler`].
pub struct TokioPollTimer {
    ticks: Interval,
    deadline: Pin<Box<Sleep>>,
    cancelled: watch::Receiver<bool>,
    registry: Arc<DashMap<TimerKey, watch::Sender<bool>>>,
    key: TimerKey,
    finished: bool,
}

#[async_trait]
impl PollTimer for TokioPollTimer {
    async fn wait(&mut self) -> TimerEvent {
        if self.finished || *self.cancelled.borrow() {
            return TimerEvent::Cancelled;
        }

        // Biased so the firing order is deterministic: a cancellation beats
        // anything else, and the deadline beats a tick landing on the same
        // instant.
        tokio::select! {
            biased;
            _ = self.cancelled.changed() => TimerEvent::Cancelled,
            _ = self.deadline.as_mut() => TimerEvent::Deadline,
            _ = self.ticks.tick() => TimerEvent::Tick,
        }
    }

    fn cancel(&mut self) {
        self.finished = true;
        self.registry.remove(&self.key);
    }
}

impl Drop for TokioPollTimer {
    // A dropped waiter must not leave its registration behind.
    fn drop(&mut self) {
        self.registry.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> TimerKey {
        TimerKey::new(TxHash::from_bytes([7u8; 32]))
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_fires_one_interval_after_arming() {
        let scheduler = TokioScheduler::new();
        let mut timer = scheduler.schedule(key(), Duration::from_millis(100), Duration::from_secs(10));

        let start = Instant::now();
        assert_eq!(timer.wait().await, TimerEvent::Tick);
        assert_eq!(start.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_repeat_until_the_deadline_fires() {
        let scheduler = TokioScheduler::new();
        let mut timer =
            scheduler.schedule(key(), Duration::from_millis(100), Duration::from_millis(350));

        assert_eq!(timer.wait().await, TimerEvent::Tick);
        assert_eq!(timer.wait().await, TimerEvent::Tick);
        assert_eq!(timer.wait().await, TimerEvent::Tick);
        assert_eq!(timer.wait().await, TimerEvent::Deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_wins_an_exact_tie_with_a_tick() {
        let scheduler = TokioScheduler::new();
        let mut timer =
            scheduler.schedule(key(), Duration::from_millis(100), Duration::from_millis(200));

        assert_eq!(timer.wait().await, TimerEvent::Tick);
        // t = 200ms: tick and deadline land together; the deadline wins.
        assert_eq!(timer.wait().await, TimerEvent::Deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_cancel_wakes_the_waiter() {
        let scheduler = TokioScheduler::new();
        let k = key();
        let mut timer =
            scheduler.schedule(k.clone(), Duration::from_secs(5), Duration::from_secs(60));

        assert!(scheduler.cancel(&k));
        assert_eq!(timer.wait().await, TimerEvent::Cancelled);
        assert_eq!(scheduler.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_sticky_and_idempotent() {
        let scheduler = TokioScheduler::new();
        let k = key();
        let mut timer =
            scheduler.schedule(k.clone(), Duration::from_millis(10), Duration::from_secs(60));

        timer.cancel();
        timer.cancel();
        assert_eq!(timer.wait().await, TimerEvent::Cancelled);
        assert_eq!(timer.wait().await, TimerEvent::Cancelled);
        assert!(!scheduler.cancel(&k));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_timer_releases_its_registration() {
        let scheduler = TokioScheduler::new();
        let timer = scheduler.schedule(key(), Duration::from_secs(1), Duration::from_secs(60));
        assert_eq!(scheduler.active(), 1);
        drop(timer);
        assert_eq!(scheduler.active(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn same_hash_keys_do_not_collide() {
        let scheduler = TokioScheduler::new();
        let hash = TxHash::from_bytes([9u8; 32]);
        let _a = scheduler.schedule(
            TimerKey::new(hash),
            Duration::from_secs(1),
            Duration::from_secs(60),
        );
        let _b = scheduler.schedule(
            TimerKey::new(hash),
            Duration::from_secs(1),
            Duration::from_secs(60),
        );
        assert_eq!(scheduler.active(), 2);
    }
}
