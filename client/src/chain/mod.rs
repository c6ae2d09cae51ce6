//! # Chain-Facing Machinery
//!
//! Everything that deals with the ledger after a transaction leaves the
//! caller's hands: the chain client boundary, the scheduler abstraction,
//! and the transaction awaiter built on top of both.
//!
//! Submitting transactions is out of scope — contract wrappers do that.
//! This module picks up at the transaction hash and ends at the receipt.

pub mod awaiter;
pub mod client;
pub mod error;
pub mod scheduler;

pub use awaiter::{AwaitOptions, AwaitState, PollHandle, TransactionAwaiter};
pub use client::{ChainClient, Receipt, ReceiptStatus, TxHash};
pub use error::{AwaitError, TransportError};
pub use scheduler::{PollTimer, Scheduler, TimerEvent, TimerKey, TokioScheduler};
