//! Error types for the chain-facing half of the crate.

use thiserror::Error;

/// Failures raised by the chain client transport.
///
/// The awaiter never retries these: a transport error on any poll tick is
/// terminal for that await, independent of the remaining timeout budget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The ledger node answered with an RPC-level error.
    #[error("ledger rpc error: {0}")]
    Rpc(String),

    /// The connection to the ledger node was lost or refused.
    #[error("connection to ledger node failed: {0}")]
    Connection(String),
}

/// Terminal outcomes of awaiting a transaction, minus success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AwaitError {
    /// The supplied hash is not `0x` + 64 hex digits. Raised synchronously,
    /// before any timer exists.
    #[error("transaction hash {0:?} is not a well-formed 32-byte hash")]
    InvalidHash(String),

    /// The deadline fired before a receipt appeared.
    #[error("timeout exceeded awaiting mining of transaction with hash {0}")]
    TimedOut(String),

    /// A poll tick hit a transport failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The await was cancelled before reaching any other terminal state.
    #[error("await for transaction {0} was cancelled")]
    Cancelled(String),
}
