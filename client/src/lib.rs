// Copyright (c) 2026 Covenant Labs. MIT License.
// See LICENSE for details.

//! # Covenant Client — Core Library
//!
//! A client library for constructing, encoding, and tracking loan
//! agreements recorded on a distributed ledger. The interesting
//! engineering lives in two places: a bit-exact codec that packs a loan's
//! collateral terms into the single 32-byte word the terms contract
//! stores, and a bounded polling state machine that waits for transaction
//! inclusion under a deadline without ever leaking a timer.
//!
//! ## Architecture
//!
//! The modules follow the data flow, leaves first:
//!
//! - **config** — Protocol constants: bit layout, field maxima, poll
//!   defaults. The wire format is consensus-adjacent; it all lives here.
//! - **terms** — The terms parameter codec. Pure, synchronous, validates
//!   on pack, total on unpack.
//! - **registry** — The token registry boundary: symbols in, indices out,
//!   and back. Resolution logic belongs to the collaborator behind it.
//! - **adapter** — Translates human-level loan orders to codec-level
//!   parameters and back, via the registry.
//! - **chain** — The chain client boundary, the scheduler abstraction,
//!   and the transaction awaiter.
//!
//! ## Design Philosophy
//!
//! 1. Validate early, encode late: nothing touches the wire until the
//!    whole parameter triple has passed the codec's checks.
//! 2. Errors are variants, not strings. Callers match exhaustively; the
//!    single legacy message preserved for compatibility is called out
//!    where it lives.
//! 3. Time is injected. The awaiter runs on a scheduler instance it owns,
//!    so every timing test runs on a paused clock, not `sleep()` and hope.

pub mod adapter;
pub mod chain;
pub mod config;
pub mod registry;
pub mod terms;

pub use adapter::{
    AdapterError, AmortizationUnit, CollateralizedLoanTermsAdapter,
    CollateralizedSimpleInterestLoanOrder, SimpleInterestLoanOrder,
};
pub use chain::{
    AwaitError, AwaitOptions, AwaitState, ChainClient, PollHandle, Receipt, ReceiptStatus,
    Scheduler, TokioScheduler, TransactionAwaiter, TransportError, TxHash,
};
pub use registry::{InMemoryTokenRegistry, RegistryError, TokenEntry, TokenRegistry};
pub use terms::{
    pack_parameters, unpack_parameters, CollateralizedTermsContractParameters, FormatError,
    PackedTermsWord, ValidationError,
};
