//! # Loan Terms — Types and Codec
//!
//! The terms contract stores a loan's collateral terms as a single 32-byte
//! word. This module owns that word: the parameter types, the bit-level
//! codec, and the error taxonomy for both directions.
//!
//! Everything here is pure and synchronous. Registry lookups live in
//! [`crate::adapter`]; nothing in this module talks to the ledger.

pub mod codec;
pub mod error;
pub mod params;

pub use codec::{decode_word, pack_parameters, unpack_parameters};
pub use error::{FormatError, ValidationError};
pub use params::{CollateralizedTermsContractParameters, PackedTermsWord};
