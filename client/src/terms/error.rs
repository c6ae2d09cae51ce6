//! Error types for the terms parameter codec.
//!
//! The pack path and the unpack path fail in structurally different ways, so
//! they get separate enums: [`ValidationError`] for semantic violations of
//! the field invariants, [`FormatError`] for malformed wire input. Callers
//! match on variants, not message strings — with one deliberate exception
//! noted on [`FormatError::MalformedPackedWord`].

use rust_decimal::Decimal;
use thiserror::Error;

/// Semantic violations caught while packing loan terms.
///
/// Validation is ordered: the first failing check wins and nothing is
/// encoded before the whole chain passes. See
/// [`pack_parameters`](crate::terms::pack_parameters) for the order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The collateral token index is not an integer in `[0, 255]`.
    #[error("collateral token index {0} is not an integer in [0, 255]")]
    InvalidTokenIndex(Decimal),

    /// The collateral amount is below zero.
    #[error("collateral amount cannot be negative")]
    CollateralAmountIsNegative,

    /// The collateral amount does not fit the 92-bit field.
    #[error("collateral amount exceeds the maximum of 2^92 - 1")]
    CollateralAmountExceedsMaximum,

    /// A field that must be integral carries a fractional component.
    #[error("value has a fractional component where an integer is required")]
    InvalidDecimalValue,

    /// The grace period is below zero.
    #[error("grace period cannot be negative")]
    GracePeriodIsNegative,

    /// The grace period does not fit the 8-bit field.
    #[error("grace period exceeds the maximum of 255 days")]
    GracePeriodExceedsMaximum,
}

/// Malformed wire input caught while unpacking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The input is not `0x` followed by exactly 64 hexadecimal digits.
    ///
    /// The message wording is load-bearing: existing callers pattern-match
    /// on the `schema /Bytes32` fragment, so it is preserved verbatim from
    /// the original client. Do not reword it.
    #[error("Expected packedParams to conform to schema /Bytes32, got {0:?}")]
    MalformedPackedWord(String),
}
