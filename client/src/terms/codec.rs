//! # Terms Parameter Codec
//!
//! Packs a validated [`CollateralizedTermsContractParameters`] triple into
//! the single 256-bit word the terms contract stores, and unpacks it back
//! out losslessly. Pure and synchronous — no registry, no chain, no clock.
//!
//! ## Contract
//!
//! - **Pack validates, in a fixed order.** The checks run front to back and
//!   the first failure wins; no encoding work happens until the whole chain
//!   passes. Callers relying on which error surfaces for multi-invalid
//!   input get a stable answer.
//! - **Unpack does not re-validate.** A well-formed 32-byte word always
//!   decodes to some triple. Words produced by a non-conforming encoder may
//!   carry junk in the reserved bits; those bits are simply ignored. The
//!   only unpack failure is a malformed wire string.
//! - **Round trip is exact.** `unpack(pack(p)) == p` for every valid `p`.
//!   The 92-bit amount fits comfortably inside `Decimal`'s 96-bit mantissa,
//!   so no precision is lost in either direction.

use primitive_types::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::trace;

use crate::config;
use crate::terms::error::{FormatError, ValidationError};
use crate::terms::params::{CollateralizedTermsContractParameters, PackedTermsWord};

// ---------------------------------------------------------------------------
// Pack
// ---------------------------------------------------------------------------

/// Packs loan terms into the on-chain word.
///
/// Validation order (first failing check wins):
///
/// 1. token index is an integer in `[0, 255]`, else
///    [`ValidationError::InvalidTokenIndex`]
/// 2. collateral amount is non-negative, else
///    [`ValidationError::CollateralAmountIsNegative`]
/// 3. collateral amount is integral, else
///    [`ValidationError::InvalidDecimalValue`]
/// 4. collateral amount fits 92 bits, else
///    [`ValidationError::CollateralAmountExceedsMaximum`]
/// 5. grace period is non-negative, else
///    [`ValidationError::GracePeriodIsNegative`]
/// 6. grace period is integral, else
///    [`ValidationError::InvalidDecimalValue`]
/// 7. grace period fits 8 bits, else
///    [`ValidationError::GracePeriodExceedsMaximum`]
pub fn pack_parameters(
    params: &CollateralizedTermsContractParameters,
) -> Result<PackedTermsWord, ValidationError> {
    let index = validate_token_index(params.collateral_token_index)?;
    let amount = validate_collateral_amount(params.collateral_amount)?;
    let grace = validate_grace_period(params.grace_period_in_days)?;

    let word = (U256::from(index) << config::TOKEN_INDEX_SHIFT)
        | (U256::from(amount) << config::COLLATERAL_AMOUNT_SHIFT)
        | U256::from(grace);

    trace!(index, %amount, grace, "packed terms contract parameters");
    Ok(PackedTermsWord::from_raw(word))
}

fn validate_token_index(index: Decimal) -> Result<u8, ValidationError> {
    if !index.fract().is_zero()
        || index < Decimal::ZERO
        || index > Decimal::from(config::MAX_COLLATERAL_TOKEN_INDEX)
    {
        return Err(ValidationError::InvalidTokenIndex(index));
    }
    // Integral and in [0, 255] per the checks above.
    Ok(index.to_u8().unwrap_or_default())
}

fn validate_collateral_amount(amount: Decimal) -> Result<u128, ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::CollateralAmountIsNegative);
    }
    if !amount.fract().is_zero() {
        return Err(ValidationError::InvalidDecimalValue);
    }
    // A non-negative integral Decimal always fits u128 (96-bit mantissa).
    let raw = amount
        .to_u128()
        .ok_or(ValidationError::CollateralAmountExceedsMaximum)?;
    if U256::from(raw) > config::MAX_COLLATERAL_AMOUNT {
        return Err(ValidationError::CollateralAmountExceedsMaximum);
    }
    Ok(raw)
}

fn validate_grace_period(grace: Decimal) -> Result<u8, ValidationError> {
    if grace < Decimal::ZERO {
        return Err(ValidationError::GracePeriodIsNegative);
    }
    if !grace.fract().is_zero() {
        return Err(ValidationError::InvalidDecimalValue);
    }
    if grace > Decimal::from(config::MAX_GRACE_PERIOD_DAYS) {
        return Err(ValidationError::GracePeriodExceedsMaximum);
    }
    Ok(grace.to_u8().unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Unpack
// ---------------------------------------------------------------------------

/// Unpacks an on-chain word, given in its wire rendering.
///
/// Fails only on a malformed wire string; see [`decode_word`] for the
/// decode itself.
pub fn unpack_parameters(
    word: &str,
) -> Result<CollateralizedTermsContractParameters, FormatError> {
    let word: PackedTermsWord = word.parse()?;
    Ok(decode_word(&word))
}

/// Decodes an already-parsed word into its parameter triple.
///
/// Total: every 256-bit word maps to some triple. Bits above the 108-bit
/// payload (the reserved region) are ignored.
pub fn decode_word(word: &PackedTermsWord) -> CollateralizedTermsContractParameters {
    let w = word.as_u256();

    let grace = w.low_u64() & 0xff;
    let amount = (w >> config::COLLATERAL_AMOUNT_SHIFT) & config::MAX_COLLATERAL_AMOUNT;
    let index = (w >> config::TOKEN_INDEX_SHIFT).low_u64() & 0xff;

    CollateralizedTermsContractParameters {
        collateral_token_index: Decimal::from(index),
        // Masked to 92 bits above, so this sits inside Decimal's mantissa.
        collateral_amount: Decimal::from_i128_with_scale(amount.as_u128() as i128, 0),
        grace_period_in_days: Decimal::from(grace),
    }
}
