//! # Terms Contract Parameter Types
//!
//! Two representations of the same loan terms, at two altitudes:
//!
//! - [`CollateralizedTermsContractParameters`] — the human-adjacent triple
//!   (token index, collateral amount, grace period) as arbitrary decimals.
//!   Deliberately loose: fields can hold negative or fractional values so
//!   that the codec can reject them with a precise error instead of the
//!   type system silently truncating them first.
//! - [`PackedTermsWord`] — the 32-byte big-endian word the ledger actually
//!   stores, rendered on the wire as `0x` + 64 lowercase hex digits.
//!
//! The codec in [`crate::terms::codec`] converts between the two.

use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::terms::error::FormatError;

// ---------------------------------------------------------------------------
// CollateralizedTermsContractParameters
// ---------------------------------------------------------------------------

/// The collateral-related terms of a loan, before packing.
///
/// Immutable once constructed; the codec never mutates it and the adapter
/// produces a fresh value per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralizedTermsContractParameters {
    /// Index of the collateral token in the external token registry.
    /// Valid range: integers in `[0, 255]`.
    pub collateral_token_index: Decimal,

    /// Amount of collateral, in the token's base units.
    /// Valid range: integers in `[0, 2^92 - 1]`.
    pub collateral_amount: Decimal,

    /// Days past maturity before the loan is considered in default.
    /// Valid range: integers in `[0, 255]`.
    pub grace_period_in_days: Decimal,
}

impl CollateralizedTermsContractParameters {
    /// Builds parameters from values that are integral by construction.
    ///
    /// This does not validate the collateral amount against the 92-bit
    /// ceiling — that check belongs to the codec.
    pub fn new(token_index: u32, collateral_amount: Decimal, grace_period_in_days: u32) -> Self {
        Self {
            collateral_token_index: Decimal::from(token_index),
            collateral_amount,
            grace_period_in_days: Decimal::from(grace_period_in_days),
        }
    }
}

// ---------------------------------------------------------------------------
// PackedTermsWord
// ---------------------------------------------------------------------------

/// The 32-byte on-chain encoding of [`CollateralizedTermsContractParameters`].
///
/// Wire format: a `0x`-prefixed string of exactly 64 lowercase hex digits,
/// interpreted as a big-endian unsigned 256-bit integer. This exact rendering
/// is consumed by deployed contracts, so [`fmt::Display`] reproduces it
/// bit-for-bit: lowercase, zero-left-padded, prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedTermsWord(U256);

impl PackedTermsWord {
    /// Wraps a raw 256-bit word without inspecting it.
    pub fn from_raw(word: U256) -> Self {
        Self(word)
    }

    /// Returns the underlying 256-bit integer.
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for PackedTermsWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Padded by hand: the word must render to exactly 64 digits and the
        // underlying integer type's hex formatting strips leading zeros.
        let digits = format!("{:x}", self.0);
        write!(
            f,
            "0x{}{}",
            "0".repeat(config::PACKED_WORD_HEX_DIGITS - digits.len()),
            digits
        )
    }
}

impl FromStr for PackedTermsWord {
    type Err = FormatError;

    /// Parses the wire format. Anything other than `0x` + 64 hex digits is
    /// rejected with [`FormatError::MalformedPackedWord`]; the content of a
    /// well-formed word is never re-validated (decode is total).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || FormatError::MalformedPackedWord(s.to_string());

        let digits = s.strip_prefix("0x").ok_or_else(malformed)?;
        if digits.len() != config::PACKED_WORD_HEX_DIGITS {
            return Err(malformed());
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        // Length and character set are checked above, so this cannot fail.
        let word = U256::from_str_radix(digits, 16).map_err(|_| malformed())?;
        Ok(Self(word))
    }
}

impl Serialize for PackedTermsWord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PackedTermsWord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_prefixed_lowercase_and_padded() {
        let word = PackedTermsWord::from_raw(U256::from(0xABCDu64));
        let rendered = word.to_string();
        assert_eq!(rendered.len(), 66);
        assert!(rendered.starts_with("0x"));
        assert!(rendered.ends_with("abcd"));
        assert_eq!(&rendered[2..62], "0".repeat(60));
    }

    #[test]
    fn wire_format_round_trips() {
        let word = PackedTermsWord::from_raw(U256::from(123_456_789u64));
        let parsed: PackedTermsWord = word.to_string().parse().unwrap();
        assert_eq!(parsed, word);
    }

    #[test]
    fn uppercase_input_parses() {
        let parsed: PackedTermsWord = format!("0x{}", "A".repeat(64)).parse().unwrap();
        let reference: PackedTermsWord = format!("0x{}", "a".repeat(64)).parse().unwrap();
        assert_eq!(parsed, reference);
    }

    #[test]
    fn missing_prefix_is_rejected() {
        let err = "f".repeat(66).parse::<PackedTermsWord>().unwrap_err();
        assert!(matches!(err, FormatError::MalformedPackedWord(_)));
    }

    #[test]
    fn serde_uses_the_wire_format() {
        let word = PackedTermsWord::from_raw(U256::from(5u64));
        let json = serde_json::to_string(&word).unwrap();
        assert_eq!(json, format!("\"0x{}5\"", "0".repeat(63)));
        let back: PackedTermsWord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, word);
    }
}
