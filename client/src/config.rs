//! # Protocol Constants
//!
//! Every magic number in the Covenant client lives here. The bit-layout
//! constants below are consensus-adjacent: they describe a wire format that
//! existing on-chain consumers already parse, so changing any of them is not
//! a refactor, it's a fork of the terms-word schema.

use primitive_types::U256;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Packed Terms Word Layout
// ---------------------------------------------------------------------------
//
//   msb                                                                  lsb
//   ┌────────────────────┬───────────┬──────────────────────┬─────────────┐
//   │ reserved (148 bit) │ token idx │ collateral amount    │ grace days  │
//   │ always zero        │ (8 bit)   │ (92 bit)             │ (8 bit)     │
//   └────────────────────┴───────────┴──────────────────────┴─────────────┘

/// Width of the packed word when rendered as hex: 32 bytes, 64 digits.
pub const PACKED_WORD_HEX_DIGITS: usize = 64;

/// Width of the collateral amount field, in bits.
pub const COLLATERAL_AMOUNT_BITS: u32 = 92;

/// Left shift applied to the collateral amount when packing. The amount sits
/// directly above the grace period byte.
pub const COLLATERAL_AMOUNT_SHIFT: usize = 8;

/// Left shift applied to the collateral token index when packing. The index
/// sits above the 92-bit amount field.
pub const TOKEN_INDEX_SHIFT: usize = 100;

/// Largest collateral amount the 92-bit field can hold: 2^92 - 1.
///
/// Expressed in little-endian 64-bit limbs: the low limb is saturated, the
/// second limb carries the remaining 28 bits.
pub const MAX_COLLATERAL_AMOUNT: U256 = U256([u64::MAX, 0x0FFF_FFFF, 0, 0]);

/// Largest token index addressable by the 8-bit field.
pub const MAX_COLLATERAL_TOKEN_INDEX: u32 = 255;

/// Largest grace period the 8-bit field can hold, in days.
pub const MAX_GRACE_PERIOD_DAYS: u32 = 255;

// ---------------------------------------------------------------------------
// Transaction Hashes
// ---------------------------------------------------------------------------

/// Length of a transaction hash, in bytes.
pub const TX_HASH_BYTES: usize = 32;

// ---------------------------------------------------------------------------
// Transaction Awaiter Defaults
// ---------------------------------------------------------------------------

/// How often the awaiter asks the chain client for a receipt. One second is
/// well under typical block times, so a freshly mined transaction is picked
/// up within a single block interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// How long the awaiter keeps polling before giving up on a transaction.
pub const DEFAULT_TX_MINED_TIMEOUT: Duration = Duration::from_millis(60_000);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_collateral_amount_is_92_bits() {
        let expected = (U256::one() << COLLATERAL_AMOUNT_BITS) - U256::one();
        assert_eq!(MAX_COLLATERAL_AMOUNT, expected);
    }

    #[test]
    fn field_layout_covers_the_low_108_bits() {
        assert_eq!(
            COLLATERAL_AMOUNT_SHIFT + COLLATERAL_AMOUNT_BITS as usize,
            TOKEN_INDEX_SHIFT
        );
        assert_eq!(TOKEN_INDEX_SHIFT + 8, 108);
    }
}
