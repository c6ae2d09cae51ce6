//! # Chain Client Boundary
//!
//! Read access to ledger state, reduced to the one question the awaiter
//! asks: "has this transaction been included yet?" Implementations front a
//! JSON-RPC node, a light client, whatever — the transport is not this
//! crate's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chain::error::TransportError;
use crate::config;

// ---------------------------------------------------------------------------
// TxHash
// ---------------------------------------------------------------------------

/// A 32-byte transaction hash.
///
/// Wire rendering is `0x` + 64 lowercase hex digits; parsing accepts mixed
/// case but requires the prefix and the exact length.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash([u8; 32]);

impl TxHash {
    /// Creates a hash from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parses the `0x`-prefixed hex rendering.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let digits = s
            .strip_prefix("0x")
            .ok_or(hex::FromHexError::InvalidStringLength)?;
        if digits.len() != config::TX_HASH_BYTES * 2 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let bytes = hex::decode(digits)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Returns the `0x`-prefixed hex rendering.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Receipt
// ---------------------------------------------------------------------------

/// Execution outcome recorded in a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// The transaction executed successfully.
    Succeeded,
    /// The transaction was included but its execution reverted.
    Reverted,
}

/// Confirmation record returned once a transaction is included in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Hash of the included transaction.
    pub transaction_hash: TxHash,
    /// Hash of the including block, hex-encoded.
    pub block_hash: String,
    /// Height of the including block.
    pub block_number: u64,
    /// Position of the transaction within the block.
    pub transaction_index: u32,
    /// Execution outcome.
    pub status: ReceiptStatus,
    /// Gas consumed by the transaction.
    pub gas_used: u64,
}

// ---------------------------------------------------------------------------
// ChainClient
// ---------------------------------------------------------------------------

/// External collaborator providing read access to ledger state.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetches the receipt for a transaction, or `None` while it is still
    /// pending. Transport failures surface as errors; "not mined yet" is
    /// not an error.
    async fn transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<Option<Receipt>, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf271a69125d5dfcb7b8c26590";

    #[test]
    fn hash_hex_round_trips() {
        let hash = TxHash::from_hex(HASH).unwrap();
        assert_eq!(hash.to_hex(), HASH);
    }

    #[test]
    fn hash_requires_the_0x_prefix() {
        assert!(TxHash::from_hex(&HASH[2..]).is_err());
    }

    #[test]
    fn hash_rejects_wrong_lengths() {
        assert!(TxHash::from_hex("0xabcd").is_err());
        assert!(TxHash::from_hex(&format!("{HASH}00")).is_err());
    }

    #[test]
    fn hash_rejects_non_hex_content() {
        assert!(TxHash::from_hex(&format!("0x{}", "g".repeat(64))).is_err());
    }
}
