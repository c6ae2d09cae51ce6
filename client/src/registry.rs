//! # Token Registry Boundary
//!
//! The ledger keeps a registry contract mapping token symbols to addresses
//! and small integer indices; the packed terms word stores the index instead
//! of a 20-byte address to save storage. Resolution logic is not this
//! crate's business — we only define the seam, plus an in-memory
//! implementation for tests and offline tooling.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the token registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEntry {
    /// Ticker symbol, e.g. `"ZRX"`.
    pub symbol: String,
    /// The token contract's on-ledger address, hex-encoded.
    pub address: String,
    /// Position in the registry; what the packed word stores.
    pub index: u8,
}

/// Registry lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No token is registered under the given symbol.
    #[error("no token registered under symbol {0:?}")]
    SymbolNotFound(String),

    /// No token is registered at the given index.
    #[error("no token registered at index {0}")]
    IndexNotFound(u8),
}

/// External collaborator resolving token symbols and indices.
///
/// Implementations typically front a registry contract over the ledger
/// transport; both lookups are read-only.
#[async_trait]
pub trait TokenRegistry: Send + Sync {
    /// Resolves a ticker symbol to its registry entry.
    async fn resolve_by_symbol(&self, symbol: &str) -> Result<TokenEntry, RegistryError>;

    /// Resolves a registry index back to its entry.
    async fn resolve_by_index(&self, index: u8) -> Result<TokenEntry, RegistryError>;
}

// ---------------------------------------------------------------------------
// In-Memory Registry
// ---------------------------------------------------------------------------

/// A [`TokenRegistry`] backed by a concurrent map. Used by the test suites
/// and by offline tooling that loads a registry snapshot from disk.
#[derive(Debug, Default)]
pub struct InMemoryTokenRegistry {
    by_symbol: DashMap<String, TokenEntry>,
}

impl InMemoryTokenRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list of entries, e.g. one deserialized from
    /// a JSON snapshot. Later entries win on symbol collisions.
    pub fn from_entries(entries: impl IntoIterator<Item = TokenEntry>) -> Self {
        let registry = Self::new();
        for entry in entries {
            registry.insert(entry);
        }
        registry
    }

    /// Inserts or replaces an entry under its symbol.
    pub fn insert(&self, entry: TokenEntry) {
        self.by_symbol.insert(entry.symbol.clone(), entry);
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    /// Whether the registry holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

#[async_trait]
impl TokenRegistry for InMemoryTokenRegistry {
    async fn resolve_by_symbol(&self, symbol: &str) -> Result<TokenEntry, RegistryError> {
        self.by_symbol
            .get(symbol)
            .map(|e| e.value().clone())
            .ok_or_else(|| RegistryError::SymbolNotFound(symbol.to_string()))
    }

    async fn resolve_by_index(&self, index: u8) -> Result<TokenEntry, RegistryError> {
        self.by_symbol
            .iter()
            .find(|e| e.index == index)
            .map(|e| e.value().clone())
            .ok_or(RegistryError::IndexNotFound(index))
    }
}
