//! # Collateralized Loan Terms Adapter
//!
//! Translates between the human-level
//! [`CollateralizedSimpleInterestLoanOrder`] and the codec-level
//! [`CollateralizedTermsContractParameters`]. The adapter's own job is
//! narrow: swap the collateral token symbol for its registry index on the
//! way down, and the index for a symbol on the way up. All numeric
//! validation is delegated to the codec, so the error a caller sees for a
//! bad amount is the codec's error, untouched.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::adapter::loan_order::{CollateralizedSimpleInterestLoanOrder, SimpleInterestLoanOrder};
use crate::registry::TokenRegistry;
use crate::terms::{
    pack_parameters, CollateralizedTermsContractParameters, PackedTermsWord, ValidationError,
};

/// Failures while translating a loan order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The collateral token symbol is not in the registry.
    #[error("cannot find token with symbol {0:?} in token registry")]
    UnknownTokenSymbol(String),

    /// The packed token index does not resolve to a registered token.
    #[error("cannot find token with index {0} in token registry")]
    UnknownTokenIndex(u8),

    /// A codec validation failure, passed through unchanged.
    #[error(transparent)]
    Terms(#[from] ValidationError),
}

/// The adapter. Holds a shared handle to the registry collaborator and
/// nothing else — construction is cheap and instances are freely clonable.
#[derive(Debug)]
pub struct CollateralizedLoanTermsAdapter<R> {
    registry: Arc<R>,
}

impl<R> Clone for CollateralizedLoanTermsAdapter<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R: TokenRegistry> CollateralizedLoanTermsAdapter<R> {
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// Derives codec-level parameters from a loan order.
    ///
    /// Resolves the collateral token symbol through the registry, copies
    /// the collateral amount and grace period unchanged, and validates the
    /// result by running it through [`pack_parameters`]. The only error
    /// this method adds over the codec's own taxonomy is
    /// [`AdapterError::UnknownTokenSymbol`].
    pub async fn from_loan_order(
        &self,
        order: &CollateralizedSimpleInterestLoanOrder,
    ) -> Result<CollateralizedTermsContractParameters, AdapterError> {
        let entry = self
            .registry
            .resolve_by_symbol(&order.collateral_token_symbol)
            .await
            .map_err(|_| {
                AdapterError::UnknownTokenSymbol(order.collateral_token_symbol.clone())
            })?;

        let params = CollateralizedTermsContractParameters {
            collateral_token_index: Decimal::from(entry.index),
            collateral_amount: order.collateral_amount,
            grace_period_in_days: order.grace_period_in_days,
        };

        // The codec owns the validation contract; packing is how we run it.
        pack_parameters(&params)?;

        debug!(
            symbol = %order.collateral_token_symbol,
            index = entry.index,
            "derived terms contract parameters from loan order"
        );
        Ok(params)
    }

    /// Derives the packed on-chain word directly from a loan order.
    pub async fn pack_loan_order(
        &self,
        order: &CollateralizedSimpleInterestLoanOrder,
    ) -> Result<PackedTermsWord, AdapterError> {
        let params = self.from_loan_order(order).await?;
        Ok(pack_parameters(&params)?)
    }

    /// Reconstructs a loan order from codec-level parameters.
    ///
    /// Resolves the token index back to a symbol and merges the
    /// caller-supplied principal/interest/term fields without validating
    /// them — those belong to a schema layer outside this crate.
    pub async fn to_loan_order(
        &self,
        params: &CollateralizedTermsContractParameters,
        loan: SimpleInterestLoanOrder,
    ) -> Result<CollateralizedSimpleInterestLoanOrder, AdapterError> {
        let index = params
            .collateral_token_index
            .to_u8()
            .filter(|_| params.collateral_token_index.fract().is_zero())
            .ok_or(ValidationError::InvalidTokenIndex(
                params.collateral_token_index,
            ))?;

        let entry = self
            .registry
            .resolve_by_index(index)
            .await
            .map_err(|_| AdapterError::UnknownTokenIndex(index))?;

        Ok(CollateralizedSimpleInterestLoanOrder {
            loan,
            collateral_token_symbol: entry.symbol,
            collateral_amount: params.collateral_amount,
            grace_period_in_days: params.grace_period_in_days,
        })
    }

    /// Resolves the on-ledger address of an order's collateral token.
    pub async fn collateral_token_address(
        &self,
        order: &CollateralizedSimpleInterestLoanOrder,
    ) -> Result<String, AdapterError> {
        self.registry
            .resolve_by_symbol(&order.collateral_token_symbol)
            .await
            .map(|entry| entry.address)
            .map_err(|_| {
                AdapterError::UnknownTokenSymbol(order.collateral_token_symbol.clone())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::loan_order::AmortizationUnit;
    use crate::registry::{InMemoryTokenRegistry, TokenEntry};
    use crate::terms::unpack_parameters;

    fn registry() -> Arc<InMemoryTokenRegistry> {
        Arc::new(InMemoryTokenRegistry::from_entries([
            TokenEntry {
                symbol: "REP".into(),
                address: "0x1985365e9f78359a9b6ad760e32412f4a445e862".into(),
                index: 0,
            },
            TokenEntry {
                symbol: "ZRX".into(),
                address: "0xe41d2489571d322189246dafa5ebde1f4699f498".into(),
                index: 1,
            },
        ]))
    }

    fn order() -> CollateralizedSimpleInterestLoanOrder {
        CollateralizedSimpleInterestLoanOrder {
            loan: SimpleInterestLoanOrder {
                principal_amount: Decimal::from(10u64 * 10u64.pow(18)),
                principal_token_symbol: "REP".into(),
                interest_rate: Decimal::new(14, 2),
                amortization_unit: AmortizationUnit::Weeks,
                term_length: Decimal::from(2),
            },
            collateral_token_symbol: "ZRX".into(),
            collateral_amount: Decimal::from(10u64.pow(18)),
            grace_period_in_days: Decimal::from(5),
        }
    }

    #[tokio::test]
    async fn derives_parameters_from_a_loan_order() {
        let adapter = CollateralizedLoanTermsAdapter::new(registry());
        let params = adapter.from_loan_order(&order()).await.unwrap();

        assert_eq!(params.collateral_token_index, Decimal::from(1));
        assert_eq!(params.collateral_amount, Decimal::from(10u64.pow(18)));
        assert_eq!(params.grace_period_in_days, Decimal::from(5));
    }

    #[tokio::test]
    async fn unknown_collateral_symbol_is_rejected() {
        let adapter = CollateralizedLoanTermsAdapter::new(registry());
        let mut bad = order();
        bad.collateral_token_symbol = "DOGE".into();

        let err = adapter.from_loan_order(&bad).await.unwrap_err();
        assert_eq!(err, AdapterError::UnknownTokenSymbol("DOGE".into()));
    }

    #[tokio::test]
    async fn codec_errors_pass_through_unchanged() {
        let adapter = CollateralizedLoanTermsAdapter::new(registry());
        let mut bad = order();
        bad.collateral_amount = Decimal::from(-1);

        let err = adapter.from_loan_order(&bad).await.unwrap_err();
        assert_eq!(
            err,
            AdapterError::Terms(ValidationError::CollateralAmountIsNegative)
        );
    }

    #[tokio::test]
    async fn order_round_trips_through_pack_and_unpack() {
        let adapter = CollateralizedLoanTermsAdapter::new(registry());
        let original = order();

        let word = adapter.pack_loan_order(&original).await.unwrap();
        let params = unpack_parameters(&word.to_string()).unwrap();
        let rebuilt = adapter
            .to_loan_order(&params, original.loan.clone())
            .await
            .unwrap();

        assert_eq!(rebuilt, original);
    }

    #[tokio::test]
    async fn unknown_index_is_rejected_when_rebuilding() {
        let adapter = CollateralizedLoanTermsAdapter::new(registry());
        let params = CollateralizedTermsContractParameters::new(77, Decimal::ONE, 5);

        let err = adapter
            .to_loan_order(&params, order().loan)
            .await
            .unwrap_err();
        assert_eq!(err, AdapterError::UnknownTokenIndex(77));
    }

    #[tokio::test]
    async fn resolves_collateral_token_address() {
        let adapter = CollateralizedLoanTermsAdapter::new(registry());
        let address = adapter.collateral_token_address(&order()).await.unwrap();
        assert_eq!(address, "0xe41d2489571d322189246dafa5ebde1f4699f498");
    }
}
