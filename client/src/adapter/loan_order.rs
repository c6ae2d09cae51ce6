//! # Loan Order Types
//!
//! The human-level description of a loan, as callers assemble it before any
//! encoding happens. A simple-interest order names the principal and the
//! repayment schedule; the collateralized variant adds the collateral terms
//! that the codec packs on-chain.
//!
//! These types are owned by the caller. The adapter reads them and derives
//! contract-level parameters; it never retains or mutates an order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of the repayment schedule: the unit `term_length` counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationUnit {
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl fmt::Display for AmortizationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self {
            AmortizationUnit::Hours => "hours",
            AmortizationUnit::Days => "days",
            AmortizationUnit::Weeks => "weeks",
            AmortizationUnit::Months => "months",
            AmortizationUnit::Years => "years",
        };
        f.write_str(unit)
    }
}

/// The uncollateralized core of a loan order: who borrows what, at what
/// rate, repaid on what schedule.
///
/// The adapter does not validate these fields — they belong to a separate
/// schema layer upstream of this crate. They are merged verbatim when
/// reconstructing an order from packed terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleInterestLoanOrder {
    /// Principal, in the principal token's base units.
    pub principal_amount: Decimal,
    /// Ticker symbol of the principal token.
    pub principal_token_symbol: String,
    /// Interest rate per amortization unit, as a fraction (0.14 = 14%).
    pub interest_rate: Decimal,
    /// Unit of the repayment schedule.
    pub amortization_unit: AmortizationUnit,
    /// Number of amortization units until maturity.
    pub term_length: Decimal,
}

/// A simple-interest loan order secured by collateral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralizedSimpleInterestLoanOrder {
    /// The uncollateralized loan terms.
    #[serde(flatten)]
    pub loan: SimpleInterestLoanOrder,
    /// Ticker symbol of the collateral token.
    pub collateral_token_symbol: String,
    /// Collateral amount, in the collateral token's base units.
    pub collateral_amount: Decimal,
    /// Days past maturity before the loan defaults.
    pub grace_period_in_days: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_round_trips_through_json_with_flattened_loan_fields() {
        let order = CollateralizedSimpleInterestLoanOrder {
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
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["principalTokenSymbol"], "REP");
        assert_eq!(json["amortizationUnit"], "weeks");
        assert_eq!(json["collateralTokenSymbol"], "ZRX");

        let back: CollateralizedSimpleInterestLoanOrder =
            serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
