//! # Loan Order Adapters
//!
//! Adapters sit between caller-facing loan orders and the codec-level
//! parameter types. They own symbol/index translation through the token
//! registry; they own nothing else. Numeric validation stays in the codec,
//! schema validation of principal/interest fields stays upstream.

pub mod collateralized;
pub mod loan_order;

pub use collateralized::{AdapterError, CollateralizedLoanTermsAdapter};
pub use loan_order::{
    AmortizationUnit, CollateralizedSimpleInterestLoanOrder, SimpleInterestLoanOrder,
};
