//! Error types for price and tick conversion.

use alloy::primitives::U256;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("invalid input {value:?}: expected a base-10 integer below 2^256")]
    InvalidInput { value: String },

    #[error("{name} must be positive, got {value}")]
    NonPositiveReserve { name: &'static str, value: String },

    /// `reserve_y / reserve_x` truncates to zero, which has no tick.
    #[error("price truncates to zero for reserves x={reserve_x}, y={reserve_y}")]
    PriceBelowOne { reserve_x: U256, reserve_y: U256 },

    #[error("price must be positive and finite, got {0}")]
    NonPositivePrice(f64),

    #[error("sqrt price for {0} does not fit in 256 bits")]
    SqrtPriceOverflow(f64),

    #[error("tick spacing must be positive, got {0}")]
    InvalidTickSpacing(i32),
}
