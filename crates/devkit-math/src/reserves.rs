//! Reserve ratio to pool initialisation values.
//!
//! The price is the integer quotient `reserve_y / reserve_x`, so all
//! fractional precision is dropped on purpose: a 2000 / 9018596 pool
//! initialises at price 4509. Both reserves must be positive and the
//! truncated price must be at least one, since a zero price has no tick.
//!
//! Reserves are `U256`, matching the on-chain token balance width. The
//! division is exact; only the tick and sqrt price go through `f64`.

use alloy::primitives::U256;

use crate::error::PriceError;
use crate::sqrt_price::{price_to_sqrt_price_x96, u256_to_f64};
use crate::tick::price_to_tick;

/// Values derived from one pair of reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTick {
    /// `reserve_y / reserve_x`, truncated.
    pub price: U256,
    /// `floor(log_1.0001(price))`.
    pub tick: i32,
    /// `floor(sqrt(price) * 2^96)`.
    pub sqrt_price_x96: U256,
}

/// Parse a reserve amount given as a base-10 integer.
///
/// Surrounding whitespace and a leading `+` are ignored. `name` labels the
/// reserve in errors.
///
/// # Errors
/// - [`PriceError::NonPositiveReserve`] for a negative integer.
/// - [`PriceError::InvalidInput`] if `raw` is not an integer or does not fit
///   in 256 bits.
pub fn parse_reserve(name: &'static str, raw: &str) -> Result<U256, PriceError> {
    let invalid = || PriceError::InvalidInput {
        value: raw.to_string(),
    };

    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if negative {
        return Err(PriceError::NonPositiveReserve {
            name,
            value: trimmed.to_string(),
        });
    }

    U256::from_str_radix(digits, 10).map_err(|_| invalid())
}

/// Compute price, tick and sqrtPriceX96 for a pair of reserves.
///
/// # Errors
/// - [`PriceError::NonPositiveReserve`] if either reserve is zero.
/// - [`PriceError::PriceBelowOne`] if `reserve_y < reserve_x`.
pub fn compute(reserve_x: U256, reserve_y: U256) -> Result<PriceTick, PriceError> {
    for (name, reserve) in [("reserve_x", reserve_x), ("reserve_y", reserve_y)] {
        if reserve.is_zero() {
            return Err(PriceError::NonPositiveReserve {
                name,
                value: reserve.to_string(),
            });
        }
    }

    let price = reserve_y / reserve_x;
    if price.is_zero() {
        return Err(PriceError::PriceBelowOne {
            reserve_x,
            reserve_y,
        });
    }

    let price_f64 = u256_to_f64(price);
    let tick = price_to_tick(price_f64)?;
    let sqrt_price_x96 = price_to_sqrt_price_x96(price_f64)?;

    tracing::debug!(
        reserve_x = %reserve_x,
        reserve_y = %reserve_y,
        price = %price,
        tick,
        sqrt_price_x96 = %sqrt_price_x96,
        "computed pool price"
    );

    Ok(PriceTick {
        price,
        tick,
        sqrt_price_x96,
    })
}
