//! Tick index on the base-1.0001 price grid.
//!
//! A tick `i` marks the price `1.0001^i`, so the tick for a price `P` is
//! `floor(log_1.0001(P)) = floor(ln(P) / ln(1.0001))`. The computation runs in
//! `f64`; tick boundaries match an exact computation to within float rounding
//! for prices between 1e-12 and 1e12.

use crate::error::PriceError;

/// Base of the tick grid.
pub const TICK_BASE: f64 = 1.0001;

/// Convert a price to the tick index at or below it.
///
/// # Errors
/// Returns [`PriceError::NonPositivePrice`] for zero, negative, NaN or
/// infinite prices, where the logarithm is undefined.
pub fn price_to_tick(price: f64) -> Result<i32, PriceError> {
    if !(price > 0.0 && price.is_finite()) {
        return Err(PriceError::NonPositivePrice(price));
    }

    // |ln(f64::MAX) / ln(1.0001)| is about 7.1e6, well inside i32.
    Ok((price.ln() / TICK_BASE.ln()).floor() as i32)
}

/// Round `tick` down to the nearest multiple of `tick_spacing`.
///
/// Rounds toward negative infinity so that negative ticks land on the
/// initialisable tick below them, the way tick bitmaps compress ticks.
///
/// # Errors
/// Returns [`PriceError::InvalidTickSpacing`] if `tick_spacing <= 0`.
pub fn align_tick(tick: i32, tick_spacing: i32) -> Result<i32, PriceError> {
    if tick_spacing <= 0 {
        return Err(PriceError::InvalidTickSpacing(tick_spacing));
    }
    Ok(tick.div_euclid(tick_spacing).saturating_mul(tick_spacing))
}
