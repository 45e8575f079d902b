//! Q64.96 square-root price encoding.
//!
//! ## Math
//!
//! Pools store $\sqrt{P} \times 2^{96}$ as a `uint160`:
//!
//! $$sqrtPriceX96 = \lfloor \sqrt{P} \times 2^{96} \rfloor$$
//!
//! ## Float to Integer
//!
//! `sqrt(P) * 2^96` is computed in `f64` (the multiplication by a power of two
//! is exact). The product routinely exceeds `u64` and can exceed `u128`, so it
//! is widened into `U256` bit-exactly from the float's mantissa and exponent
//! and then truncated, instead of going through a saturating `as` cast.

use alloy::primitives::U256;

use crate::error::PriceError;

/// 2^96, the Q64.96 scaling factor.
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);

const Q96_F64: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Encode a price as `floor(sqrt(price) * 2^96)`.
///
/// # Errors
/// Returns [`PriceError::NonPositivePrice`] for non-positive or non-finite
/// prices and [`PriceError::SqrtPriceOverflow`] if the result needs more than
/// 256 bits.
pub fn price_to_sqrt_price_x96(price: f64) -> Result<U256, PriceError> {
    if !(price > 0.0 && price.is_finite()) {
        return Err(PriceError::NonPositivePrice(price));
    }

    let scaled = price.sqrt() * Q96_F64;
    f64_to_u256_floor(scaled).ok_or(PriceError::SqrtPriceOverflow(price))
}

/// Decode a Q64.96 value back to `sqrt(P)` as `f64`.
///
/// Lossy: only the top 53 significant bits survive.
pub fn sqrt_price_x96_to_f64(sqrt_price_x96: U256) -> f64 {
    u256_to_f64(sqrt_price_x96) / Q96_F64
}

/// Round a `U256` to the nearest `f64` (ties to even).
///
/// Keeps the top 64 bits and folds every dropped bit into a sticky bit, so
/// the single `u64 -> f64` rounding sees the exact value's rounding
/// direction.
pub(crate) fn u256_to_f64(value: U256) -> f64 {
    let bits = value.bit_len();
    if bits <= 64 {
        return value.as_limbs()[0] as f64;
    }

    let shift = bits - 64;
    let dropped = value & ((U256::from(1u64) << shift) - U256::from(1u64));
    let top = (value >> shift).as_limbs()[0] | u64::from(!dropped.is_zero());
    (top as f64) * 2f64.powi(shift as i32)
}

/// Truncate a non-negative finite `f64` into a `U256`.
///
/// Returns `None` for negative, non-finite, or too large inputs.
fn f64_to_u256_floor(value: f64) -> Option<U256> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    if value < 1.0 {
        return Some(U256::ZERO);
    }

    // value >= 1.0 is always a normal float: implicit leading bit is set.
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    let mantissa = U256::from(mantissa);

    if exponent >= 0 {
        // 53 mantissa bits + shift must stay within 256 bits.
        if exponent > 256 - 53 {
            return None;
        }
        Some(mantissa << exponent as usize)
    } else {
        Some(mantissa >> (-exponent) as usize)
    }
}
