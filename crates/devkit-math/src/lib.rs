//! devkit-math: Uniswap V3 style price helpers.
//!
//! Turns a pair of pool reserves into the three values needed to initialise
//! a concentrated-liquidity pool: an integer price, the tick index on the
//! base-1.0001 grid, and the Q64.96 square-root price.

pub mod error;
pub mod reserves;
pub mod sqrt_price;
pub mod tick;

pub use error::PriceError;
pub use reserves::{compute, parse_reserve, PriceTick};
pub use sqrt_price::{price_to_sqrt_price_x96, sqrt_price_x96_to_f64, Q96};
pub use tick::{align_tick, price_to_tick};
