//! Arithmetic utilities for pool calculations.
//!
//! - [`CheckedArithmetic`] lifts checked newtype arithmetic into
//!   [`DexError`](crate::error::DexError) results.
//! - [`mul_div`], [`product`] and [`sqrt_product`] form their intermediates
//!   in 256 bits so reserve products never overflow.
//! - [`constant_product_out`] prices a fee-adjusted swap input.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{constant_product_out, mul_div, product, sqrt_product, U256};
