//! 256-bit intermediates for reserve math.
//!
//! Reserves are `u128`, so products such as `reserve_out × amount_in × (10 000 − bps)`
//! or `reserve0 × reserve1` routinely exceed 128 bits (two 50-ether
//! reserves already multiply to `2.5e39`).  Every product here is formed
//! in [`U256`] and only the final quotient is narrowed back.

use uint::construct_uint;

use crate::domain::Rounding;

construct_uint! {
    /// Unsigned 256-bit integer for intermediate products.
    pub struct U256(4);
}

/// Full-width product `a × b`. Cannot overflow.
#[must_use]
pub fn product(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// `a × b / d` with the given rounding, computed without intermediate
/// overflow.
///
/// Returns `None` if `d` is zero or the quotient does not fit in `u128`.
#[must_use]
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> Option<u128> {
    if d == 0 {
        return None;
    }
    let numerator = product(a, b);
    let divisor = U256::from(d);
    let (mut quotient, remainder) = numerator.div_mod(divisor);
    if rounding.is_up() && !remainder.is_zero() {
        quotient = quotient + U256::one();
    }
    narrow(quotient)
}

/// `floor(√(a × b))`, the geometric mean of two amounts.
///
/// Always fits in `u128` because `a × b < 2²⁵⁶`.
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    let root = product(a, b).integer_sqrt();
    narrow(root).unwrap_or(u128::MAX)
}

/// Constant-product output for `amount_in` after a fee of
/// `scale − fee_complement` parts per `scale`:
///
/// ```text
/// in_with_fee = amount_in × fee_complement
/// amount_out  = ⌊reserve_out × in_with_fee / (reserve_in × scale + in_with_fee)⌋
/// ```
///
/// Returns `None` if an intermediate exceeds 256 bits or the denominator
/// is zero.  The result is always strictly below `reserve_out`.
#[must_use]
pub fn constant_product_out(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_complement: u32,
    scale: u128,
) -> Option<u128> {
    let in_with_fee = product(amount_in, u128::from(fee_complement));
    let numerator = in_with_fee.checked_mul(U256::from(reserve_out))?;
    let denominator = product(reserve_in, scale).checked_add(in_with_fee)?;
    if denominator.is_zero() {
        return None;
    }
    narrow(numerator / denominator)
}

fn narrow(value: U256) -> Option<u128> {
    if value > U256::from(u128::MAX) {
        None
    } else {
        Some(value.low_u128())
    }
}
