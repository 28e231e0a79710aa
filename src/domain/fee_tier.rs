//! Swap fee policy built on [`BasisPoints`].

use core::fmt;

use serde::{Deserialize, Serialize};

use super::basis_points::MAX_BPS;
use super::{Amount, BasisPoints, Rounding};

/// The proportional trading fee a pair charges on swap input.
///
/// The fee is a rational multiplier `f = bps / 10 000`.  Swap pricing hands
/// [`BasisPoints::complement`] and [`SCALE`](Self::SCALE) to
/// [`constant_product_out`](crate::math::constant_product_out), which forms
/// `amount_in × (10 000 − bps)` at 256 bits, so the fee is never rounded
/// before the constant-product division.
///
/// # Examples
///
/// ```
/// use minimal_dex::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::DEFAULT;
/// assert_eq!(tier.basis_points().get(), 30);
/// assert_eq!(tier.basis_points().complement(), Some(9_970));
/// assert_eq!(tier.fee_on(Amount::new(1_000)), Ok(Amount::new(3)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee. The product is then only guaranteed not to decrease.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp).
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Fee applied when no configuration overrides it: 0.30%.
    pub const DEFAULT: Self = Self::TIER_0_30_PERCENT;

    /// Denominator of the fee ratio: 100% in basis points.
    pub const SCALE: u128 = MAX_BPS as u128;

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Returns `true` when the fee is strictly positive.
    #[must_use]
    pub const fn is_charged(&self) -> bool {
        self.0.get() > 0
    }

    /// The fee charged on `amount_in`, rounded up.
    ///
    /// Informational; pricing itself never rounds the fee.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`](crate::error::DexError::Overflow) only
    /// for a fee above 100%; valid tiers never fail.
    pub fn fee_on(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        self.0.apply(amount_in, Rounding::Up)
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
