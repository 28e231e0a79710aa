//! Per-pair configuration.

use serde::{Deserialize, Serialize};

use crate::domain::FeeTier;
use crate::error::DexError;

/// Parameters every pair created by a factory shares.
///
/// # Validation
///
/// - The fee must be strictly below 100% (10 000 bp); a full fee would
///   leave no input to price.
///
/// # Examples
///
/// ```
/// use minimal_dex::config::PairConfig;
/// use minimal_dex::domain::{BasisPoints, FeeTier};
///
/// let cfg = PairConfig::new(FeeTier::new(BasisPoints::new(5))).expect("valid fee");
/// assert_eq!(cfg.fee_tier().basis_points().get(), 5);
/// assert_eq!(PairConfig::default().fee_tier(), FeeTier::DEFAULT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PairConfig {
    #[serde(default)]
    fee_tier: FeeTier,
}

impl PairConfig {
    /// Creates a validated `PairConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if the fee is 100% or more.
    pub fn new(fee_tier: FeeTier) -> Result<Self, DexError> {
        let config = Self { fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// Deserialized configs bypass [`new`](Self::new), so callers should
    /// validate them before use.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if the fee is 100% or more.
    pub fn validate(&self) -> Result<(), DexError> {
        if !matches!(self.fee_tier.basis_points().complement(), Some(c) if c > 0) {
            return Err(DexError::InvalidConfiguration(
                "fee must be below 10000 basis points",
            ));
        }
        Ok(())
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
