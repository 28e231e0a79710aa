//! Factory configuration.

use serde::{Deserialize, Serialize};

use super::PairConfig;
use crate::domain::Address;
use crate::error::DexError;

/// Construction parameters of a [`Factory`](crate::factory::Factory).
///
/// The owner is recorded and exposed but grants no privileges; it is a
/// hook for future administrative operations.
///
/// # Examples
///
/// ```
/// use minimal_dex::config::{FactoryConfig, PairConfig};
/// use minimal_dex::domain::Address;
///
/// let owner = Address::from_bytes([7u8; 32]);
/// let cfg = FactoryConfig::new(owner, PairConfig::default()).expect("valid");
/// assert_eq!(cfg.owner(), owner);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    owner: Address,
    #[serde(default)]
    pair: PairConfig,
}

impl FactoryConfig {
    /// Creates a validated `FactoryConfig`.
    ///
    /// # Errors
    ///
    /// Propagates [`PairConfig::validate`] failures.
    pub fn new(owner: Address, pair: PairConfig) -> Result<Self, DexError> {
        let config = Self { owner, pair };
        config.validate()?;
        Ok(config)
    }

    /// Default pair parameters for `owner`.
    #[must_use]
    pub fn with_owner(owner: Address) -> Self {
        Self {
            owner,
            pair: PairConfig::default(),
        }
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if the pair parameters
    /// are out of range.
    pub fn validate(&self) -> Result<(), DexError> {
        self.pair.validate()
    }

    /// Returns the factory owner.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Returns the parameters applied to every new pair.
    #[must_use]
    pub const fn pair(&self) -> PairConfig {
        self.pair
    }
}
