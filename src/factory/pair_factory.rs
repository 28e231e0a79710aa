//! The factory that deploys and indexes pairs.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use tracing::{debug, info};

use super::registry::Registry;
use crate::config::{FactoryConfig, PairConfig};
use crate::domain::{Address, PairKey};
use crate::error::{DexError, Result};
use crate::events::{DexEvent, EventSink};
use crate::pair::{Pair, PairHandle};
use crate::token::TokenLedger;

/// Creates exactly one [`Pair`] per unordered token pair and looks them up.
///
/// Every pair the factory creates shares its [`TokenLedger`] and
/// [`EventSink`], and uses the factory's [`PairConfig`].  Pair addresses
/// are derived from the factory address and the canonical key, so they are
/// stable for a given owner and token pair.
///
/// # Thread Safety
///
/// The registry sits behind an `RwLock`.  [`create_pair`](Self::create_pair)
/// checks for an existing pair and inserts the new one under a single write
/// guard, so concurrent calls for the same pair yield exactly one success.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use minimal_dex::domain::Address;
/// use minimal_dex::error::DexError;
/// use minimal_dex::events::EventLog;
/// use minimal_dex::factory::Factory;
/// use minimal_dex::token::InMemoryLedger;
///
/// let owner = Address::from_bytes([9u8; 32]);
/// let factory = Factory::new(owner, Arc::new(InMemoryLedger::new()), Arc::new(EventLog::new()));
///
/// let a = Address::from_bytes([1u8; 32]);
/// let b = Address::from_bytes([2u8; 32]);
/// let pair = factory.create_pair(b, a).expect("new pair");
/// assert_eq!(pair.token0(), a);
/// assert_eq!(factory.get_pair(a, b), Some(pair));
/// assert_eq!(factory.create_pair(a, b), Err(DexError::PairAlreadyExists));
/// ```
pub struct Factory {
    address: Address,
    config: FactoryConfig,
    ledger: Arc<dyn TokenLedger>,
    sink: Arc<dyn EventSink>,
    registry: RwLock<Registry>,
}

impl core::fmt::Debug for Factory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Factory")
            .field("address", &self.address)
            .field("owner", &self.config.owner())
            .field("pair_count", &self.pair_count())
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Creates a factory owned by `owner` with default pair parameters.
    #[must_use]
    pub fn new(owner: Address, ledger: Arc<dyn TokenLedger>, sink: Arc<dyn EventSink>) -> Self {
        Self::build(FactoryConfig::with_owner(owner), ledger, sink)
    }

    /// Creates a factory from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`FactoryConfig::validate`] failures, so a deserialized
    /// config is checked before any pair can use it.
    pub fn with_config(
        config: FactoryConfig,
        ledger: Arc<dyn TokenLedger>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, ledger, sink))
    }

    fn build(config: FactoryConfig, ledger: Arc<dyn TokenLedger>, sink: Arc<dyn EventSink>) -> Self {
        let address = Address::derive_factory(&config.owner());
        debug!(factory = %address, owner = %config.owner(), "factory initialised");
        Self {
            address,
            config,
            ledger,
            sink,
            registry: RwLock::new(Registry::default()),
        }
    }

    fn registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Deploys the pair for `{token_a, token_b}`.
    ///
    /// Argument order does not matter: the tokens are sorted into a
    /// [`PairKey`] first.  Emits [`DexEvent::PairCreated`].
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalTokenAddresses`] if both tokens are the same.
    /// - [`DexError::PairAlreadyExists`] if the pair was created before, in
    ///   either order.
    pub fn create_pair(&self, token_a: Address, token_b: Address) -> Result<PairHandle> {
        let key = PairKey::new(token_a, token_b)?;

        let mut registry = self.registry.write().unwrap_or_else(|e| e.into_inner());
        if registry.contains(&key) {
            debug!(token0 = %key.token0(), token1 = %key.token1(), "pair already exists");
            return Err(DexError::PairAlreadyExists);
        }
        let address = Address::derive_pair(&self.address, &key.token0(), &key.token1());
        let pair = Pair::new(
            address,
            key,
            self.config.pair(),
            Arc::clone(&self.ledger),
            Arc::clone(&self.sink),
        );
        let handle = PairHandle::new(pair);
        registry.insert(handle.clone())?;
        let pair_count = registry.len();

        info!(
            factory = %self.address,
            pair = %address,
            token0 = %key.token0(),
            token1 = %key.token1(),
            pair_count,
            "pair created"
        );
        self.sink.emit(DexEvent::PairCreated {
            token0: key.token0(),
            token1: key.token1(),
            pair: address,
            pair_count,
        });
        Ok(handle)
    }

    /// Returns the pair for `{token_a, token_b}` in either order.
    ///
    /// Identical tokens never have a pair, so they simply yield `None`.
    #[must_use]
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Option<PairHandle> {
        let key = PairKey::new(token_a, token_b).ok()?;
        self.registry().get(&key).cloned()
    }

    /// Returns every pair in creation order.
    #[must_use]
    pub fn all_pairs(&self) -> Vec<PairHandle> {
        self.registry().all().to_vec()
    }

    /// Returns the number of pairs created.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.registry().len()
    }

    /// Returns the owner fixed at construction.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.config.owner()
    }

    /// Returns the factory's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the parameters applied to new pairs.
    #[must_use]
    pub const fn pair_config(&self) -> PairConfig {
        self.config.pair()
    }
}
