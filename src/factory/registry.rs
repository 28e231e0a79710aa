//! Pair registry keyed by canonical token pair.

use std::collections::HashMap;

use crate::domain::PairKey;
use crate::error::DexError;
use crate::pair::PairHandle;

/// Every pair a factory created, by key and in creation order.
///
/// Callers hold the factory's write lock across
/// [`insert`](Self::insert), which makes the existence check and the
/// insert one step.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    by_key: HashMap<PairKey, PairHandle>,
    ordered: Vec<PairHandle>,
}

impl Registry {
    pub(crate) fn get(&self, key: &PairKey) -> Option<&PairHandle> {
        self.by_key.get(key)
    }

    pub(crate) fn contains(&self, key: &PairKey) -> bool {
        self.by_key.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.ordered.len()
    }

    pub(crate) fn all(&self) -> &[PairHandle] {
        &self.ordered
    }

    /// # Errors
    ///
    /// [`DexError::PairAlreadyExists`] if `handle`'s key is taken.
    pub(crate) fn insert(&mut self, handle: PairHandle) -> Result<(), DexError> {
        if self.contains(&handle.key()) {
            return Err(DexError::PairAlreadyExists);
        }
        self.by_key.insert(handle.key(), handle.clone());
        self.ordered.push(handle);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::PairConfig;
    use crate::domain::Address;
    use crate::events::NoopSink;
    use crate::pair::Pair;
    use crate::token::InMemoryLedger;

    fn handle(a: u8, b: u8) -> PairHandle {
        let Ok(key) = PairKey::new(Address::from_bytes([a; 32]), Address::from_bytes([b; 32]))
        else {
            panic!("valid key");
        };
        let address = Address::derive_pair(&Address::ZERO, &key.token0(), &key.token1());
        PairHandle::new(Pair::new(
            address,
            key,
            PairConfig::default(),
            Arc::new(InMemoryLedger::new()),
            Arc::new(NoopSink),
        ))
    }

    #[test]
    fn insert_and_lookup() {
        let mut registry = Registry::default();
        let h = handle(1, 2);
        assert_eq!(registry.insert(h.clone()), Ok(()));
        assert_eq!(registry.get(&h.key()), Some(&h));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut registry = Registry::default();
        assert_eq!(registry.insert(handle(1, 2)), Ok(()));
        assert_eq!(registry.insert(handle(2, 1)), Err(DexError::PairAlreadyExists));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn keeps_creation_order() {
        let mut registry = Registry::default();
        let first = handle(5, 6);
        let second = handle(1, 2);
        let Ok(()) = registry.insert(first.clone()) else {
            panic!("insert");
        };
        let Ok(()) = registry.insert(second.clone()) else {
            panic!("insert");
        };
        assert_eq!(registry.all().to_vec(), vec![first, second]);
    }
}
