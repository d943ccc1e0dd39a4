//! Shared cache of derived key material
//!
//! Building a key square or inverting a key matrix is cheap, but chat
//! sessions and HTTP clients reuse the same handful of keys for every
//! message. [`KeyCache`] keeps derived keys in concurrent maps so they are
//! built once. Clones share the same storage.
//!
//! The cache is bounded: once `capacity` keys are held, further keys are
//! derived on every call and not stored. A capacity of 0 disables caching.
//! Slots are reserved atomically, so concurrent misses never push the cache
//! past its capacity. [`KeyCache::clear`] racing with inserts may leave the
//! slot count briefly off.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::codec::{Caesar, Codec};
use crate::error::CipherError;
use crate::hill::KeyMatrix;
use crate::key::{self, CipherKey, HillSize, PlayfairSize};
use crate::normalize;
use crate::playfair::KeySquare;

/// Default number of derived keys held
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by the cleaned keyword
    squares: DashMap<(String, PlayfairSize), Arc<KeySquare>>,
    /// Keyed by the uppercased key letters
    matrices: DashMap<(String, HillSize), Arc<KeyMatrix>>,
    /// Slots handed out across both maps
    held: AtomicUsize,
}

/// Concurrent cache of key squares and key matrices
#[derive(Debug, Clone)]
pub struct KeyCache {
    inner: Arc<Inner>,
    capacity: usize,
}

impl Default for KeyCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl KeyCache {
    /// Empty cache holding at most `capacity` derived keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner::default()),
            capacity,
        }
    }

    /// Maximum number of derived keys held.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of derived keys currently held.
    pub fn len(&self) -> usize {
        self.inner.squares.len() + self.inner.matrices.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached key.
    pub fn clear(&self) {
        self.inner.squares.clear();
        self.inner.matrices.clear();
        self.inner.held.store(0, Ordering::Release);
    }

    /// Take one slot if any is left.
    fn reserve(&self) -> bool {
        self.inner
            .held
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |held| {
                (held < self.capacity).then_some(held + 1)
            })
            .is_ok()
    }

    /// Key square for `key`, built on first use.
    ///
    /// Keys that clean to the same keyword ("MONARCHY", "Mon archy") share
    /// one square.
    pub fn key_square(&self, key: &str, size: PlayfairSize) -> Result<Arc<KeySquare>, CipherError> {
        key::validate_playfair_key(key, size)?;
        let id = (normalize::playfair_clean(key, size), size);
        if let Some(hit) = self.inner.squares.get(&id) {
            #[cfg(feature = "tracing")]
            tracing::trace!(size = %size, "key square cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        match self.inner.squares.entry(id) {
            Entry::Occupied(hit) => Ok(Arc::clone(hit.get())),
            Entry::Vacant(slot) => {
                let square = Arc::new(KeySquare::from_cleaned(slot.key().0.clone(), size));
                if self.reserve() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(size = %size, "cached key square");
                    slot.insert(Arc::clone(&square));
                } else {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(capacity = self.capacity, "key cache full, not storing key square");
                }
                Ok(square)
            }
        }
    }

    /// Key matrix for `key`, built on first use.
    ///
    /// The cached matrix keeps its inverse once computed.
    pub fn key_matrix(&self, key: &str, size: HillSize) -> Result<Arc<KeyMatrix>, CipherError> {
        let id = (key.to_ascii_uppercase(), size);
        if let Some(hit) = self.inner.matrices.get(&id) {
            #[cfg(feature = "tracing")]
            tracing::trace!(size = %size, "key matrix cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        match self.inner.matrices.entry(id) {
            Entry::Occupied(hit) => Ok(Arc::clone(hit.get())),
            Entry::Vacant(slot) => {
                let matrix = Arc::new(KeyMatrix::new(key, size)?);
                if self.reserve() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(size = %size, "cached key matrix");
                    slot.insert(Arc::clone(&matrix));
                } else {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(capacity = self.capacity, "key cache full, not storing key matrix");
                }
                Ok(matrix)
            }
        }
    }

    /// Keyed cipher for `key`, sharing the cached key material.
    pub fn codec(&self, key: &CipherKey) -> Result<Codec, CipherError> {
        Ok(match key {
            CipherKey::Caesar { shift } => Caesar { shift: *shift }.into(),
            CipherKey::Playfair { key, size } => self.key_square(key, *size)?.into(),
            CipherKey::Hill { key, size } => self.key_matrix(key, *size)?.into(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::codec::Cipher;

    #[test]
    fn test_derives_once() {
        let cache = KeyCache::new(8);
        let a = cache.key_square("MONARCHY", PlayfairSize::Five).unwrap();
        let b = cache.key_square("MONARCHY", PlayfairSize::Five).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        // same letters, different size: separate entry
        cache.key_square("MONARCHY1", PlayfairSize::Six).unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_playfair_keys_share_cleaned_entry() {
        let cache = KeyCache::new(8);
        let a = cache.key_square("MONARCHY", PlayfairSize::Five).unwrap();
        for variant in ["monarchy", "Mon Archy", " m o n a r c h y "] {
            let b = cache.key_square(variant, PlayfairSize::Five).unwrap();
            assert!(Arc::ptr_eq(&a, &b), "{variant}");
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(a.key(), "MONARCHY");

        // a hit never bypasses validation
        assert!(cache.key_square("MONARCHY!", PlayfairSize::Five).is_err());
        assert!(cache.key_square("MONARCHY1", PlayfairSize::Five).is_err());
    }

    #[test]
    fn test_cached_matrix_keeps_inverse() {
        let cache = KeyCache::new(8);
        let key = CipherKey::hill("HILL", 2).unwrap();
        assert!(!cache.key_matrix("HILL", HillSize::Two).unwrap().inverse_is_computed());

        for _ in 0..2 {
            let codec = cache.codec(&key).unwrap();
            assert_eq!(codec.decrypt("DRPA").unwrap(), "HELP");
        }

        let cached = cache.key_matrix("HILL", HillSize::Two).unwrap();
        assert!(cached.inverse_is_computed());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_hill_keys_are_case_insensitive() {
        let cache = KeyCache::new(8);
        let a = cache.key_matrix("hill", HillSize::Two).unwrap();
        let b = cache.key_matrix("HILL", HillSize::Two).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = KeyCache::new(8);
        let other = cache.clone();
        other.key_matrix("HILL", HillSize::Two).unwrap();
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_capacity_bound() {
        let cache = KeyCache::new(1);
        cache.key_square("ONE", PlayfairSize::Five).unwrap();
        let a = cache.key_square("TWO", PlayfairSize::Five).unwrap();
        let b = cache.key_square("TWO", PlayfairSize::Five).unwrap();
        assert_eq!(cache.len(), 1);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_zero_capacity_disables() {
        let cache = KeyCache::new(0);
        let codec = cache.codec(&CipherKey::hill("HILL", 2).unwrap()).unwrap();
        assert_eq!(codec.encrypt("HELP").unwrap(), "DRPA");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalid_keys_are_not_cached() {
        let cache = KeyCache::default();
        assert!(cache.key_matrix("ABC", HillSize::Two).is_err());
        assert!(cache.key_square("", PlayfairSize::Five).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_use() {
        let cache = KeyCache::new(64);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                let cache = cache.clone();
                scope.spawn(move || {
                    let key = CipherKey::playfair("MONARCHY", 5).unwrap();
                    let codec = cache.codec(&key).unwrap();
                    assert_eq!(codec.encrypt("instruments").unwrap(), "GATLMZCLRQXA");
                });
            }
        });
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_misses_respect_capacity() {
        let cache = KeyCache::new(2);
        let keys = ["AAAA", "BBBB", "CCCC", "DDDD", "EEEE", "FFFF", "GGGG", "HHHH"];
        std::thread::scope(|scope| {
            for key in keys {
                let cache = cache.clone();
                scope.spawn(move || {
                    for _ in 0..16 {
                        cache.key_matrix(key, HillSize::Two).unwrap();
                    }
                });
            }
        });
        assert_eq!(cache.len(), 2);

        cache.clear();
        cache.key_matrix("HILL", HillSize::Two).unwrap();
        assert_eq!(cache.len(), 1);
    }
}
