//! Cart persistence.

use crate::cart::CartLine;
use crate::error::CommerceError;

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Durable storage for the cart's line items.
///
/// `read` returns `Ok(None)` when nothing has been stored yet. Corrupt data
/// is reported as an error; callers decide how to recover.
pub trait CartStorage {
    fn read(&self) -> Result<Option<Vec<CartLine>>, CommerceError>;

    fn write(&self, lines: &[CartLine]) -> Result<(), CommerceError>;
}

#[cfg(feature = "storage")]
pub use cache_backed::CacheCartStorage;

#[cfg(feature = "storage")]
mod cache_backed {
    use super::*;
    use shopfront_cache::{Cache, FileStore, KvStore, MemoryStore};

    /// Cart storage backed by a key-value [`Cache`].
    ///
    /// The lines are stored as one JSON array under a single key.
    pub struct CacheCartStorage<S = FileStore> {
        cache: Cache<S>,
        key: String,
    }

    impl CacheCartStorage<MemoryStore> {
        /// Volatile storage, mostly useful in tests.
        pub fn in_memory() -> Self {
            Self::new(Cache::in_memory())
        }
    }

    impl<S: KvStore> CacheCartStorage<S> {
        /// Store under [`DEFAULT_CART_KEY`].
        pub fn new(cache: Cache<S>) -> Self {
            Self::with_key(cache, DEFAULT_CART_KEY)
        }

        pub fn with_key(cache: Cache<S>, key: impl Into<String>) -> Self {
            Self {
                cache,
                key: key.into(),
            }
        }

        pub fn key(&self) -> &str {
            &self.key
        }

        pub fn cache(&self) -> &Cache<S> {
            &self.cache
        }
    }

    impl<S: KvStore> CartStorage for CacheCartStorage<S> {
        fn read(&self) -> Result<Option<Vec<CartLine>>, CommerceError> {
            Ok(self.cache.get(&self.key)?)
        }

        fn write(&self, lines: &[CartLine]) -> Result<(), CommerceError> {
            self.cache.set(&self.key, lines)?;
            tracing::trace!(key = %self.key, lines = lines.len(), "cart written");
            Ok(())
        }
    }
}

#[cfg(all(test, feature = "storage"))]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Money;
    use shopfront_cache::Cache;

    fn line(id: &str, qty: i64) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: id.to_uppercase(),
            price: Money::new(1_000),
            quantity: qty,
            image: None,
        }
    }

    #[test]
    fn test_read_missing_is_none() {
        let storage = CacheCartStorage::in_memory();
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let storage = CacheCartStorage::in_memory();
        storage.write(&[line("p1", 2), line("p2", 1)]).unwrap();

        let lines = storage.read().unwrap().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], line("p1", 2));
    }

    #[test]
    fn test_custom_key() {
        let cache = Cache::in_memory();
        let storage = CacheCartStorage::with_key(cache, "shop:cart");
        storage.write(&[line("p1", 1)]).unwrap();
        assert!(storage.cache().exists("shop:cart").unwrap());
        assert!(!storage.cache().exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_corrupt_payload_is_error() {
        let storage = CacheCartStorage::in_memory();
        storage.cache().set("cart", &serde_json::json!({"not": "a list"})).unwrap();
        assert!(matches!(
            storage.read(),
            Err(CommerceError::SerializationError(_))
        ));
    }
}
