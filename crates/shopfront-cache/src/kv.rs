//! Typed cache with automatic JSON serialization.

use crate::store::{FileStore, KvStore, MemoryStore};
use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;

/// Type-safe cache over a [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S = FileStore> {
    store: S,
}

impl Cache<FileStore> {
    /// Open a directory-backed cache.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let cache = shopfront_cache::Cache::open(".shopfront")?;
    /// # Ok::<(), shopfront_cache::CacheError>(())
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(FileStore::open(dir)?))
    }
}

impl Cache<MemoryStore> {
    /// Create a cache that lives only in memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KvStore> Cache<S> {
    /// Wrap an existing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::SerializeError`] if the stored bytes don't decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// let cache = shopfront_cache::Cache::in_memory();
    /// cache.set("greeting", &"olá")?;
    /// let value: Option<String> = cache.get("greeting")?;
    /// assert_eq!(value.as_deref(), Some("olá"));
    /// # Ok::<(), shopfront_cache::CacheError>(())
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing any previous value.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        id: String,
        qty: i64,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::in_memory();
        let lines = vec![
            Line { id: "p1".into(), qty: 2 },
            Line { id: "p2".into(), qty: 1 },
        ];
        cache.set("cart", &lines).unwrap();

        let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert_eq!(loaded, Some(lines));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::in_memory();
        let loaded: Option<Vec<Line>> = cache.get("cart").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_value_is_serialize_error() {
        let cache = Cache::in_memory();
        cache.store().set("cart", b"{not json").unwrap();

        let result: Result<Option<Vec<Line>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }
}
