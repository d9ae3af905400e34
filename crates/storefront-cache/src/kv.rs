//! Key-value store seam with automatic serialization.

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

/// A byte-oriented key-value backend.
///
/// Implementations only move bytes; [`Cache`] layers JSON on top.
pub trait KvStore {
    /// Read the raw bytes stored under `key`.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store raw bytes under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check whether `key` exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// List all keys.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// Type-safe cache over any [`KvStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone, Default)]
pub struct Cache<S> {
    store: S,
}

impl<S: KvStore> Cache<S> {
    /// Wrap a backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("cart:acme")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get_raw(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set_raw(key, &bytes)
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
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!("cart", tenant_id);
/// // Returns "cart:acme"
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Line {
        sku: String,
        quantity: i64,
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cart", "acme"), "cart:acme");
        assert_eq!(cache_key!("cart", "acme", 7), "cart:acme:7");
    }

    #[test]
    fn test_typed_roundtrip_through_memory() {
        let cache = Cache::new(MemoryStore::new());
        let line = Line {
            sku: "TEE-M".to_string(),
            quantity: 2,
        };

        cache.set("line", &line).unwrap();
        assert!(cache.exists("line").unwrap());
        assert_eq!(cache.get::<Line>("line").unwrap(), Some(line));

        cache.delete("line").unwrap();
        assert_eq!(cache.get::<Line>("line").unwrap(), None);
    }

    #[test]
    fn test_get_wrong_shape_is_serialize_error() {
        let cache = Cache::new(MemoryStore::new());
        cache.store().set_raw("line", b"not json").unwrap();

        let err = cache.get::<Line>("line").unwrap_err();
        assert!(matches!(err, CacheError::SerializeError(_)));
    }
}
