//! Typed key-value storage for storefront client state.
//!
//! Values are stored as JSON under string keys. The [`KvStore`] trait is the
//! backend seam; [`MemoryStore`] keeps everything in process and
//! [`FileStore`] writes one file per key into a directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::{cache_key, Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = cache_key!("cart", "acme");
//!
//! cache.set(&key, &cart)?;
//! let cart: Option<Cart> = cache.get(&key)?;
//! cache.delete(&key)?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
