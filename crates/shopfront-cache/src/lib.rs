//! Type-safe key-value store for storefront state.
//!
//! Provides a simple, ergonomic API for persisting data with automatic JSON
//! serialization, over either an in-memory or a directory-backed store.
//!
//! # Example
//!
//! ```rust
//! use shopfront_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Line {
//!     id: String,
//!     qty: i64,
//! }
//!
//! let cache = Cache::in_memory();
//!
//! // Store a value
//! cache.set("cart", &vec![Line { id: "p1".into(), qty: 1 }])?;
//!
//! // Retrieve a value
//! let cart: Option<Vec<Line>> = cache.get("cart")?;
//! assert_eq!(cart.map(|c| c.len()), Some(1));
//!
//! // Delete a value
//! cache.delete("cart")?;
//! # Ok::<(), shopfront_cache::CacheError>(())
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
