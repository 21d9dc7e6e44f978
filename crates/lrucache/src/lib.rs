//! # lrucache
//!
//! Fixed-capacity, in-memory key-value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **Key index**: AHash map from key to list position (O(1))
//! - **Recency list**: slab-backed doubly-linked list, head = most recently
//!   used, tail = next to evict (O(1) push, remove, move-to-front)
//! - **LruCache**: keeps both in agreement on every operation
//!
//! Single-threaded: wrap the cache in a mutex to share it.
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, "a");
//! cache.put(2, "b");
//! cache.get(&1)?; // 1 is now most recently used
//! cache.put(3, "c"); // evicts 2
//!
//! assert!(!cache.exists(&2));
//! assert_eq!(cache.size(), 2);
//! # Ok::<(), lrucache::Error<i32>>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod index;
mod list;
mod stats;

pub use cache::LruCache;
pub use error::{Error, Result};
pub use index::KeyIndex;
pub use list::{Iter, Locator, RecencyList};
pub use stats::CacheStats;
