//! Bounded Cache - A small in-process key/value cache
//!
//! Keys are matched with a caller-supplied equality predicate, a hit moves the
//! entry to the front, and a full cache evicts from the back.
//!
//! ```
//! use bounded_cache::{predicate, BoundedCache};
//!
//! let mut cache = BoundedCache::new(2, predicate::ascii_case_insensitive::<String>)?;
//! cache.set("ABC".to_string(), 1);
//! assert_eq!(cache.get(&"abc".to_string()), Some(&1));
//! assert_eq!(cache.get(&"zzz".to_string()), None);
//! # Ok::<(), bounded_cache::CacheError>(())
//! ```

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{predicate, BoundedCache, CacheBuilder, CacheStats};
pub use config::{CacheConfig, SetPolicy, ShrinkPolicy};
pub use error::{CacheError, Result};
