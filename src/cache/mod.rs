//! Cache Module
//!
//! Provides a bounded cache with custom key equality, promote-on-hit ordering
//! and tail eviction.

mod entry;
mod index;
mod order;
pub mod predicate;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use index::{HashIndex, KeyHasher};
pub use order::AccessOrder;
pub use predicate::KeyPredicate;
pub use stats::CacheStats;
pub use store::{BoundedCache, CacheBuilder};
