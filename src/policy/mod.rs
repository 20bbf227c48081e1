pub mod lru;
pub mod ordered_lru;

#[cfg(feature = "concurrency")]
pub use lru::ConcurrentLruCache;
pub use lru::LruCache;
pub use ordered_lru::OrderedLruCache;
