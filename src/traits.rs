//! # Cache Trait Hierarchy
//!
//! Trait seam between the cache implementations and their generic consumers
//! (the trace driver, cross-validation tests, benches).
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len / is_empty / capacity / clear      │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │                                         │
//!   │  remove(&mut, &K) → Option<V>           │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru() → Option<(K, V)>             │
//!   │  peek_lru() → Option<(&K, &V)>          │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → Option<usize>       │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! | Trait           | Extends        | Purpose                            |
//! |-----------------|----------------|------------------------------------|
//! | `CoreCache`     | -              | Universal cache operations         |
//! | `MutableCache`  | `CoreCache`    | Adds arbitrary key removal         |
//! | `LruCacheTrait` | `MutableCache` | Recency introspection and eviction |
//!
//! Both [`LruCache`](crate::policy::lru::LruCache) and
//! [`OrderedLruCache`](crate::policy::ordered_lru::OrderedLruCache) implement
//! all three, which is what lets the trace driver and the cross-validation
//! tests treat them interchangeably.

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use lrukit::traits::CoreCache;
/// use lrukit::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key
    /// existed.
    ///
    /// If the cache is full and the key is new, the least recently used
    /// entry is evicted first.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key, marking it most recently used.
    ///
    /// A miss returns `None` and changes nothing. Use
    /// [`contains`](Self::contains) to check existence without touching
    /// recency order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating recency order.
    fn contains(&self, key: &K) -> bool;

    /// Current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes an entry by key, returning its value if present.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// Recency-ordered caches.
///
/// Adds eviction-side access (`pop_lru`, `peek_lru`) and recency
/// introspection (`touch`, `recency_rank`) on top of [`MutableCache`].
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it or
    /// changing its position.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks a key as most recently used without retrieving its value.
    ///
    /// Returns `true` if the key was present.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::traits::{CoreCache, LruCacheTrait};
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    ///
    /// assert!(cache.touch(&1));
    /// cache.insert(3, "c"); // evicts 2, not the touched 1
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// ```
    fn touch(&mut self, key: &K) -> bool;

    /// Position of a key in recency order: 0 = most recently used. O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
