//! # Least Recently Used (LRU) Cache
//!
//! Pointer-based O(1) LRU cache core: a direct-lookup index over a
//! sentinel-bounded recency list, with nodes owned by a slot arena.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                         │
//!   │                                                                │
//!   │   ┌──────────────────────────────────────────────────────┐     │
//!   │   │  FxHashMap<K, SlotId> (index into the recency list)  │     │
//!   │   │                                                      │     │
//!   │   │  ┌─────────┬──────────────────────────────────┐      │     │
//!   │   │  │   Key   │  SlotId                          │      │     │
//!   │   │  ├─────────┼───────────────────────────────┐  │      │     │
//!   │   │  │  key_1  │  ─────────────────────────┐   │  │      │     │
//!   │   │  │  key_2  │  ───────────────────┐     │   │  │      │     │
//!   │   │  │  key_3  │  ─────────────┐     │     │   │  │      │     │
//!   │   │  └─────────┴───────────────┼─────┼─────┼───┘  │      │     │
//!   │   └──────────────────────────── ─────┼─────┼──────┘      │     │
//!   │                                │     │     │             │     │
//!   │   ┌────────────────────────────┼─────┼─────┼───────────┐ │     │
//!   │   │  RecencyList<Entry<K, V>>  ▼     ▼     ▼           │ │     │
//!   │   │                                                    │ │     │
//!   │   │  [head] ◄──► [e_1] ◄──► [e_2] ◄──► [e_3] ◄──► [tail]       │
//!   │   │  sentinel    MRU                   LRU       sentinel      │
//!   │   └────────────────────────────────────────────────────┘ │     │
//!   └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entry reachable through the index is linked into the list and vice
//! versa; the two structures are kept bijective by construction and verified
//! by [`LruCache::check_invariants`].
//!
//! ## Operations Flow
//!
//! ```text
//!   INSERT new key (cache full, capacity = 3)
//!   ═══════════════════════════════════════════════════════════════
//!   Before:  [head] ◄──► [A] ◄──► [B] ◄──► [C] ◄──► [tail]
//!   insert(D):
//!     1. victim = node before tail  ──► evict [C], drop index entry
//!     2. link [D] right after head, index D
//!   After:   [head] ◄──► [D] ◄──► [A] ◄──► [B] ◄──► [tail]
//!
//!   GET existing key
//!   ═══════════════════════════════════════════════════════════════
//!   get(B): index lookup, unlink [B], relink after head — O(1)
//!   After:   [head] ◄──► [B] ◄──► [D] ◄──► [A] ◄──► [tail]
//! ```
//!
//! ## Methods
//!
//! | Method           | Complexity | Description                             |
//! |------------------|------------|-----------------------------------------|
//! | `new(capacity)`  | O(1)       | Create cache; panics on zero capacity   |
//! | `try_new(cap)`   | O(1)       | Fallible constructor                    |
//! | `insert(k, v)`   | O(1)       | Insert or update, may evict LRU         |
//! | `get(&k)`        | O(1)       | Get value, moves to MRU position        |
//! | `peek(&k)`       | O(1)       | Get value without touching order        |
//! | `contains(&k)`   | O(1)       | Existence check, no reorder             |
//! | `remove(&k)`     | O(1)       | Remove entry by key                     |
//! | `pop_lru()`      | O(1)       | Remove and return least recently used   |
//! | `peek_lru()`     | O(1)       | Inspect eviction candidate              |
//! | `touch(&k)`      | O(1)       | Move to MRU without returning value     |
//! | `recency_rank()` | O(n)       | Position in recency order (0 = MRU)     |
//! | `clear()`        | O(n)       | Remove all entries                      |
//!
//! ## Design Notes
//!
//! - Nodes live in a [`SlotArena`](crate::ds::SlotArena); both the list
//!   links and the index store stable `SlotId` handles, never references or
//!   raw pointers. Eviction frees the handle back to the arena.
//! - The sentinel pair removes every end-of-list branch from the relink
//!   paths; see [`RecencyList`](crate::ds::RecencyList).
//! - Values are stored inline in list entries. Callers that need values to
//!   outlive eviction can cache `Arc<V>` as the value type.
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded; every operation, including `get`, mutates
//! recency order and therefore takes `&mut self`. A multi-threaded host must
//! serialize access — [`ConcurrentLruCache`] (feature `concurrency`) does so
//! with a `parking_lot::RwLock` around every call.

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
use crate::stats::CacheStats;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// One cached key/value pair, owned by the recency list.
///
/// The key is duplicated here so eviction can erase the index entry when it
/// reaches the node from the list side.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Pointer-based O(1) LRU cache: `FxHashMap` index + sentinel-bounded
/// recency list over a slot arena.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// let mut cache = LruCache::new(2);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
///
/// assert_eq!(cache.get(&1), Some(&"one"));
///
/// // 1 was just refreshed, so inserting a third key evicts 2.
/// cache.insert(3, "three");
/// assert!(!cache.contains(&2));
/// ```
pub struct LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    index: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates a cache that holds at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to
    /// handle that case without panicking.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible constructor: rejects `capacity == 0`.
    ///
    /// A zero-capacity cache could never admit an entry — `insert` would
    /// have to evict from an empty list — so construction refuses it
    /// outright.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: RecencyList::with_capacity(capacity),
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Read-only lookup that leaves recency order untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    ///
    /// // Key 1 is still the eviction candidate.
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Resets the operation counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Verifies the index↔list bijection and the capacity bound.
    ///
    /// Cheap enough for tests, O(n); the same check runs automatically after
    /// every mutation in debug builds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} entries but list holds {}",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "index entry points at a node with a different key",
                    ));
                },
                None => {
                    return Err(InvariantError::new("index entry points at a freed slot"));
                },
            }
        }
        Ok(())
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            panic!("lru cache invariant violated: {err}");
        }
    }

    /// Evicts the least recently used entry to make room.
    ///
    /// Caller guarantees the cache is at capacity, hence non-empty; an empty
    /// list here is a bug in this module, not a caller error.
    fn evict_one(&mut self) {
        let victim = self
            .list
            .least_recent()
            .expect("cache at capacity but recency list is empty");
        let entry = self
            .list
            .remove(victim)
            .expect("eviction candidate vanished from the list");
        self.index.remove(&entry.key);
        self.stats.record_eviction();
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Insert or update; a new key at capacity evicts the LRU entry first.
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let entry = self
                .list
                .get_mut(id)
                .expect("index entry points at a freed slot");
            let previous = std::mem::replace(&mut entry.value, value);
            self.list.move_to_front(id);
            self.stats.record_update();
            self.debug_validate();
            return Some(previous);
        }

        if self.index.len() == self.capacity {
            self.evict_one();
        }

        let id = self.list.push_front(Entry { key, value });
        self.index.insert(key, id);
        self.stats.record_insert();
        self.debug_validate();
        None
    }

    /// Hit moves the entry to the MRU position; miss changes nothing.
    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                self.stats.record_miss();
                return None;
            },
        };
        self.stats.record_hit();
        self.list.move_to_front(id);
        self.debug_validate();
        self.list.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
        self.debug_validate();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self
            .list
            .remove(id)
            .expect("index entry points at a freed slot");
        self.debug_validate();
        Some(entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let victim = self.list.least_recent()?;
        let entry = self
            .list
            .remove(victim)
            .expect("eviction candidate vanished from the list");
        self.index.remove(&entry.key);
        self.debug_validate();
        Some((entry.key, entry.value))
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        let id = self.list.least_recent()?;
        self.list.get(id).map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => {
                self.list.move_to_front(id);
                self.debug_validate();
                true
            },
            None => false,
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = *self.index.get(key)?;
        self.list.iter_ids().position(|id| id == target)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe wrapper serializing every cache call behind a
/// `parking_lot::RwLock`.
///
/// The core itself stays single-threaded; this wrapper is the
/// host-serialization layer. Calls that update recency order (`insert`,
/// `get`, `touch`, `remove`, `pop_lru`) take the write lock; pure reads
/// (`peek`, `contains`, `len`, `peek_lru`) take the read lock.
///
/// Values are returned by clone, so `V: Clone`. Cache `Arc<V>` when cloning
/// the payload itself is too expensive.
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentLruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    inner: Arc<RwLock<LruCache<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Copy + Eq + Hash,
    V: Clone,
{
    /// Creates a thread-safe LRU cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero, like [`LruCache::new`].
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Fallible constructor: rejects `capacity == 0`.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(LruCache::try_new(capacity)?)),
        })
    }

    /// Inserts a key-value pair, returning the previous value if present.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Gets a value by key, moving it to the MRU position.
    ///
    /// Takes the write lock: even a read updates recency order.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    /// Read-only lookup that leaves recency order untouched.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    /// Removes an entry by key.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    /// Marks a key as most recently used; `true` if it was present.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.write().pop_lru()
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, V)> {
        let cache = self.inner.read();
        cache.peek_lru().map(|(k, v)| (*k, v.clone()))
    }

    /// Returns `true` if the key exists.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}
