//! Ordered-map LRU reference implementation.
//!
//! Keeps recency order in a `BTreeMap` keyed by a monotonic access tick
//! instead of a linked list: the smallest tick is the least recently used
//! entry, the largest the most recent. Every hit re-keys the entry under a
//! fresh tick.
//!
//! Operations are O(log n), so this is not the performance-contract core —
//! that is [`LruCache`](crate::policy::lru::LruCache). It exists as an
//! independently-derived oracle: the cross-validation tests replay the same
//! traces through both implementations and require identical behavior.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
use crate::stats::CacheStats;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Ordered-map LRU cache with O(log n) operations.
///
/// Same observable behavior as [`LruCache`](crate::policy::lru::LruCache);
/// see the module docs for why it exists.
pub struct OrderedLruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// key → (current access tick, value)
    index: FxHashMap<K, (u64, V)>,
    /// access tick → key, ascending = LRU first
    order: BTreeMap<u64, K>,
    tick: u64,
    capacity: usize,
    stats: CacheStats,
}

impl<K, V> OrderedLruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates a cache that holds at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible constructor: rejects `capacity == 0`.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: BTreeMap::new(),
            tick: 0,
            capacity,
            stats: CacheStats::new(),
        })
    }

    /// Read-only lookup that leaves recency order untouched.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|(_, value)| value)
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Resets the operation counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Verifies the index↔order bijection and the capacity bound.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} entries but order map holds {}",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (&tick, key) in &self.order {
            match self.index.get(key) {
                Some((entry_tick, _)) if *entry_tick == tick => {},
                Some(_) => {
                    return Err(InvariantError::new("order entry holds a stale tick"));
                },
                None => {
                    return Err(InvariantError::new("order entry for a key not in the index"));
                },
            }
        }
        Ok(())
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Re-keys `key` under a fresh tick, making it most recently used.
    /// Caller guarantees presence.
    fn refresh(&mut self, key: &K) {
        let old_tick = match self.index.get(key) {
            Some((tick, _)) => *tick,
            None => unreachable!("refresh called for an absent key"),
        };
        let tick = self.next_tick();
        self.order.remove(&old_tick);
        self.order.insert(tick, *key);
        if let Some(entry) = self.index.get_mut(key) {
            entry.0 = tick;
        }
    }
}

impl<K, V> CoreCache<K, V> for OrderedLruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.index.contains_key(&key) {
            self.refresh(&key);
            let entry = self.index.get_mut(&key).expect("refreshed key vanished");
            let previous = std::mem::replace(&mut entry.1, value);
            self.stats.record_update();
            return Some(previous);
        }

        if self.index.len() == self.capacity {
            let (_, victim) = self
                .order
                .pop_first()
                .expect("cache at capacity but order map is empty");
            self.index.remove(&victim);
            self.stats.record_eviction();
        }

        let tick = self.next_tick();
        self.order.insert(tick, key);
        self.index.insert(key, (tick, value));
        self.stats.record_insert();
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.index.contains_key(key) {
            self.stats.record_miss();
            return None;
        }
        self.stats.record_hit();
        self.refresh(key);
        self.index.get(key).map(|(_, value)| value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }
}

impl<K, V> MutableCache<K, V> for OrderedLruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let (tick, value) = self.index.remove(key)?;
        self.order.remove(&tick);
        Some(value)
    }
}

impl<K, V> LruCacheTrait<K, V> for OrderedLruCache<K, V>
where
    K: Copy + Eq + Hash,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let (_, key) = self.order.pop_first()?;
        let (_, value) = self.index.remove(&key).expect("order entry without index entry");
        Some((key, value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        let (_, key) = self.order.first_key_value()?;
        self.index
            .get_key_value(key)
            .map(|(key, (_, value))| (key, value))
    }

    fn touch(&mut self, key: &K) -> bool {
        if self.index.contains_key(key) {
            self.refresh(key);
            true
        } else {
            false
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        // Highest tick = rank 0.
        self.order.iter().rev().position(|(_, k)| k == key)
    }
}

impl<K, V> fmt::Debug for OrderedLruCache<K, V>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedLruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
