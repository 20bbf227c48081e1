// ==============================================
// END-TO-END LRU TRACE TESTS (integration)
// ==============================================
//
// Replays known reference traces through the public cache surface and
// checks the externally observable behavior: hit/miss pattern, eviction
// order, capacity bound, fault counts.

use lrukit::policy::lru::LruCache;
use lrukit::policy::ordered_lru::OrderedLruCache;
use lrukit::trace::{count_faults, count_faults_scan};
use lrukit::traits::{CoreCache, LruCacheTrait};

#[test]
fn standard_lru_trace_capacity_three() {
    // put(1,1) put(2,2) put(3,3) get(1)=1 put(4,4)
    // get(2)=MISS get(3)=3 get(4)=4
    //
    // Key 2 is evicted because 1 was refreshed before 4 was inserted.
    let mut cache = LruCache::new(3);
    cache.insert(1, 1);
    cache.insert(2, 2);
    cache.insert(3, 3);

    assert_eq!(cache.get(&1), Some(&1));
    cache.insert(4, 4);

    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(&3));
    assert_eq!(cache.get(&4), Some(&4));
    assert_eq!(cache.len(), 3);
}

#[test]
fn silberschatz_prefix_faults_with_three_frames() {
    let pages = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];

    let mut pointer = LruCache::new(3);
    let mut ordered = OrderedLruCache::new(3);

    assert_eq!(count_faults(&mut pointer, &pages), 9);
    assert_eq!(count_faults(&mut ordered, &pages), 9);
    assert_eq!(count_faults_scan(&pages, 3), 9);
}

#[test]
fn belady_string_faults_with_three_and_four_frames() {
    let pages = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

    let mut cache = LruCache::new(3);
    assert_eq!(count_faults(&mut cache, &pages), 10);
    assert_eq!(count_faults_scan(&pages, 3), 10);

    let mut cache = LruCache::new(4);
    assert_eq!(count_faults(&mut cache, &pages), 8);
    assert_eq!(count_faults_scan(&pages, 4), 8);
}

#[test]
fn capacity_one_evicts_on_every_new_key() {
    // put(A,1) put(B,2) get(A)=MISS get(B)=2
    let mut cache = LruCache::new(1);
    cache.insert('A', 1);
    cache.insert('B', 2);

    assert_eq!(cache.get(&'A'), None);
    assert_eq!(cache.get(&'B'), Some(&2));
    assert_eq!(cache.len(), 1);
}

#[test]
fn repeated_hits_on_sole_resident_never_fault() {
    let mut cache = LruCache::new(3);
    cache.insert(42, "answer");

    for _ in 0..100 {
        assert_eq!(cache.get(&42), Some(&"answer"));
        assert_eq!(cache.len(), 1);
    }
    assert_eq!(cache.stats().misses, 0);
    assert_eq!(cache.stats().hits, 100);
}

#[test]
fn inserting_capacity_distinct_keys_evicts_first_in() {
    let capacity = 5;
    let mut cache = LruCache::new(capacity);

    for key in 0..capacity as u32 {
        cache.insert(key, key);
    }
    // No accesses in between: strict insertion order decides.
    cache.insert(99, 99);

    assert!(!cache.contains(&0));
    for key in 1..capacity as u32 {
        assert!(cache.contains(&key));
    }
    assert!(cache.contains(&99));
}

#[test]
fn refreshed_key_survives_full_turnover() {
    let mut cache = LruCache::new(3);
    cache.insert(1, 'x');

    // Keep re-accessing key 1 while churning capacity-many other keys
    // through; 1 must outlive them all.
    for round in 0..10u32 {
        cache.get(&1);
        cache.insert(100 + round * 2, 'a');
        cache.get(&1);
        cache.insert(101 + round * 2, 'b');
    }

    assert!(cache.contains(&1));
    assert!(cache.recency_rank(&1).unwrap() < 3);
}

#[test]
fn capacity_bound_holds_after_every_operation() {
    let mut cache = LruCache::new(4);
    for i in 0..256u32 {
        cache.insert(i % 19, i);
        assert!(cache.len() <= 4);
        cache.get(&(i % 7));
        assert!(cache.len() <= 4);
    }
    assert!(cache.check_invariants().is_ok());
}

#[test]
fn update_in_place_keeps_size_and_evicts_nothing() {
    let mut cache = LruCache::new(2);
    cache.insert(1, "one");
    cache.insert(2, "two");

    assert_eq!(cache.insert(2, "TWO"), Some("two"));
    assert_eq!(cache.len(), 2);
    assert!(cache.contains(&1));
    assert_eq!(cache.peek(&2), Some(&"TWO"));
    assert_eq!(cache.stats().evictions, 0);
}

#[test]
fn eviction_order_is_total() {
    let mut cache = LruCache::new(4);
    for key in [10u32, 20, 30, 40] {
        cache.insert(key, key);
    }
    cache.get(&20);
    cache.get(&10);
    cache.touch(&40);

    // Recency order is now 40, 10, 20, 30 (MRU -> LRU); pop_lru drains in
    // reverse.
    assert_eq!(cache.pop_lru(), Some((30, 30)));
    assert_eq!(cache.pop_lru(), Some((20, 20)));
    assert_eq!(cache.pop_lru(), Some((10, 10)));
    assert_eq!(cache.pop_lru(), Some((40, 40)));
    assert_eq!(cache.pop_lru(), None);
}
