//! Page-reference trace replay and fault counting.
//!
//! Drives a cache with a sequence of page references, the classic page
//! replacement workload: each reference is looked up with `get`; a miss is
//! a page fault and loads the page with `insert(page, page)`. The
//! page-number-as-payload convention belongs to this workload only — the
//! caches themselves keep keys and values independent.
//!
//! [`count_faults_scan`] is a standalone brute-force counter that finds the
//! eviction victim by scanning backwards through the reference history
//! instead of maintaining any order structure. It is O(N · capacity) and
//! exists purely as an independent oracle for the cache implementations.

use crate::traits::CoreCache;

/// Replays `pages` through `cache` and returns the number of page faults.
///
/// A fault is a `get` miss followed by loading the page. Works with any
/// cache implementing [`CoreCache`], which is what lets the tests replay
/// one trace through both the pointer-based and the ordered-map cache and
/// compare.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::trace::count_faults;
///
/// let mut cache = LruCache::new(3);
/// let pages = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];
/// assert_eq!(count_faults(&mut cache, &pages), 9);
/// ```
pub fn count_faults<C>(cache: &mut C, pages: &[u32]) -> usize
where
    C: CoreCache<u32, u32>,
{
    let mut faults = 0;
    for &page in pages {
        if cache.get(&page).is_none() {
            faults += 1;
            cache.insert(page, page);
        }
        // Hit: get() already refreshed recency order.
    }
    faults
}

/// Brute-force fault counter: no recency structure, O(N · capacity).
///
/// Keeps only the set of resident pages. On a fault with full frames, the
/// victim is found by scanning backwards from the current reference: the
/// resident page that turns up last in that scan is the one least recently
/// used.
pub fn count_faults_scan(pages: &[u32], capacity: usize) -> usize {
    assert!(capacity > 0, "capacity must be greater than zero");

    let mut frames: Vec<u32> = Vec::with_capacity(capacity);
    let mut faults = 0;

    for (i, &page) in pages.iter().enumerate() {
        if frames.contains(&page) {
            continue;
        }
        faults += 1;

        if frames.len() == capacity {
            // Walk history newest-first, ticking off resident pages; the
            // final one ticked off has its last use furthest in the past.
            let mut seen: Vec<u32> = Vec::with_capacity(capacity);
            let mut victim = frames[0];
            for &past in pages[..i].iter().rev() {
                if frames.contains(&past) && !seen.contains(&past) {
                    seen.push(past);
                    if seen.len() == frames.len() {
                        victim = past;
                        break;
                    }
                }
            }
            frames.retain(|&resident| resident != victim);
        }

        frames.push(page);
    }

    faults
}
