use lrukit::policy::lru::LruCache;
use lrukit::policy::ordered_lru::OrderedLruCache;
use lrukit::trace::{count_faults, count_faults_scan};

fn main() {
    let pages = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2];
    let frames = 3;

    let mut pointer = LruCache::new(frames);
    let mut ordered = OrderedLruCache::new(frames);

    println!("pointer core : {} faults", count_faults(&mut pointer, &pages));
    println!("ordered ref  : {} faults", count_faults(&mut ordered, &pages));
    println!("backward scan: {} faults", count_faults_scan(&pages, frames));
    println!("hit ratio    : {:.2}", pointer.stats().hit_ratio());
}

// Expected output:
// pointer core : 9 faults
// ordered ref  : 9 faults
// backward scan: 9 faults
// hit ratio    : 0.31
//
// 13 references, 9 faults, 4 hits: 4/13 ≈ 0.31.
