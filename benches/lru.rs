use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lrukit::policy::lru::LruCache;
use lrukit::trace::count_faults;
use lrukit::traits::{CoreCache, LruCacheTrait};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn bench_lru_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(1024);
                for i in 0..1024u64 {
                    cache.insert(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(1024);
                for i in 0..1024u64 {
                    cache.insert(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_touch_hotset(c: &mut Criterion) {
    c.bench_function("lru_touch_hotset", |b| {
        b.iter_batched(
            || {
                let mut cache = LruCache::new(4096);
                for i in 0..4096u64 {
                    cache.insert(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.touch(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_trace_replay(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x1CEB00DA);
    // Zipf-ish workload: a small hot set with a long uniform tail.
    let pages: Vec<u32> = (0..16_384)
        .map(|_| {
            if rng.gen_bool(0.8) {
                rng.gen_range(0..64)
            } else {
                rng.gen_range(64..4096)
            }
        })
        .collect();

    c.bench_function("lru_trace_replay", |b| {
        b.iter_batched(
            || LruCache::new(256),
            |mut cache| {
                let _ = std::hint::black_box(count_faults(&mut cache, &pages));
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lru_insert_get,
    bench_lru_eviction_churn,
    bench_lru_touch_hotset,
    bench_lru_trace_replay
);
criterion_main!(benches);
