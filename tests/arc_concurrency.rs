// ==============================================
// ARC CONCURRENCY TESTS (integration)
// ==============================================
//
// The coordinator locks each partition separately, so sequences spanning
// both partitions can interleave. These tests hammer one shared cache from
// several threads and then check that each partition is still consistent.

use std::sync::{Arc, Barrier};
use std::thread;

use arckit::policy::arc::ArcCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const THREADS: usize = 8;

fn hammer(cache: &Arc<ArcCache<u64, u64>>, ops_per_thread: usize, key_space: u64) {
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(t as u64);
                barrier.wait();
                for _ in 0..ops_per_thread {
                    let key = rng.gen_range(0..key_space);
                    if rng.gen_bool(0.4) {
                        cache.put(key, key * 2);
                    } else if let Some(value) = cache.get(&key) {
                        assert_eq!(value, key * 2);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn mixed_workload_keeps_partitions_consistent() {
    let cache = Arc::new(ArcCache::new(64, 2));
    hammer(&cache, 5_000, 256);

    assert!(cache.recency_len() <= cache.recency_capacity());
    assert!(cache.frequency_len() <= cache.frequency_capacity());
    assert!(cache.recency_ghost_len() <= 32);
    assert!(cache.frequency_ghost_len() <= 32);
    assert!(cache.len() <= cache.capacity());
}

#[test]
fn hot_key_contention_never_returns_foreign_value() {
    let cache = Arc::new(ArcCache::new(8, 2));
    hammer(&cache, 10_000, 4);
    assert!(cache.len() <= cache.capacity());
}

#[test]
fn sequential_phase_after_contention_is_consistent() {
    let cache = Arc::new(ArcCache::new(32, 3));
    hammer(&cache, 2_000, 128);

    // Once quiescent, the cache behaves normally again.
    cache.clear();
    for k in 0..16 {
        cache.put(k, k * 2);
    }
    for k in 0..16 {
        assert_eq!(cache.get(&k), Some(k * 2));
    }
    cache.check_invariants().unwrap();
}
