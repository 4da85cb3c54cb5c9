//! Walks through ARC promotion, ghost revival, and capacity adaptation.
//!
//! Run with: `RUST_LOG=arckit=trace cargo run --example basic_arc`

use arckit::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cache = ArcCacheBuilder::new(4).transform_threshold(2).build::<&str, u32>();

    cache.put("alpha", 1);
    println!("alpha in recency: {}", cache.in_recency_main(&"alpha"));

    let _ = cache.get(&"alpha");
    println!("alpha in frequency after 2nd access: {}", cache.in_frequency_main(&"alpha"));

    for (key, value) in [("b", 2), ("c", 3), ("d", 4)] {
        cache.put(key, value);
    }
    println!(
        "recency {}/{} (ghosts {}), frequency {}/{}",
        cache.recency_len(),
        cache.recency_capacity(),
        cache.recency_ghost_len(),
        cache.frequency_len(),
        cache.frequency_capacity()
    );

    // "b" was evicted into the recency ghost list.
    println!("get(b) = {:?}", cache.get(&"b"));
    println!("get(b) = {:?}", cache.get(&"b"));
    println!(
        "after ghost hit: recency capacity {}, frequency capacity {}",
        cache.recency_capacity(),
        cache.frequency_capacity()
    );

    #[cfg(feature = "metrics")]
    {
        let snapshot = cache.snapshot();
        println!(
            "hits {} misses {} ghost revivals {} promotions {}",
            snapshot.get_hits, snapshot.get_misses, snapshot.ghost_revivals, snapshot.promotions
        );
    }

    if let Err(err) = cache.check_invariants() {
        eprintln!("invariant violated: {err}");
    }
}
