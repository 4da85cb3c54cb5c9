//! # Cache Traits
//!
//! Policy-facing interface for the thread-safe caches in this crate.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │           CachePolicy<K, V>             │
//!   │                                         │
//!   │  put(&, K, V)                           │
//!   │  get(&, &K) → Option<V>                 │
//!   │  get_or_default(&, &K) → V              │
//!   └─────────────────────────────────────────┘
//!
//!   ┌─────────────────────────────────────────┐
//!   │     ConcurrentCache: Send + Sync        │
//!   │     (marker, no methods)                │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! Every method takes `&self`: implementations synchronize internally, so a
//! cache can sit behind an `Arc` and be shared across threads without an
//! outer lock. Values are returned by clone because no borrow can outlive
//! the internal lock.
//!
//! A miss is `None`, never an error.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use arckit::policy::arc::ArcCache;
//! use arckit::traits::{CachePolicy, ConcurrentCache};
//!
//! fn warm<C: CachePolicy<u64, u64>>(cache: &C) {
//!     for k in 0..4 {
//!         cache.put(k, k * 10);
//!     }
//! }
//!
//! fn share<C: ConcurrentCache + 'static>(cache: Arc<C>) -> thread::JoinHandle<()> {
//!     thread::spawn(move || drop(cache))
//! }
//!
//! let cache = Arc::new(ArcCache::new(8, 2));
//! warm(cache.as_ref());
//! assert_eq!(CachePolicy::get(cache.as_ref(), &2), Some(20));
//! share(Arc::clone(&cache)).join().unwrap();
//! ```

/// Common operations of a replacement-policy cache.
///
/// Implemented by [`ArcCache`](crate::policy::arc::ArcCache).
pub trait CachePolicy<K, V> {
    /// Inserts `key` or updates its value. May evict other entries.
    fn put(&self, key: K, value: V);

    /// Returns a clone of the cached value, or `None` on a miss.
    ///
    /// A lookup counts as an access and may reorder internal state.
    fn get(&self, key: &K) -> Option<V>;

    /// Like [`get`](Self::get), returning `V::default()` on a miss.
    fn get_or_default(&self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }
}

/// Marker trait for caches that are safe to share across threads.
///
/// Implementors guarantee that every operation can be called concurrently
/// through a shared reference.
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    struct MapCache {
        inner: RefCell<HashMap<u32, String>>,
    }

    impl CachePolicy<u32, String> for MapCache {
        fn put(&self, key: u32, value: String) {
            self.inner.borrow_mut().insert(key, value);
        }

        fn get(&self, key: &u32) -> Option<String> {
            self.inner.borrow().get(key).cloned()
        }
    }

    #[test]
    fn test_get_or_default_falls_back() {
        let cache = MapCache {
            inner: RefCell::new(HashMap::new()),
        };
        assert_eq!(cache.get_or_default(&1), String::new());
        cache.put(1, "one".to_string());
        assert_eq!(cache.get_or_default(&1), "one");
    }

    #[test]
    fn test_concurrent_marker_requires_send_sync() {
        struct Shared;
        impl ConcurrentCache for Shared {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Shared>();
    }
}
