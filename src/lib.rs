//! arckit: a thread-safe Adaptive Replacement Cache.
//!
//! [`ArcCache`](policy::arc::ArcCache) splits its capacity between a recency
//! (LRU) partition and a frequency (LFU) partition and shifts capacity toward
//! whichever side's ghost list reports recent regret.
//!
//! ```
//! use arckit::prelude::*;
//!
//! let cache = ArcCacheBuilder::new(64).transform_threshold(2).build::<u32, String>();
//! cache.put(7, "seven".to_string());
//! assert_eq!(cache.get(&7).as_deref(), Some("seven"));
//! ```

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod policy;
pub mod prelude;
pub mod traits;
