//! Builder for [`ArcCache`].
//!
//! Collects capacity and transform threshold, then validates them once at
//! build time.
//!
//! ## Example
//!
//! ```rust
//! use arckit::builder::ArcCacheBuilder;
//!
//! let cache = ArcCacheBuilder::new(100)
//!     .transform_threshold(3)
//!     .build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! assert_eq!(cache.transform_threshold(), 3);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::arc::{ArcCache, DEFAULT_TRANSFORM_THRESHOLD};

/// Configuration for an [`ArcCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcCacheBuilder {
    capacity: usize,
    transform_threshold: u64,
}

impl ArcCacheBuilder {
    /// Starts a builder for a cache of `capacity` total entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            transform_threshold: DEFAULT_TRANSFORM_THRESHOLD,
        }
    }

    /// Access count at which a recency entry moves to the frequency
    /// partition.
    pub fn transform_threshold(mut self, threshold: u64) -> Self {
        self.transform_threshold = threshold;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Builds the cache, clamping a zero threshold to 1.
    pub fn build<K, V>(self) -> ArcCache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        ArcCache::new(self.capacity, self.transform_threshold)
    }

    /// Builds the cache, rejecting a zero threshold.
    pub fn try_build<K, V>(self) -> Result<ArcCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        ArcCache::try_new(self.capacity, self.transform_threshold)
    }
}

impl Default for ArcCacheBuilder {
    fn default() -> Self {
        Self::new(crate::policy::arc::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = ArcCacheBuilder::default();
        assert_eq!(builder.capacity(), 10);
        let cache = builder.build::<u32, u32>();
        assert_eq!(cache.transform_threshold(), DEFAULT_TRANSFORM_THRESHOLD);
        assert_eq!(cache.capacity(), 10);
    }

    #[test]
    fn builder_applies_threshold() {
        let cache = ArcCacheBuilder::new(8).transform_threshold(5).build::<u32, u32>();
        assert_eq!(cache.transform_threshold(), 5);
        assert_eq!(cache.recency_capacity(), 4);
    }

    #[test]
    fn builder_try_build_rejects_zero_threshold() {
        let err = ArcCacheBuilder::new(8)
            .transform_threshold(0)
            .try_build::<u32, u32>()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroTransformThreshold);
    }

    #[test]
    fn builder_build_clamps_zero_threshold() {
        let cache = ArcCacheBuilder::new(8).transform_threshold(0).build::<u32, u32>();
        assert_eq!(cache.transform_threshold(), 1);
    }
}
