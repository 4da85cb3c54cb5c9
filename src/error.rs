//! Error types.
//!
//! Cache misses are not errors; lookups report them as `None`. The only
//! fallible paths are checked construction ([`ConfigError`]) and the
//! `check_invariants` walks used by tests and debug builds
//! ([`InvariantError`]).
//!
//! ```
//! use arckit::builder::ArcCacheBuilder;
//! use arckit::error::ConfigError;
//!
//! let err = ArcCacheBuilder::new(100)
//!     .transform_threshold(0)
//!     .try_build::<u64, String>()
//!     .unwrap_err();
//! assert_eq!(err, ConfigError::ZeroTransformThreshold);
//! ```

use thiserror::Error;

/// A structural check found the cache in an inconsistent state.
///
/// Produced by the `check_invariants` methods on lists, partitions, and the
/// coordinator. Seeing one outside a test means a bug in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violated: {detail}")]
pub struct InvariantError {
    detail: String,
}

impl InvariantError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Which check failed, without the common prefix.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Rejected cache parameters.
///
/// # Example
///
/// ```
/// use arckit::policy::arc::ArcCache;
///
/// let err = ArcCache::<u64, u64>::try_new(10, 0).unwrap_err();
/// assert!(err.to_string().contains("transform_threshold"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A threshold of 0 would promote on insertion.
    #[error("transform_threshold must be >= 1")]
    ZeroTransformThreshold,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_error_prefixes_detail() {
        let err = InvariantError::new("bucket 3 is empty");
        assert_eq!(err.to_string(), "invariant violated: bucket 3 is empty");
        assert_eq!(err.detail(), "bucket 3 is empty");
    }

    #[test]
    fn config_error_names_the_parameter() {
        let err = ConfigError::ZeroTransformThreshold;
        assert_eq!(err.to_string(), "transform_threshold must be >= 1");
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<InvariantError>();
        assert_error::<ConfigError>();
    }
}
