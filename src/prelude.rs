pub use crate::builder::ArcCacheBuilder;
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{ArcMetricsSnapshot, MetricsReset, MetricsSnapshotProvider};
pub use crate::policy::arc::{ArcCache, FrequencyPartition, RecencyPartition};
pub use crate::traits::{CachePolicy, ConcurrentCache};
