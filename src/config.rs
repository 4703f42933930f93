//! Cache Configuration
//!
//! Configuration for the hotspot cache. The struct has public fields for
//! simple instantiation: create it with a struct literal, no builder needed.
//!
//! Both fields treat zero as "use the documented default" rather than as an
//! error, so a caller that forwards an unvalidated size never has to handle
//! a construction failure:
//!
//! ```
//! use hotspot_cache::config::{HotspotCacheConfig, DEFAULT_CAPACITY};
//!
//! let config = HotspotCacheConfig { capacity: 0, shards: 0 };
//! assert_eq!(config.effective_capacity().get(), DEFAULT_CAPACITY);
//! ```

use std::fmt;
use std::num::NonZeroUsize;

/// Capacity substituted when a cache is constructed with `capacity == 0`.
pub const DEFAULT_CAPACITY: usize = 10240;

/// Shard count substituted when a cache is constructed with `shards == 0`.
///
/// Sixteen shards keep lock contention low for typical thread counts while
/// bounding the per-cache mutex overhead.
pub const DEFAULT_SHARDS: usize = 16;

/// Configuration for a [`HotspotCache`](crate::HotspotCache).
///
/// # Fields
///
/// - `capacity`: maximum number of keys tracked by the recency sequence.
///   Once all pending notifications are drained, the cache never holds more
///   entries than this. Zero selects [`DEFAULT_CAPACITY`].
/// - `shards`: number of independently locked partitions in the value store.
///   More shards means less contention between writers of distinct keys.
///   Zero selects [`DEFAULT_SHARDS`].
///
/// # Examples
///
/// ```
/// use hotspot_cache::config::HotspotCacheConfig;
/// use hotspot_cache::HotspotCache;
///
/// let config = HotspotCacheConfig {
///     capacity: 1000,
///     shards: 8,
/// };
/// let mut cache: HotspotCache<String, i32> = HotspotCache::init(config, None);
/// assert_eq!(cache.capacity(), 1000);
/// cache.shutdown();
/// ```
#[derive(Clone, Copy)]
pub struct HotspotCacheConfig {
    /// Maximum number of tracked keys. Zero selects [`DEFAULT_CAPACITY`].
    pub capacity: usize,
    /// Number of value-store shards. Zero selects [`DEFAULT_SHARDS`].
    pub shards: usize,
}

impl HotspotCacheConfig {
    /// Creates a configuration with the given capacity and default sharding.
    pub fn with_capacity(capacity: usize) -> Self {
        HotspotCacheConfig {
            capacity,
            shards: DEFAULT_SHARDS,
        }
    }

    /// Returns the capacity that will actually be enforced.
    pub fn effective_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.capacity)
            .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_CAPACITY).unwrap())
    }

    /// Returns the shard count that will actually be used.
    pub fn effective_shards(&self) -> usize {
        if self.shards == 0 {
            DEFAULT_SHARDS
        } else {
            self.shards
        }
    }
}

impl Default for HotspotCacheConfig {
    fn default() -> Self {
        HotspotCacheConfig {
            capacity: DEFAULT_CAPACITY,
            shards: DEFAULT_SHARDS,
        }
    }
}

impl fmt::Debug for HotspotCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotspotCacheConfig")
            .field("capacity", &self.capacity)
            .field("shards", &self.shards)
            .finish()
    }
}
