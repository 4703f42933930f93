//! Hotspot Cache Facade
//!
//! The public surface of the crate. A [`HotspotCache`] composes the three
//! internal components and owns their lifecycle:
//!
//! - the lock-striped value store, which callers hit directly and
//!   concurrently,
//! - the recency tracker, owned exclusively by the coordinator's worker
//!   thread,
//! - the access coordinator, which serializes every recency update through a
//!   rendezvous channel.
//!
//! # Data Flow
//!
//! `put` writes the value store and then hands the key to the coordinator;
//! `get` reads the value store and, on a hit, hands the key over as well.
//! Both block until the coordinator has accepted the key, which is the
//! system's backpressure: aggregate throughput is bounded by the consumption
//! rate of the single worker.
//!
//! # Consistency
//!
//! Recency updates are applied asynchronously, so the value store may
//! transiently hold more entries than the configured capacity (by at most
//! the number of in-flight notifications). A `get` racing with the eviction
//! of the same key may return the value or a miss; both are valid outcomes.
//!
//! # Lifecycle
//!
//! The cache owns its worker thread. Call [`shutdown`](HotspotCache::shutdown)
//! when finished; dropping the cache performs the same teardown implicitly,
//! so the thread is released on every exit path.

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crate::config::HotspotCacheConfig;
use crate::coordinator::AccessCoordinator;
use crate::metrics::{CacheMetrics, HotspotCacheMetrics};
use crate::recency::RecencyTracker;
use crate::store::ValueStore;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A concurrent, capacity-bounded cache evicting the least recently touched
/// entries.
///
/// Every successful `get` and every `put` counts as a touch. Once the number
/// of tracked keys exceeds the configured capacity, the coldest key is
/// evicted. There is no public remove: eviction is exclusively
/// capacity-triggered.
///
/// The cache is `Sync`; share it by reference (or `Arc`) across any number
/// of threads.
///
/// # Examples
///
/// ```
/// use hotspot_cache::HotspotCache;
///
/// let mut cache = HotspotCache::new(2);
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing an entry refreshes its recency
/// assert_eq!(cache.get(&"apple"), Some(1));
/// assert_eq!(cache.get(&"cherry"), None);
///
/// cache.shutdown();
/// ```
pub struct HotspotCache<K, V, S = DefaultHashBuilder> {
    store: Arc<ValueStore<K, V, S>>,
    coordinator: AccessCoordinator<K>,
    config: HotspotCacheConfig,
    metrics: Arc<HotspotCacheMetrics>,
}

/// Point-in-time observability snapshot, exposed for testing and debugging.
///
/// Not part of the stability contract: `tracked_entries` and
/// `pending_notifications` are sampled from gauges the coordinator updates
/// asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheDiagnostics {
    /// The enforced capacity of the recency sequence.
    pub capacity: usize,
    /// Keys currently tracked by the recency sequence.
    pub tracked_entries: usize,
    /// Notifications emitted but not yet applied by the coordinator.
    pub pending_notifications: usize,
}

impl<K, V> HotspotCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Creates a cache bounded to `capacity` entries.
    ///
    /// A capacity of zero substitutes the documented default of
    /// [`DEFAULT_CAPACITY`](crate::config::DEFAULT_CAPACITY) entries rather
    /// than failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotspot_cache::HotspotCache;
    /// use hotspot_cache::config::DEFAULT_CAPACITY;
    ///
    /// let mut cache: HotspotCache<String, i32> = HotspotCache::new(0);
    /// assert_eq!(cache.capacity(), DEFAULT_CAPACITY);
    /// cache.shutdown();
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::init(HotspotCacheConfig::with_capacity(capacity), None)
    }

    /// Creates a cache from a configuration with an optional hasher.
    pub fn init(config: HotspotCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::init_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> HotspotCache<K, V, S>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
    S: BuildHasher + Clone + Send + Sync + 'static,
{
    /// Creates a cache with a custom hash builder.
    ///
    /// The builder is shared by the value store's shard selection and the
    /// recency tracker's index. Use this for deterministic hashing or
    /// DoS-resistant hashers.
    pub fn init_with_hasher(config: HotspotCacheConfig, hash_builder: S) -> Self {
        let store = Arc::new(ValueStore::with_hasher(
            config.effective_shards(),
            hash_builder.clone(),
        ));
        let metrics = Arc::new(HotspotCacheMetrics::new());
        let tracker = RecencyTracker::with_hasher(config.effective_capacity(), hash_builder);
        let coordinator =
            AccessCoordinator::spawn(tracker, Arc::clone(&store), Arc::clone(&metrics));

        HotspotCache {
            store,
            coordinator,
            config,
            metrics,
        }
    }

    /// Retrieves a clone of the value stored for `key`.
    ///
    /// On a hit the key is promoted to most recently touched; the call
    /// returns only after the coordinator has accepted the touch. On a miss
    /// nothing is emitted and nothing blocks.
    pub fn get(&self, key: &K) -> Option<V> {
        match self.store.get(key) {
            Some(value) => {
                self.metrics.record_hit();
                self.coordinator.notify(key.clone());
                Some(value)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// The write is unconditional; the key is then promoted to most recently
    /// touched, which may evict the coldest entry once applied. The call
    /// returns only after the coordinator has accepted the touch.
    pub fn put(&self, key: K, value: V) {
        self.store.insert(key.clone(), value);
        self.metrics.record_insertion();
        self.coordinator.notify(key);
    }

    /// Returns the enforced capacity of the cache.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.effective_capacity().get()
    }

    /// Returns the number of entries currently in the value store.
    ///
    /// May transiently exceed [`capacity`](Self::capacity) while
    /// notifications are in flight.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the value store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Samples the diagnostic gauges.
    ///
    /// `pending_notifications == 0` means the coordinator has applied every
    /// touch emitted so far; tests use this to make eviction effects
    /// deterministic.
    pub fn diagnostics(&self) -> CacheDiagnostics {
        CacheDiagnostics {
            capacity: self.capacity(),
            tracked_entries: self.metrics.tracked_entries(),
            pending_notifications: self.metrics.pending_notifications(),
        }
    }

    /// Stops the coordinator and releases its thread. Terminal.
    ///
    /// After shutdown the value store remains readable and writable, but
    /// touches are no longer tracked and nothing is evicted anymore. A panic
    /// that occurred on the coordinator thread is re-raised here.
    pub fn shutdown(&mut self) {
        self.coordinator.shutdown();
    }
}

impl<K, V, S> CacheMetrics for HotspotCache<K, V, S>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Clone + Send + 'static,
    S: BuildHasher + Clone + Send + 'static,
{
    fn metrics(&self) -> std::collections::BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for HotspotCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotspotCache")
            .field("capacity", &self.config.effective_capacity())
            .field("shards", &self.config.effective_shards())
            .field("running", &self.coordinator.is_running())
            .finish()
    }
}
