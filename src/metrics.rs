//! Cache Metrics System
//!
//! Provides metrics collection and reporting for the hotspot cache using
//! BTreeMap-based reporting behind a common [`CacheMetrics`] trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used for the report because metrics must appear in a
//! deterministic order: reproducible output is essential for tests and for
//! comparing snapshots across runs. The performance difference is negligible
//! with a dozen metric keys.
//!
//! # Why atomics?
//!
//! Unlike a single-threaded cache, the counters here are bumped from two
//! sides at once: caller threads record hits, misses and insertions, while
//! the coordinator thread records evictions and publishes the tracked-length
//! and pending-notification gauges. All counters are relaxed atomics; each
//! value is individually accurate but a report is not a consistent cut
//! across all of them.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Trait implemented by everything that can report cache metrics.
///
/// The returned BTreeMap contains all relevant metrics for the cache,
/// with keys sorted alphabetically for consistent output.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification.
    fn algorithm_name(&self) -> &'static str;
}

/// Counters and gauges shared between the cache facade and its coordinator.
///
/// Counter semantics:
/// - `requests` / `cache_hits`: every lookup, and the subset that found a
///   value. Misses are derived as the difference.
/// - `insertions`: every write, including overwrites of existing keys.
/// - `evictions`: keys removed by the coordinator when capacity was crossed.
///
/// Gauge semantics:
/// - `tracked_entries`: length of the recency sequence as last published by
///   the coordinator.
/// - `pending_notifications`: notifications emitted but not yet applied.
///   Zero means the coordinator has fully drained, which is what tests wait
///   for before asserting on eviction effects.
#[derive(Debug, Default)]
pub struct HotspotCacheMetrics {
    requests: AtomicU64,
    cache_hits: AtomicU64,
    insertions: AtomicU64,
    evictions: AtomicU64,
    tracked_entries: AtomicUsize,
    pending_notifications: AtomicUsize,
}

impl HotspotCacheMetrics {
    /// Creates a zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found a value.
    pub(crate) fn record_hit(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that found nothing.
    pub(crate) fn record_miss(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a write into the value store.
    pub(crate) fn record_insertion(&self) {
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a capacity-triggered eviction.
    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Publishes the current recency-sequence length.
    pub(crate) fn publish_tracked(&self, len: usize) {
        self.tracked_entries.store(len, Ordering::Relaxed);
    }

    /// Notes a notification handed to the coordinator but not yet applied.
    pub(crate) fn notification_enqueued(&self) {
        self.pending_notifications.fetch_add(1, Ordering::Relaxed);
    }

    /// Notes that the coordinator finished applying a notification.
    pub(crate) fn notification_consumed(&self) {
        self.pending_notifications.fetch_sub(1, Ordering::Relaxed);
    }

    /// Total number of lookups.
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Lookups that found a value.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Lookups that found nothing.
    ///
    /// Derived from two relaxed counters, so a concurrent report can lag a
    /// hit that is being recorded right now.
    pub fn cache_misses(&self) -> u64 {
        self.requests().saturating_sub(self.cache_hits())
    }

    /// Writes into the value store, overwrites included.
    pub fn insertions(&self) -> u64 {
        self.insertions.load(Ordering::Relaxed)
    }

    /// Keys evicted because capacity was crossed.
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Recency-sequence length as last published by the coordinator.
    pub fn tracked_entries(&self) -> usize {
        self.tracked_entries.load(Ordering::Relaxed)
    }

    /// Notifications emitted but not yet applied.
    pub fn pending_notifications(&self) -> usize {
        self.pending_notifications.load(Ordering::Relaxed)
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests();
        if requests > 0 {
            self.cache_hits() as f64 / requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        let requests = self.requests();
        if requests > 0 {
            self.cache_misses() as f64 / requests as f64
        } else {
            0.0
        }
    }

    /// Converts the current counter values to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits() as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions() as f64);
        metrics.insert("insertions".to_string(), self.insertions() as f64);
        metrics.insert("requests".to_string(), self.requests() as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert(
            "pending_notifications".to_string(),
            self.pending_notifications() as f64,
        );
        metrics.insert("tracked_entries".to_string(), self.tracked_entries() as f64);

        metrics
    }
}

impl CacheMetrics for HotspotCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "HOTSPOT"
    }
}
