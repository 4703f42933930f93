#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Component Responsibilities
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        HotspotCache (facade)                     │
//! │                                                                  │
//! │   get/put ──▶ ┌──────────────┐        ┌───────────────────────┐  │
//! │               │  ValueStore  │        │   AccessCoordinator   │  │
//! │               │ (lock-striped│ touched│  ┌─────────────────┐  │  │
//! │               │   HashMaps)  │  keys  │  │ worker thread   │  │  │
//! │               │              │───────▶│  │                 │  │  │
//! │               └──────▲───────┘ chan(0)│  │ RecencyTracker  │  │  │
//! │                      │                │  │ (list + index,  │  │  │
//! │                      └── eviction ────│  │  single writer) │  │  │
//! │                          delete       │  └─────────────────┘  │  │
//! │                                       └───────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Component | Owns | Locking |
//! |-----------|------|---------|
//! | `ValueStore` | the entries | one mutex per shard |
//! | `RecencyTracker` | the recency order | none (single writer) |
//! | `AccessCoordinator` | the worker thread | none (rendezvous channel) |
//!
//! ## Quick Start
//!
//! ```rust
//! use hotspot_cache::HotspotCache;
//!
//! let mut cache = HotspotCache::new(10_000);
//! cache.put("user:42".to_string(), "profile".to_string());
//! assert_eq!(cache.get(&"user:42".to_string()).as_deref(), Some("profile"));
//! cache.shutdown();
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use hotspot_cache::HotspotCache;
//! use hotspot_cache::config::HotspotCacheConfig;
//!
//! let config = HotspotCacheConfig {
//!     capacity: 50_000, // recency-tracked entries
//!     shards: 32,       // value-store partitions
//! };
//! let mut cache: HotspotCache<u64, Vec<u8>> = HotspotCache::init(config, None);
//! cache.shutdown();
//! ```
//!
//! ## Metrics
//!
//! ```rust
//! use hotspot_cache::metrics::CacheMetrics;
//! use hotspot_cache::HotspotCache;
//!
//! let mut cache = HotspotCache::new(100);
//! cache.put("a", 1);
//! cache.get(&"a");
//! cache.get(&"b");
//!
//! let report = cache.metrics();
//! assert_eq!(report.get("cache_hits"), Some(&1.0));
//! assert_eq!(report.get("cache_misses"), Some(&1.0));
//! cache.shutdown();
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: the public [`HotspotCache`] facade
//! - [`config`]: configuration structure and documented defaults
//! - [`metrics`]: metrics collection and the [`CacheMetrics`](metrics::CacheMetrics) trait

/// The public cache facade composing store, tracker and coordinator.
pub mod cache;

/// Cache configuration structure and defaults.
pub mod config;

/// Metrics collection for cache observability.
pub mod metrics;

/// Doubly linked list with in-place promotion.
///
/// Internal infrastructure: exposes raw pointer operations that require
/// careful invariant maintenance. Use the cache facade instead.
pub(crate) mod list;

/// The ordered recency sequence and its key index.
///
/// Internal: mutated exclusively by the coordinator's worker thread.
pub(crate) mod recency;

/// The lock-striped concurrent value store.
pub(crate) mod store;

/// The single-consumer loop serializing recency updates.
pub(crate) mod coordinator;

// Re-export the primary types
pub use cache::{CacheDiagnostics, HotspotCache};
pub use config::HotspotCacheConfig;
pub use metrics::{CacheMetrics, HotspotCacheMetrics};
