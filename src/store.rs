//! Concurrent Value Store
//!
//! A lock-striped key-value map with no ordering or recency awareness. This is
//! the storage half of the cache: callers read and write it directly and
//! concurrently, while eviction decisions are made elsewhere.
//!
//! # Architecture
//!
//! Keys are partitioned across multiple shards using hash-based sharding, each
//! shard protected by its own `parking_lot::Mutex`:
//!
//! ```text
//! hash(key) % N  ──▶  shard selection
//!
//! ┌─────────┐ ┌─────────┐     ┌─────────┐
//! │ Shard 0 │ │ Shard 1 │ ... │ Shard N │
//! │ [Mutex] │ │ [Mutex] │     │ [Mutex] │
//! │ HashMap │ │ HashMap │     │ HashMap │
//! └─────────┘ └─────────┘     └─────────┘
//! ```
//!
//! Operations on keys in different shards never contend; operations on the
//! same key are linearized by the shard lock in some consistent but
//! unspecified order.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A concurrent key→value map partitioned into independently locked shards.
///
/// The store has no capacity and no eviction policy of its own; it grows until
/// someone removes entries. Values are cloned out on read so no lock is held
/// across caller code.
pub(crate) struct ValueStore<K, V, S> {
    shards: Box<[Mutex<HashMap<K, V, S>>]>,
    hash_builder: S,
}

impl<K, V, S> ValueStore<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Clone,
{
    /// Creates a store with `shards` independently locked partitions.
    ///
    /// A shard count of zero is rounded up to one.
    pub(crate) fn with_hasher(shards: usize, hash_builder: S) -> Self {
        let shards: Vec<_> = (0..shards.max(1))
            .map(|_| Mutex::new(HashMap::with_hasher(hash_builder.clone())))
            .collect();
        ValueStore {
            shards: shards.into_boxed_slice(),
            hash_builder,
        }
    }

    /// Returns the shard index for the given key.
    #[inline]
    fn shard_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (self.hash_builder.hash_one(key) as usize) % self.shards.len()
    }

    /// Inserts a key-value pair, overwriting any previous value for the key.
    pub(crate) fn insert(&self, key: K, value: V) {
        let idx = self.shard_index(&key);
        self.shards[idx].lock().insert(key, value);
    }

    /// Retrieves a clone of the value stored for `key`, if any.
    ///
    /// Only the owning shard is locked, so lookups never block on keys that
    /// hash elsewhere.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        let idx = self.shard_index(key);
        self.shards[idx].lock().get(key).cloned()
    }

    /// Removes the entry for `key`, returning its value if it was present.
    ///
    /// Used only by eviction; the public cache surface has no remove.
    pub(crate) fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.shard_index(key);
        self.shards[idx].lock().remove(key)
    }

    /// Returns the total number of entries across all shards.
    ///
    /// Shard locks are taken sequentially, so the result may be slightly
    /// stale under concurrent mutation.
    pub(crate) fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if no shard contains an entry.
    pub(crate) fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.lock().is_empty())
    }
}

impl<K, V, S> fmt::Debug for ValueStore<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStore")
            .field("shards", &self.shards.len())
            .finish()
    }
}
