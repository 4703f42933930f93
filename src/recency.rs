//! Recency Tracker
//!
//! An ordered sequence of keys from most to least recently touched, plus a
//! key → node index for O(1) promotion. This is the policy half of the cache:
//! it decides *which* key must go when capacity is exceeded, and nothing else.
//!
//! # Single-Writer Discipline
//!
//! The tracker is mutated by exactly one logical thread of control (the
//! access coordinator's loop), which is why it carries no lock at all. It is
//! `Send` so it can be handed to that thread, but deliberately not `Sync`:
//! sharing a reference across threads would defeat the design.

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;

use crate::list::{Entry, List};

#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Tracks key recency and selects eviction victims.
///
/// Holds each key twice: once in the ordered list (front = hottest) and once
/// in the index that maps the key to its list node. [`touch`](Self::touch)
/// keeps the two views consistent; at most one node ever exists per key.
///
/// # Safety
///
/// The index stores raw pointers into the embedded list. These pointers are
/// always valid because:
/// - every pointer comes from `list.push_front` on this very list
/// - a node is removed from the index in the same call that pops it from
///   the list
/// - the tracker owns the list, so the nodes live exactly as long as it does
pub(crate) struct RecencyTracker<K, S> {
    capacity: NonZeroUsize,
    list: List<K>,
    index: HashMap<K, *mut Entry<K>, S>,
}

// SAFETY: RecencyTracker owns all data and its raw pointers only target nodes
// owned by `list`. Moving the whole structure to another thread moves the
// nodes' owner along with the pointers into them.
unsafe impl<K: Send, S: Send> Send for RecencyTracker<K, S> {}

impl<K, S> RecencyTracker<K, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Creates a tracker that keeps at most `capacity` keys.
    pub(crate) fn with_hasher(capacity: NonZeroUsize, hash_builder: S) -> Self {
        let map_capacity = capacity.get().next_power_of_two();
        RecencyTracker {
            capacity,
            list: List::new(),
            index: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
        }
    }

    /// Returns the configured capacity.
    pub(crate) fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Returns the number of keys currently tracked.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    /// Promotes `key` to most recently touched, inserting it if absent.
    ///
    /// If the insertion pushes the sequence past capacity, the coldest key is
    /// removed from both the list and the index and returned so the caller
    /// can delete its value. Exactly one key is evicted per capacity-crossing
    /// insertion, never more.
    pub(crate) fn touch(&mut self, key: K) -> Option<K> {
        if let Some(&node) = self.index.get(&key) {
            // SAFETY: node comes from our index, which only holds pointers to
            // live nodes of our list
            unsafe { self.list.move_to_front(node) };
            return None;
        }

        let node = self.list.push_front(key.clone());
        self.index.insert(key, node);

        if self.list.len() <= self.capacity.get() {
            return None;
        }

        let evicted = self.list.pop_back();
        if let Some(key) = &evicted {
            self.index.remove(key);
        }
        evicted
    }

    /// Returns `true` if `key` currently has a node in the sequence.
    #[cfg(test)]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }
}

impl<K, S> fmt::Debug for RecencyTracker<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyTracker")
            .field("capacity", &self.capacity)
            .field("len", &self.index.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "hashbrown")]
    use hashbrown::DefaultHashBuilder;

    #[cfg(not(feature = "hashbrown"))]
    use std::collections::hash_map::RandomState as DefaultHashBuilder;

    fn make_tracker<K: Hash + Eq + Clone>(capacity: usize) -> RecencyTracker<K, DefaultHashBuilder> {
        RecencyTracker::with_hasher(
            NonZeroUsize::new(capacity).unwrap(),
            DefaultHashBuilder::default(),
        )
    }

    #[test]
    fn test_touch_inserts_new_keys() {
        let mut tracker = make_tracker::<&str>(3);
        assert_eq!(tracker.len(), 0);

        assert_eq!(tracker.touch("a"), None);
        assert_eq!(tracker.touch("b"), None);
        assert_eq!(tracker.touch("c"), None);
        assert_eq!(tracker.len(), 3);
        assert!(tracker.contains(&"a"));
        assert!(tracker.contains(&"b"));
        assert!(tracker.contains(&"c"));
    }

    #[test]
    fn test_touch_existing_key_does_not_grow() {
        let mut tracker = make_tracker::<&str>(3);
        tracker.touch("a");
        tracker.touch("a");
        tracker.touch("a");
        // One node per key, no matter how often it is touched
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.list.len(), tracker.len());
    }

    #[test]
    fn test_eviction_selects_coldest_key() {
        let mut tracker = make_tracker::<u32>(3);
        tracker.touch(1);
        tracker.touch(2);
        tracker.touch(3);

        // Inserting a fourth key must evict exactly the oldest one
        assert_eq!(tracker.touch(4), Some(1));
        assert_eq!(tracker.len(), 3);
        assert!(!tracker.contains(&1));
        assert!(tracker.contains(&4));
    }

    #[test]
    fn test_touch_promotes_before_eviction() {
        let mut tracker = make_tracker::<&str>(2);
        tracker.touch("a");
        tracker.touch("b");

        // Promote "a"; "b" becomes the coldest
        assert_eq!(tracker.touch("a"), None);
        assert_eq!(tracker.touch("c"), Some("b"));
        assert!(tracker.contains(&"a"));
        assert!(tracker.contains(&"c"));
    }

    #[test]
    fn test_exactly_one_eviction_per_overflow() {
        let mut tracker = make_tracker::<u32>(2);
        tracker.touch(1);
        tracker.touch(2);

        for next in 3..20 {
            let evicted = tracker.touch(next);
            assert!(evicted.is_some(), "every overflowing insert evicts once");
            assert_eq!(tracker.len(), 2, "length stays pinned at capacity");
        }
    }

    #[test]
    fn test_capacity_one() {
        let mut tracker = make_tracker::<&str>(1);
        assert_eq!(tracker.touch("a"), None);
        assert_eq!(tracker.touch("b"), Some("a"));
        assert_eq!(tracker.touch("b"), None);
        assert_eq!(tracker.touch("c"), Some("b"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_index_and_list_agree() {
        let mut tracker = make_tracker::<u32>(8);
        for i in 0..100 {
            tracker.touch(i % 13);
            assert_eq!(
                tracker.list.len(),
                tracker.index.len(),
                "list and index must stay in lockstep"
            );
        }
    }

    #[test]
    fn test_owned_keys() {
        let mut tracker = make_tracker::<String>(2);
        tracker.touch("alpha".to_string());
        tracker.touch("beta".to_string());
        let evicted = tracker.touch("gamma".to_string());
        assert_eq!(evicted.as_deref(), Some("alpha"));
    }
}
