//! Access Coordinator
//!
//! The single consumer that serializes all recency updates. Callers hand the
//! touched key over a rendezvous channel (capacity zero); a dedicated worker
//! thread applies each touch to the [`RecencyTracker`](crate::recency::RecencyTracker)
//! and deletes evicted keys from the value store.
//!
//! Because the worker is the only code that ever mutates the tracker, the
//! tracker needs no lock. The rendezvous channel is also the backpressure
//! mechanism: a producer's send completes only once the worker has accepted
//! the key, so the whole cache can never outrun the worker by more than one
//! in-flight notification per producer.
//!
//! The worker exits on either of two signals:
//! - a message on the `stop` channel (explicit shutdown), or
//! - disconnection of the access channel (the facade was dropped).

use std::hash::{BuildHasher, Hash};
use std::panic;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, Receiver, Sender};

use crate::metrics::HotspotCacheMetrics;
use crate::recency::RecencyTracker;
use crate::store::ValueStore;

/// Owns the worker thread and both signal channels.
pub(crate) struct AccessCoordinator<K> {
    access_tx: Sender<K>,
    stop_tx: Sender<()>,
    worker: Option<JoinHandle<()>>,
    metrics: Arc<HotspotCacheMetrics>,
}

impl<K> AccessCoordinator<K>
where
    K: Hash + Eq + Clone + Send + 'static,
{
    /// Spawns the consuming loop, taking exclusive ownership of `tracker`.
    pub(crate) fn spawn<V, S>(
        tracker: RecencyTracker<K, S>,
        store: Arc<ValueStore<K, V, S>>,
        metrics: Arc<HotspotCacheMetrics>,
    ) -> Self
    where
        V: Send + 'static,
        S: BuildHasher + Clone + Send + Sync + 'static,
    {
        let (access_tx, access_rx) = bounded(0);
        let (stop_tx, stop_rx) = bounded(0);

        let worker_metrics = Arc::clone(&metrics);
        let worker = thread::Builder::new()
            .name("hotspot-cache-coordinator".to_string())
            .spawn(move || run(tracker, store, access_rx, stop_rx, worker_metrics))
            .expect("failed to spawn coordinator thread");

        AccessCoordinator {
            access_tx,
            stop_tx,
            worker: Some(worker),
            metrics,
        }
    }
}

impl<K> AccessCoordinator<K> {
    /// Hands a touched key to the worker, blocking until it is accepted.
    ///
    /// After shutdown the channel is disconnected; the notification is then
    /// dropped, so the key's recency is simply no longer tracked.
    pub(crate) fn notify(&self, key: K) {
        self.metrics.notification_enqueued();
        if self.access_tx.send(key).is_err() {
            self.metrics.notification_consumed();
        }
    }

    /// Stops the worker and waits for it to finish.
    ///
    /// A panic that occurred on the worker thread is re-raised here so that a
    /// fault while processing notifications surfaces as a program-level fault
    /// instead of being silently absorbed.
    pub(crate) fn shutdown(&mut self) {
        if let Some(worker) = self.worker.take() {
            // Fails only if the worker is already gone, in which case join
            // still reports what happened to it.
            let _ = self.stop_tx.send(());
            if let Err(payload) = worker.join() {
                panic::resume_unwind(payload);
            }
        }
    }

    /// Returns `true` if the worker has not been shut down yet.
    pub(crate) fn is_running(&self) -> bool {
        self.worker.is_some()
    }
}

impl<K> Drop for AccessCoordinator<K> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.stop_tx.send(());
            // Swallow a worker panic here; panicking in drop would abort.
            let _ = worker.join();
        }
    }
}

impl<K> std::fmt::Debug for AccessCoordinator<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessCoordinator")
            .field("running", &self.worker.is_some())
            .finish()
    }
}

/// The consuming loop. Sole mutator of the tracker, sole trigger of eviction.
///
/// Notifications are applied strictly one at a time in acceptance order,
/// which gives deterministic single-consumer semantics even though producers
/// are unordered relative to each other.
fn run<K, V, S>(
    mut tracker: RecencyTracker<K, S>,
    store: Arc<ValueStore<K, V, S>>,
    access_rx: Receiver<K>,
    stop_rx: Receiver<()>,
    metrics: Arc<HotspotCacheMetrics>,
) where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
{
    loop {
        select! {
            recv(access_rx) -> msg => match msg {
                Ok(key) => {
                    if let Some(evicted) = tracker.touch(key) {
                        store.remove(&evicted);
                        metrics.record_eviction();
                    }
                    metrics.publish_tracked(tracker.len());
                    metrics.notification_consumed();
                }
                // Every sender is gone: the facade was dropped.
                Err(_) => break,
            },
            recv(stop_rx) -> _ => break,
        }
    }
}
