//! Serialized view of per-item offline availability.
//!
//! The download subsystem always reports the complete current status set, so
//! every update replaces the tracked map wholesale. A single mutex guards the
//! map and the listener registry: mutations and reads are serialized, and a
//! reader observes either the state before or after a replacement, never a
//! partial one.

use bridge_traits::{OfflineStatus, VideoId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// Callback invoked with the full post-replacement status set.
///
/// Listeners run synchronously on the updating thread while the tracker lock
/// is held; they must not call back into the tracker.
pub type StatusListener = Box<dyn Fn(&[OfflineStatus]) + Send>;

/// Identifier for a registered status listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

struct TrackerInner {
    statuses: HashMap<VideoId, OfflineStatus>,
    listeners: Vec<(SubscriptionId, StatusListener)>,
}

/// Tracks the offline/download state of every known catalog item.
///
/// At most one entry exists per [`VideoId`]; a missing entry means "no local
/// copy and no active download". Both replacement operations are idempotent:
/// applying the same set twice leaves the same observable state.
pub struct OfflineStatusTracker {
    inner: Mutex<TrackerInner>,
}

impl OfflineStatusTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TrackerInner {
                statuses: HashMap::new(),
                listeners: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the entire tracked set without notifying listeners.
    ///
    /// Used for the initial bulk load, before anything is rendered.
    pub fn apply_snapshot(&self, statuses: Vec<OfflineStatus>) {
        let mut inner = self.lock();
        inner.statuses = index_by_video_id(statuses);
        debug!(tracked = inner.statuses.len(), "applied status snapshot");
    }

    /// Replace the entire tracked set and notify every listener once.
    ///
    /// Listeners observe the set only after it is fully replaced. Duplicate
    /// ids within one event collapse to the last entry reported.
    pub fn apply_update(&self, statuses: Vec<OfflineStatus>) {
        let mut inner = self.lock();
        inner.statuses = index_by_video_id(statuses);
        debug!(tracked = inner.statuses.len(), "applied status update");

        let snapshot: Vec<OfflineStatus> = inner.statuses.values().cloned().collect();
        for (_, listener) in &inner.listeners {
            listener(&snapshot);
        }
    }

    /// Look up the tracked status for one item.
    pub fn status_for(&self, video_id: &VideoId) -> Option<OfflineStatus> {
        self.lock().statuses.get(video_id).cloned()
    }

    /// All currently tracked statuses, in no particular order.
    pub fn tracked(&self) -> Vec<OfflineStatus> {
        self.lock().statuses.values().cloned().collect()
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.lock().statuses.len()
    }

    /// Returns `true` when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.lock().statuses.is_empty()
    }

    /// Register a listener invoked once per [`apply_update`](Self::apply_update).
    pub fn subscribe(&self, listener: StatusListener) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.lock().listeners.push((id, listener));
        id
    }

    /// Remove a listener.
    ///
    /// Unsubscribing an unknown or already-removed id is a no-op; remaining
    /// listeners are unaffected.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().listeners.retain(|(other, _)| *other != id);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

impl Default for OfflineStatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OfflineStatusTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("OfflineStatusTracker")
            .field("tracked", &inner.statuses.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

fn index_by_video_id(statuses: Vec<OfflineStatus>) -> HashMap<VideoId, OfflineStatus> {
    let mut map = HashMap::with_capacity(statuses.len());
    for status in statuses {
        map.insert(status.video_id.clone(), status);
    }
    map
}
