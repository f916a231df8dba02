//! # Event Bus System
//!
//! Decoupled change notification for the video platform core, built on
//! `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! Core modules emit typed [`CoreEvent`]s when observable state changes: the
//! catalog list is refreshed, the tracked offline-status set is replaced, a
//! download or delete request is forwarded, a playback source is resolved.
//! Presentation layers subscribe and re-render in response; no event carries
//! enough payload to substitute for re-querying the core.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{CatalogEvent, CoreEvent, EventBus};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(100);
//! let mut subscriber = bus.subscribe();
//!
//! bus.emit(CoreEvent::Catalog(CatalogEvent::Loaded { item_count: 12 })).ok();
//! let event = subscriber.recv().await.unwrap();
//! assert_eq!(event.description(), "Catalog loaded");
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Subscribers receive `RecvError::Lagged(n)` when they fall behind the
//! buffer (non-fatal; delivery resumes with newer events) and
//! `RecvError::Closed` when every sender has been dropped, which signals
//! shutdown.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// Status snapshots arrive at download-progress cadence, so a modest buffer
/// absorbs bursts without meaningful memory cost.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Catalog-related events
    Catalog(CatalogEvent),
    /// Offline download/availability events
    Offline(OfflineEvent),
    /// Playback resolution events
    Playback(PlaybackEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Catalog(e) => e.description(),
            CoreEvent::Offline(e) => e.description(),
            CoreEvent::Playback(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Catalog(CatalogEvent::Unavailable { .. }) => EventSeverity::Warning,
            CoreEvent::Offline(OfflineEvent::DownloadRejected { .. }) => EventSeverity::Warning,
            CoreEvent::Offline(OfflineEvent::DeleteRejected { .. }) => EventSeverity::Warning,
            CoreEvent::Catalog(CatalogEvent::Loaded { .. }) => EventSeverity::Info,
            CoreEvent::Playback(PlaybackEvent::SourceResolved { .. }) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
}

// ============================================================================
// Catalog Events
// ============================================================================

/// Events related to the remote catalog list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum CatalogEvent {
    /// A catalog fetch succeeded and replaced the cached list.
    Loaded {
        /// Number of items in the fetched playlist.
        item_count: usize,
    },
    /// A catalog fetch failed; the previous list stays in effect.
    Unavailable {
        /// Human-readable failure summary.
        message: String,
    },
}

impl CatalogEvent {
    fn description(&self) -> &str {
        match self {
            CatalogEvent::Loaded { .. } => "Catalog loaded",
            CatalogEvent::Unavailable { .. } => "Catalog unavailable",
        }
    }
}

// ============================================================================
// Offline Events
// ============================================================================

/// Events related to offline downloads and local copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum OfflineEvent {
    /// The tracked status set was replaced by a notification snapshot.
    StatusesReplaced {
        /// Number of entries in the new set.
        tracked: usize,
    },
    /// A download request was forwarded to the download subsystem.
    DownloadRequested {
        /// The requested item.
        video_id: String,
    },
    /// A download request was rejected by the download subsystem.
    DownloadRejected {
        /// The requested item.
        video_id: String,
        /// Human-readable rejection summary.
        message: String,
    },
    /// A deletion request was forwarded to the download subsystem.
    DeleteRequested {
        /// Token of the local copy being deleted.
        video_token: String,
    },
    /// A deletion request was rejected by the download subsystem.
    DeleteRejected {
        /// Token of the local copy that was not deleted.
        video_token: String,
        /// Human-readable rejection summary.
        message: String,
    },
}

impl OfflineEvent {
    fn description(&self) -> &str {
        match self {
            OfflineEvent::StatusesReplaced { .. } => "Offline statuses replaced",
            OfflineEvent::DownloadRequested { .. } => "Download requested",
            OfflineEvent::DownloadRejected { .. } => "Download request rejected",
            OfflineEvent::DeleteRequested { .. } => "Local copy deletion requested",
            OfflineEvent::DeleteRejected { .. } => "Local copy deletion rejected",
        }
    }
}

// ============================================================================
// Playback Events
// ============================================================================

/// Events related to playback source resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum PlaybackEvent {
    /// A playback request resolved to a concrete source.
    SourceResolved {
        /// The requested item.
        video_id: String,
        /// Kind of source chosen ("offline", "reference" or "video").
        source: String,
    },
    /// The current playback intent was cleared.
    Cleared,
}

impl PlaybackEvent {
    fn description(&self) -> &str {
        match self {
            PlaybackEvent::SourceResolved { .. } => "Playback source resolved",
            PlaybackEvent::Cleared => "Playback cleared",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to [`CoreEvent`]s.
///
/// Backed by `tokio::sync::broadcast`: clone the bus for multiple producers,
/// call [`subscribe`](EventBus::subscribe) for independent consumers. Events
/// are cloned per subscriber, so payloads stay lightweight.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus buffering up to `capacity` events per
    /// subscriber before the slowest one starts lagging.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an error
    /// when there are none; emitters treat that as a non-event.
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber receiving all events emitted after this call.
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// Presentation layers typically care about one category, e.g. offline
/// changes for re-rendering the download column:
///
/// ```rust
/// use core_runtime::events::{CoreEvent, EventBus, EventStream};
///
/// let bus = EventBus::new(100);
/// let offline_only = EventStream::new(bus.subscribe())
///     .filter(|event| matches!(event, CoreEvent::Offline(_)));
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter; only matching events are returned by `recv`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Receives the next event that passes the filter.
    ///
    /// # Errors
    ///
    /// `RecvError::Lagged(n)` if the subscriber fell behind by `n` events,
    /// `RecvError::Closed` once all senders are gone.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            let Some(filter) = &self.filter else {
                return Ok(event);
            };
            if filter(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive a matching event without blocking.
    ///
    /// Returns `None` if nothing matching is currently buffered.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    let Some(filter) = &self.filter else {
                        return Some(Ok(event));
                    };
                    if filter(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bus_starts_without_subscribers() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);

        let event = CoreEvent::Playback(PlaybackEvent::Cleared);
        assert!(bus.emit(event).is_err());
    }

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let bus = EventBus::new(10);
        let mut sub = bus.subscribe();

        let event = CoreEvent::Offline(OfflineEvent::StatusesReplaced { tracked: 3 });
        assert_eq!(bus.emit(event.clone()).unwrap(), 1);

        let received = sub.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn all_subscribers_see_the_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = CoreEvent::Catalog(CatalogEvent::Loaded { item_count: 5 });
        bus.emit(event.clone()).ok();

        assert_eq!(sub1.recv().await.unwrap(), event);
        assert_eq!(sub2.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn stream_filter_skips_other_categories() {
        let bus = EventBus::new(10);
        let mut stream =
            EventStream::new(bus.subscribe()).filter(|event| matches!(event, CoreEvent::Offline(_)));

        bus.emit(CoreEvent::Catalog(CatalogEvent::Loaded { item_count: 1 }))
            .ok();
        let offline = CoreEvent::Offline(OfflineEvent::DownloadRequested {
            video_id: "v1".to_string(),
        });
        bus.emit(offline.clone()).ok();

        assert_eq!(stream.recv().await.unwrap(), offline);
    }

    #[tokio::test]
    async fn slow_subscriber_observes_lag() {
        let bus = EventBus::new(2);
        let mut sub = bus.subscribe();

        for i in 0..5 {
            bus.emit(CoreEvent::Offline(OfflineEvent::StatusesReplaced { tracked: i }))
                .ok();
        }

        let result = sub.recv().await;
        assert!(matches!(result, Err(RecvError::Lagged(_))));
    }

    #[tokio::test]
    async fn try_recv_on_empty_stream() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe());
        assert!(stream.try_recv().is_none());
    }

    #[test]
    fn severity_classification() {
        let warn = CoreEvent::Offline(OfflineEvent::DownloadRejected {
            video_id: "v1".to_string(),
            message: "quota exceeded".to_string(),
        });
        assert_eq!(warn.severity(), EventSeverity::Warning);

        let info = CoreEvent::Catalog(CatalogEvent::Loaded { item_count: 2 });
        assert_eq!(info.severity(), EventSeverity::Info);

        let debug = CoreEvent::Offline(OfflineEvent::StatusesReplaced { tracked: 2 });
        assert_eq!(debug.severity(), EventSeverity::Debug);
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = CoreEvent::Playback(PlaybackEvent::SourceResolved {
            video_id: "v9".to_string(),
            source: "reference".to_string(),
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("v9"));

        let deserialized: CoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }
}
