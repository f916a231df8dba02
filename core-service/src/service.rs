//! The core facade: startup, shutdown and the presentation-layer surface.

use crate::error::Result;
use bridge_traits::offline::StatusCallback;
use bridge_traits::{
    CatalogItem, NotificationHandle, OfflineNotifications, OfflineStatus, VideoId, VideoToken,
};
use core_catalog::CatalogService;
use core_offline::{DownloadController, OfflineStatusTracker, StatusListener, SubscriptionId};
use core_playback::{resolve, PlaybackSlot, PlaybackSource};
use core_runtime::config::CoreConfig;
use core_runtime::events::{CoreEvent, EventBus, OfflineEvent, PlaybackEvent, Receiver};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Primary façade exposed to host applications.
///
/// One instance owns the tracker, the cached catalog, the playback slot and
/// the notification subscription. Everything the presentation layer needs
/// goes through here; everything asynchronous comes back out through the
/// event bus or the tracker's listener registry.
pub struct CoreService {
    catalog: CatalogService,
    tracker: Arc<OfflineStatusTracker>,
    controller: DownloadController,
    notifications: Arc<dyn OfflineNotifications>,
    event_bus: Arc<EventBus>,
    playback: PlaybackSlot,
    notification_handle: Mutex<Option<NotificationHandle>>,
}

impl CoreService {
    /// Wire a new core from validated configuration.
    pub fn new(config: CoreConfig) -> Self {
        let event_bus = Arc::new(EventBus::new(config.event_buffer_size));

        let catalog = CatalogService::new(
            config.catalog_source,
            config.credentials.clone(),
            config.playlist_ref,
        )
        .with_event_bus(Arc::clone(&event_bus));

        let controller = DownloadController::new(config.offline_store, config.credentials)
            .with_event_bus(Arc::clone(&event_bus));

        Self {
            catalog,
            tracker: Arc::new(OfflineStatusTracker::new()),
            controller,
            notifications: config.notifications,
            event_bus,
            playback: PlaybackSlot::new(),
            notification_handle: Mutex::new(None),
        }
    }

    /// Bring the core online.
    ///
    /// Fetches the catalog and the initial offline statuses (both non-fatal;
    /// a failure leaves the corresponding state empty) and acquires the
    /// status-change subscription. Calling `start` again replaces the
    /// previous subscription, releasing the old handle.
    ///
    /// # Errors
    ///
    /// Only a refused subscription is an error: without it the core would
    /// never see another status change.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<()> {
        // Both loads are fire-and-observe: failures are logged at the
        // boundary and the core starts from empty state.
        self.catalog.refresh().await.ok();

        match self.controller.initial_statuses().await {
            Ok(statuses) => self.tracker.apply_snapshot(statuses),
            Err(err) => warn!(error = %err, "starting with no offline data"),
        }

        let tracker = Arc::clone(&self.tracker);
        let event_bus = Arc::clone(&self.event_bus);
        let callback: StatusCallback = Arc::new(move |statuses: Vec<OfflineStatus>| {
            tracker.apply_update(statuses);
            event_bus
                .emit(CoreEvent::Offline(OfflineEvent::StatusesReplaced {
                    tracked: tracker.len(),
                }))
                .ok();
        });

        let handle = self.notifications.subscribe(callback).await?;
        if let Some(previous) = self.lock_handle().replace(handle) {
            debug!("replacing an existing status subscription");
            previous.release();
        }

        info!(
            catalog_items = self.catalog.len(),
            tracked = self.tracker.len(),
            "core started"
        );
        Ok(())
    }

    /// Take the core offline.
    ///
    /// Releases the notification subscription exactly once and clears the
    /// playback intent. Safe to call repeatedly; later calls are no-ops.
    #[instrument(skip(self))]
    pub fn shutdown(&self) {
        match self.lock_handle().take() {
            Some(handle) => {
                handle.release();
                info!("status subscription released");
            }
            None => debug!("shutdown without an active subscription"),
        }
        self.playback.clear();
    }

    /// Returns `true` while the status subscription is held.
    pub fn is_started(&self) -> bool {
        self.lock_handle().is_some()
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// The cached catalog, in playlist order.
    pub fn catalog(&self) -> Vec<CatalogItem> {
        self.catalog.items()
    }

    /// Re-fetch the catalog on demand; failures keep the last-known list.
    pub async fn refresh_catalog(&self) {
        self.catalog.refresh().await.ok();
    }

    // ------------------------------------------------------------------
    // Offline state
    // ------------------------------------------------------------------

    /// Tracked offline status for one item, if any.
    pub fn offline_status(&self, video_id: &VideoId) -> Option<OfflineStatus> {
        self.tracker.status_for(video_id)
    }

    /// All tracked offline statuses.
    pub fn tracked_statuses(&self) -> Vec<OfflineStatus> {
        self.tracker.tracked()
    }

    /// Forward a download request; see
    /// [`DownloadController::request_download`].
    pub async fn request_download(&self, video_id: &VideoId) {
        self.controller.request_download(video_id).await;
    }

    /// Forward a deletion request; see
    /// [`DownloadController::delete_local_copy`].
    pub async fn delete_local_copy(&self, video_token: &VideoToken) {
        self.controller.delete_local_copy(video_token).await;
    }

    /// Register a raw status listener on the tracker.
    pub fn subscribe_statuses(&self, listener: StatusListener) -> SubscriptionId {
        self.tracker.subscribe(listener)
    }

    /// Remove a raw status listener; unknown ids are ignored.
    pub fn unsubscribe_statuses(&self, id: SubscriptionId) {
        self.tracker.unsubscribe(id);
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Resolve the playback source for `item` and make it the current intent.
    #[instrument(skip(self, item), fields(video_id = %item.video_id))]
    pub fn resolve_playback(&self, item: &CatalogItem) -> PlaybackSource {
        let status = self.tracker.status_for(&item.video_id);
        let source = resolve(item, status.as_ref());
        self.playback.set(source.clone());
        self.event_bus
            .emit(CoreEvent::Playback(PlaybackEvent::SourceResolved {
                video_id: item.video_id.to_string(),
                source: source.kind().to_string(),
            }))
            .ok();
        source
    }

    /// Resolve playback for a cached catalog item by id.
    ///
    /// Returns `None` when the id is not in the cached catalog; the playback
    /// intent is left untouched in that case.
    pub fn resolve_playback_by_id(&self, video_id: &VideoId) -> Option<PlaybackSource> {
        let item = self.catalog.find(video_id)?;
        Some(self.resolve_playback(&item))
    }

    /// The current playback intent.
    pub fn current_playback(&self) -> PlaybackSource {
        self.playback.current()
    }

    /// Drop the current playback intent.
    pub fn clear_playback(&self) {
        self.playback.clear();
        self.event_bus
            .emit(CoreEvent::Playback(PlaybackEvent::Cleared))
            .ok();
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Subscribe to the change-event stream the presentation layer
    /// re-renders from.
    pub fn subscribe_events(&self) -> Receiver<CoreEvent> {
        self.event_bus.subscribe()
    }

    /// The shared event bus, for hosts that emit their own diagnostics.
    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    fn lock_handle(&self) -> std::sync::MutexGuard<'_, Option<NotificationHandle>> {
        self.notification_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreService")
            .field("catalog_items", &self.catalog.len())
            .field("tracked", &self.tracker.len())
            .field("started", &self.is_started())
            .finish()
    }
}
