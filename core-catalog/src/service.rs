//! Cached, fetch-with-fallback view of the remote playlist.

use crate::error::{CatalogError, Result};
use bridge_traits::{AccountCredentials, CatalogItem, CatalogSource, VideoId};
use core_runtime::events::{CatalogEvent, CoreEvent, EventBus};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, instrument, warn};

/// Read-only catalog facade bound to one account and playlist.
///
/// The service owns nothing upstream: items are created by the remote source
/// and treated as immutable for the duration of one fetch cycle. Each
/// successful [`refresh`](CatalogService::refresh) replaces the cached list;
/// a failed one leaves the previous list in effect.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    credentials: AccountCredentials,
    playlist_ref: String,
    items: RwLock<Vec<CatalogItem>>,
    event_bus: Option<Arc<EventBus>>,
}

impl CatalogService {
    /// Create a service with an empty cached list.
    pub fn new(
        source: Arc<dyn CatalogSource>,
        credentials: AccountCredentials,
        playlist_ref: impl Into<String>,
    ) -> Self {
        Self {
            source,
            credentials,
            playlist_ref: playlist_ref.into(),
            items: RwLock::new(Vec::new()),
            event_bus: None,
        }
    }

    /// Mirror refresh outcomes onto the core event bus.
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Fetch the playlist and replace the cached list.
    ///
    /// Non-fatal on failure: the error is logged, a
    /// [`CatalogEvent::Unavailable`] is emitted, the previous list stays in
    /// effect, and the error is returned for callers that want to observe it.
    #[instrument(skip(self), fields(playlist_ref = %self.playlist_ref))]
    pub async fn refresh(&self) -> Result<usize> {
        match self
            .source
            .fetch_playlist(&self.credentials, &self.playlist_ref)
            .await
        {
            Ok(items) => {
                let item_count = items.len();
                *self.write_items() = items;
                info!(item_count, "catalog refreshed");
                self.emit(CatalogEvent::Loaded { item_count });
                Ok(item_count)
            }
            Err(err) => {
                let err = CatalogError::from(err);
                warn!(error = %err, "catalog refresh failed, keeping last-known list");
                self.emit(CatalogEvent::Unavailable {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// The cached item list, in playlist order.
    pub fn items(&self) -> Vec<CatalogItem> {
        self.read_items().clone()
    }

    /// Look up a cached item by its video id.
    pub fn find(&self, video_id: &VideoId) -> Option<CatalogItem> {
        self.read_items()
            .iter()
            .find(|item| &item.video_id == video_id)
            .cloned()
    }

    /// Number of cached items.
    pub fn len(&self) -> usize {
        self.read_items().len()
    }

    /// Returns `true` when no catalog has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.read_items().is_empty()
    }

    fn read_items(&self) -> std::sync::RwLockReadGuard<'_, Vec<CatalogItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_items(&self) -> std::sync::RwLockWriteGuard<'_, Vec<CatalogItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: CatalogEvent) {
        if let Some(bus) = &self.event_bus {
            bus.emit(CoreEvent::Catalog(event)).ok();
        }
    }
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("playlist_ref", &self.playlist_ref)
            .field("cached_items", &self.len())
            .finish()
    }
}
