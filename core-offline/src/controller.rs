//! Command boundary towards the external download subsystem.
//!
//! The controller validates and forwards requests; it never performs I/O
//! itself and never mutates tracked state. When the subsystem accepts a
//! request, the resulting change arrives later as a status snapshot through
//! the notification channel. When it rejects one, the rejection is logged and
//! swallowed here: tracked state stays as it was and the user-visible effect
//! is that the expected update never happens.

use crate::error::{OfflineError, Result};
use bridge_traits::{AccountCredentials, OfflineStatus, OfflineStore, VideoId, VideoToken};
use core_runtime::events::{CoreEvent, EventBus, OfflineEvent};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Issues download and delete commands against the [`OfflineStore`] bridge.
pub struct DownloadController {
    store: Arc<dyn OfflineStore>,
    credentials: AccountCredentials,
    event_bus: Option<Arc<EventBus>>,
}

impl DownloadController {
    /// Create a controller bound to one account.
    pub fn new(store: Arc<dyn OfflineStore>, credentials: AccountCredentials) -> Self {
        Self {
            store,
            credentials,
            event_bus: None,
        }
    }

    /// Mirror request outcomes onto the core event bus.
    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Fetch the complete current status set from the subsystem.
    ///
    /// Used once at startup to seed the tracker; afterwards the notification
    /// channel keeps the view current.
    pub async fn initial_statuses(&self) -> Result<Vec<OfflineStatus>> {
        self.store
            .fetch_statuses(&self.credentials)
            .await
            .map_err(OfflineError::StatusUnavailable)
    }

    /// Forward a download request for `video_id`.
    ///
    /// Fire-and-forget: a rejection is logged at `warn` and swallowed. There
    /// is no retry and no error surfaced to the caller; the tracker simply
    /// keeps reporting no progress for the item.
    #[instrument(skip(self), fields(video_id = %video_id))]
    pub async fn request_download(&self, video_id: &VideoId) {
        if video_id.is_empty() {
            warn!("ignoring download request without a video id");
            return;
        }

        match self.store.request_download(&self.credentials, video_id).await {
            Ok(()) => {
                debug!("download request forwarded");
                self.emit(OfflineEvent::DownloadRequested {
                    video_id: video_id.to_string(),
                });
            }
            Err(reason) => {
                let err = OfflineError::DownloadRejected {
                    video_id: video_id.clone(),
                    reason,
                };
                warn!(error = %err, "download request swallowed");
                self.emit(OfflineEvent::DownloadRejected {
                    video_id: video_id.to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    /// Forward a deletion request for the local copy behind `video_token`.
    ///
    /// The token must come from a previously tracked [`OfflineStatus`]; the
    /// controller does not validate its shape. A rejection is logged but not
    /// escalated. On success the subsystem follows up with a snapshot that no
    /// longer contains the entry.
    #[instrument(skip(self, video_token))]
    pub async fn delete_local_copy(&self, video_token: &VideoToken) {
        match self
            .store
            .delete_local_copy(&self.credentials, video_token)
            .await
        {
            Ok(()) => {
                debug!("delete request forwarded");
                self.emit(OfflineEvent::DeleteRequested {
                    video_token: video_token.to_string(),
                });
            }
            Err(reason) => {
                let err = OfflineError::DeleteRejected(reason);
                warn!(error = %err, "delete request swallowed");
                self.emit(OfflineEvent::DeleteRejected {
                    video_token: video_token.to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: OfflineEvent) {
        if let Some(bus) = &self.event_bus {
            bus.emit(CoreEvent::Offline(event)).ok();
        }
    }
}

impl std::fmt::Debug for DownloadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadController")
            .field("credentials", &self.credentials)
            .field("event_bus", &self.event_bus.is_some())
            .finish()
    }
}
