//! Offline download subsystem contracts.
//!
//! The download subsystem owns local copies end to end: it performs the
//! transfers, stores the bytes, and is the single source of truth for what is
//! on disk. The core only forwards requests and mirrors the status snapshots
//! the subsystem reports back.

use crate::{account::AccountCredentials, catalog::VideoId, error::Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Opaque handle to a completed or in-flight local copy.
///
/// Issued by the download subsystem; the core never inspects its shape, it
/// only hands it back on playback and deletion requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoToken(String);

impl VideoToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Download/local-availability state for one catalog item.
///
/// The subsystem reports at most one entry per [`VideoId`]; an item with no
/// entry has no local copy and no active download. Progress is monotonically
/// non-decreasing while a download is active, and the token is only valid for
/// playback once progress is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineStatus {
    /// Item this status belongs to.
    pub video_id: VideoId,
    /// Download progress in `[0.0, 1.0]`.
    pub download_progress: f64,
    /// Handle to the local copy, present once progress has started.
    #[serde(default)]
    pub video_token: Option<VideoToken>,
}

impl OfflineStatus {
    /// Create a status entry, clamping progress into `[0.0, 1.0]`.
    ///
    /// NaN progress is treated as zero rather than poisoning comparisons
    /// downstream.
    pub fn new(video_id: VideoId, download_progress: f64, video_token: Option<VideoToken>) -> Self {
        let download_progress = if download_progress.is_nan() {
            0.0
        } else {
            download_progress.clamp(0.0, 1.0)
        };
        Self {
            video_id,
            download_progress,
            video_token,
        }
    }

    /// Returns `true` once the local copy is fully downloaded.
    pub fn is_complete(&self) -> bool {
        self.download_progress >= 1.0
    }

    /// Progress as a whole percentage, the way list rows render it.
    pub fn progress_percent(&self) -> u8 {
        (self.download_progress.clamp(0.0, 1.0) * 100.0).floor() as u8
    }
}

/// Trait for the external download subsystem.
///
/// All methods forward to the platform; none of them mutate core state. The
/// observable outcome of a request arrives later as a status snapshot through
/// [`OfflineNotifications`].
#[async_trait]
pub trait OfflineStore: Send + Sync {
    /// Fetch the complete current status set for the account.
    async fn fetch_statuses(&self, credentials: &AccountCredentials) -> Result<Vec<OfflineStatus>>;

    /// Ask the subsystem to start downloading a local copy of `video_id`.
    async fn request_download(
        &self,
        credentials: &AccountCredentials,
        video_id: &VideoId,
    ) -> Result<()>;

    /// Ask the subsystem to delete the local copy behind `video_token`.
    ///
    /// On success the subsystem is expected to follow up with a status
    /// snapshot that no longer contains the corresponding entry.
    async fn delete_local_copy(
        &self,
        credentials: &AccountCredentials,
        video_token: &VideoToken,
    ) -> Result<()>;
}

/// Callback invoked with the full current status set on every change event.
pub type StatusCallback = Arc<dyn Fn(Vec<OfflineStatus>) + Send + Sync>;

/// Trait for the push channel that delivers status snapshots into the core.
///
/// Each event carries the complete current set, not a delta; consumers
/// replace their view wholesale.
#[async_trait]
pub trait OfflineNotifications: Send + Sync {
    /// Register `callback` for status-change events.
    ///
    /// The returned handle scopes the registration; dropping or releasing it
    /// stops delivery.
    async fn subscribe(&self, callback: StatusCallback) -> Result<NotificationHandle>;
}

/// Scoped handle to an active status-change subscription.
///
/// The registration is released exactly once: either explicitly through
/// [`release`](NotificationHandle::release), or on drop as a backstop so a
/// subscription can never outlive its owner.
pub struct NotificationHandle {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl NotificationHandle {
    /// Wrap the teardown action performed when the subscription ends.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Handle with no teardown, for channels that need none.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Release the subscription now, consuming the handle.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for NotificationHandle {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for NotificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationHandle")
            .field("released", &self.release.is_none())
            .finish()
    }
}
