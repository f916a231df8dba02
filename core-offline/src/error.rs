use bridge_traits::{BridgeError, VideoId};
use thiserror::Error;

/// Failures at the offline subsystem boundary.
///
/// All of these are non-fatal to the core: they are logged where the external
/// call is made and the tracked state simply stays as it was.
#[derive(Error, Debug)]
pub enum OfflineError {
    #[error("Offline statuses unavailable: {0}")]
    StatusUnavailable(BridgeError),

    #[error("Download request for {video_id} rejected: {reason}")]
    DownloadRejected {
        video_id: VideoId,
        reason: BridgeError,
    },

    #[error("Delete request rejected: {0}")]
    DeleteRejected(BridgeError),
}

pub type Result<T> = std::result::Result<T, OfflineError>;
