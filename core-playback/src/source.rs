//! The playback directive handed to the external player.

use bridge_traits::{ReferenceId, VideoId, VideoToken};
use serde::{Deserialize, Serialize};

/// Resolved instruction describing which source should be played.
///
/// Exactly one variant is active at a time; assigning a new directive fully
/// replaces the previous one, fields are never merged across variants. The
/// value is ephemeral: it is recomputed on every playback request and only
/// survives as the current intent inside the
/// [`PlaybackSlot`](crate::PlaybackSlot).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "id", rename_all = "camelCase")]
pub enum PlaybackSource {
    /// Play the complete local copy behind this token.
    Offline(VideoToken),
    /// Stream by resolving the curated catalog reference.
    Reference(ReferenceId),
    /// Stream by raw platform video id.
    Video(VideoId),
    /// No active playback.
    #[default]
    Inactive,
}

impl PlaybackSource {
    /// Returns `true` unless the directive is [`Inactive`](Self::Inactive).
    pub fn is_active(&self) -> bool {
        !matches!(self, PlaybackSource::Inactive)
    }

    /// Returns `true` when the directive points at a local copy.
    pub fn is_offline(&self) -> bool {
        matches!(self, PlaybackSource::Offline(_))
    }

    /// Short label for the chosen source kind, used in events and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PlaybackSource::Offline(_) => "offline",
            PlaybackSource::Reference(_) => "reference",
            PlaybackSource::Video(_) => "video",
            PlaybackSource::Inactive => "inactive",
        }
    }
}
