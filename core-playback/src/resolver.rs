//! Playback source selection policy.

use crate::source::PlaybackSource;
use bridge_traits::{CatalogItem, OfflineStatus};
use tracing::trace;

/// Resolve the playback source for `item` given its tracked offline status.
///
/// Total function, strict priority order:
///
/// 1. A complete local copy always wins over streaming.
/// 2. Among streaming options, the curated reference is preferred over the
///    raw video id.
/// 3. An item with neither identifier resolves to
///    [`PlaybackSource::Inactive`] rather than failing.
///
/// An in-progress download never influences the choice: until progress is
/// complete the item streams exactly as if no status were tracked. A complete
/// status that is missing its token cannot be played locally and falls
/// through to the streaming arms.
pub fn resolve(item: &CatalogItem, status: Option<&OfflineStatus>) -> PlaybackSource {
    if let Some(status) = status {
        if status.is_complete() {
            if let Some(token) = &status.video_token {
                trace!(video_id = %item.video_id, "resolved to local copy");
                return PlaybackSource::Offline(token.clone());
            }
        }
    }

    if let Some(reference_id) = item.reference_id.as_ref().filter(|r| !r.is_empty()) {
        trace!(video_id = %item.video_id, "resolved to catalog reference");
        return PlaybackSource::Reference(reference_id.clone());
    }

    if !item.video_id.is_empty() {
        trace!(video_id = %item.video_id, "resolved to raw video id");
        return PlaybackSource::Video(item.video_id.clone());
    }

    trace!("item carries no identifier, nothing to play");
    PlaybackSource::Inactive
}
