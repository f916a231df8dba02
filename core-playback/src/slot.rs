//! The single owned cell holding the current playback intent.
//!
//! There is exactly one of these per core instance: the resolver writes it,
//! the player-invocation boundary reads it, nothing else touches it. No other
//! global playback state exists.

use crate::source::PlaybackSource;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Holds the most recently resolved [`PlaybackSource`].
#[derive(Debug, Default)]
pub struct PlaybackSlot {
    current: Mutex<PlaybackSource>,
}

impl PlaybackSlot {
    /// Create a slot with no active playback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current intent, returning the directive it displaced.
    pub fn set(&self, source: PlaybackSource) -> PlaybackSource {
        let mut current = self.lock();
        debug!(from = current.kind(), to = source.kind(), "playback intent replaced");
        std::mem::replace(&mut *current, source)
    }

    /// The current playback intent.
    pub fn current(&self) -> PlaybackSource {
        self.lock().clone()
    }

    /// Reset to no active playback, returning the displaced directive.
    pub fn clear(&self) -> PlaybackSource {
        self.set(PlaybackSource::Inactive)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PlaybackSource> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::{ReferenceId, VideoToken};

    #[test]
    fn starts_inactive() {
        let slot = PlaybackSlot::new();
        assert_eq!(slot.current(), PlaybackSource::Inactive);
    }

    #[test]
    fn set_fully_replaces_previous_directive() {
        let slot = PlaybackSlot::new();
        slot.set(PlaybackSource::Offline(VideoToken::new("t1")));

        let displaced = slot.set(PlaybackSource::Reference(ReferenceId::new("r1")));
        assert_eq!(displaced, PlaybackSource::Offline(VideoToken::new("t1")));
        assert_eq!(
            slot.current(),
            PlaybackSource::Reference(ReferenceId::new("r1"))
        );
    }

    #[test]
    fn clear_resets_to_inactive() {
        let slot = PlaybackSlot::new();
        slot.set(PlaybackSource::Reference(ReferenceId::new("r1")));
        let displaced = slot.clear();
        assert!(displaced.is_active());
        assert!(!slot.current().is_active());
    }
}
