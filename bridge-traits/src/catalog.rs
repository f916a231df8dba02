//! Catalog source contract and the item types it produces.
//!
//! The remote catalog owns the list of playable items; the core treats each
//! [`CatalogItem`] as immutable for the duration of one fetch cycle and never
//! writes back to the source.

use crate::{account::AccountCredentials, error::Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier assigned to a video by the remote platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-curated alias for a video, resolved by the catalog at playback time.
///
/// A reference id may exist instead of or alongside a [`VideoId`]; curators
/// use it to swap the underlying asset without touching consumers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One playable entry in the remote catalog.
///
/// Owned by the catalog source; the core only reads it. Every item is
/// expected to carry at least one usable identifier, but consumers must not
/// rely on that and should degrade gracefully when both are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Stable platform identifier.
    pub video_id: VideoId,
    /// Optional curated alias, preferred for streaming resolution.
    #[serde(default)]
    pub reference_id: Option<ReferenceId>,
    /// Display title.
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// Total runtime in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
}

impl CatalogItem {
    /// Runtime formatted as `mm:ss`, truncated the way list rows render it.
    pub fn duration_display(&self) -> String {
        let minutes = (self.duration_ms / 60_000) % 60;
        let seconds = (self.duration_ms / 1_000) % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Trait for the remote catalog/playlist source.
///
/// Implementations perform the actual network round trip; the core calls this
/// once per fetch cycle and caches the result.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the ordered playlist identified by `playlist_ref`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Unavailable`](crate::BridgeError::Unavailable)
    /// on network or authorization failure. The core logs the failure and
    /// keeps operating on its last-known list.
    async fn fetch_playlist(
        &self,
        credentials: &AccountCredentials,
        playlist_ref: &str,
    ) -> Result<Vec<CatalogItem>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(duration_ms: u64) -> CatalogItem {
        CatalogItem {
            video_id: VideoId::new("v1"),
            reference_id: Some(ReferenceId::new("r1")),
            name: "Clip".to_string(),
            description: String::new(),
            duration_ms,
        }
    }

    #[test]
    fn duration_renders_zero_padded() {
        assert_eq!(item(65_000).duration_display(), "01:05");
        assert_eq!(item(0).duration_display(), "00:00");
        assert_eq!(item(599_999).duration_display(), "09:59");
    }

    #[test]
    fn duration_truncates_hours() {
        // 1h02m03s renders as 02:03, matching the list row format.
        assert_eq!(item(3_723_000).duration_display(), "02:03");
    }

    #[test]
    fn item_deserializes_from_wire_shape() {
        let json = r#"{
            "videoId": "v42",
            "referenceId": "ref-42",
            "name": "Launch",
            "description": "Live launch replay",
            "durationMs": 120000
        }"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.video_id, VideoId::new("v42"));
        assert_eq!(item.reference_id, Some(ReferenceId::new("ref-42")));
        assert_eq!(item.duration_ms, 120_000);
    }

    #[test]
    fn reference_id_is_optional_on_the_wire() {
        let json = r#"{"videoId": "v7", "name": "Short"}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.reference_id, None);
        assert_eq!(item.duration_ms, 0);
    }
}
