//! # Host Bridge Traits
//!
//! Contracts between the video platform core and the external subsystems it
//! is embedded next to.
//!
//! ## Overview
//!
//! The core never talks to the network, the filesystem, or a media pipeline
//! directly. Instead, the host application injects implementations of the
//! traits in this crate:
//!
//! - [`CatalogSource`](catalog::CatalogSource) - remote playlist/catalog
//!   lookups scoped to an account
//! - [`OfflineStore`](offline::OfflineStore) - the download subsystem that
//!   owns local copies (bulk status fetch, download and delete requests)
//! - [`OfflineNotifications`](offline::OfflineNotifications) - the push
//!   channel that delivers full offline-status snapshots into the core
//!
//! The data types these traits exchange ([`CatalogItem`](catalog::CatalogItem),
//! [`OfflineStatus`](offline::OfflineStatus) and the id newtypes) also live
//! here: they are created and owned by the external subsystems, and the core
//! treats them as facts it receives, not state it invents.
//!
//! ## Error Handling
//!
//! Every trait method returns [`BridgeError`](error::BridgeError).
//! Implementations should map platform failures into it with enough context
//! to be actionable in logs; the core decides per call site whether a failure
//! is fatal (it almost never is).
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! across async tasks behind `Arc`.

pub mod account;
pub mod catalog;
pub mod error;
pub mod offline;

pub use error::BridgeError;

// Re-export commonly used types
pub use account::AccountCredentials;
pub use catalog::{CatalogItem, CatalogSource, ReferenceId, VideoId};
pub use offline::{
    NotificationHandle, OfflineNotifications, OfflineStatus, OfflineStore, StatusCallback,
    VideoToken,
};
