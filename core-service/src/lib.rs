//! Core service façade.
//!
//! This crate wires the host-provided bridges (catalog source, offline store,
//! notification channel) into the core modules and exposes the single surface
//! the presentation layer talks to: catalog listing, offline-status queries,
//! playback resolution, download/delete commands and the change-event stream.

pub mod error;
pub mod service;

pub use error::{CoreError, Result};
pub use service::CoreService;

// The facade hands these types straight through to hosts.
pub use bridge_traits::{
    AccountCredentials, CatalogItem, OfflineStatus, ReferenceId, VideoId, VideoToken,
};
pub use core_playback::PlaybackSource;
pub use core_runtime::config::CoreConfig;
pub use core_runtime::events::CoreEvent;
