//! # Offline Availability Module
//!
//! Tracks which catalog items have local copies (or downloads in flight) and
//! forwards download/delete commands to the external download subsystem.
//!
//! ## Overview
//!
//! Two pieces live here:
//!
//! - [`OfflineStatusTracker`](tracker::OfflineStatusTracker) - the serialized,
//!   replace-on-update view of per-item offline state. The download subsystem
//!   reports full snapshots, never deltas, so the tracker's job is
//!   replace-and-notify rather than merge; that keeps the local view from
//!   drifting away from the subsystem's truth.
//! - [`DownloadController`](controller::DownloadController) - the thin command
//!   boundary that validates and forwards start/delete requests. It performs
//!   no I/O itself and never touches the tracker: the observable outcome of a
//!   command arrives later as a status snapshot.

pub mod controller;
pub mod error;
pub mod tracker;

pub use controller::DownloadController;
pub use error::{OfflineError, Result};
pub use tracker::{OfflineStatusTracker, StatusListener, SubscriptionId};
