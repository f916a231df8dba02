//! # Core Configuration Module
//!
//! Configuration for wiring host-provided bridges into the video platform
//! core.
//!
//! ## Overview
//!
//! The configuration system uses a builder to assemble a [`CoreConfig`] that
//! holds account credentials, the playlist to present, and the three bridge
//! implementations the core cannot run without. Validation is fail-fast: a
//! missing bridge produces an actionable [`Error::CapabilityMissing`] at
//! build time instead of a panic deep inside the first call.
//!
//! ## Required Dependencies
//!
//! - [`CatalogSource`] - remote playlist lookups
//! - [`OfflineStore`] - download subsystem commands and bulk status fetch
//! - [`OfflineNotifications`] - push channel for status snapshots
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use bridge_traits::AccountCredentials;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .credentials(AccountCredentials::new(account_id, policy_key))
//!     .playlist_ref("featured-playlist")
//!     .catalog_source(Arc::new(MyCatalogSource))
//!     .offline_store(Arc::new(MyOfflineStore))
//!     .notifications(Arc::new(MyNotificationChannel))
//!     .build()?;
//! # Ok::<(), core_runtime::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::events::DEFAULT_EVENT_BUFFER_SIZE;
use bridge_traits::{AccountCredentials, CatalogSource, OfflineNotifications, OfflineStore};
use std::sync::Arc;

/// Core configuration for the video platform core.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Account credentials forwarded on every external call.
    pub credentials: AccountCredentials,

    /// Reference id of the playlist presented by the host.
    pub playlist_ref: String,

    /// Remote catalog source (required).
    pub catalog_source: Arc<dyn CatalogSource>,

    /// Offline download subsystem (required).
    pub offline_store: Arc<dyn OfflineStore>,

    /// Status-change notification channel (required).
    pub notifications: Arc<dyn OfflineNotifications>,

    /// Buffer size for the core event bus.
    pub event_buffer_size: usize,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("credentials", &self.credentials)
            .field("playlist_ref", &self.playlist_ref)
            .field("catalog_source", &"CatalogSource { ... }")
            .field("offline_store", &"OfflineStore { ... }")
            .field("notifications", &"OfflineNotifications { ... }")
            .field("event_buffer_size", &self.event_buffer_size)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration values.
    ///
    /// Bridge presence is enforced by the builder; this checks that the
    /// remaining values are usable:
    /// - credentials carry both an account id and a policy key
    /// - the playlist reference is not empty
    /// - the event buffer holds at least one event
    pub fn validate(&self) -> Result<()> {
        if self.credentials.is_incomplete() {
            return Err(Error::Config(
                "Account credentials require both an account id and a policy key".to_string(),
            ));
        }

        if self.playlist_ref.is_empty() {
            return Err(Error::Config(
                "Playlist reference cannot be empty. Use .playlist_ref() to set it.".to_string(),
            ));
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    credentials: Option<AccountCredentials>,
    playlist_ref: Option<String>,
    catalog_source: Option<Arc<dyn CatalogSource>>,
    offline_store: Option<Arc<dyn OfflineStore>>,
    notifications: Option<Arc<dyn OfflineNotifications>>,
    event_buffer_size: Option<usize>,
}

impl CoreConfigBuilder {
    /// Sets the account credentials (required).
    pub fn credentials(mut self, credentials: AccountCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the playlist reference id (required).
    pub fn playlist_ref(mut self, playlist_ref: impl Into<String>) -> Self {
        self.playlist_ref = Some(playlist_ref.into());
        self
    }

    /// Sets the catalog source implementation (required).
    pub fn catalog_source(mut self, source: Arc<dyn CatalogSource>) -> Self {
        self.catalog_source = Some(source);
        self
    }

    /// Sets the offline store implementation (required).
    pub fn offline_store(mut self, store: Arc<dyn OfflineStore>) -> Self {
        self.offline_store = Some(store);
        self
    }

    /// Sets the notification channel implementation (required).
    pub fn notifications(mut self, notifications: Arc<dyn OfflineNotifications>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Sets the event bus buffer size.
    ///
    /// Default: [`DEFAULT_EVENT_BUFFER_SIZE`].
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityMissing`] when a required bridge was not
    /// provided, and [`Error::Config`] when a value fails validation. The
    /// messages name the missing piece and the builder method that sets it.
    pub fn build(self) -> Result<CoreConfig> {
        let credentials = self.credentials.ok_or_else(|| {
            Error::Config(
                "Account credentials are required. Use .credentials() to set them.".to_string(),
            )
        })?;

        let playlist_ref = self.playlist_ref.ok_or_else(|| {
            Error::Config(
                "Playlist reference is required. Use .playlist_ref() to set it.".to_string(),
            )
        })?;

        let catalog_source = self.catalog_source.ok_or_else(|| Error::CapabilityMissing {
            capability: "CatalogSource".to_string(),
            message: "No catalog source implementation provided. \
                      Inject the platform adapter that fetches playlists for this account."
                .to_string(),
        })?;

        let offline_store = self.offline_store.ok_or_else(|| Error::CapabilityMissing {
            capability: "OfflineStore".to_string(),
            message: "No offline store implementation provided. \
                      Inject the platform adapter that owns local copies and downloads."
                .to_string(),
        })?;

        let notifications = self.notifications.ok_or_else(|| Error::CapabilityMissing {
            capability: "OfflineNotifications".to_string(),
            message: "No notification channel implementation provided. \
                      Inject the platform adapter that pushes offline-status snapshots."
                .to_string(),
        })?;

        let config = CoreConfig {
            credentials,
            playlist_ref,
            catalog_source,
            offline_store,
            notifications,
            event_buffer_size: self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;

        Ok(config)
    }
}
