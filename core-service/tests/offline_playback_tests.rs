//! End-to-end tests for the core facade against fake bridges.
//!
//! The fakes stand in for the remote catalog, the download subsystem and the
//! notification channel, so the tests can walk the full lifecycle: start,
//! resolve, download, delete, snapshot update, shutdown.

use async_trait::async_trait;
use bridge_traits::offline::StatusCallback;
use bridge_traits::{
    AccountCredentials, BridgeError, CatalogItem, CatalogSource, NotificationHandle,
    OfflineNotifications, OfflineStatus, OfflineStore, ReferenceId, VideoId, VideoToken,
};
use core_runtime::config::CoreConfig;
use core_service::{CoreService, PlaybackSource};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Fake bridges
// ============================================================================

struct FakeCatalog {
    items: Vec<CatalogItem>,
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_playlist(
        &self,
        _credentials: &AccountCredentials,
        _playlist_ref: &str,
    ) -> Result<Vec<CatalogItem>, BridgeError> {
        Ok(self.items.clone())
    }
}

struct UnreachableCatalog;

#[async_trait]
impl CatalogSource for UnreachableCatalog {
    async fn fetch_playlist(
        &self,
        _credentials: &AccountCredentials,
        _playlist_ref: &str,
    ) -> Result<Vec<CatalogItem>, BridgeError> {
        Err(BridgeError::Unavailable("catalog endpoint down".to_string()))
    }
}

#[derive(Default)]
struct FakeStore {
    initial: Vec<OfflineStatus>,
    download_requests: Mutex<Vec<VideoId>>,
    delete_requests: Mutex<Vec<VideoToken>>,
}

impl FakeStore {
    fn with_initial(initial: Vec<OfflineStatus>) -> Self {
        Self {
            initial,
            ..Self::default()
        }
    }
}

#[async_trait]
impl OfflineStore for FakeStore {
    async fn fetch_statuses(
        &self,
        _credentials: &AccountCredentials,
    ) -> Result<Vec<OfflineStatus>, BridgeError> {
        Ok(self.initial.clone())
    }

    async fn request_download(
        &self,
        _credentials: &AccountCredentials,
        video_id: &VideoId,
    ) -> Result<(), BridgeError> {
        self.download_requests.lock().unwrap().push(video_id.clone());
        Ok(())
    }

    async fn delete_local_copy(
        &self,
        _credentials: &AccountCredentials,
        video_token: &VideoToken,
    ) -> Result<(), BridgeError> {
        self.delete_requests.lock().unwrap().push(video_token.clone());
        Ok(())
    }
}

/// Notification channel that exposes its registered callback to the test so
/// snapshots can be pushed by hand, and counts releases.
#[derive(Default)]
struct FakeNotifications {
    callback: Arc<Mutex<Option<StatusCallback>>>,
    releases: Arc<AtomicUsize>,
}

impl FakeNotifications {
    fn push(&self, statuses: Vec<OfflineStatus>) {
        let callback = self
            .callback
            .lock()
            .unwrap()
            .clone()
            .expect("no subscription registered");
        callback(statuses);
    }

    fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OfflineNotifications for FakeNotifications {
    async fn subscribe(&self, callback: StatusCallback) -> Result<NotificationHandle, BridgeError> {
        *self.callback.lock().unwrap() = Some(callback);
        let releases = Arc::clone(&self.releases);
        Ok(NotificationHandle::new(move || {
            releases.fetch_add(1, Ordering::SeqCst);
        }))
    }
}

struct RefusingNotifications;

#[async_trait]
impl OfflineNotifications for RefusingNotifications {
    async fn subscribe(
        &self,
        _callback: StatusCallback,
    ) -> Result<NotificationHandle, BridgeError> {
        Err(BridgeError::Rejected("channel closed".to_string()))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn item(video_id: &str, reference_id: Option<&str>) -> CatalogItem {
    CatalogItem {
        video_id: VideoId::new(video_id),
        reference_id: reference_id.map(ReferenceId::new),
        name: format!("Video {video_id}"),
        description: String::new(),
        duration_ms: 90_000,
    }
}

fn complete(video_id: &str, token: &str) -> OfflineStatus {
    OfflineStatus::new(
        VideoId::new(video_id),
        1.0,
        Some(VideoToken::new(token)),
    )
}

fn in_progress(video_id: &str, progress: f64) -> OfflineStatus {
    OfflineStatus::new(VideoId::new(video_id), progress, None)
}

fn build_service(
    catalog: Arc<dyn CatalogSource>,
    store: Arc<FakeStore>,
    notifications: Arc<FakeNotifications>,
) -> CoreService {
    let config = CoreConfig::builder()
        .credentials(AccountCredentials::new("acct-1", "pk-1"))
        .playlist_ref("featured")
        .catalog_source(catalog)
        .offline_store(store)
        .notifications(notifications)
        .build()
        .unwrap();
    CoreService::new(config)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn start_loads_catalog_and_initial_statuses() {
    let catalog = Arc::new(FakeCatalog {
        items: vec![item("v1", Some("r1")), item("v2", None)],
    });
    let store = Arc::new(FakeStore::with_initial(vec![in_progress("v1", 0.3)]));
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(catalog, store, Arc::clone(&notifications));
    service.start().await.unwrap();

    assert_eq!(service.catalog().len(), 2);
    assert_eq!(service.tracked_statuses().len(), 1);
    assert!(service.is_started());
}

#[tokio::test]
async fn catalog_failure_is_non_fatal_and_leaves_it_empty() {
    let store = Arc::new(FakeStore::default());
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(Arc::new(UnreachableCatalog), store, notifications);
    service.start().await.unwrap();

    assert!(service.catalog().is_empty());
    assert!(service.is_started());
}

#[tokio::test]
async fn resolution_prefers_local_copy_then_reference_then_id() {
    let catalog = Arc::new(FakeCatalog {
        items: vec![item("v1", Some("r1")), item("v2", None)],
    });
    let store = Arc::new(FakeStore::with_initial(vec![complete("v1", "t1")]));
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(catalog, store, notifications);
    service.start().await.unwrap();

    // Complete local copy wins.
    let source = service.resolve_playback_by_id(&VideoId::new("v1")).unwrap();
    assert_eq!(source, PlaybackSource::Offline(VideoToken::new("t1")));
    assert_eq!(service.current_playback(), source);

    // No status, no reference: raw id.
    let source = service.resolve_playback_by_id(&VideoId::new("v2")).unwrap();
    assert_eq!(source, PlaybackSource::Video(VideoId::new("v2")));

    // Unknown id leaves the intent untouched.
    assert!(service.resolve_playback_by_id(&VideoId::new("v9")).is_none());
    assert_eq!(source, service.current_playback());
}

#[tokio::test]
async fn progress_updates_flip_resolution_once_complete() {
    let catalog = Arc::new(FakeCatalog {
        items: vec![item("v1", Some("r1"))],
    });
    let store = Arc::new(FakeStore::default());
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(catalog, store, Arc::clone(&notifications));
    service.start().await.unwrap();

    // Nothing tracked yet: streams by reference.
    let source = service.resolve_playback_by_id(&VideoId::new("v1")).unwrap();
    assert_eq!(source, PlaybackSource::Reference(ReferenceId::new("r1")));

    // Download under way: still streams.
    notifications.push(vec![in_progress("v1", 0.42)]);
    let source = service.resolve_playback_by_id(&VideoId::new("v1")).unwrap();
    assert_eq!(source, PlaybackSource::Reference(ReferenceId::new("r1")));

    // Download finished while the list is on screen.
    notifications.push(vec![complete("v1", "t1")]);
    let source = service.resolve_playback_by_id(&VideoId::new("v1")).unwrap();
    assert_eq!(source, PlaybackSource::Offline(VideoToken::new("t1")));
}

#[tokio::test]
async fn deleting_a_local_copy_falls_back_to_streaming() {
    let catalog = Arc::new(FakeCatalog {
        items: vec![item("v1", Some("r1"))],
    });
    let store = Arc::new(FakeStore::with_initial(vec![complete("v1", "t1")]));
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(catalog, Arc::clone(&store), Arc::clone(&notifications));
    service.start().await.unwrap();

    assert!(service
        .resolve_playback_by_id(&VideoId::new("v1"))
        .unwrap()
        .is_offline());

    service.delete_local_copy(&VideoToken::new("t1")).await;
    assert_eq!(
        store.delete_requests.lock().unwrap().as_slice(),
        &[VideoToken::new("t1")]
    );

    // The subsystem confirms by reporting a set without the entry.
    notifications.push(Vec::new());
    assert!(service.offline_status(&VideoId::new("v1")).is_none());
    assert_eq!(
        service.resolve_playback_by_id(&VideoId::new("v1")).unwrap(),
        PlaybackSource::Reference(ReferenceId::new("r1"))
    );
}

#[tokio::test]
async fn download_requests_are_forwarded_to_the_store() {
    let catalog = Arc::new(FakeCatalog {
        items: vec![item("v1", None)],
    });
    let store = Arc::new(FakeStore::default());
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(catalog, Arc::clone(&store), notifications);
    service.start().await.unwrap();

    service.request_download(&VideoId::new("v1")).await;
    assert_eq!(
        store.download_requests.lock().unwrap().as_slice(),
        &[VideoId::new("v1")]
    );
}

#[tokio::test]
async fn shutdown_releases_the_subscription_exactly_once() {
    let catalog = Arc::new(FakeCatalog { items: Vec::new() });
    let store = Arc::new(FakeStore::default());
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(catalog, store, Arc::clone(&notifications));
    service.start().await.unwrap();
    assert_eq!(notifications.release_count(), 0);

    service.shutdown();
    assert_eq!(notifications.release_count(), 1);
    assert!(!service.is_started());

    // Later shutdowns are no-ops.
    service.shutdown();
    assert_eq!(notifications.release_count(), 1);
}

#[tokio::test]
async fn restart_replaces_the_previous_subscription() {
    let catalog = Arc::new(FakeCatalog { items: Vec::new() });
    let store = Arc::new(FakeStore::default());
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(catalog, store, Arc::clone(&notifications));
    service.start().await.unwrap();
    service.start().await.unwrap();

    // The first handle was released when the second subscription took over.
    assert_eq!(notifications.release_count(), 1);
    assert!(service.is_started());

    service.shutdown();
    assert_eq!(notifications.release_count(), 2);
}

#[tokio::test]
async fn refused_subscription_surfaces_as_an_error() {
    let config = CoreConfig::builder()
        .credentials(AccountCredentials::new("acct-1", "pk-1"))
        .playlist_ref("featured")
        .catalog_source(Arc::new(FakeCatalog { items: Vec::new() }))
        .offline_store(Arc::new(FakeStore::default()))
        .notifications(Arc::new(RefusingNotifications))
        .build()
        .unwrap();
    let service = CoreService::new(config);

    assert!(service.start().await.is_err());
    assert!(!service.is_started());
}

#[tokio::test]
async fn shutdown_clears_the_playback_intent() {
    let catalog = Arc::new(FakeCatalog {
        items: vec![item("v1", Some("r1"))],
    });
    let store = Arc::new(FakeStore::default());
    let notifications = Arc::new(FakeNotifications::default());

    let service = build_service(catalog, store, notifications);
    service.start().await.unwrap();

    service.resolve_playback_by_id(&VideoId::new("v1")).unwrap();
    assert!(service.current_playback().is_active());

    service.shutdown();
    assert!(!service.current_playback().is_active());
}
