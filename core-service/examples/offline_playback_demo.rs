//! Demonstrates wiring the core against in-memory bridges.
//!
//! Run with: cargo run --example offline_playback_demo -p core-service

use async_trait::async_trait;
use bridge_traits::offline::StatusCallback;
use bridge_traits::{
    AccountCredentials, BridgeError, CatalogItem, CatalogSource, NotificationHandle,
    OfflineNotifications, OfflineStatus, OfflineStore, ReferenceId, VideoId, VideoToken,
};
use core_runtime::config::CoreConfig;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_service::CoreService;
use std::sync::{Arc, Mutex};

struct DemoCatalog;

#[async_trait]
impl CatalogSource for DemoCatalog {
    async fn fetch_playlist(
        &self,
        _credentials: &AccountCredentials,
        _playlist_ref: &str,
    ) -> Result<Vec<CatalogItem>, BridgeError> {
        Ok(vec![
            CatalogItem {
                video_id: VideoId::new("v1"),
                reference_id: Some(ReferenceId::new("sea-marvels")),
                name: "Sea Marvels".to_string(),
                description: "4K underwater footage".to_string(),
                duration_ms: 365_000,
            },
            CatalogItem {
                video_id: VideoId::new("v2"),
                reference_id: None,
                name: "Great Blue Moon".to_string(),
                description: String::new(),
                duration_ms: 187_000,
            },
        ])
    }
}

struct DemoStore;

#[async_trait]
impl OfflineStore for DemoStore {
    async fn fetch_statuses(
        &self,
        _credentials: &AccountCredentials,
    ) -> Result<Vec<OfflineStatus>, BridgeError> {
        Ok(vec![OfflineStatus::new(
            VideoId::new("v1"),
            1.0,
            Some(VideoToken::new("token-v1")),
        )])
    }

    async fn request_download(
        &self,
        _credentials: &AccountCredentials,
        video_id: &VideoId,
    ) -> Result<(), BridgeError> {
        println!("download subsystem accepted a request for {video_id}");
        Ok(())
    }

    async fn delete_local_copy(
        &self,
        _credentials: &AccountCredentials,
        video_token: &VideoToken,
    ) -> Result<(), BridgeError> {
        println!("download subsystem will delete {video_token}");
        Ok(())
    }
}

#[derive(Default)]
struct DemoNotifications {
    callback: Mutex<Option<StatusCallback>>,
}

#[async_trait]
impl OfflineNotifications for DemoNotifications {
    async fn subscribe(&self, callback: StatusCallback) -> Result<NotificationHandle, BridgeError> {
        *self.callback.lock().unwrap() = Some(callback);
        Ok(NotificationHandle::new(|| {
            println!("notification channel released");
        }))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging(LoggingConfig::default().with_format(LogFormat::Compact)).ok();

    let notifications = Arc::new(DemoNotifications::default());
    let config = CoreConfig::builder()
        .credentials(AccountCredentials::new("demo-account", "demo-policy-key"))
        .playlist_ref("featured-demo")
        .catalog_source(Arc::new(DemoCatalog))
        .offline_store(Arc::new(DemoStore))
        .notifications(Arc::clone(&notifications) as Arc<dyn OfflineNotifications>)
        .build()
        .expect("demo config is complete");

    let core = CoreService::new(config);
    core.start().await.expect("demo bridges accept subscriptions");

    for item in core.catalog() {
        let banner = match core.offline_status(&item.video_id) {
            Some(status) if status.is_complete() => "OFFLINE PLAYBACK".to_string(),
            Some(status) => format!("DOWNLOADING: {}%", status.progress_percent()),
            None => "streaming only".to_string(),
        };
        println!(
            "{} [{}] - {} ({})",
            item.name,
            item.duration_display(),
            banner,
            item.video_id
        );
    }

    // v1 has a complete local copy, v2 streams by raw id.
    let source = core.resolve_playback_by_id(&VideoId::new("v1")).unwrap();
    println!("v1 plays from: {:?}", source);
    let source = core.resolve_playback_by_id(&VideoId::new("v2")).unwrap();
    println!("v2 plays from: {:?}", source);

    // A progress event arriving from the subsystem flips v2 to offline.
    let push = notifications.callback.lock().unwrap().clone().unwrap();
    push(vec![
        OfflineStatus::new(VideoId::new("v1"), 1.0, Some(VideoToken::new("token-v1"))),
        OfflineStatus::new(VideoId::new("v2"), 1.0, Some(VideoToken::new("token-v2"))),
    ]);
    let source = core.resolve_playback_by_id(&VideoId::new("v2")).unwrap();
    println!("v2 now plays from: {:?}", source);

    core.shutdown();
}
