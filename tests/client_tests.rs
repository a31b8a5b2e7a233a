use std::sync::Arc;

use bytes::Bytes;
use recording_manager::api::create_router;
use recording_manager::blob_store::LocalStore;
use recording_manager::client::{ClientError, RecordingsClient};
use recording_manager::config::{Config, Environment, HttpConfig, ServerConfig, StorageConfig};
use recording_manager::storage::Database;
use recording_manager::AppState;

fn test_state(dir: &tempfile::TempDir) -> Arc<AppState> {
    let data_dir = dir.path().join("data");
    let uploads_dir = dir.path().join("uploads");

    let config = Config {
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            data_dir: data_dir.to_string_lossy().to_string(),
        },
        http: HttpConfig {
            environment: Environment::Development,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        storage: StorageConfig {
            root: uploads_dir.to_string_lossy().to_string(),
        },
        max_upload_size: 10 * 1024 * 1024,
    };

    let db = Database::open(&data_dir).expect("Failed to open test database");
    let blob_store = LocalStore::new(&uploads_dir).expect("Failed to create test blob store");

    Arc::new(AppState {
        config,
        db,
        blob_store: Arc::new(blob_store),
    })
}

/// Serve the API on an ephemeral port and return its base URL.
async fn spawn_server(state: Arc<AppState>) -> String {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_client_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = spawn_server(test_state(&dir)).await;
    let client = RecordingsClient::new(base_url);

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");

    assert!(client.list().await.unwrap().is_empty());

    let payload = Bytes::from_static(b"captured screen bytes");
    let receipt = client
        .upload("my-capture.webm", "video/webm", payload.clone())
        .await
        .unwrap();
    assert_eq!(receipt.id, 1);
    assert_eq!(receipt.message, "Upload successful");

    let recordings = client.list().await.unwrap();
    assert_eq!(recordings.len(), 1);
    assert_eq!(recordings[0].filesize, payload.len() as u64);

    let fetched = client.fetch(receipt.id).await.unwrap();
    assert_eq!(fetched, payload);
}

#[tokio::test]
async fn test_client_fetch_unknown_id() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = spawn_server(test_state(&dir)).await;
    let client = RecordingsClient::new(base_url);

    let err = client.fetch(404).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Recording not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_upload_rejected_type() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = spawn_server(test_state(&dir)).await;
    let client = RecordingsClient::new(base_url);

    let err = client
        .upload("notes.txt", "text/plain", Bytes::from_static(b"plain text"))
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Only video files allowed");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
