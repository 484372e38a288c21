//! Test helpers: build AppState and router for integration tests.
//!
//! The router runs against the in-memory repository and local storage in a
//! temp dir, so no Postgres or bucket is needed.

#![allow(dead_code)]

pub mod fixtures;
pub mod storage;

use std::path::Path;
use std::sync::Arc;

use axum_test::TestServer;
use gambar_api::setup::routes;
use gambar_api::views::RegisteredView;
use gambar_api::AppState;
use gambar_core::models::Photographer;
use gambar_core::Config;
use gambar_db::InMemoryPhotographerRepository;
use gambar_storage::{LocalStorage, Storage};
use tempfile::TempDir;

pub const IMAGE_BASE_URL: &str = "http://localhost:8080/images";

/// Test application: server plus handles on its backing stores.
pub struct TestApp {
    pub server: TestServer,
    pub repository: InMemoryPhotographerRepository,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of objects currently in the image directory.
    pub fn stored_objects(&self) -> usize {
        count_files(self.storage_dir.path())
    }

    /// Register a listing and return what the confirmation page shows.
    pub async fn register(&self, form: &[(&str, &str)]) -> RegisteredView {
        let response = self.server.post("/join").form(&form).await;
        assert_eq!(response.status_code(), 201, "{}", response.text());
        response.json::<RegisteredView>()
    }

    pub async fn profile(&self, id: i64) -> Photographer {
        let response = self.server.get(&format!("/photographer/{}", id)).await;
        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        serde_json::from_value(body["photographer"].clone()).unwrap()
    }
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

pub fn test_config(storage_dir: &Path) -> Config {
    let vars = [
        ("DATABASE_URL", "postgresql://localhost/gambar_test".to_string()),
        ("STORAGE_BACKEND", "local".to_string()),
        ("LOCAL_STORAGE_PATH", storage_dir.display().to_string()),
        ("LOCAL_STORAGE_BASE_URL", IMAGE_BASE_URL.to_string()),
        ("MAX_UPLOAD_SIZE_MB", "1".to_string()),
    ];
    Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config")
}

/// Setup test app with an empty in-memory repository and local storage.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|storage| storage).await
}

/// Like `setup_test_app`, but lets the caller wrap the local storage.
pub async fn setup_test_app_with<F>(wrap: F) -> TestApp
where
    F: FnOnce(Arc<dyn Storage>) -> Arc<dyn Storage>,
{
    let storage_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(storage_dir.path());

    let local = LocalStorage::new(storage_dir.path(), IMAGE_BASE_URL.to_string())
        .await
        .expect("Failed to create local storage");
    let storage = wrap(Arc::new(local));

    let repository = InMemoryPhotographerRepository::new();
    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(repository.clone()),
        storage,
    ));

    let app = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        repository,
        storage_dir,
    }
}
