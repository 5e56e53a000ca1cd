//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p snapshelf-api`.
//! Every app runs over the in-memory store, so no cloud account is needed.

#![allow(dead_code)]

pub mod failing;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use snapshelf_api::constants;
use snapshelf_api::setup::routes;
use snapshelf_api::state::AppState;
use snapshelf_core::Config;
use snapshelf_storage::{MemoryStore, ObjectStore};
use std::collections::HashMap;
use std::sync::Arc;

pub const TEST_BASE_URL: &str = "http://localhost:8000/uploads";
pub const TEN_MIB: usize = 10 * 1024 * 1024;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus a typed handle on the backing store.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("STORAGE_BACKEND", "memory"),
        ("MEMORY_STORAGE_BASE_URL", TEST_BASE_URL),
        ("AZURE_STORAGE_CONTAINER", "uploads"),
    ]);
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("Failed to build test config")
}

fn build_server(store: Arc<dyn ObjectStore>) -> TestServer {
    let config = create_test_config();
    let state = Arc::new(AppState::new(config.clone(), store));
    let app = routes::setup_routes(&config, state).expect("Failed to build router");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// Setup test app over an empty in-memory container.
pub fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new("uploads", TEST_BASE_URL));
    let server = build_server(store.clone());
    TestApp { server, store }
}

/// Setup test app whose store fails every operation.
pub fn setup_failing_app() -> TestServer {
    build_server(Arc::new(failing::FailingStore))
}

/// Form with a single `file` part.
pub fn file_form(filename: &str, mime: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(data).file_name(filename).mime_type(mime);
    MultipartForm::new().add_part("file", part)
}

/// True when `name` looks like `YYYYMMDDTHHMMSS-{suffix}`.
pub fn is_timestamped(name: &str, suffix: &str) -> bool {
    let bytes = name.as_bytes();
    name.len() == 16 + suffix.len()
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[8] == b'T'
        && bytes[9..15].iter().all(u8::is_ascii_digit)
        && bytes[15] == b'-'
        && name.ends_with(suffix)
}
