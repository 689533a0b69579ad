//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own movies file.

use super::constants::*;
use movie_catalog_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use movie_catalog_server::{JsonFilePersistence, MovieStore, SeedData};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance backed by a JSON movies file
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// The JSON document the server persists into
    pub movies_file: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_dir: Option<TempDir>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server with an empty catalog persisted in a
    /// temporary directory
    pub async fn spawn() -> Self {
        Self::spawn_with_seed(SeedData::Empty).await
    }

    /// Spawns a new test server starting from `seed`
    pub async fn spawn_with_seed(seed: SeedData) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let movies_file = temp_dir.path().join("docs").join("movies.json");
        let mut server = Self::start(&movies_file, seed).await;
        server._temp_dir = Some(temp_dir);
        server
    }

    /// Spawns a server over an existing (or not yet existing) movies file.
    /// The caller owns the file and its directory.
    pub async fn spawn_with_movies_file(movies_file: &Path) -> Self {
        Self::start(movies_file, SeedData::Empty).await
    }

    /// # Panics
    ///
    /// Panics if port binding fails or the server doesn't become ready
    /// within timeout.
    async fn start(movies_file: &Path, seed: SeedData) -> Self {
        let movie_store = MovieStore::open(Box::new(JsonFilePersistence::new(movies_file)), seed);

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, Arc::new(Mutex::new(movie_store)));

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            movies_file: movies_file.to_path_buf(),
            _temp_dir: None,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Reads the persisted document back as raw JSON
    pub fn read_movies_file(&self) -> serde_json::Value {
        let content =
            std::fs::read_to_string(&self.movies_file).expect("Failed to read movies file");
        serde_json::from_str(&content).expect("Movies file is not valid JSON")
    }

    /// Waits for the server to become ready by polling the health endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client
                .get(format!("{}/api/health", self.base_url))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
