//! Shared test utilities for surveys-server integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use surveys_core::{InMemorySurveyStore, SqliteSurveyStore, SurveyStore};
use surveys_server::{AppState, ServerConfig, SurveyServer};
use tokio::net::TcpListener;

/// Creates a test server over a seeded in-memory store
#[allow(dead_code)]
pub async fn create_test_server() -> (Arc<AppState>, SocketAddr) {
    let store: Arc<dyn SurveyStore> = Arc::new(InMemorySurveyStore::seeded().unwrap());
    create_test_server_with_store(store, ServerConfig::default()).await
}

/// Creates a test server over a SQLite database file
#[allow(dead_code)]
pub async fn create_sqlite_test_server(
    path: &std::path::Path,
) -> (Arc<AppState>, SocketAddr) {
    let store: Arc<dyn SurveyStore> = Arc::new(SqliteSurveyStore::open(path).unwrap());
    create_test_server_with_store(store, ServerConfig::default()).await
}

/// Creates a test server with custom store and config
#[allow(dead_code)]
pub async fn create_test_server_with_store(
    store: Arc<dyn SurveyStore>,
    config: ServerConfig,
) -> (Arc<AppState>, SocketAddr) {
    let state = Arc::new(AppState::new(store));
    let server = SurveyServer::with_state(config, Arc::clone(&state));
    let addr = spawn_server(server).await;

    (state, addr)
}

/// Spawns server in background task, returns bound address
async fn spawn_server(server: SurveyServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}

/// Builds an absolute URL for an API path
#[allow(dead_code)]
pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}{}", addr, path)
}

/// HTTP client that talks to the loopback server directly
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
