//! Serve command for running the surveys server
//!
//! Flags override the merged configuration file values.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use surveys_core::{InMemorySurveyStore, SqliteSurveyStore, SurveyStore};
use surveys_server::{AppState, ServerConfig, SurveyServer};
use tracing::{info, warn};

use crate::config::{ConfigLoader, StorageBackend, SurveysConfig};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Storage backend
    #[arg(long, value_enum)]
    pub storage: Option<StorageBackend>,

    /// SQLite database file (sqlite backend only)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Directory with the built front end
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Disable cross-origin requests
    #[arg(long)]
    pub no_cors: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of loaded config
    fn apply(&self, mut config: SurveysConfig) -> SurveysConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = dir.clone();
        }
        if self.no_cors {
            config.server.cors = false;
        }
        if let Some(backend) = self.storage {
            config.storage.backend = backend;
        }
        if let Some(path) = &self.db {
            config.storage.path = path.clone();
        }
        config
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = args.apply(ConfigLoader::load()?);

    let store = open_store(&config)?;
    let server_config = server_config(&config);

    info!(
        backend = ?config.storage.backend,
        "Starting surveys server on {}",
        server_config.addr()
    );

    let state = Arc::new(AppState::new(store));
    SurveyServer::with_state(server_config, state)
        .run()
        .await
        .map_err(Into::into)
}

fn open_store(config: &SurveysConfig) -> Result<Arc<dyn SurveyStore>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            let store = InMemorySurveyStore::seeded().context("seeding in-memory store")?;
            Ok(Arc::new(store))
        }
        StorageBackend::Sqlite => {
            let path = &config.storage.path;
            info!("Opening survey database at {}", path.display());
            let store = SqliteSurveyStore::open(path)
                .with_context(|| format!("opening database {}", path.display()))?;
            Ok(Arc::new(store))
        }
    }
}

fn server_config(config: &SurveysConfig) -> ServerConfig {
    let mut server = ServerConfig::new(config.server.host.clone(), config.server.port);
    server.cors = config.server.cors;

    let dir = &config.server.static_dir;
    if dir.is_dir() {
        server = server.with_static_dir(dir.clone());
    } else {
        warn!(
            "Static directory {} not found, serving API only",
            dir.display()
        );
    }
    server
}
