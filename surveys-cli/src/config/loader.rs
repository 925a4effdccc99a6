use super::types::{
    DEFAULT_DB_PATH, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STATIC_DIR, RawServerConfig,
    RawStorageConfig, RawSurveysConfig, ServerConfig, StorageConfig, SurveysConfig,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<SurveysConfig> {
        let mut raw = RawSurveysConfig::default();

        // Layer 1: User config
        if let Some(user_path) = Self::user_config_path() {
            raw = Self::merge_raw(raw, Self::read_raw(&user_path)?);
        }

        // Layer 2: Project config
        raw = Self::merge_raw(raw, Self::read_raw(&Self::project_config_path())?);

        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "surveys").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with SURVEYS_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("SURVEYS_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".surveys/config.toml")
        }
    }

    /// Read one layer; a missing file is an empty layer
    fn read_raw(path: &Path) -> Result<RawSurveysConfig> {
        if !path.exists() {
            return Ok(RawSurveysConfig::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawSurveysConfig, overlay: RawSurveysConfig) -> RawSurveysConfig {
        RawSurveysConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
                static_dir: overlay.server.static_dir.or(base.server.static_dir),
                cors: overlay.server.cors.or(base.server.cors),
            },
            storage: RawStorageConfig {
                backend: overlay.storage.backend.or(base.storage.backend),
                path: overlay.storage.path.or(base.storage.path),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawSurveysConfig) -> SurveysConfig {
        SurveysConfig {
            server: ServerConfig {
                host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: raw.server.port.unwrap_or(DEFAULT_PORT),
                static_dir: raw
                    .server
                    .static_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
                cors: raw.server.cors.unwrap_or(true),
            },
            storage: StorageConfig {
                backend: raw.storage.backend.unwrap_or_default(),
                path: raw
                    .storage
                    .path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            },
        }
    }
}
