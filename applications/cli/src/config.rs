/// Application configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when `--config` is not given (optional)
pub const DEFAULT_CONFIG_FILE: &str = "encore.toml";

/// Default log filter when neither `RUST_LOG` nor `logging.filter` is set
pub const DEFAULT_LOG_FILTER: &str = "encore=info,encore_playback=info,encore_storage=info";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EncoreConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Track length reported by the headless engine
    #[serde(default = "default_simulated_track_secs")]
    pub simulated_track_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence
    #[serde(default)]
    pub filter: Option<String>,
}

impl EncoreConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given explicitly; otherwise `encore.toml` in the
    /// working directory is used if present. Environment variables prefixed
    /// `ENCORE_` override file values, with `__` between nested keys
    /// (e.g. `ENCORE_STORAGE__DATABASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ENCORE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(CliError::Config(
                "storage.database_url cannot be empty".to_string(),
            ));
        }

        if self.playback.simulated_track_secs == 0 {
            return Err(CliError::Config(
                "playback.simulated_track_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn track_length(&self) -> Duration {
        Duration::from_secs(self.playback.simulated_track_secs)
    }

    pub fn log_filter(&self) -> &str {
        self.logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

// Default values
fn default_database_url() -> String {
    "sqlite://./data/encore.db".to_string()
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./catalog.toml")
}

fn default_simulated_track_secs() -> u64 {
    180
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            simulated_track_secs: default_simulated_track_secs(),
        }
    }
}
