//! CLI configuration module.
//!
//! Configuration is read from a TOML file, then environment variables
//! override individual fields.
//!
//! ## config.toml
//! ```toml
//! username = "admin"
//! password = "secret"
//! backend = "file"          # or "table"
//! data_path = "inventory.txt"
//! log_file = "stockroom.log"
//! ```
//!
//! ## Environment Overrides
//! | Variable              | Field       |
//! |-----------------------|-------------|
//! | `STOCKROOM_CONFIG`    | config path |
//! | `STOCKROOM_USERNAME`  | username    |
//! | `STOCKROOM_PASSWORD`  | password    |
//! | `STOCKROOM_BACKEND`   | backend     |
//! | `STOCKROOM_DATA_PATH` | data_path   |
//! | `STOCKROOM_LOG_FILE`  | log_file    |

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stockroom_db::BackendKind;

/// Config file used when neither `--config` nor `STOCKROOM_CONFIG` is set.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Store path for the file backend when `data_path` is unset.
pub const DEFAULT_FILE_STORE: &str = "inventory.txt";

/// Store path for the table backend when `data_path` is unset.
pub const DEFAULT_TABLE_STORE: &str = "shop.db";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Login name checked at startup
    pub username: String,

    /// Login password checked at startup
    pub password: String,

    /// Which record store to open
    pub backend: BackendKind,

    /// Store location; defaults depend on the backend
    pub data_path: Option<PathBuf>,

    /// Where tracing output goes
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            username: String::new(),
            password: String::new(),
            backend: BackendKind::default(),
            data_path: None,
            log_file: PathBuf::from("stockroom.log"),
        }
    }
}

impl AppConfig {
    /// Loads the config file, applies environment overrides and validates.
    ///
    /// `path` wins over `STOCKROOM_CONFIG`, which wins over
    /// [`DEFAULT_CONFIG_FILE`]. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => env::var("STOCKROOM_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads one TOML file. A missing file yields [`AppConfig::default`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
            Err(e) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Overrides fields from `lookup`, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = lookup("STOCKROOM_USERNAME") {
            self.username = username;
        }
        if let Some(password) = lookup("STOCKROOM_PASSWORD") {
            self.password = password;
        }
        if let Some(backend) = lookup("STOCKROOM_BACKEND") {
            self.backend = backend
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOCKROOM_BACKEND".to_string()))?;
        }
        if let Some(data_path) = lookup("STOCKROOM_DATA_PATH") {
            self.data_path = Some(PathBuf::from(data_path));
        }
        if let Some(log_file) = lookup("STOCKROOM_LOG_FILE") {
            self.log_file = PathBuf::from(log_file);
        }
        Ok(())
    }

    /// Rejects configurations nobody could log in with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::MissingRequired("username".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::MissingRequired("password".to_string()));
        }
        Ok(())
    }

    /// The store path, falling back to the backend's default file name.
    pub fn store_path(&self) -> PathBuf {
        match &self.data_path {
            Some(path) => path.clone(),
            None => match self.backend {
                BackendKind::File => PathBuf::from(DEFAULT_FILE_STORE),
                BackendKind::Table => PathBuf::from(DEFAULT_TABLE_STORE),
            },
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file: {0}")]
    Parse(String),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
