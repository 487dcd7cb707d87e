//! Application configuration.
//!
//! Built once at startup and handed to whatever needs it. Values come from an
//! optional TOML file; the binary layers command-line flags on top.
//!
//! ```toml
//! [database]
//! path = "chorechart.db"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3030
//!
//! [tally]
//! days = 7
//! boundary = "inclusive"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::tally::{TallyWindow, MAX_DAYS};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub tally: TallyWindow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("chorechart.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file. The file must exist.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&source).map_err(|e| match e {
            CoreError::Config(msg) => CoreError::Config(format!("{}: {}", path.display(), msg)),
            e => e,
        })
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> CoreResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.tally.days == 0 {
            return Err(CoreError::Config("tally.days must be at least 1".to_string()));
        }
        if self.tally.days > MAX_DAYS {
            return Err(CoreError::Config(format!(
                "tally.days must be at most {}, got {}",
                MAX_DAYS, self.tally.days
            )));
        }
        Ok(())
    }
}
