//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `BAZAAR_DATA_DIR` - Directory the store persists its JSON collections
//!   in (default: the platform data dir, e.g. `~/.local/share/bazaar`)
//! - `RUST_LOG` - Log filter for the `tracing` subscriber (default: `info`)

use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `BAZAAR_DATA_DIR` nor a platform data directory is available.
    #[error("No data directory: set BAZAAR_DATA_DIR")]
    NoDataDir,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the file backend keeps its `<key>.json` files.
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] when `BAZAAR_DATA_DIR` is unset
    /// and the platform provides no home directory to derive one from.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(dir) = std::env::var("BAZAAR_DATA_DIR") {
            if !dir.trim().is_empty() {
                return Ok(Self {
                    data_dir: PathBuf::from(dir),
                });
            }
        }
        ProjectDirs::from("", "Bazaar", "bazaar")
            .map(|dirs| Self {
                data_dir: dirs.data_dir().to_path_buf(),
            })
            .ok_or(ConfigError::NoDataDir)
    }
}
