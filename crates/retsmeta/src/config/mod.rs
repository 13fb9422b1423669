//! # Configuration
//!
//! Settings are managed by [`confique`] and resolved in priority order:
//!
//! 1. **Environment variables**: `RETSMETA_STRICT_PARSING`, `RETSMETA_FORMAT`, ...
//! 2. **Explicit file**: the `--config <file>` passed to the CLI. Must exist.
//! 3. **User config**: `retsmeta.toml` in the OS config directory (via `directories`).
//! 4. **Compiled defaults**.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `strict_parsing` | `false` | Signal grammar violations when loading metadata |
//! | `format` | `COMPACT` | Serialization mode code (`COMPACT`, `STANDARD-XML`) |
//! | `metadata_version` | `1.00.000` | Version stamped into section headers |
//! | `poll_interval_secs` | `60` | How often `watch` checks for changes |
//!
//! The [`monitor`] module watches a configuration source for changes.

mod dao;
pub mod monitor;

pub use dao::{ConfigDao, FileConfigDao};
pub use monitor::{CheckOutcome, ConfigChangeListener, ConfigChangedMonitor, PollingScheduler};

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{MetadataError, Result};
use crate::format::FormatMode;

pub const CONFIG_FILE_NAME: &str = "retsmeta.toml";

/// Configuration for retsmeta, stored in `retsmeta.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RetsMetaConfig {
    /// Fail on attribute values that violate their grammar
    #[config(default = false, env = "RETSMETA_STRICT_PARSING")]
    pub strict_parsing: bool,

    /// Serialization mode code: "COMPACT" or "STANDARD-XML"
    #[config(default = "COMPACT", env = "RETSMETA_FORMAT")]
    pub format: String,

    /// Version stamped into metadata headers
    #[config(default = "1.00.000", env = "RETSMETA_METADATA_VERSION")]
    pub metadata_version: String,

    /// Seconds between config change checks
    #[config(default = 60, env = "RETSMETA_POLL_INTERVAL_SECS")]
    pub poll_interval_secs: u64,
}

impl Default for RetsMetaConfig {
    fn default() -> Self {
        Self {
            strict_parsing: false,
            format: "COMPACT".to_string(),
            metadata_version: "1.00.000".to_string(),
            poll_interval_secs: 60,
        }
    }
}

impl RetsMetaConfig {
    /// Load from the environment, `explicit` (if given) and the user config file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(MetadataError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.file(path);
        }
        if let Some(path) = user_config_path() {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| MetadataError::Config(e.to_string()))
    }

    pub fn format_mode(&self) -> Result<FormatMode> {
        self.format.parse()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// `retsmeta.toml` in the OS config directory, if one can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "variman", "retsmeta").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
