//! Configuration loading and data source prefix resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable carrying the data source path prefix
pub const PREFIX_ENV_VAR: &str = "FILE_SOURCE_PREFIX";

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "album-battle";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5730;

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Optional TOML configuration file contents
///
/// Every key is optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    /// Prefix prepended to the three CSV file names
    pub file_source_prefix: Option<String>,
    /// HTTP port
    pub port: Option<u16>,
    /// HTTP bind address
    pub bind: Option<String>,
}

impl TomlConfig {
    /// Parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the explicit path, else the platform default path, else defaults
    ///
    /// A missing or malformed file is never fatal: it logs a warning and
    /// yields an empty config.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No config file found, using defaults");
                    return Self::default();
                }
            },
        };

        match Self::load(&path) {
            Ok(config) => {
                debug!("Loaded config file {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Platform config file location: `<config dir>/album-battle/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Data source prefix resolution, highest priority first:
/// 1. Environment variable
/// 2. TOML config file
/// 3. Empty string (current directory)
pub fn resolve_source_prefix(env_var_name: &str, config: &TomlConfig) -> String {
    if let Ok(prefix) = std::env::var(env_var_name) {
        return prefix;
    }

    if let Some(prefix) = &config.file_source_prefix {
        return prefix.clone();
    }

    String::new()
}
