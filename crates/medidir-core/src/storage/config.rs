//! Configuration management
//!
//! Priority: CLI argument > environment variable > config.toml > built-in default.

use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PROFILE: &str = "default";

pub const ENV_API_URL: &str = "MEDIDIR_API_URL";
pub const ENV_PAGE_SIZE: &str = "MEDIDIR_PAGE_SIZE";

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Base URL of the directory REST API
    pub api_url: Option<String>,
    /// Rows per list page
    pub page_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
    /// Keychain profile used for the session token
    pub profile: Option<String>,
}

impl Config {
    /// Load configuration from file; a missing file yields defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to parse config file: {}", e),
        })
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("medidir").join("config.toml"))
    }

    /// Effective API base URL.
    pub fn api_url(&self, cli_override: Option<&str>) -> String {
        self.resolve_api_url(cli_override, env_non_empty(ENV_API_URL))
    }

    /// Effective page size. Unparseable environment values are ignored.
    pub fn page_size(&self, cli_override: Option<u32>) -> u32 {
        let env = env_non_empty(ENV_PAGE_SIZE).and_then(|v| match v.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                log::warn!("Ignoring {}={}: not a number", ENV_PAGE_SIZE, v);
                None
            }
        });
        self.resolve_page_size(cli_override, env)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    pub fn profile_name(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| self.profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }

    fn resolve_api_url(&self, cli_override: Option<&str>, env: Option<String>) -> String {
        cli_override
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or(env)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    fn resolve_page_size(&self, cli_override: Option<u32>, env: Option<u32>) -> u32 {
        cli_override
            .or(env)
            .or(self.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn set_api_url(&mut self, url: String) {
        self.api_url = Some(url);
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = Some(size);
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
