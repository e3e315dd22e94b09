//! Client configuration.
//!
//! Configuration is read from a YAML file (by default `secdesk.yaml` in the
//! working directory) and includes:
//! - Base URL of the admin console and the search/update endpoint paths
//! - Page size used for the range summary
//! - HTTP timeouts
//! - Optional session cookie and CSRF token forwarded with each request

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SecdeskError};
use crate::render::DEFAULT_PAGE_SIZE;

pub const DEFAULT_CONFIG_FILE: &str = "secdesk.yaml";

/// Main configuration structure
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root of the admin console, e.g. `https://admin.example.org/site/main/`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Search endpoint, relative to `base_url`
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// Batch update endpoint, relative to `base_url`
    #[serde(default = "default_update_path")]
    pub update_path: String,

    /// Rows per page assumed by the range summary (default: 20)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Total request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8000/".to_string()
}

fn default_search_path() -> String {
    "security/search/".to_string()
}

fn default_update_path() -> String {
    "security/update/".to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            update_path: default_update_path(),
            page_size: default_page_size(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            session_cookie: None,
            csrf_token: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("search_path", &self.search_path)
            .field("update_path", &self.update_path)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("session_cookie", &redact(&self.session_cookie))
            .field("csrf_token", &redact(&self.csrf_token))
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SecdeskError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_yaml_ng::from_str(&content).map_err(|source| SecdeskError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the given file, or `secdesk.yaml` if it exists, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            tracing::debug!("loading configuration from {}", fallback.display());
            return Self::load(&fallback);
        }

        Ok(Config::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SecdeskError::Config(
                "page_size must be greater than zero".to_string(),
            ));
        }
        self.search_url()?;
        self.update_url()?;
        Ok(())
    }

    pub fn search_url(&self) -> Result<Url> {
        Ok(self.base()?.join(&self.search_path)?)
    }

    pub fn update_url(&self) -> Result<Url> {
        Ok(self.base()?.join(&self.update_path)?)
    }

    /// Base URL with a trailing slash so relative joins append instead of
    /// replacing the last path segment.
    fn base(&self) -> Result<Url> {
        let mut base = self.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let url = Url::parse(&base)?;
        if url.cannot_be_a_base() {
            return Err(SecdeskError::Config(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }
        Ok(url)
    }
}
