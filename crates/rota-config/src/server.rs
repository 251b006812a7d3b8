//! HTTP server configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5000
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

/// 32 MiB.
const fn default_max_upload_bytes() -> u64 {
    32 * 1024 * 1024
}

const fn default_open_browser() -> bool {
    true
}

const fn default_browser_delay_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory uploaded rosters are saved into.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Largest accepted `/analyze` request body.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Open the default browser at the server URL after startup.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,

    /// Delay before opening the browser, in milliseconds.
    #[serde(default = "default_browser_delay_ms")]
    pub browser_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            uploads_dir: default_uploads_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            open_browser: default_open_browser(),
            browser_delay_ms: default_browser_delay_ms(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Browser-facing URL of the index page.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid("server.host", "must not be empty"));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::invalid(
                "server.max_upload_bytes",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
