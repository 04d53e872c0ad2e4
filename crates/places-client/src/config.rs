//! Client configuration.
//!
//! Stored as TOML:
//!
//! ```toml
//! app_token = "abc123"
//! base_url = "https://data.cdc.gov/api/v3/views/"
//! timeout_secs = 30
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use places_ingest::{DEFAULT_BASE_URL, Endpoints};

use crate::error::ConfigError;

/// Connection settings for [`PlacesClient`](crate::PlacesClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Socrata application token sent as `X-App-Token`.
    pub app_token: String,

    /// API base URL.
    pub base_url: String,

    /// Request timeout in seconds. `None` keeps the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(app_token: impl Into<String>) -> Self {
        Self {
            app_token: app_token.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = Some(seconds);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.base_url.clone())
    }
}
