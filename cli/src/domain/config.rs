//! Domain types and validators for ravello-publish configuration.
//!
//! Pure functions only: no I/O, no filesystem access.

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Public Ravello REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://cloud.ravellosystems.com/api/v1";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.ravello/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RavelloConfig {
    /// REST API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_api_url")]
    pub url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// Pick the API base URL: an explicit override wins over the config file.
///
/// Trailing slashes are stripped so endpoint paths can be appended verbatim.
///
/// # Errors
///
/// Returns an error if the chosen URL is not an http(s) URL.
pub fn resolve_api_url(
    override_url: Option<&str>,
    config: &RavelloConfig,
) -> Result<String, ConfigError> {
    let url = override_url.unwrap_or(&config.api.url).trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(url.to_string()));
    }
    Ok(url.trim_end_matches('/').to_string())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
