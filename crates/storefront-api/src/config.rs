//! # Client Configuration
//!
//! Configuration management for the REST client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_API_BASE_URL=https://shop.example.com/api               │
//! │     STOREFRONT_TIMEOUT_SECS=5                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.console/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080/api, 10 s timeout, X-User-ID header          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [server]
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 10
//!
//! [identity]
//! header = "X-User-ID"
//! file = "/var/lib/storefront/user_id"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Server Settings
// =============================================================================

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout (seconds). A timeout rejects the request like any
    /// other failure.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Identity Settings
// =============================================================================

/// How the client identifies itself to the server.
///
/// The cart endpoints resolve to a cart by this identity, so it must be
/// stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySettings {
    /// Request/response header carrying the identity token.
    #[serde(default = "default_identity_header")]
    pub header: String,

    /// File holding the persisted token. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_identity_header() -> String {
    "X-User-ID".to_string()
}

impl Default for IdentitySettings {
    fn default() -> Self {
        IdentitySettings {
            header: default_identity_header(),
            file: None,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub identity: IdentitySettings,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ApiError::Config(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ApiResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ApiError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::Config(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ApiError::Config(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        let url = Url::parse(&self.server.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.server.base_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                self.server.base_url
            )));
        }

        if self.server.timeout_secs == 0 {
            return Err(ApiError::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.identity.header.trim().is_empty() {
            return Err(ApiError::Config("identity header must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("STOREFRONT_API_BASE_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.server.base_url = url;
        }

        if let Some(timeout) = lookup("STOREFRONT_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(t) => self.server.timeout_secs = t,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric STOREFRONT_TIMEOUT_SECS"),
            }
        }

        if let Some(header) = lookup("STOREFRONT_IDENTITY_HEADER") {
            self.identity.header = header;
        }

        if let Some(file) = lookup("STOREFRONT_IDENTITY_FILE") {
            self.identity.file = Some(PathBuf::from(file));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "console")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    /// Returns the identity file, falling back to the platform data dir.
    pub fn identity_file(&self) -> Option<PathBuf> {
        self.identity.file.clone().or_else(|| {
            directories::ProjectDirs::from("com", "storefront", "console")
                .map(|dirs| dirs.data_dir().join("user_id"))
        })
    }
}
