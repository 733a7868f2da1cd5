//! Directory provider configuration.
//!
//! Chooses between the local table and the remote service. Defaults to the
//! built-in local dataset. Override via environment variables or explicit
//! construction for staging/testing.

use std::path::PathBuf;

use url::Url;
use zeroize::Zeroizing;

/// Default base URL of the remote directory service.
pub const DEFAULT_BASE_URL: &str = "https://api.countrystatecity.in/v1";

/// Default header carrying the API key.
pub const DEFAULT_API_KEY_HEADER: &str = "X-CSCAPI-KEY";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which provider to build.
#[derive(Debug, Clone)]
pub enum DirectorySource {
    /// Static nested table. `None` selects the built-in dataset.
    Local { dataset: Option<PathBuf> },
    /// Remote directory service.
    Remote(RemoteDirectoryConfig),
}

/// Top-level directory configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub source: DirectorySource,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::local()
    }
}

impl DirectoryConfig {
    /// The built-in local dataset.
    pub fn local() -> Self {
        Self {
            source: DirectorySource::Local { dataset: None },
        }
    }

    /// A local dataset loaded from a JSON or YAML file.
    pub fn local_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: DirectorySource::Local {
                dataset: Some(path.into()),
            },
        }
    }

    pub fn remote(config: RemoteDirectoryConfig) -> Self {
        Self {
            source: DirectorySource::Remote(config),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `INTAKE_DIRECTORY_SOURCE`: `local` (default) or `remote`
    /// - `INTAKE_DIRECTORY_FILE`: dataset file for the local source
    /// - `INTAKE_DIRECTORY_URL` (default: `https://api.countrystatecity.in/v1`)
    /// - `INTAKE_DIRECTORY_API_KEY` (required for `remote`)
    /// - `INTAKE_DIRECTORY_API_KEY_HEADER` (default: `X-CSCAPI-KEY`)
    /// - `INTAKE_DIRECTORY_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let source = std::env::var("INTAKE_DIRECTORY_SOURCE").unwrap_or_else(|_| "local".into());
        match source.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(match std::env::var("INTAKE_DIRECTORY_FILE") {
                Ok(path) if !path.trim().is_empty() => Self::local_file(path),
                _ => Self::local(),
            }),
            "remote" => Ok(Self::remote(RemoteDirectoryConfig::from_env()?)),
            other => Err(ConfigError::UnknownSource(other.to_string())),
        }
    }
}

/// Configuration for the remote directory service.
///
/// Custom `Debug` implementation redacts the `api_key` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct RemoteDirectoryConfig {
    /// Base URL; the `/countries/...` paths are appended to it.
    pub base_url: Url,
    /// Static API key sent with every request.
    pub api_key: Zeroizing<String>,
    /// Name of the header carrying `api_key`.
    pub api_key_header: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for RemoteDirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteDirectoryConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("api_key_header", &self.api_key_header)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RemoteDirectoryConfig {
    /// Create a configuration with the default header and timeout.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: Zeroizing::new(api_key.into()),
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = header.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load the remote configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("INTAKE_DIRECTORY_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            base_url: env_url("INTAKE_DIRECTORY_URL", DEFAULT_BASE_URL)?,
            api_key: Zeroizing::new(api_key),
            api_key_header: std::env::var("INTAKE_DIRECTORY_API_KEY_HEADER")
                .unwrap_or_else(|_| DEFAULT_API_KEY_HEADER.to_string()),
            timeout_secs: std::env::var("INTAKE_DIRECTORY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed.
    pub fn local_mock(port: u16, api_key: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&format!("http://127.0.0.1:{port}"))
            .map_err(|e| ConfigError::InvalidUrl("localhost".to_string(), e.to_string()))?;
        Ok(Self::new(base_url, api_key).with_timeout_secs(5))
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("INTAKE_DIRECTORY_API_KEY environment variable is required for the remote directory")]
    MissingApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid API key header: {0}")]
    InvalidHeader(String),
    #[error("unknown directory source {0:?} (expected \"local\" or \"remote\")")]
    UnknownSource(String),
}
