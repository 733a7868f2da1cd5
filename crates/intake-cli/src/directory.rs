//! # Directory Selection
//!
//! Global flags choosing the region directory. Each flag falls back to the
//! matching `INTAKE_DIRECTORY_*` environment variable.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use intake_directory::config::{DEFAULT_API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use intake_directory::{ConfigError, Directory, DirectoryConfig, RemoteDirectoryConfig};
use url::Url;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// Static in-memory dataset.
    #[default]
    Local,
    /// Directory service over HTTP.
    Remote,
}

/// Arguments selecting and configuring the directory provider.
#[derive(Args, Debug, Clone, Default)]
pub struct DirectoryArgs {
    /// Directory source.
    #[arg(long, global = true, value_enum, env = "INTAKE_DIRECTORY_SOURCE")]
    pub source: Option<SourceKind>,

    /// JSON or YAML dataset for the local source (default: built-in).
    #[arg(long, global = true, env = "INTAKE_DIRECTORY_FILE")]
    pub dataset: Option<PathBuf>,

    /// Base URL of the directory service.
    #[arg(long, global = true, env = "INTAKE_DIRECTORY_URL")]
    pub url: Option<String>,

    /// API key for the directory service.
    #[arg(long, global = true, env = "INTAKE_DIRECTORY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Header carrying the API key.
    #[arg(long, global = true, env = "INTAKE_DIRECTORY_API_KEY_HEADER")]
    pub api_key_header: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "INTAKE_DIRECTORY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl DirectoryArgs {
    /// Resolve the flags into a directory configuration.
    pub fn to_config(&self) -> Result<DirectoryConfig, ConfigError> {
        match self.source.unwrap_or_default() {
            SourceKind::Local => Ok(match &self.dataset {
                Some(path) => DirectoryConfig::local_file(path.clone()),
                None => DirectoryConfig::local(),
            }),
            SourceKind::Remote => {
                let raw_url = self.url.as_deref().unwrap_or(DEFAULT_BASE_URL);
                let base_url = Url::parse(raw_url)
                    .map_err(|e| ConfigError::InvalidUrl("--url".to_string(), e.to_string()))?;
                let api_key = self
                    .api_key
                    .as_deref()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or(ConfigError::MissingApiKey)?;
                let remote = RemoteDirectoryConfig::new(base_url, api_key)
                    .with_api_key_header(
                        self.api_key_header
                            .as_deref()
                            .unwrap_or(DEFAULT_API_KEY_HEADER),
                    )
                    .with_timeout_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
                Ok(DirectoryConfig::remote(remote))
            }
        }
    }

    /// Build the configured provider.
    pub fn build(&self) -> anyhow::Result<Directory> {
        let config = self.to_config()?;
        let directory = Directory::from_config(&config)?;
        tracing::debug!(source = ?self.source.unwrap_or_default(), "directory ready");
        Ok(directory)
    }
}
