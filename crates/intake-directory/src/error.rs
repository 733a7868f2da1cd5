//! Directory lookup error types.

/// Errors from directory lookups and provider construction.
///
/// Provider trait methods never surface these; they are logged and
/// replaced with an empty option list.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Directory service returned a non-2xx status.
    #[error("directory service {endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The base URL cannot carry the lookup path.
    #[error("cannot build lookup URL from base {base}")]
    InvalidUrl { base: String },
    /// A local dataset could not be read or parsed.
    #[error("dataset error in {source_name}: {reason}")]
    Dataset { source_name: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
