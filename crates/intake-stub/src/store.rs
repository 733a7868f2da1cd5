//! Shared state for the stub: the dataset being served, the expected API
//! key, and the header it is read from.

use std::sync::Arc;

use axum::http::HeaderName;
use intake_directory::LocalDirectory;

struct Inner {
    directory: LocalDirectory,
    api_key: Option<String>,
    api_key_header: HeaderName,
}

/// Cheaply cloneable via `Arc`; all clones serve the same dataset.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    /// `api_key: None` disables authentication.
    pub fn new(
        directory: LocalDirectory,
        api_key: Option<String>,
        api_key_header: HeaderName,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                directory,
                api_key: api_key.filter(|k| !k.is_empty()),
                api_key_header,
            }),
        }
    }

    pub fn directory(&self) -> &LocalDirectory {
        &self.inner.directory
    }

    pub fn api_key(&self) -> Option<&str> {
        self.inner.api_key.as_deref()
    }

    pub fn api_key_header(&self) -> &HeaderName {
        &self.inner.api_key_header
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("scopes", &self.inner.directory.snapshot().len())
            .field("auth", &self.inner.api_key.is_some())
            .field("api_key_header", &self.inner.api_key_header)
            .finish()
    }
}
