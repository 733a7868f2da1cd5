//! # Remote Directory Client
//!
//! Typed HTTP client for a country/state/city directory service.
//!
//! | Method | Path (relative to base URL) | Scope |
//! |--------|-----------------------------|-------|
//! | GET | `/countries` | [`ParentKey::Root`] |
//! | GET | `/countries/{country}/states` | [`ParentKey::Country`] |
//! | GET | `/countries/{country}/states/{state}/cities` | [`ParentKey::State`] |
//!
//! Every request carries the static API key in the configured header.
//! Successful responses are memoised per scope for the life of the client;
//! failures are not, so re-selecting a parent retries the lookup.
//! There is no retry loop: a failure is logged once and the caller sees an
//! empty list.

use std::time::Duration;

use async_trait::async_trait;
use intake_core::{ParentKey, Region};
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use url::Url;

use crate::config::{ConfigError, RemoteDirectoryConfig};
use crate::error::DirectoryError;
use crate::provider::DirectoryProvider;
use crate::snapshot::DirectorySnapshot;

/// Client for the remote directory service.
#[derive(Debug)]
pub struct RemoteDirectory {
    http: reqwest::Client,
    base_url: Url,
    cache: Mutex<DirectorySnapshot>,
}

impl RemoteDirectory {
    /// Create a new client from configuration.
    pub fn new(config: RemoteDirectoryConfig) -> Result<Self, DirectoryError> {
        let header_name = HeaderName::from_bytes(config.api_key_header.as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(config.api_key_header.clone()))?;
        let mut header_value = HeaderValue::from_str(config.api_key.as_str())
            .map_err(|_| ConfigError::InvalidHeader("API key contains invalid characters".into()))?;
        header_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header_name, header_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| DirectoryError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            cache: Mutex::new(DirectorySnapshot::new()),
        })
    }

    /// Calls `GET {base_url}/countries`.
    pub async fn try_list_countries(&self) -> Result<Vec<Region>, DirectoryError> {
        self.try_list(&ParentKey::Root).await
    }

    /// Calls `GET {base_url}/countries/{country}/states`.
    pub async fn try_list_states(&self, country: &str) -> Result<Vec<Region>, DirectoryError> {
        self.try_list(&ParentKey::country(country)).await
    }

    /// Calls `GET {base_url}/countries/{country}/states/{state}/cities`.
    pub async fn try_list_cities(
        &self,
        country: &str,
        state: &str,
    ) -> Result<Vec<Region>, DirectoryError> {
        self.try_list(&ParentKey::state(country, state)).await
    }

    /// Fetch the options under a scope, consulting the session cache first.
    ///
    /// Blank scopes resolve to an empty list without a request.
    pub async fn try_list(&self, parent: &ParentKey) -> Result<Vec<Region>, DirectoryError> {
        if parent.is_blank() {
            return Ok(Vec::new());
        }
        let cached = self.cache.lock().get(parent).map(<[Region]>::to_vec);
        if let Some(cached) = cached {
            return Ok(cached);
        }

        let url = self.endpoint_url(parent)?;
        let endpoint = format!("GET {}", url.path());
        tracing::debug!(%parent, %endpoint, "fetching region options");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| DirectoryError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(DirectoryError::Status {
                endpoint,
                status,
                body,
            });
        }

        let regions: Vec<Region> = resp
            .json()
            .await
            .map_err(|e| DirectoryError::Deserialization { endpoint, source: e })?;

        Ok(self.cache.lock().insert(parent.clone(), regions).to_vec())
    }

    /// Number of scopes answered from the session cache.
    pub fn cached_scopes(&self) -> usize {
        self.cache.lock().len()
    }

    fn endpoint_url(&self, parent: &ParentKey) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| DirectoryError::InvalidUrl {
                base: self.base_url.to_string(),
            })?;
            segments.pop_if_empty();
            match parent {
                ParentKey::Root => {
                    segments.push("countries");
                }
                ParentKey::Country { country } => {
                    segments.extend(["countries", country.as_str(), "states"]);
                }
                ParentKey::State { country, state } => {
                    segments.extend([
                        "countries",
                        country.as_str(),
                        "states",
                        state.as_str(),
                        "cities",
                    ]);
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl DirectoryProvider for RemoteDirectory {
    async fn list(&self, parent: &ParentKey) -> Vec<Region> {
        match self.try_list(parent).await {
            Ok(regions) => regions,
            Err(e) => {
                tracing::warn!(%parent, error = %e, "directory lookup failed, offering no options");
                Vec::new()
            }
        }
    }

    fn provider_name(&self) -> &str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> RemoteDirectory {
        let cfg = RemoteDirectoryConfig::new(Url::parse(base).unwrap(), "key");
        RemoteDirectory::new(cfg).unwrap()
    }

    #[test]
    fn endpoint_urls_follow_path_convention() {
        let dir = client("https://directory.example/v1");
        assert_eq!(
            dir.endpoint_url(&ParentKey::Root).unwrap().as_str(),
            "https://directory.example/v1/countries"
        );
        assert_eq!(
            dir.endpoint_url(&ParentKey::country("US")).unwrap().as_str(),
            "https://directory.example/v1/countries/US/states"
        );
        assert_eq!(
            dir.endpoint_url(&ParentKey::state("US", "NY")).unwrap().as_str(),
            "https://directory.example/v1/countries/US/states/NY/cities"
        );
    }

    #[test]
    fn trailing_slash_base_is_normalised() {
        let dir = client("https://directory.example/v1/");
        assert_eq!(
            dir.endpoint_url(&ParentKey::Root).unwrap().as_str(),
            "https://directory.example/v1/countries"
        );
    }

    #[test]
    fn codes_are_percent_encoded() {
        let dir = client("https://directory.example");
        let url = dir.endpoint_url(&ParentKey::state("US", "A/B")).unwrap();
        assert_eq!(url.path(), "/countries/US/states/A%2FB/cities");
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let cfg = RemoteDirectoryConfig::new(Url::parse("https://x.example").unwrap(), "key")
            .with_api_key_header("bad header");
        assert!(matches!(
            RemoteDirectory::new(cfg),
            Err(DirectoryError::Config(ConfigError::InvalidHeader(_)))
        ));
    }

    #[tokio::test]
    async fn blank_scope_makes_no_request() {
        // Port 1 is closed; a request would fail.
        let dir = client("http://127.0.0.1:1");
        assert!(dir.try_list(&ParentKey::country("")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_fails_closed() {
        let cfg = RemoteDirectoryConfig::new(Url::parse("http://127.0.0.1:1").unwrap(), "key")
            .with_timeout_secs(1);
        let dir = RemoteDirectory::new(cfg).unwrap();
        assert!(dir.try_list_countries().await.is_err());
        assert!(dir.list_countries().await.is_empty());
        assert_eq!(dir.cached_scopes(), 0);
    }
}
