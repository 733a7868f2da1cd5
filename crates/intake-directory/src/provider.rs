//! # Directory Provider Interface
//!
//! [`DirectoryProvider`] is the three-operation contract the selection
//! controller depends on. [`Directory`] is the construction-time choice
//! between the local and remote implementations.

use std::sync::Arc;

use async_trait::async_trait;
use intake_core::{ParentKey, Region};

use crate::config::{DirectoryConfig, DirectorySource};
use crate::error::DirectoryError;
use crate::local::LocalDirectory;
use crate::remote::RemoteDirectory;

/// Source of region option lists.
///
/// Implementations only provide [`list`](DirectoryProvider::list); the
/// per-level methods build the parent scope and short-circuit blank codes.
/// No method returns an error: unknown scopes and failed lookups both
/// resolve to an empty list.
///
/// Implementations must be `Send + Sync` so one provider can be shared via
/// `Arc` between a form session and whatever drives its lookups.
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    /// Options under a parent scope, in directory order.
    async fn list(&self, parent: &ParentKey) -> Vec<Region>;

    /// Human-readable name of the implementation, for logs.
    fn provider_name(&self) -> &str;

    async fn list_countries(&self) -> Vec<Region> {
        self.list(&ParentKey::Root).await
    }

    /// States of a country; empty if the code is unknown or blank.
    async fn list_states(&self, country: &str) -> Vec<Region> {
        let parent = ParentKey::country(country);
        if parent.is_blank() {
            return Vec::new();
        }
        self.list(&parent).await
    }

    /// Cities of a state; empty if either code is unknown or blank.
    async fn list_cities(&self, country: &str, state: &str) -> Vec<Region> {
        let parent = ParentKey::state(country, state);
        if parent.is_blank() {
            return Vec::new();
        }
        self.list(&parent).await
    }
}

#[async_trait]
impl<P: DirectoryProvider + ?Sized> DirectoryProvider for Arc<P> {
    async fn list(&self, parent: &ParentKey) -> Vec<Region> {
        (**self).list(parent).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

/// The configured provider.
#[derive(Debug)]
pub enum Directory {
    Local(LocalDirectory),
    Remote(RemoteDirectory),
}

impl Directory {
    /// Build the provider selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Dataset` if a local dataset file cannot be
    /// loaded, or a configuration error if the remote client cannot be built.
    pub fn from_config(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        match &config.source {
            DirectorySource::Local { dataset: None } => Ok(Self::Local(LocalDirectory::builtin())),
            DirectorySource::Local {
                dataset: Some(path),
            } => Ok(Self::Local(LocalDirectory::from_path(path)?)),
            DirectorySource::Remote(remote) => Ok(Self::Remote(RemoteDirectory::new(remote.clone())?)),
        }
    }
}

#[async_trait]
impl DirectoryProvider for Directory {
    async fn list(&self, parent: &ParentKey) -> Vec<Region> {
        match self {
            Self::Local(local) => local.list(parent).await,
            Self::Remote(remote) => remote.list(parent).await,
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            Self::Local(local) => local.provider_name(),
            Self::Remote(remote) => remote.provider_name(),
        }
    }
}
