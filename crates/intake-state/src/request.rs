//! Tagged option-list requests.

use intake_core::{ParentKey, Region, RegionKind};
use intake_directory::DirectoryProvider;
use serde::{Deserialize, Serialize};

/// A pending lookup of the options under one parent scope.
///
/// The parent key is the tag used to decide, on resolution, whether the
/// response still applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionsRequest {
    parent: ParentKey,
}

impl OptionsRequest {
    pub fn new(parent: ParentKey) -> Self {
        Self { parent }
    }

    pub fn parent(&self) -> &ParentKey {
        &self.parent
    }

    /// The select whose options this request fills.
    pub fn kind(&self) -> RegionKind {
        self.parent.child_kind()
    }

    /// Resolve the request against a provider. Never fails; an unknown or
    /// unreachable scope yields an empty list.
    pub async fn fetch<P>(&self, provider: &P) -> Vec<Region>
    where
        P: DirectoryProvider + ?Sized,
    {
        provider.list(&self.parent).await
    }
}

impl std::fmt::Display for OptionsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} options under {}", self.kind(), self.parent)
    }
}
