//! # Local Directory
//!
//! Pure lookups into a fixed nested table. Unknown keys yield an empty
//! list, never an error. No I/O happens after construction.

use std::path::Path;

use async_trait::async_trait;
use intake_core::{ParentKey, Region};

use crate::error::DirectoryError;
use crate::provider::DirectoryProvider;
use crate::snapshot::DirectorySnapshot;

/// Static in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct LocalDirectory {
    snapshot: DirectorySnapshot,
}

impl LocalDirectory {
    pub fn new(snapshot: DirectorySnapshot) -> Self {
        Self { snapshot }
    }

    /// The built-in United States / Canada / India dataset.
    pub fn builtin() -> Self {
        Self::new(DirectorySnapshot::builtin())
    }

    /// Load a dataset file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| DirectoryError::Dataset {
            source_name: source_name.clone(),
            reason: format!("cannot read dataset: {e}"),
        })?;
        let snapshot = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DirectorySnapshot::from_json_str(&source_name, &raw)?,
            _ => DirectorySnapshot::from_yaml_str(&source_name, &raw)?,
        };
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &DirectorySnapshot {
        &self.snapshot
    }

    /// Synchronous lookup.
    pub fn lookup(&self, parent: &ParentKey) -> Vec<Region> {
        if parent.is_blank() {
            return Vec::new();
        }
        self.snapshot
            .get(parent)
            .map(<[Region]>::to_vec)
            .unwrap_or_default()
    }
}

#[async_trait]
impl DirectoryProvider for LocalDirectory {
    async fn list(&self, parent: &ParentKey) -> Vec<Region> {
        self.lookup(parent)
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}
