//! # Identifier Newtypes
//!
//! Submitted records are identified by a [`RecordId`] so that a renderer
//! can key rows stably even when it re-sorts them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a new random record identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_distinct() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn display_is_prefixed() {
        let id = RecordId::new();
        assert_eq!(id.to_string(), format!("record:{}", id.as_uuid()));
    }
}
