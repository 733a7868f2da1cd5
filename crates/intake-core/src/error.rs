//! # Error Types
//!
//! [`IntakeError`] covers malformed input to the core types.
//! [`ValidationErrors`] is the per-field message set the presentation
//! layer renders inline. It implements `Error` so a rejected submit can be
//! propagated with `?` by callers that treat it as a failure.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::FormField;

/// Top-level error type for the intake core.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// A field name that is not on the form.
    #[error("unknown form field: {0:?}")]
    UnknownField(String),
}

/// Per-field validation messages. Empty means the form is submittable.
///
/// Entries iterate in form display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: BTreeMap<FormField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    /// Record a message for a field. The first message for a field wins.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.entries.entry(field).or_insert_with(|| message.into());
    }

    /// Replace the message for a field, or clear it with `None`.
    pub fn set(&mut self, field: FormField, message: Option<String>) {
        match message {
            Some(m) => {
                self.entries.insert(field, m);
            }
            None => {
                self.entries.remove(&field);
            }
        }
    }

    pub fn remove(&mut self, field: FormField) -> Option<String> {
        self.entries.remove(&field)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> + '_ {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<(FormField, String)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (FormField, String)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}
