//! When incremental validation runs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trigger for per-field validation before and after the first submit.
///
/// Whatever the mode, once a submit has failed every changed field is
/// re-validated on change so errors clear as soon as they are fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Only the exhaustive pass at submit time.
    OnSubmit,
    OnBlur,
    OnChange,
    /// On the first blur of a field, then on every change to it.
    #[default]
    OnTouched,
    /// On blur and on change.
    All,
}

impl ValidationMode {
    pub fn all() -> &'static [ValidationMode] {
        &[
            Self::OnSubmit,
            Self::OnBlur,
            Self::OnChange,
            Self::OnTouched,
            Self::All,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnSubmit => "on_submit",
            Self::OnBlur => "on_blur",
            Self::OnChange => "on_change",
            Self::OnTouched => "on_touched",
            Self::All => "all",
        }
    }

    pub fn validates_on_change(&self, touched: bool, submit_failed: bool) -> bool {
        if submit_failed {
            return true;
        }
        match self {
            Self::OnChange | Self::All => true,
            Self::OnTouched => touched,
            Self::OnSubmit | Self::OnBlur => false,
        }
    }

    pub fn validates_on_blur(&self) -> bool {
        matches!(self, Self::OnBlur | Self::OnTouched | Self::All)
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown validation mode: {s:?}"))
    }
}
