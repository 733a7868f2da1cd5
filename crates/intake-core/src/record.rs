//! # Submitted Records
//!
//! A [`SubmittedRecord`] is a validated [`FormState`] frozen at the moment
//! of submission. Region fields keep their codes; the display names that
//! were on screen at submission time are captured alongside so the table
//! can render them without another directory lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::form::{FormField, FormState};
use crate::identity::RecordId;
use crate::region::RegionKind;

/// Display names of the selected regions at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionNames {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl RegionNames {
    pub fn get(&self, kind: RegionKind) -> Option<&str> {
        match kind {
            RegionKind::Country => self.country.as_deref(),
            RegionKind::State => self.state.as_deref(),
            RegionKind::City => self.city.as_deref(),
        }
    }

    pub fn set(&mut self, kind: RegionKind, name: Option<String>) {
        match kind {
            RegionKind::Country => self.country = name,
            RegionKind::State => self.state = name,
            RegionKind::City => self.city = name,
        }
    }
}

/// An immutable, validated form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRecord {
    id: RecordId,
    submitted_at: DateTime<Utc>,
    values: FormState,
    region_names: RegionNames,
}

impl SubmittedRecord {
    /// Freeze validated values into a record.
    ///
    /// Callers are expected to have validated `values`; the accumulator is
    /// the only producer in this workspace.
    pub fn new(values: FormState, region_names: RegionNames) -> Self {
        Self {
            id: RecordId::new(),
            submitted_at: Utc::now(),
            values,
            region_names,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn values(&self) -> &FormState {
        &self.values
    }

    pub fn get(&self, field: FormField) -> &str {
        self.values.get(field)
    }

    pub fn region_names(&self) -> &RegionNames {
        &self.region_names
    }

    /// Text shown for a field in the table: display names for region
    /// fields (falling back to the code), raw values otherwise.
    pub fn display_value(&self, field: FormField) -> &str {
        field
            .region_kind()
            .and_then(|kind| self.region_names.get(kind))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.values.get(field))
    }
}
