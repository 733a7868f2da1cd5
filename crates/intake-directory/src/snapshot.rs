//! # Directory Snapshot
//!
//! The nested country → state → city table, keyed by [`ParentKey`].
//! A snapshot backs the local provider directly and memoises successful
//! responses inside the remote provider. Once a list is stored for a
//! scope it is never replaced for the rest of the session.
//!
//! ## Dataset File Format
//!
//! ```json
//! {"countries": [
//!   {"code": "US", "name": "United States", "states": [
//!     {"code": "NY", "name": "New York", "cities": [{"name": "New York City"}]}
//!   ]}
//! ]}
//! ```
//!
//! The same shape is accepted as YAML.

use std::collections::HashMap;

use intake_core::{ParentKey, Region};
use serde::{Deserialize, Serialize};

use crate::error::DirectoryError;

/// Memoised option lists keyed by their parent scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    lists: HashMap<ParentKey, Vec<Region>>,
}

impl DirectorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored list for a scope, if one has been fetched.
    pub fn get(&self, parent: &ParentKey) -> Option<&[Region]> {
        self.lists.get(parent).map(Vec::as_slice)
    }

    pub fn contains(&self, parent: &ParentKey) -> bool {
        self.lists.contains_key(parent)
    }

    /// Store a list for a scope unless one is already present.
    ///
    /// Returns the list now stored for the scope.
    pub fn insert(&mut self, parent: ParentKey, regions: Vec<Region>) -> &[Region] {
        self.lists.entry(parent).or_insert(regions)
    }

    /// Number of scopes with a stored list.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Flatten a nested dataset into a snapshot.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let mut snapshot = Self::new();
        let mut countries = Vec::with_capacity(dataset.countries.len());
        for country in dataset.countries {
            let country_region = Region::new(country.code.clone(), country.name);
            let mut states = Vec::with_capacity(country.states.len());
            for state in country.states {
                states.push(Region::new(state.code.clone(), state.name));
                snapshot.insert(ParentKey::state(&country.code, &state.code), state.cities);
            }
            snapshot.insert(ParentKey::country(&country.code), states);
            countries.push(country_region);
        }
        snapshot.insert(ParentKey::Root, countries);
        snapshot
    }

    /// Parse a dataset from JSON.
    pub fn from_json_str(source_name: &str, raw: &str) -> Result<Self, DirectoryError> {
        let dataset: Dataset =
            serde_json::from_str(raw).map_err(|e| DirectoryError::Dataset {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_dataset(dataset))
    }

    /// Parse a dataset from YAML (which also accepts JSON documents).
    pub fn from_yaml_str(source_name: &str, raw: &str) -> Result<Self, DirectoryError> {
        let dataset: Dataset =
            serde_yaml::from_str(raw).map_err(|e| DirectoryError::Dataset {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_dataset(dataset))
    }

    /// The built-in United States / Canada / India dataset.
    ///
    /// City codes equal their display names.
    pub fn builtin() -> Self {
        fn cities(names: &[&str]) -> Vec<Region> {
            names.iter().map(|n| Region::new(*n, *n)).collect()
        }
        fn state(code: &str, name: &str, city_names: &[&str]) -> DatasetState {
            DatasetState {
                code: code.to_string(),
                name: name.to_string(),
                cities: cities(city_names),
            }
        }
        fn country(code: &str, name: &str, states: Vec<DatasetState>) -> DatasetCountry {
            DatasetCountry {
                code: code.to_string(),
                name: name.to_string(),
                states,
            }
        }

        Self::from_dataset(Dataset {
            countries: vec![
                country(
                    "US",
                    "United States",
                    vec![
                        state("NY", "New York", &["New York City", "Buffalo"]),
                        state("CA", "California", &["Los Angeles", "San Francisco"]),
                    ],
                ),
                country(
                    "CA",
                    "Canada",
                    vec![
                        state("ON", "Ontario", &["Toronto", "Ottawa"]),
                        state("BC", "British Columbia", &["Vancouver", "Victoria"]),
                    ],
                ),
                country(
                    "IN",
                    "India",
                    vec![
                        state("MH", "Maharashtra", &["Mumbai", "Pune"]),
                        state("DL", "Delhi", &["New Delhi"]),
                    ],
                ),
            ],
        })
    }
}

/// Nested dataset as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub countries: Vec<DatasetCountry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetCountry {
    #[serde(alias = "iso2")]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub states: Vec<DatasetState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetState {
    #[serde(alias = "iso2")]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub cities: Vec<Region>,
}
