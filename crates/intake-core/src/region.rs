//! # Region Types
//!
//! A [`Region`] is a coded, named geographic entity offered by one of the
//! three cascading selects. Codes are unique only within their parent scope:
//! `CA` is California under `US` and Canada at the country level. The
//! [`ParentKey`] type names that scope explicitly.

use serde::{Deserialize, Serialize};

/// The three levels of the cascading selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Country,
    State,
    City,
}

impl RegionKind {
    /// All kinds, parent first.
    pub fn all() -> &'static [RegionKind] {
        &[Self::Country, Self::State, Self::City]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
        }
    }

    /// The kind whose options depend on this one, if any.
    pub fn child(&self) -> Option<RegionKind> {
        match self {
            Self::Country => Some(Self::State),
            Self::State => Some(Self::City),
            Self::City => None,
        }
    }
}

impl std::fmt::Display for RegionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable region: country, state, or city.
///
/// Serializes as `{"code": .., "name": ..}`. Deserialization is lenient
/// toward directory payloads: the code may arrive as `code` or `iso2`,
/// as a string or a number, and when it is missing entirely the display
/// name doubles as the code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RegionWire")]
pub struct Region {
    /// Code, unique within the parent scope.
    pub code: String,
    /// Human-readable display name.
    pub name: String,
}

impl Region {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Deserialize)]
struct RegionWire {
    #[serde(default, alias = "iso2")]
    code: Option<WireCode>,
    name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireCode {
    Text(String),
    Number(i64),
}

impl From<RegionWire> for Region {
    fn from(wire: RegionWire) -> Self {
        let code = match wire.code {
            Some(WireCode::Text(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(WireCode::Number(n)) => n.to_string(),
            _ => wire.name.clone(),
        };
        Self {
            code,
            name: wire.name,
        }
    }
}

/// The full parent scope of an option list.
///
/// Option lists for states are keyed by a country code; option lists for
/// cities by the (country, state) pair. The country list has no parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ParentKey {
    /// Scope of the country list.
    Root,
    /// Scope of a state list.
    Country { country: String },
    /// Scope of a city list.
    State { country: String, state: String },
}

impl ParentKey {
    pub fn country(country: impl Into<String>) -> Self {
        Self::Country {
            country: country.into(),
        }
    }

    pub fn state(country: impl Into<String>, state: impl Into<String>) -> Self {
        Self::State {
            country: country.into(),
            state: state.into(),
        }
    }

    /// Whether any code in this scope is empty or whitespace.
    ///
    /// A blank scope never has options.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Root => false,
            Self::Country { country } => country.trim().is_empty(),
            Self::State { country, state } => {
                country.trim().is_empty() || state.trim().is_empty()
            }
        }
    }

    /// Kind of the regions listed under this scope.
    pub fn child_kind(&self) -> RegionKind {
        match self {
            Self::Root => RegionKind::Country,
            Self::Country { .. } => RegionKind::State,
            Self::State { .. } => RegionKind::City,
        }
    }
}

impl std::fmt::Display for ParentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Root => f.write_str("(root)"),
            Self::Country { country } => f.write_str(country),
            Self::State { country, state } => write!(f, "{country}/{state}"),
        }
    }
}
