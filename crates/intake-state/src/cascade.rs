//! # Cascade Controller
//!
//! Runtime state machine over the three region positions. Each position is
//! either unset or set to a region code; each level below the root has an
//! option list that is valid only for the parent selection it was fetched
//! under.

use std::collections::BTreeMap;

use intake_core::{ParentKey, Region, RegionKind, RegionNames};
use serde::{Deserialize, Serialize};

use crate::request::OptionsRequest;

/// Current codes of the three cascading selects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl Selection {
    pub fn get(&self, kind: RegionKind) -> Option<&str> {
        match kind {
            RegionKind::Country => self.country.as_deref(),
            RegionKind::State => self.state.as_deref(),
            RegionKind::City => self.city.as_deref(),
        }
    }

    fn slot(&mut self, kind: RegionKind) -> &mut Option<String> {
        match kind {
            RegionKind::Country => &mut self.country,
            RegionKind::State => &mut self.state,
            RegionKind::City => &mut self.city,
        }
    }

    /// Parent scope the options of `kind` must be fetched under, or `None`
    /// while any ancestor is unset.
    pub fn parent_of(&self, kind: RegionKind) -> Option<ParentKey> {
        match kind {
            RegionKind::Country => Some(ParentKey::Root),
            RegionKind::State => self.country.as_deref().map(ParentKey::country),
            RegionKind::City => match (self.country.as_deref(), self.state.as_deref()) {
                (Some(country), Some(state)) => Some(ParentKey::state(country, state)),
                _ => None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.state.is_none() && self.city.is_none()
    }
}

/// Result of handing a resolved request back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    /// The options replaced the list for the request's level.
    Applied,
    /// The parent selection changed since the request was issued; the
    /// options were discarded.
    Stale,
}

/// Three-level dependent selection.
#[derive(Debug, Clone, Default)]
pub struct CascadeController {
    selection: Selection,
    countries: Vec<Region>,
    states: Vec<Region>,
    cities: Vec<Region>,
    pending: BTreeMap<RegionKind, ParentKey>,
}

impl CascadeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the country list. The root scope never changes, so this
    /// request can never go stale.
    pub fn load_countries(&mut self) -> OptionsRequest {
        self.issue(RegionKind::Country, ParentKey::Root)
    }

    /// Set (or, with a blank value, clear) one position.
    ///
    /// Every position below `kind` is unset and its options emptied. When
    /// the immediate child level has a complete parent scope afterwards, the
    /// request for its options is returned.
    pub fn set(&mut self, kind: RegionKind, value: &str) -> Option<OptionsRequest> {
        let value = value.trim();
        *self.selection.slot(kind) = (!value.is_empty()).then(|| value.to_string());

        let mut below = kind.child();
        while let Some(level) = below {
            *self.selection.slot(level) = None;
            self.list_mut(level).clear();
            self.pending.remove(&level);
            below = level.child();
        }

        let child = kind.child()?;
        let parent = self.selection.parent_of(child)?;
        Some(self.issue(child, parent))
    }

    pub fn set_country(&mut self, code: &str) -> Option<OptionsRequest> {
        self.set(RegionKind::Country, code)
    }

    pub fn set_state(&mut self, code: &str) -> Option<OptionsRequest> {
        self.set(RegionKind::State, code)
    }

    pub fn set_city(&mut self, code: &str) -> Option<OptionsRequest> {
        self.set(RegionKind::City, code)
    }

    /// Unset one position; cascades exactly like setting it to empty.
    pub fn clear(&mut self, kind: RegionKind) {
        let request = self.set(kind, "");
        debug_assert!(request.is_none(), "a blank selection issues no request");
    }

    /// Accept or discard a resolved request.
    pub fn apply(&mut self, request: &OptionsRequest, regions: Vec<Region>) -> ApplyOutcome {
        let kind = request.kind();
        let current = self.selection.parent_of(kind);
        if current.as_ref() != Some(request.parent()) {
            let current = current.map_or_else(|| "(unset)".to_string(), |p| p.to_string());
            tracing::debug!(
                %kind,
                requested = %request.parent(),
                %current,
                "discarding stale region options"
            );
            return ApplyOutcome::Stale;
        }

        *self.list_mut(kind) = regions;
        if self.pending.get(&kind) == Some(request.parent()) {
            self.pending.remove(&kind);
        }
        ApplyOutcome::Applied
    }

    /// Return to the initial state: all positions unset, dependent option
    /// lists empty. The country list has no parent and is kept.
    pub fn reset(&mut self) {
        self.selection = Selection::default();
        self.states.clear();
        self.cities.clear();
        self.pending.remove(&RegionKind::State);
        self.pending.remove(&RegionKind::City);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self, kind: RegionKind) -> Option<&str> {
        self.selection.get(kind)
    }

    /// The selected region of a level, if its code is among the current
    /// options.
    pub fn selected_region(&self, kind: RegionKind) -> Option<&Region> {
        let code = self.selected(kind)?;
        self.options(kind).iter().find(|r| r.code == code)
    }

    /// Display names of the current selection, for records and tables.
    pub fn region_names(&self) -> RegionNames {
        let mut names = RegionNames::default();
        for kind in RegionKind::all() {
            names.set(*kind, self.selected_region(*kind).map(|r| r.name.clone()));
        }
        names
    }

    pub fn options(&self, kind: RegionKind) -> &[Region] {
        match kind {
            RegionKind::Country => &self.countries,
            RegionKind::State => &self.states,
            RegionKind::City => &self.cities,
        }
    }

    /// Whether a request for this level is outstanding.
    pub fn is_loading(&self, kind: RegionKind) -> bool {
        self.pending.contains_key(&kind)
    }

    fn issue(&mut self, kind: RegionKind, parent: ParentKey) -> OptionsRequest {
        self.pending.insert(kind, parent.clone());
        OptionsRequest::new(parent)
    }

    fn list_mut(&mut self, kind: RegionKind) -> &mut Vec<Region> {
        match kind {
            RegionKind::Country => &mut self.countries,
            RegionKind::State => &mut self.states,
            RegionKind::City => &mut self.cities,
        }
    }
}
