//! # Form Session
//!
//! Session-scoped state for one contact form: bound values, per-field
//! errors, the cascading selects, and the table of accepted submissions.
//!
//! The session is driven by presentation events:
//!
//! | Event | Method |
//! |-------|--------|
//! | page shown | [`FormSession::start`] |
//! | field change | [`FormSession::input`] (+ [`FormSession::load`] for region fields) |
//! | field blur | [`FormSession::blur`] |
//! | submit | [`FormSession::submit`] |
//!
//! Region lookups are split into issuing a request ([`FormSession::input`])
//! and applying its result ([`FormSession::apply_options`]) so callers can
//! resolve several requests concurrently; a response whose parent no longer
//! matches the selection is discarded. [`FormSession::select`] and
//! [`FormSession::load`] do both steps in sequence.

use std::collections::BTreeSet;

use intake_core::{FormField, FormState, Region, RegionKind, SubmittedRecord, ValidationErrors};
use intake_directory::DirectoryProvider;
use intake_schema::FormValidator;
use intake_state::{ApplyOutcome, CascadeController, OptionsRequest};

use crate::accumulator::Accumulator;
use crate::mode::ValidationMode;
use crate::table::{default_columns, ColumnSpec, RecordTable, TableRenderer};

#[derive(Debug)]
pub struct FormSession<P> {
    provider: P,
    form: FormState,
    errors: ValidationErrors,
    touched: BTreeSet<FormField>,
    submit_failed: bool,
    mode: ValidationMode,
    cascade: CascadeController,
    accumulator: Accumulator,
    columns: Vec<ColumnSpec>,
}

impl<P: DirectoryProvider> FormSession<P> {
    pub fn new(provider: P, validator: FormValidator) -> Self {
        Self {
            provider,
            form: FormState::default(),
            errors: ValidationErrors::new(),
            touched: BTreeSet::new(),
            submit_failed: false,
            mode: ValidationMode::default(),
            cascade: CascadeController::new(),
            accumulator: Accumulator::new(validator),
            columns: default_columns(),
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.columns = columns;
        self
    }

    /// Load the country list.
    pub async fn start(&mut self) -> ApplyOutcome {
        let request = self.cascade.load_countries();
        self.load(request).await
    }

    /// A field changed.
    ///
    /// Region fields drive the cascade: dependent fields are cleared in the
    /// form as well as in the controller, and the request for the next
    /// level's options is returned.
    pub fn input(&mut self, field: FormField, value: &str) -> Option<OptionsRequest> {
        self.form.set(field, value);
        let mut cleared = Vec::new();

        let request = match field.region_kind() {
            Some(kind) => {
                let request = self.cascade.set(kind, value);
                let mut below = kind.child();
                while let Some(level) = below {
                    let dependent = FormField::from(level);
                    self.form.clear(dependent);
                    cleared.push(dependent);
                    below = level.child();
                }
                request
            }
            None => None,
        };

        let touched = self.touched.contains(&field);
        if self.mode.validates_on_change(touched, self.submit_failed) {
            self.revalidate(field);
        }
        // Cleared dependents only show errors once a submit has failed.
        if self.submit_failed {
            for dependent in cleared {
                self.revalidate(dependent);
            }
        }
        request
    }

    /// A field lost focus.
    pub fn blur(&mut self, field: FormField) {
        self.touched.insert(field);
        if self.mode.validates_on_blur() {
            self.revalidate(field);
        }
    }

    /// Resolve a request against the provider and apply the result.
    pub async fn load(&mut self, request: OptionsRequest) -> ApplyOutcome {
        let regions = request.fetch(&self.provider).await;
        self.apply_options(&request, regions)
    }

    /// Apply a resolved request; stale responses are discarded.
    pub fn apply_options(&mut self, request: &OptionsRequest, regions: Vec<Region>) -> ApplyOutcome {
        self.cascade.apply(request, regions)
    }

    /// Change a field and, for region fields, load the dependent options.
    pub async fn select(&mut self, field: FormField, value: &str) -> Option<ApplyOutcome> {
        let request = self.input(field, value)?;
        Some(self.load(request).await)
    }

    /// Exhaustive validation and, on success, append and reset.
    ///
    /// After a successful submit the form values, errors, and region
    /// selections return to their initial state. The country list is kept.
    /// On failure the error set is stored for display and returned; the
    /// form is left as it was.
    pub fn submit(&mut self) -> Result<SubmittedRecord, ValidationErrors> {
        let names = self.cascade.region_names();
        match self.accumulator.submit_with_names(&self.form, names) {
            Ok(record) => {
                self.reset();
                Ok(record)
            }
            Err(errors) => {
                self.errors = errors.clone();
                self.submit_failed = true;
                Err(errors)
            }
        }
    }

    /// Clear values, errors, and region selections. Submitted records and
    /// the country list are kept.
    pub fn reset(&mut self) {
        self.form.reset();
        self.errors.clear();
        self.touched.clear();
        self.submit_failed = false;
        self.cascade.reset();
    }

    /// Hand the table to a renderer if it has any rows.
    pub fn render_table<R: TableRenderer + ?Sized>(&self, renderer: &mut R) -> bool {
        self.accumulator.table().render_into(&self.columns, renderer)
    }

    fn revalidate(&mut self, field: FormField) {
        let message = self.accumulator.validator().validate_field(&self.form, field);
        self.errors.set(field, message);
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn value(&self, field: FormField) -> &str {
        self.form.get(field)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn cascade(&self) -> &CascadeController {
        &self.cascade
    }

    pub fn options(&self, kind: RegionKind) -> &[Region] {
        self.cascade.options(kind)
    }

    pub fn is_loading(&self, kind: RegionKind) -> bool {
        self.cascade.is_loading(kind)
    }

    pub fn table(&self) -> &RecordTable {
        self.accumulator.table()
    }

    pub fn records(&self) -> &[SubmittedRecord] {
        self.accumulator.table().records()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Table contents as display text, one row per record.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        self.accumulator.table().rows(&self.columns)
    }
}
