//! # intake-state — Cascading Selection Controller
//!
//! Owns the three-level dependent selection (country → state → city) of
//! the contact form.
//!
//! ## Transitions
//!
//! ```text
//! set country ──▶ state, city unset; state options cleared; request states(country)
//! set state   ──▶ city unset; city options cleared; request cities(country, state)
//! set city    ──▶ (leaf, no cascade)
//! clear X     ──▶ same as setting X to empty; no request is issued
//! ```
//!
//! ## Requests
//!
//! The controller performs no I/O. Each transition that needs new options
//! returns an [`OptionsRequest`] tagged with the parent scope it was issued
//! for. The caller fetches it from a
//! [`DirectoryProvider`](intake_directory::DirectoryProvider) and hands the
//! result back through [`CascadeController::apply`]. A response is accepted
//! only if its parent scope still matches the controller's current parent
//! for that level; anything else is discarded as stale.

pub mod cascade;
pub mod request;

pub use cascade::{ApplyOutcome, CascadeController, Selection};
pub use request::OptionsRequest;
