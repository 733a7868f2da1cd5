//! # intake-core — Foundational Types for the Contact Intake Form
//!
//! Defines the data model shared by every other crate in the workspace.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Region codes are scoped.** A state or city code is only meaningful
//!    together with its parent code. [`ParentKey`] carries the full scope of
//!    an option list so that lookups and stale-response checks never compare
//!    a bare child code.
//!
//! 2. **One `FormField` enum.** Every rule, error entry, and table column is
//!    keyed by [`FormField`]. Adding a field forces every `match` to handle it.
//!
//! 3. **Strings until validated.** [`FormState`] holds raw user input. Only a
//!    successful submit produces a [`SubmittedRecord`], which is immutable.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `intake-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod form;
pub mod identity;
pub mod record;
pub mod region;

pub use error::{IntakeError, ValidationErrors};
pub use form::{FormField, FormState};
pub use identity::RecordId;
pub use record::{RegionNames, SubmittedRecord};
pub use region::{ParentKey, Region, RegionKind};
