//! # intake-schema — Form Validation Engine
//!
//! Validates a [`FormState`](intake_core::FormState) against a declared
//! schema and produces a [`ValidationErrors`](intake_core::ValidationErrors)
//! set keyed by field.
//!
//! ## Rules (`rules`)
//!
//! [`FormSchema`] is the declarative rule table: required-ness, minimum
//! length, and format per field. [`FormSchema::contact`] is the contact
//! form's table. A rule table renders to a JSON Schema (Draft 2020-12)
//! document via [`FormSchema::to_json_schema`].
//!
//! ## Evaluation (`validate`)
//!
//! [`FormValidator`] compiles that document once with the `jsonschema`
//! crate and maps each violation back to its field and a human-readable
//! message. Validation is a pure function of the form values; it runs
//! per field for immediate feedback and over all fields at submit time.

pub mod rules;
pub mod validate;

pub use rules::{FieldFormat, FieldRule, FormSchema, REQUIRED_MESSAGE};
pub use validate::{FormValidator, SchemaError};
