//! # intake-cli — Contact Intake Command-Line Interface
//!
//! A terminal presentation layer over the intake workspace.
//!
//! ## Subcommands
//!
//! - `regions`: list countries, states, or cities from the configured
//!   directory
//! - `schema`: print the contact form's JSON Schema or rule table
//! - `replay`: drive a file of form submissions through a form session
//!   and report accepted records and per-entry errors
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handlers; handlers delegate to the
//!   library crates.
//! - Results go to stdout as JSON; logs go to stderr.

pub mod directory;
pub mod regions;
pub mod replay;
pub mod schema;
