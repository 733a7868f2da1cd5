//! # Replay Subcommand
//!
//! `intake replay <FILE>` reads a JSON array of form states and drives each
//! one through a single [`FormSession`] the way a user would: text fields
//! are typed, region fields are selected in cascade order (waiting for each
//! option list), then the form is submitted.
//!
//! The report lists accepted records, rejected entries with their per-field
//! errors, and the final table as displayed. The exit code is 0 when every
//! entry was accepted and 2 otherwise.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use intake_core::{FormField, FormState, SubmittedRecord, ValidationErrors};
use intake_directory::DirectoryProvider;
use intake_form::{FormSession, ValidationMode};
use intake_schema::FormValidator;
use serde::Serialize;

/// Arguments for the replay subcommand.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON file holding an array of form states.
    pub file: PathBuf,
}

/// A submission that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// Position in the input file.
    pub index: usize,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub accepted: Vec<SubmittedRecord>,
    pub rejected: Vec<RejectedEntry>,
    pub headers: Vec<String>,
    pub table: Vec<Vec<String>>,
}

impl ReplayReport {
    pub fn exit_code(&self) -> u8 {
        if self.rejected.is_empty() {
            0
        } else {
            2
        }
    }
}

pub fn read_entries(path: &Path) -> anyhow::Result<Vec<FormState>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Drive every entry through one session.
pub async fn replay<P: DirectoryProvider>(
    provider: P,
    entries: &[FormState],
) -> anyhow::Result<ReplayReport> {
    let validator = FormValidator::contact()?;
    let mut session = FormSession::new(provider, validator).with_mode(ValidationMode::OnSubmit);
    session.start().await;

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        fill(&mut session, entry).await;
        match session.submit() {
            Ok(record) => accepted.push(record),
            Err(errors) => {
                tracing::debug!(index, %errors, "entry rejected");
                rejected.push(RejectedEntry { index, errors });
                session.reset();
            }
        }
    }

    Ok(ReplayReport {
        accepted,
        rejected,
        headers: session.columns().iter().map(|c| c.header.clone()).collect(),
        table: session.table_rows(),
    })
}

async fn fill<P: DirectoryProvider>(session: &mut FormSession<P>, entry: &FormState) {
    for field in FormField::all() {
        let value = entry.get(*field);
        match field.region_kind() {
            Some(_) => {
                if let Some(outcome) = session.select(*field, value).await {
                    tracing::trace!(%field, ?outcome, "options loaded");
                }
            }
            None => {
                session.input(*field, value);
            }
        }
        session.blur(*field);
    }
}

/// Execute the replay subcommand.
pub async fn run_replay<P: DirectoryProvider>(args: &ReplayArgs, provider: P) -> anyhow::Result<u8> {
    let entries = read_entries(&args.file)?;
    let report = replay(provider, &entries).await?;
    tracing::info!(
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        "replay finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.exit_code())
}
