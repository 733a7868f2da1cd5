//! # Schema Subcommand
//!
//! Prints the contact form's compiled JSON Schema, or with `--rules` the
//! declarative rule table it is generated from.

use clap::Args;
use intake_schema::{FormSchema, FormValidator};
use serde_json::Value;

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Print the rule table instead of the JSON Schema document.
    #[arg(long)]
    pub rules: bool,
}

/// The document the subcommand prints.
pub fn render(args: &SchemaArgs) -> anyhow::Result<Value> {
    let schema = FormSchema::contact();
    if args.rules {
        return Ok(serde_json::to_value(&schema)?);
    }
    // Compile once so a broken rule table fails here rather than at submit.
    let validator = FormValidator::new(schema)?;
    Ok(validator.schema().to_json_schema())
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> anyhow::Result<u8> {
    let document = render(args)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(0)
}
