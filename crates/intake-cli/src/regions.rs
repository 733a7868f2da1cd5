//! # Regions Subcommand
//!
//! `intake regions countries | states <COUNTRY> | cities <COUNTRY> <STATE>`
//!
//! Prints the option list as a JSON array of `{code, name}`. Unlike the
//! form, which fails closed to an empty list, a remote lookup failure here
//! is reported as an error.

use clap::{Args, Subcommand};
use intake_core::{ParentKey, Region};
use intake_directory::{Directory, DirectoryProvider};

/// Arguments for the regions subcommand.
#[derive(Args, Debug)]
pub struct RegionsArgs {
    #[command(subcommand)]
    pub command: RegionsCommand,
}

#[derive(Subcommand, Debug)]
pub enum RegionsCommand {
    /// List all countries.
    Countries,
    /// List the states of a country.
    States {
        /// Country code, e.g. `US`.
        country: String,
    },
    /// List the cities of a state.
    Cities {
        /// Country code, e.g. `US`.
        country: String,
        /// State code within the country, e.g. `NY`.
        state: String,
    },
}

impl RegionsCommand {
    pub fn parent(&self) -> ParentKey {
        match self {
            Self::Countries => ParentKey::Root,
            Self::States { country } => ParentKey::country(country.as_str()),
            Self::Cities { country, state } => ParentKey::state(country.as_str(), state.as_str()),
        }
    }
}

/// Look up the options under a scope, surfacing remote failures.
pub async fn lookup(directory: &Directory, parent: &ParentKey) -> anyhow::Result<Vec<Region>> {
    match directory {
        Directory::Remote(remote) => Ok(remote.try_list(parent).await?),
        Directory::Local(_) => Ok(directory.list(parent).await),
    }
}

/// Execute the regions subcommand.
pub async fn run_regions(args: &RegionsArgs, directory: &Directory) -> anyhow::Result<u8> {
    let parent = args.command.parent();
    let regions = lookup(directory, &parent).await?;
    tracing::info!(
        %parent,
        provider = directory.provider_name(),
        count = regions.len(),
        "regions listed"
    );
    println!("{}", serde_json::to_string_pretty(&regions)?);
    Ok(0)
}
