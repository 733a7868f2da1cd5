//! # intake CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use intake_cli::directory::DirectoryArgs;
use intake_cli::regions::{run_regions, RegionsArgs};
use intake_cli::replay::{run_replay, ReplayArgs};
use intake_cli::schema::{run_schema, SchemaArgs};

/// Contact intake toolchain.
///
/// Looks up cascading region options, exports the form schema, and replays
/// form submissions through a validated form session.
#[derive(Parser, Debug)]
#[command(name = "intake", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    directory: DirectoryArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List countries, states, or cities from the configured directory.
    Regions(RegionsArgs),

    /// Print the contact form's JSON Schema.
    Schema(SchemaArgs),

    /// Submit each form state in a JSON file and report the outcome.
    Replay(ReplayArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    tracing::debug!("intake CLI starting");

    let result = match &cli.command {
        Commands::Schema(args) => run_schema(args),
        Commands::Regions(args) => match cli.directory.build() {
            Ok(directory) => run_regions(args, &directory).await,
            Err(e) => Err(e),
        },
        Commands::Replay(args) => match cli.directory.build() {
            Ok(directory) => run_replay(args, directory).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins over `-v`. Logs go to stderr so stdout stays JSON.
fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
