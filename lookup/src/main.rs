//! Looks up a player's ranked profile by connect code and prints their tier.
//!
//!   slippi-lookup MORS#762
//!   slippi-lookup mors#762 --json
//!   slippi-lookup --check "TOOLONGNAME#1"

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use slippi_config::SlippiConfig;
use slippi_gg_api::APIClient;
use slippi_profile::{LookupError, ProfileLookup, SchemaVersion, validate_connect_code};

mod render;

#[derive(Debug, Parser)]
#[command(name = "slippi-lookup", version, about = "Look up a player's Slippi ranked profile")]
struct Args {
    /// Connect code to look up, e.g. MORS#762 (case doesn't matter)
    code: String,

    /// Print the profile and derived rank as JSON
    #[arg(long)]
    json: bool,

    /// Only validate the connect code; no request is made
    #[arg(long)]
    check: bool,

    /// Extra TOML configuration layered over the environment defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Configuration environment (development or production); defaults to $SLIPPI_ENV
    #[arg(long, value_name = "ENV")]
    env: Option<String>,

    /// Response schema revision to query with
    #[arg(long, value_name = "VERSION", default_value_t = SchemaVersion::V3)]
    schema: SchemaVersion,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Initialize logging on stderr so stdout stays clean for `--json`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.check {
        let valid = validate_connect_code(args.code.trim());
        println!("{}: {}", args.code, if valid { "valid" } else { "invalid" });

        return if valid { ExitCode::SUCCESS } else { ExitCode::from(2) };
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,

        Err(error) => {
            eprintln!("error: {error:#}");

            match error.downcast_ref::<LookupError>() {
                Some(LookupError::InvalidInput(_)) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        },
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match (&args.env, &args.config) {
        (None, None) => SlippiConfig::get()
            .cloned()
            .with_context(|| format!("Failed to load `{}` configuration", SlippiConfig::current_env()))?,

        (environment, user_file) => {
            let environment = environment.clone().unwrap_or_else(SlippiConfig::current_env);

            SlippiConfig::load(&environment, user_file.as_deref())
                .with_context(|| format!("Failed to load `{environment}` configuration"))?
        },
    };

    tracing::info!(endpoint = %config.graphql_url, schema = %args.schema, "Looking up {}", args.code);

    let api_client = APIClient::new(&config.user_agent, config.timeout());
    let lookup = ProfileLookup::new(api_client, config.graphql_url).with_schema(args.schema);
    let profile = lookup.fetch(&args.code)?;

    let output = match args.json {
        true => render::json(&profile)?,
        false => render::summary(&profile),
    };

    println!("{output}");

    Ok(())
}
