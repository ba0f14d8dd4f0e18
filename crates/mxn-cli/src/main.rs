//! # mxn CLI entry point
//!
//! Parses command-line arguments, installs logging, loads the name rules
//! and dispatches to subcommand handlers.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mxn_cli::check::{run_check, CheckArgs};
use mxn_cli::config::load_rules;
use mxn_cli::normalize::{run_normalize, NormalizeArgs};
use mxn_cli::principal::{run_decode, run_encode, DecodeArgs, EncodeArgs};
use mxn_cli::OutputFormat;

/// Member X.500 name tool.
///
/// Normalizes, vets and converts the distinguished names that identify
/// network participants.
#[derive(Parser, Debug)]
#[command(name = "mxn", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML rules configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit one JSON object per input instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the canonical form of each name.
    Normalize(NormalizeArgs),

    /// Vet names read one per line from stdin.
    Check(CheckArgs),

    /// Print the DER principal form of a name as hex.
    Encode(EncodeArgs),

    /// Print the canonical form of a hex DER principal.
    Decode(DecodeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "mxn starting");

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let rules = load_rules(cli.config.as_deref())?;
    let format = OutputFormat::from_flag(cli.json);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let code = match cli.command {
        Commands::Normalize(args) => run_normalize(&args, &rules, format, &mut out, &mut err)?,
        Commands::Check(args) => {
            let stdin = io::stdin();
            run_check(&args, &rules, format, stdin.lock(), &mut out, &mut err)?
        }
        Commands::Encode(args) => run_encode(&args, &rules, format, &mut out, &mut err)?,
        Commands::Decode(args) => run_decode(&args, &rules, format, &mut out, &mut err)?,
    };
    out.flush()?;
    Ok(code)
}
