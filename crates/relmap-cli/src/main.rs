//! # relmap CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relmap_cli::convert::{run_cache, run_convert, CacheArgs, ConvertArgs};
use relmap_cli::inspect::{run_describe, run_resolve, run_types, DescribeArgs, ResolveArgs, TypesArgs};
use relmap_cli::Environment;

/// relmap: inspect and exercise persistence type descriptors.
#[derive(Parser, Debug)]
#[command(name = "relmap", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML type-settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered logical types.
    Types(TypesArgs),

    /// Show a type's kinds, plan, ordering, precision and column type.
    Describe(DescribeArgs),

    /// Parse a literal, unwrap it to a value kind and wrap it back.
    Convert(ConvertArgs),

    /// Pass a literal through the type's cache plan.
    Cache(CacheArgs),

    /// Resolve a temporal type at a precision.
    Resolve(ResolveArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = Environment::load(cli.config.as_deref()).and_then(|env| match &cli.command {
        Commands::Types(args) => run_types(&env, args),
        Commands::Describe(args) => run_describe(&env, args),
        Commands::Convert(args) => run_convert(&env, args),
        Commands::Cache(args) => run_cache(&env, args),
        Commands::Resolve(args) => run_resolve(&env, args),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
