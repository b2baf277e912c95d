//! Scaffold CLI — the command-line interface for the Scaffold CSS compiler.
//!
//! Provides `scaffold compile` for running a stylesheet through the compile
//! pipeline and `scaffold flush` for clearing the on-disk cache.

#![warn(missing_docs)]

mod compile;
mod flush;
mod project;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Scaffold — a staged CSS compilation engine.
#[derive(Parser, Debug)]
#[command(name = "scaffold", version, about = "Scaffold CSS compiler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `scaffold.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a stylesheet through the pipeline.
    Compile(CompileArgs),
    /// Delete all cached compile results.
    Flush(FlushArgs),
}

/// Arguments for the `scaffold compile` subcommand.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// The stylesheet to compile.
    pub file: String,

    /// Write the compiled CSS here instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Extra include paths, searched before the configured ones.
    #[arg(short, long, num_args = 1..)]
    pub include: Vec<String>,

    /// Run-scoped options passed through to module hooks.
    #[arg(long, num_args = 1..)]
    pub option: Vec<String>,

    /// Compile fresh, ignoring and not writing cached results.
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `scaffold flush` subcommand.
#[derive(Parser, Debug)]
pub struct FlushArgs {
    /// Cache directory to flush (overrides `cache.path` from the config).
    #[arg(long)]
    pub cache_dir: Option<String>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Compile(ref args) => compile::run(args, &global),
        Command::Flush(ref args) => flush::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
