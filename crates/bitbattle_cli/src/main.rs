//! Bitbattle CLI: the command-line front end for the logic-circuit sandbox.
//!
//! Provides `bitbattle check` for running a circuit against a truth table,
//! `bitbattle sim` for a single propagation pass, `bitbattle table` for
//! generating challenge tables, and `bitbattle pack`/`unpack` for the compact
//! circuit archive.

#![warn(missing_docs)]

mod check;
mod pack;
mod project;
mod sim;
mod table;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Bitbattle: build logic circuits and test them against truth tables.
#[derive(Parser, Debug)]
#[command(name = "bitbattle", version, about = "Bitbattle logic-circuit sandbox")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `bitbattle.toml` file or the directory holding one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a circuit against every row of a truth table.
    Check(CheckArgs),
    /// Run one propagation pass and print every gate and wire.
    Sim(SimArgs),
    /// Print a generated truth table as JSON.
    Table(TableArgs),
    /// Write a circuit to the compact archive format.
    Pack(PackArgs),
    /// Read a compact archive back into editor JSON.
    Unpack(UnpackArgs),
}

/// Arguments for the `bitbattle check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Editor circuit JSON.
    pub circuit: PathBuf,

    /// Truth table JSON.
    pub table: PathBuf,

    /// Output format for the result.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Pause between rows, overriding `runner.row_delay_ms`.
    #[arg(long)]
    pub row_delay_ms: Option<u64>,

    /// Seconds taken to solve; reports the daily score when every row passes.
    #[arg(long)]
    pub elapsed_secs: Option<u64>,
}

/// Arguments for the `bitbattle sim` subcommand.
#[derive(Parser, Debug)]
pub struct SimArgs {
    /// Editor circuit JSON.
    pub circuit: PathBuf,

    /// Input values as `LETTER=BIT` (e.g., `--set A=1 B=0`). Unset inputs read 0.
    #[arg(long, num_args = 1.., value_parser = sim::parse_assignment)]
    pub set: Vec<(bitbattle_common::Label, bitbattle_common::Bit)>,
}

/// Arguments for the `bitbattle table` subcommand.
#[derive(Parser, Debug)]
pub struct TableArgs {
    /// Number of input columns (default: `table.inputs`).
    #[arg(long)]
    pub inputs: Option<usize>,

    /// Number of output columns (default: `table.outputs`).
    #[arg(long)]
    pub outputs: Option<usize>,

    /// Seed for reproducible output columns.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the `bitbattle pack` subcommand.
#[derive(Parser, Debug)]
pub struct PackArgs {
    /// Editor circuit JSON.
    pub circuit: PathBuf,

    /// Archive file to write.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `bitbattle unpack` subcommand.
#[derive(Parser, Debug)]
pub struct UnpackArgs {
    /// Archive file to read.
    pub archive: PathBuf,

    /// Circuit JSON to write. Prints to stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// The scoring backend payload as JSON.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.quiet, cli.verbose))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install logger: {e}");
    }

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Sim(ref args) => sim::run(args, &global),
        Command::Table(ref args) => table::run(args, &global),
        Command::Pack(ref args) => pack::pack(args, &global),
        Command::Unpack(ref args) => pack::unpack(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn log_level(quiet: bool, verbose: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}
