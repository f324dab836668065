//! Alsvin command-line interface.
//!
//! ```text
//!     A L S V I N
//!     T-gate optimisation for Clifford+T circuits
//! ```
//!
//! Reads a `.qc` circuit, rewrites its CNOT + phase fragments through the
//! phase-polynomial pipeline, and emits an equivalent circuit with fewer
//! T gates.

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::optimise;

/// Alsvin - T-gate optimisation for Clifford+T circuits
#[derive(Parser)]
#[command(name = "alsvin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv); progress goes to stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimise the whole circuit, Hadamards included
    Optimise {
        /// Input .qc file ('-' for stdin)
        input: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Print gate counts and T-depths for input and output
        #[arg(long)]
        stats: bool,

        /// Emit stats as JSON instead of the comment block
        #[arg(long, requires = "stats")]
        json: bool,
    },

    /// Optimise only maximal CNOT+T sub-blocks, leaving other gates alone
    #[command(name = "optimise-no-h")]
    OptimiseNoH {
        /// Input .qc file ('-' for stdin)
        input: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Print gate counts and T-depths for input and output
        #[arg(long)]
        stats: bool,

        /// Emit stats as JSON instead of the comment block
        #[arg(long, requires = "stats")]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Optimise {
            input,
            output,
            stats,
            json,
        } => optimise::execute(&input, output.as_deref(), stats, json, false),
        Commands::OptimiseNoH {
            input,
            output,
            stats,
            json,
        } => optimise::execute(&input, output.as_deref(), stats, json, true),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
