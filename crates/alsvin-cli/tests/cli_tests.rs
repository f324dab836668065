//! CLI argument-surface and pipeline wiring tests.
//!
//! The binary's clap surface is validated via `try_parse_from` on an
//! equivalent definition (the binary crate's internals are not importable),
//! and the underlying pipeline is exercised through the library crates the
//! commands call into.

use clap::{Parser, Subcommand};

/// Mirror of the binary's argument surface.
#[derive(Parser)]
#[command(name = "alsvin")]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Optimise {
        input: String,
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        stats: bool,
        #[arg(long, requires = "stats")]
        json: bool,
    },
    #[command(name = "optimise-no-h")]
    OptimiseNoH {
        input: String,
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        stats: bool,
        #[arg(long, requires = "stats")]
        json: bool,
    },
}

#[test]
fn test_optimise_parses() {
    let cli = Cli::try_parse_from(["alsvin", "optimise", "circuit.qc"]).unwrap();
    match cli.command {
        Commands::Optimise {
            input,
            output,
            stats,
            json,
        } => {
            assert_eq!(input, "circuit.qc");
            assert!(output.is_none());
            assert!(!stats);
            assert!(!json);
        }
        Commands::OptimiseNoH { .. } => panic!("wrong subcommand"),
    }
}

#[test]
fn test_optimise_no_h_with_flags() {
    let cli = Cli::try_parse_from([
        "alsvin",
        "optimise-no-h",
        "in.qc",
        "-o",
        "out.qc",
        "--stats",
        "-vv",
    ])
    .unwrap();
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Commands::OptimiseNoH {
            input,
            output,
            stats,
            json,
        } => {
            assert_eq!(input, "in.qc");
            assert_eq!(output.as_deref(), Some("out.qc"));
            assert!(stats);
            assert!(!json);
        }
        Commands::Optimise { .. } => panic!("wrong subcommand"),
    }
}

#[test]
fn test_json_requires_stats() {
    assert!(Cli::try_parse_from(["alsvin", "optimise", "in.qc", "--json"]).is_err());
    assert!(Cli::try_parse_from(["alsvin", "optimise", "in.qc", "--stats", "--json"]).is_ok());
}

#[test]
fn test_missing_subcommand_rejected() {
    assert!(Cli::try_parse_from(["alsvin"]).is_err());
}

/// The end-to-end flow behind the `optimise` command: parse, optimise,
/// emit, and the stats the `--stats` flag reports.
#[test]
fn test_pipeline_wiring() {
    let source = ".v a b\n.i a b\nBEGIN\nT a\nT a\ntof a b\nEND\n";
    let circuit = alsvin_qc::parse(source).unwrap();
    let optimized = alsvin_opt::optimize(&circuit).unwrap();

    let stats = optimized.stats();
    assert_eq!(stats.t, 0);
    assert_eq!(stats.p, 1);

    let text = alsvin_qc::emit(&optimized);
    assert!(text.contains("BEGIN"));
    assert!(alsvin_qc::parse(&text).is_ok());
}

/// Malformed input surfaces as an error (the binary maps this to exit 1).
#[test]
fn test_malformed_input_is_an_error() {
    assert!(alsvin_qc::parse(".v a\n.i a\nBEGIN\nT b\nEND\n").is_err());
    assert!(alsvin_qc::parse("no header at all").is_err());
}
