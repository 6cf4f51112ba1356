#![forbid(unsafe_code)]

mod cmd;
mod input;
mod output;

use std::env;
use std::path::PathBuf;

use cadence_graph::{AnalysisConfig, GraphError, load_config};
use clap::{Parser, Subcommand};
use output::{CliError, OutputMode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cadence: transition-graph analytics for chord sequences",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Analysis settings (TOML). Missing files fall back to defaults.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Run every analysis and print a full report",
        after_help = "EXAMPLES:\n    cadence analyze song.txt\n    cadence --format json analyze song.json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(about = "Summarize graph structure")]
    Stats(cmd::stats::StatsArgs),

    #[command(about = "List transitions with weights and probabilities")]
    Transitions(cmd::transitions::TransitionsArgs),

    #[command(
        about = "Rank chords by PageRank and betweenness",
        after_help = "EXAMPLES:\n    cadence centrality song.txt --damping 0.9 --top 10"
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(about = "Group chords into communities by label propagation")]
    Communities(cmd::communities::CommunitiesArgs),

    #[command(
        about = "Enumerate recurring progressions (simple cycles)",
        after_help = "EXAMPLES:\n    cadence cycles song.txt --max-length 4"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(about = "Compare the transition structure of two sequences")]
    Compare(cmd::compare::CompareArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CADENCE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "cadence=debug,info"
        } else {
            "cadence=info,warn"
        })
    });

    let format = env::var("CADENCE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Map a failure to a structured error, with hints for the cases users hit.
fn cli_error(err: &anyhow::Error) -> CliError {
    let graph_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<GraphError>());

    match graph_error {
        Some(GraphError::EmptyInput) => CliError::with_details(
            format!("{err:#}"),
            "the input must contain at least one chord label",
            "empty_input",
        ),
        Some(GraphError::InvalidDamping(_) | GraphError::ZeroIterations) => {
            CliError::with_details(
                format!("{err:#}"),
                "damping must lie in (0, 1] and iterations must be at least 1",
                "invalid_config",
            )
        }
        None => CliError::from_anyhow(err),
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let config: AnalysisConfig = load_config(cli.config.as_deref())?;
    debug!(?config, "loaded configuration");

    match &cli.command {
        Commands::Analyze(args) => cmd::analyze::run_analyze(args, output, &config),
        Commands::Stats(args) => cmd::stats::run_stats(args, output),
        Commands::Transitions(args) => cmd::transitions::run_transitions(args, output),
        Commands::Centrality(args) => {
            cmd::centrality::run_centrality(args, output, config.pagerank)
        }
        Commands::Communities(args) => {
            cmd::communities::run_communities(args, output, config.community)
        }
        Commands::Cycles(args) => {
            cmd::cycles::run_cycles(args, output, config.cycles.max_length)
        }
        Commands::Compare(args) => cmd::compare::run_compare(args, output),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = output::resolve_output_mode(cli.format, cli.json);

    if let Err(err) = run(&cli, output) {
        output::render_error(output, &cli_error(&err))?;
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from(["cadence", "stats", "song.txt", "--format", "json", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn compare_takes_two_inputs() {
        let cli = Cli::parse_from(["cadence", "compare", "a.txt", "b.json"]);
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.a, PathBuf::from("a.txt"));
        assert_eq!(args.b, PathBuf::from("b.json"));
    }

    #[test]
    fn empty_input_error_carries_code() {
        let err = Err::<(), _>(GraphError::EmptyInput)
            .context("Cannot build a graph from song.txt")
            .expect_err("error");
        let cli_err = cli_error(&err);
        assert_eq!(cli_err.error_code.as_deref(), Some("empty_input"));
        assert!(cli_err.message.contains("song.txt"));
    }

    #[test]
    fn other_errors_have_no_code() {
        let cli_err = cli_error(&anyhow::anyhow!("Failed to read song.txt"));
        assert!(cli_err.error_code.is_none());
    }
}
