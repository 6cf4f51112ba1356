//! `cadence centrality`: PageRank and betweenness rankings.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use cadence_graph::{PageRankConfig, centrality};
use clap::Args;
use serde::Serialize;

use crate::input::load_graph;
use crate::output::{OutputMode, fmt_score, pretty_section, render_mode};

/// Arguments for `cadence centrality`.
#[derive(Args, Debug)]
pub struct CentralityArgs {
    /// Sequence file (`.json` array of items, or whitespace-separated labels).
    pub input: PathBuf,

    /// PageRank damping factor in (0, 1]. Overrides the config file.
    #[arg(long)]
    pub damping: Option<f64>,

    /// Number of power iterations. Overrides the config file.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Show at most this many labels per ranking.
    #[arg(long)]
    pub top: Option<usize>,
}

impl CentralityArgs {
    /// Apply flag overrides on top of the configured PageRank settings.
    pub fn pagerank_config(&self, base: PageRankConfig) -> anyhow::Result<PageRankConfig> {
        let config = PageRankConfig {
            damping: self.damping.unwrap_or(base.damping),
            iterations: self.iterations.unwrap_or(base.iterations),
        };
        config.validate().context("invalid PageRank settings")?;
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
struct Ranked {
    label: String,
    score: f64,
}

#[derive(Debug, Serialize)]
struct CentralityOutput {
    damping: f64,
    iterations: usize,
    pagerank: Vec<Ranked>,
    betweenness: Vec<Ranked>,
}

/// Execute `cadence centrality`.
pub fn run_centrality(
    args: &CentralityArgs,
    output: OutputMode,
    base: PageRankConfig,
) -> anyhow::Result<()> {
    let config = args.pagerank_config(base)?;
    let graph = load_graph(&args.input)?;
    let result = centrality(&graph, &config);

    let limit = args.top.unwrap_or(usize::MAX);
    let collect = |ranked: Vec<(&str, f64)>| -> Vec<Ranked> {
        ranked
            .into_iter()
            .take(limit)
            .map(|(label, score)| Ranked {
                label: label.to_string(),
                score,
            })
            .collect()
    };

    let payload = CentralityOutput {
        damping: config.damping,
        iterations: config.iterations,
        pagerank: collect(result.ranked_by_pagerank()),
        betweenness: collect(result.ranked_by_betweenness()),
    };
    render_mode(output, &payload, render_centrality_text, render_centrality_pretty)
}

fn render_centrality_text(payload: &CentralityOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.pagerank {
        writeln!(w, "pagerank\t{}\t{}", row.label, row.score)?;
    }
    for row in &payload.betweenness {
        writeln!(w, "betweenness\t{}\t{}", row.label, row.score)?;
    }
    Ok(())
}

fn render_centrality_pretty(payload: &CentralityOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "PageRank (damping {}, {} iterations)",
            payload.damping, payload.iterations
        ),
    )?;
    for (rank, row) in payload.pagerank.iter().enumerate() {
        writeln!(w, "  {:>3}. {:<16} {}", rank + 1, row.label, fmt_score(row.score))?;
    }

    writeln!(w)?;
    pretty_section(w, "Betweenness")?;
    for (rank, row) in payload.betweenness.iter().enumerate() {
        writeln!(w, "  {:>3}. {:<16} {}", rank + 1, row.label, fmt_score(row.score))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: CentralityArgs,
    }

    #[test]
    fn flags_override_config() {
        let parsed = Wrapper::parse_from(["test", "song.txt", "--damping", "0.5"]);
        let config = parsed
            .args
            .pagerank_config(PageRankConfig {
                damping: 0.85,
                iterations: 7,
            })
            .expect("valid");
        assert!((config.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.iterations, 7);
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let parsed = Wrapper::parse_from(["test", "song.txt", "--damping", "1.5"]);
        assert!(parsed.args.pagerank_config(PageRankConfig::default()).is_err());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let parsed = Wrapper::parse_from(["test", "song.txt", "--iterations", "0"]);
        let err = parsed
            .args
            .pagerank_config(PageRankConfig::default())
            .expect_err("zero");
        assert!(
            err.downcast_ref::<cadence_graph::GraphError>()
                .is_some_and(|e| *e == cadence_graph::GraphError::ZeroIterations)
        );
    }
}
