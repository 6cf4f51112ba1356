//! `cadence analyze`: every analysis over one sequence.

use std::io::Write;
use std::path::PathBuf;

use cadence_graph::{AnalysisConfig, AnalysisReport};
use clap::Args;

use crate::input::load_graph;
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

/// Rankings shown in pretty output.
const PRETTY_TOP: usize = 5;

/// Arguments for `cadence analyze`.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Sequence file (`.json` array of items, or whitespace-separated labels).
    pub input: PathBuf,
}

/// Execute `cadence analyze`.
pub fn run_analyze(
    args: &AnalyzeArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let graph = load_graph(&args.input)?;
    let report = AnalysisReport::run(&graph, config);
    render_mode(output, &report, render_analyze_text, render_analyze_pretty)
}

fn render_analyze_text(report: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "hash\t{}", report.content_hash)?;
    writeln!(w, "nodes\t{}", report.stats.node_count)?;
    writeln!(w, "edges\t{}", report.stats.edge_count)?;
    for (label, score) in report.centrality.ranked_by_pagerank() {
        writeln!(w, "pagerank\t{label}\t{score}")?;
    }
    for (label, score) in report.centrality.ranked_by_betweenness() {
        writeln!(w, "betweenness\t{label}\t{score}")?;
    }
    for id in 0..report.communities.num_communities {
        writeln!(w, "community\t{id}\t{}", report.communities.members(id).join(" "))?;
    }
    for cycle in &report.cycles {
        writeln!(w, "cycle\t{}", cycle.join(" "))?;
    }
    Ok(())
}

fn render_analyze_pretty(report: &AnalysisReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Overview")?;
    pretty_kv(w, "hash", &report.content_hash)?;
    pretty_kv(w, "chords", report.stats.node_count.to_string())?;
    pretty_kv(w, "transitions", report.stats.total_transitions.to_string())?;
    pretty_kv(w, "distinct edges", report.stats.edge_count.to_string())?;
    pretty_kv(w, "density", fmt_score(report.stats.density))?;

    writeln!(w)?;
    pretty_section(w, "Most central")?;
    for (label, score) in report.centrality.ranked_by_pagerank().into_iter().take(PRETTY_TOP) {
        let between = report.centrality.betweenness.get(label).copied().unwrap_or(0.0);
        writeln!(
            w,
            "  {label:<16} pagerank {}  betweenness {}",
            fmt_score(score),
            fmt_score(between)
        )?;
    }

    writeln!(w)?;
    pretty_section(w, &format!("Communities ({})", report.communities.num_communities))?;
    for id in 0..report.communities.num_communities {
        writeln!(w, "  #{id}: {}", report.communities.members(id).join(", "))?;
    }

    writeln!(w)?;
    pretty_section(w, &format!("Cycles ({})", report.cycles.len()))?;
    for cycle in &report.cycles {
        writeln!(w, "  {}", cycle.join(" -> "))?;
    }
    Ok(())
}
