//! `cadence stats`: structural summary of a transition graph.

use std::io::Write;
use std::path::PathBuf;

use cadence_graph::GraphStats;
use clap::Args;
use serde::Serialize;

use crate::input::load_graph;
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `cadence stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Sequence file (`.json` array of items, or whitespace-separated labels).
    pub input: PathBuf,
}

/// Report payload for `cadence stats`.
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub content_hash: String,
    #[serde(flatten)]
    pub stats: GraphStats,
}

/// Execute `cadence stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input)?;
    let payload = StatsOutput {
        content_hash: graph.content_hash().to_string(),
        stats: GraphStats::from_graph(&graph),
    };
    render_mode(output, &payload, render_stats_text, render_stats_pretty)
}

fn stat_rows(stats: &GraphStats) -> [(&'static str, String); 10] {
    [
        ("nodes", stats.node_count.to_string()),
        ("edges", stats.edge_count.to_string()),
        ("transitions", stats.total_transitions.to_string()),
        ("density", fmt_score(stats.density)),
        ("self_loops", stats.self_loops.to_string()),
        ("dangling", stats.dangling_nodes.to_string()),
        ("strong_components", stats.scc_count.to_string()),
        ("weak_components", stats.weakly_connected_component_count.to_string()),
        ("max_in_degree", stats.max_in_degree.to_string()),
        ("max_out_degree", stats.max_out_degree.to_string()),
    ]
}

fn render_stats_text(payload: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "hash\t{}", payload.content_hash)?;
    for (key, value) in stat_rows(&payload.stats) {
        writeln!(w, "{key}\t{value}")?;
    }
    Ok(())
}

fn render_stats_pretty(payload: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph statistics")?;
    pretty_kv(w, "hash", &payload.content_hash)?;
    for (key, value) in stat_rows(&payload.stats) {
        pretty_kv(w, &key.replace('_', " "), value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_graph::{SequenceItem, TransitionGraph};

    fn payload() -> StatsOutput {
        let items: Vec<SequenceItem> = ["C", "G", "C", "F"]
            .iter()
            .map(|l| SequenceItem::new(*l, 0, ""))
            .collect();
        let graph = TransitionGraph::from_sequence(&items).expect("graph");
        StatsOutput {
            content_hash: graph.content_hash().to_string(),
            stats: GraphStats::from_graph(&graph),
        }
    }

    #[test]
    fn text_rows_are_tab_separated() {
        let mut out = Vec::new();
        render_stats_text(&payload(), &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("nodes\t3\n"));
        assert!(rendered.contains("edges\t3\n"));
        assert!(rendered.contains("dangling\t1\n"));
    }

    #[test]
    fn pretty_has_heading() {
        let mut out = Vec::new();
        render_stats_pretty(&payload(), &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.starts_with("Graph statistics\n"));
        assert!(rendered.contains("max out degree:"));
    }

    #[test]
    fn json_flattens_stats() {
        let json = serde_json::to_value(payload()).expect("json");
        assert_eq!(json["node_count"], 3);
        assert!(json["content_hash"].as_str().is_some_and(|h| h.starts_with("blake3:")));
    }
}
