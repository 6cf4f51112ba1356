//! `cadence transitions`: observed transitions with their probabilities.

use std::io::Write;
use std::path::PathBuf;

use cadence_graph::TransitionGraph;
use cadence_graph::graph::transition_probability;
use clap::Args;
use serde::Serialize;

use crate::input::load_graph;
use crate::output::{OutputMode, fmt_score, pretty_section, render_mode};

/// Arguments for `cadence transitions`.
#[derive(Args, Debug)]
pub struct TransitionsArgs {
    /// Sequence file (`.json` array of items, or whitespace-separated labels).
    pub input: PathBuf,

    /// Only show transitions leaving this label.
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Debug, Serialize)]
struct TransitionRow {
    from: String,
    to: String,
    weight: u32,
    probability: f64,
}

#[derive(Debug, Serialize)]
struct TransitionsOutput {
    transitions: Vec<TransitionRow>,
}

/// Execute `cadence transitions`.
pub fn run_transitions(args: &TransitionsArgs, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_graph(&args.input)?;
    if let Some(ref from) = args.from
        && graph.node(from).is_none()
    {
        anyhow::bail!("label '{from}' does not occur in {}", args.input.display());
    }

    let payload = TransitionsOutput {
        transitions: transition_rows(&graph, args.from.as_deref()),
    };
    render_mode(output, &payload, render_transitions_text, render_transitions_pretty)
}

/// Rows in edge order, optionally restricted to one source label.
fn transition_rows(graph: &TransitionGraph, from: Option<&str>) -> Vec<TransitionRow> {
    graph
        .transitions()
        .filter(|t| from.is_none_or(|f| t.from == f))
        .map(|t| {
            let probability = transition_probability(graph, &t.from, &t.to).unwrap_or(0.0);
            TransitionRow {
                from: t.from,
                to: t.to,
                weight: t.weight,
                probability,
            }
        })
        .collect()
}

fn render_transitions_text(payload: &TransitionsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.transitions {
        writeln!(w, "{}\t{}\t{}\t{}", row.from, row.to, row.weight, fmt_score(row.probability))?;
    }
    Ok(())
}

fn render_transitions_pretty(
    payload: &TransitionsOutput,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(w, &format!("Transitions ({})", payload.transitions.len()))?;
    let width = payload
        .transitions
        .iter()
        .map(|row| row.from.len() + row.to.len() + 4)
        .max()
        .unwrap_or(0);
    for row in &payload.transitions {
        let arrow = format!("{} -> {}", row.from, row.to);
        writeln!(
            w,
            "  {arrow:<width$}  x{:<5} p={}",
            row.weight,
            fmt_score(row.probability)
        )?;
    }
    Ok(())
}
