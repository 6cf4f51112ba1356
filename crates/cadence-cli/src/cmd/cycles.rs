//! `cadence cycles`: recurring progressions (simple cycles up to a length).

use std::io::Write;
use std::path::PathBuf;

use cadence_graph::graph::enumerate_cycles;
use clap::Args;
use serde::Serialize;

use crate::input::load_graph;
use crate::output::{OutputMode, pretty_section, render_mode};

/// Arguments for `cadence cycles`.
#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// Sequence file (`.json` array of items, or whitespace-separated labels).
    pub input: PathBuf,

    /// Longest cycle to report, in nodes. Overrides the config file.
    #[arg(long)]
    pub max_length: Option<usize>,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    max_length: usize,
    cycles: Vec<Vec<String>>,
}

/// Execute `cadence cycles`.
pub fn run_cycles(args: &CyclesArgs, output: OutputMode, base_max: usize) -> anyhow::Result<()> {
    let max_length = args.max_length.unwrap_or(base_max);
    let graph = load_graph(&args.input)?;
    let payload = CyclesOutput {
        max_length,
        cycles: enumerate_cycles(&graph, max_length),
    };
    render_mode(output, &payload, render_cycles_text, render_cycles_pretty)
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for cycle in &payload.cycles {
        writeln!(w, "{}", cycle.join(" "))?;
    }
    Ok(())
}

fn render_cycles_pretty(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No cycles of length <= {}.", payload.max_length)?;
        return Ok(());
    }

    pretty_section(w, &format!("Cycles ({})", payload.cycles.len()))?;
    for cycle in &payload.cycles {
        let first = cycle.first().map_or("", String::as_str);
        writeln!(w, "  {} -> {first}", cycle.join(" -> "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_closes_the_loop() {
        let payload = CyclesOutput {
            max_length: 6,
            cycles: vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]],
        };
        let mut out = Vec::new();
        render_cycles_pretty(&payload, &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("A -> B -> C -> A"));
    }

    #[test]
    fn pretty_reports_no_cycles() {
        let payload = CyclesOutput {
            max_length: 2,
            cycles: Vec::new(),
        };
        let mut out = Vec::new();
        render_cycles_pretty(&payload, &mut out).expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "No cycles of length <= 2.\n");
    }
}
