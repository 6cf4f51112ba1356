//! `cadence communities`: label-propagation clusters of the transition graph.

use std::io::Write;
use std::path::PathBuf;

use cadence_graph::{CommunityConfig, CommunityResult, detect_communities};
use clap::Args;
use serde::Serialize;

use crate::input::load_graph;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `cadence communities`.
#[derive(Args, Debug)]
pub struct CommunitiesArgs {
    /// Sequence file (`.json` array of items, or whitespace-separated labels).
    pub input: PathBuf,

    /// Cap on propagation passes. Overrides the config file.
    #[arg(long)]
    pub max_iterations: Option<usize>,
}

#[derive(Debug, Serialize)]
struct CommunityGroup {
    id: usize,
    members: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CommunitiesOutput {
    num_communities: usize,
    iterations: usize,
    converged: bool,
    communities: Vec<CommunityGroup>,
}

impl CommunitiesOutput {
    fn from_result(result: &CommunityResult) -> Self {
        let communities = (0..result.num_communities)
            .map(|id| CommunityGroup {
                id,
                members: result.members(id).into_iter().map(str::to_string).collect(),
            })
            .collect();
        Self {
            num_communities: result.num_communities,
            iterations: result.iterations,
            converged: result.converged,
            communities,
        }
    }
}

/// Execute `cadence communities`.
pub fn run_communities(
    args: &CommunitiesArgs,
    output: OutputMode,
    base: CommunityConfig,
) -> anyhow::Result<()> {
    let config = CommunityConfig {
        max_iterations: args.max_iterations.unwrap_or(base.max_iterations),
    };
    let graph = load_graph(&args.input)?;
    let result = detect_communities(&graph, &config);
    let payload = CommunitiesOutput::from_result(&result);
    render_mode(output, &payload, render_communities_text, render_communities_pretty)
}

fn render_communities_text(payload: &CommunitiesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for group in &payload.communities {
        writeln!(w, "{}\t{}", group.id, group.members.join(" "))?;
    }
    Ok(())
}

fn render_communities_pretty(
    payload: &CommunitiesOutput,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(w, &format!("Communities ({})", payload.num_communities))?;
    let status = if payload.converged {
        format!("converged after {} passes", payload.iterations)
    } else {
        format!("stopped after {} passes", payload.iterations)
    };
    pretty_kv(w, "propagation", status)?;
    for group in &payload.communities {
        writeln!(
            w,
            "\n  #{} ({} members)\n    {}",
            group.id,
            group.members.len(),
            group.members.join(", ")
        )?;
    }
    Ok(())
}
