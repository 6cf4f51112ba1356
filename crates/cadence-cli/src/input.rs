//! Reading chord sequences from disk.
//!
//! `.json` files hold an array of [`SequenceItem`] objects. Any other file is
//! treated as whitespace-separated labels with root 0 and an empty quality.

use std::path::Path;

use anyhow::Context;
use cadence_graph::{SequenceItem, TransitionGraph};
use tracing::debug;

/// Parse sequence items out of file contents, choosing the format by extension.
pub fn parse_sequence(path: &Path, content: &str) -> anyhow::Result<Vec<SequenceItem>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(content)
            .with_context(|| format!("Failed to parse {} as a JSON sequence", path.display()))
    } else {
        Ok(content
            .split_whitespace()
            .map(|label| SequenceItem::new(label, 0, ""))
            .collect())
    }
}

/// Read a sequence file.
pub fn read_sequence(path: &Path) -> anyhow::Result<Vec<SequenceItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let items = parse_sequence(path, &content)?;
    debug!(path = %path.display(), items = items.len(), "read sequence");
    Ok(items)
}

/// Read a sequence file and build its transition graph.
pub fn load_graph(path: &Path) -> anyhow::Result<TransitionGraph> {
    let items = read_sequence(path)?;
    TransitionGraph::from_sequence(&items)
        .with_context(|| format!("Cannot build a graph from {}", path.display()))
}
