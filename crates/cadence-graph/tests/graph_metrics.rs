//! Known-topology regression tests across every analysis.
//!
//! Each test uses a hand-crafted sequence with known properties. Expected
//! values are worked out by hand and hardcoded, so any algorithm change that
//! shifts them is caught.

use std::collections::HashMap;

use cadence_graph::community::{CommunityConfig, detect_communities, detect_communities_seeded};
use cadence_graph::compare::compare;
use cadence_graph::graph::{
    ChordNode, SequenceItem, Transition, TransitionGraph, enumerate_cycles,
    transition_probabilities,
};
use cadence_graph::metrics::{PageRankConfig, betweenness_centrality, centrality, pagerank};
use cadence_graph::GraphError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sequence(labels: &[&str]) -> TransitionGraph {
    let items: Vec<SequenceItem> = labels
        .iter()
        .map(|l| SequenceItem::new(*l, 0, ""))
        .collect();
    TransitionGraph::from_sequence(&items).expect("build graph")
}

fn from_edges(edges: &[(&str, &str)]) -> TransitionGraph {
    let labels: std::collections::BTreeSet<&str> =
        edges.iter().flat_map(|(a, b)| [*a, *b]).collect();
    TransitionGraph::from_parts(
        labels.into_iter().map(|label| ChordNode {
            label: label.to_string(),
            root: 0,
            quality: String::new(),
            count: 1,
        }),
        edges.iter().map(|(a, b)| Transition {
            from: (*a).to_string(),
            to: (*b).to_string(),
            weight: 1,
        }),
    )
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// [A, B, A, B, C]
// ---------------------------------------------------------------------------

#[test]
fn abab_c_builds_expected_counts() {
    let graph = sequence(&["A", "B", "A", "B", "C"]);

    let counts: HashMap<&str, u32> = graph
        .nodes()
        .map(|n| (n.label.as_str(), n.count))
        .collect();
    assert_eq!(counts, HashMap::from([("A", 2), ("B", 2), ("C", 1)]));

    let edges: HashMap<(String, String), u32> = graph
        .transitions()
        .map(|t| ((t.from, t.to), t.weight))
        .collect();
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[&("A".to_string(), "B".to_string())], 2);
    assert_eq!(edges[&("B".to_string(), "A".to_string())], 1);
    assert_eq!(edges[&("B".to_string(), "C".to_string())], 1);
}

#[test]
fn abab_c_pagerank_closed_form() {
    // A and C each receive half of B's mass plus the same teleport/dangling
    // share, so they tie exactly; B receives all of A's mass and ranks first.
    // "A above C" cannot hold strictly on this graph, so only A >= C is
    // asserted. Do not turn the tie into a strict inequality.
    //   a = c = 0.05 + 0.85 (b/2 + c/3),  b = 0.05 + 0.85 (a + c/3)
    //   ⇒ a = c = 0.07125 / 0.235,  b = 1 − 2a
    let graph = sequence(&["A", "B", "A", "B", "C"]);
    let scores = pagerank(&graph, &PageRankConfig::default());

    let a = 0.071_25 / 0.235;
    assert_close(scores["A"], a, "A");
    assert_close(scores["C"], a, "C");
    assert_close(scores["B"], 1.0 - 2.0 * a, "B");
    assert!(scores["B"] > scores["C"]);
    assert!(scores["A"] >= scores["C"]);
}

#[test]
fn abab_c_betweenness() {
    let bc = betweenness_centrality(&sequence(&["A", "B", "A", "B", "C"]));
    assert!(bc["B"] > 0.0, "B lies on A → C");
    assert_close(bc["B"], 1.0, "B");
    assert_close(bc["A"], 0.0, "A");
    assert_close(bc["C"], 0.0, "C");
}

#[test]
fn abab_c_probabilities() {
    let probs = transition_probabilities(&sequence(&["A", "B", "A", "B", "C"]));
    assert_close(probs["A"]["B"], 1.0, "A→B");
    assert_close(probs["B"]["A"], 0.5, "B→A");
    assert_close(probs["B"]["C"], 0.5, "B→C");
    assert!(probs["C"].is_empty());
}

// ---------------------------------------------------------------------------
// Degenerate graphs
// ---------------------------------------------------------------------------

#[test]
fn empty_sequence_is_an_error() {
    assert_eq!(
        TransitionGraph::from_sequence(&[]).expect_err("empty"),
        GraphError::EmptyInput
    );
}

#[test]
fn single_node_centrality() {
    let result = centrality(&sequence(&["Cmaj7"]), &PageRankConfig::default());
    assert_close(result.pagerank["Cmaj7"], 1.0, "pagerank");
    assert_close(result.betweenness["Cmaj7"], 0.0, "betweenness");
}

#[test]
fn zero_node_graph_is_well_defined_everywhere() {
    let empty = TransitionGraph::empty();

    let c = centrality(&empty, &PageRankConfig::default());
    assert!(c.pagerank.is_empty() && c.betweenness.is_empty());

    let communities = detect_communities(&empty, &CommunityConfig::default());
    assert_eq!(communities.num_communities, 0);

    let cmp = compare(&empty, &sequence(&["A", "B"]));
    assert_close(cmp.node_jaccard, 0.0, "node jaccard");
    assert_close(cmp.edge_jaccard, 0.0, "edge jaccard");
    assert_close(cmp.edge_cosine, 0.0, "cosine");

    assert!(enumerate_cycles(&empty, 6).is_empty());
    assert!(transition_probabilities(&empty).is_empty());
}

#[test]
fn zero_weight_transition_is_absent_for_every_analysis() {
    let graph = TransitionGraph::from_parts(
        ["A", "B", "C"].into_iter().map(|label| ChordNode {
            label: label.to_string(),
            root: 0,
            quality: String::new(),
            count: 1,
        }),
        [("A", "B", 0), ("B", "C", 1)].into_iter().map(|(from, to, weight)| Transition {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        }),
    );
    assert_eq!(graph.edge_count(), 1);

    // A has no outgoing transition anywhere: dangling for PageRank, no
    // probabilities, and B sits on no A → C path.
    let bc = betweenness_centrality(&graph);
    assert_close(bc["B"], 0.0, "B");
    assert!(transition_probabilities(&graph)["A"].is_empty());

    let scores = pagerank(&graph, &PageRankConfig::default());
    assert_close(scores["A"], scores["B"], "A and B both receive only teleport mass");
}

// ---------------------------------------------------------------------------
// Cycles
// ---------------------------------------------------------------------------

#[test]
fn three_cycle_bounds() {
    let graph = from_edges(&[("C", "A"), ("A", "B"), ("B", "C")]);
    assert_eq!(
        enumerate_cycles(&graph, 3),
        vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]]
    );
    assert_eq!(enumerate_cycles(&graph, 6).len(), 1);
    assert!(enumerate_cycles(&graph, 2).is_empty());
}

#[test]
fn progression_with_turnaround() {
    // ii–V–I–vi turnaround repeated, then a ii–V back to I.
    let graph = sequence(&["Dm7", "G7", "C", "Am", "Dm7", "G7", "C"]);
    let cycles = enumerate_cycles(&graph, 6);
    assert_eq!(
        cycles,
        vec![vec![
            "Am".to_string(),
            "Dm7".to_string(),
            "G7".to_string(),
            "C".to_string()
        ]]
    );
}

// ---------------------------------------------------------------------------
// Communities
// ---------------------------------------------------------------------------

#[test]
fn two_loops_joined_once_form_two_communities() {
    // Two progressions vamped repeatedly, bridged by a single transition.
    let graph = sequence(&[
        "C", "F", "C", "F", "C", "F", "C", "G", "D", "G", "D", "G", "D",
    ]);
    let result = detect_communities(&graph, &CommunityConfig::default());

    assert!(result.converged);
    assert_eq!(result.num_communities, 2);
    assert!(result.same_community("C", "F"));
    assert!(result.same_community("G", "D"));
    assert!(!result.same_community("C", "G"));
    assert_eq!(result.community("C"), Some(0), "first node gets id 0");

    let again = detect_communities_seeded(&graph, &result.assignments, &CommunityConfig::default());
    assert_eq!(again.assignments, result.assignments);
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[test]
fn transposed_progressions_share_nothing() {
    let in_c = sequence(&["C", "Am", "F", "G", "C"]);
    let in_d = sequence(&["D", "Bm", "G#", "A", "D"]);
    let cmp = compare(&in_c, &in_d);
    assert_close(cmp.node_jaccard, 0.0, "node");
    assert_close(cmp.edge_jaccard, 0.0, "edge");
}

#[test]
fn self_comparison_is_one() {
    let g = sequence(&["C", "Am", "F", "G", "C", "F", "G", "C"]);
    let cmp = compare(&g, &g);
    assert_close(cmp.node_jaccard, 1.0, "node");
    assert_close(cmp.edge_jaccard, 1.0, "edge");
    assert_close(cmp.edge_cosine, 1.0, "cosine");
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[test]
fn graph_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransitionGraph>();

    let graph = std::sync::Arc::new(sequence(&["A", "B", "C", "A", "C", "B"]));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = std::sync::Arc::clone(&graph);
            std::thread::spawn(move || pagerank(&graph, &PageRankConfig::default()))
        })
        .collect();

    let results: Vec<HashMap<String, f64>> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();
    for r in &results[1..] {
        assert_eq!(r, &results[0], "identical inputs give identical scores");
    }
}
