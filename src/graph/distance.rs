// SPDX-License-Identifier: MIT

//! Structural edit distance between two directed graphs
//!
//! Each node present in only one graph costs 1 and each edge present in only
//! one graph costs 1, under the node correspondence. The result is not
//! normalized; callers cap and scale it (see [`crate::scoring`]).

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::correspondence::{AliasTable, Correspondence};
use super::types::{Edge, Graph};
use crate::error::GraphError;

/// How edges with an unmatched endpoint are charged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedEdgePolicy {
    /// Charge the edge once as an insertion/deletion (standard edit distance)
    #[default]
    Count,
    /// Fold the edge into its endpoint's node cost
    Ignore,
}

/// Per-category breakdown of an edit distance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphDistance {
    /// Candidate nodes with no reference counterpart
    pub extra_nodes: BTreeSet<String>,
    /// Reference nodes with no candidate counterpart
    pub missing_nodes: BTreeSet<String>,
    /// Candidate edges with no reference counterpart
    pub extra_edges: BTreeSet<Edge>,
    /// Reference edges with no candidate counterpart
    pub missing_edges: BTreeSet<Edge>,
}

impl GraphDistance {
    pub fn node_cost(&self) -> usize {
        self.extra_nodes.len() + self.missing_nodes.len()
    }

    pub fn edge_cost(&self) -> usize {
        self.extra_edges.len() + self.missing_edges.len()
    }

    /// Total edit distance
    pub fn total(&self) -> usize {
        self.node_cost() + self.edge_cost()
    }

    pub fn is_identical(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for GraphDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "distance {} (nodes: +{} -{}, edges: +{} -{})",
            self.total(),
            self.extra_nodes.len(),
            self.missing_nodes.len(),
            self.extra_edges.len(),
            self.missing_edges.len()
        )
    }
}

/// Configurable graph comparator
#[derive(Debug, Clone, Default)]
pub struct GraphComparator {
    aliases: AliasTable,
    unmatched_edges: UnmatchedEdgePolicy,
}

impl GraphComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_unmatched_edges(mut self, policy: UnmatchedEdgePolicy) -> Self {
        self.unmatched_edges = policy;
        self
    }

    /// Compare `candidate` against `reference`
    pub fn compare(&self, candidate: &Graph, reference: &Graph) -> Result<GraphDistance, GraphError> {
        let corr = Correspondence::with_aliases(candidate, reference, &self.aliases)?;
        let aligned = corr.aligned_candidate();

        let charge = |edge: &Edge| match self.unmatched_edges {
            UnmatchedEdgePolicy::Count => true,
            UnmatchedEdgePolicy::Ignore => {
                corr.is_matched(&edge.source) && corr.is_matched(&edge.target)
            }
        };

        let extra_edges = aligned
            .edges()
            .difference(reference.edges())
            .filter(|e| charge(*e))
            .cloned()
            .collect();
        let missing_edges = reference
            .edges()
            .difference(aligned.edges())
            .filter(|e| charge(*e))
            .cloned()
            .collect();

        let distance = GraphDistance {
            extra_nodes: corr.extra_nodes().clone(),
            missing_nodes: corr.missing_nodes().clone(),
            extra_edges,
            missing_edges,
        };
        log::debug!("Compared graphs: {}", distance);
        Ok(distance)
    }
}

/// Edit distance under exact-name correspondence and default costs
pub fn compute_graph_distance(candidate: &Graph, reference: &Graph) -> Result<usize, GraphError> {
    GraphComparator::new()
        .compare(candidate, reference)
        .map(|d| d.total())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_EDGES: [(&str, &str); 0] = [];

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
        Graph::from_pairs(nodes.iter().copied(), edges.iter().copied()).unwrap()
    }

    #[test]
    fn test_identical_graphs() {
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(compute_graph_distance(&g, &g).unwrap(), 0);
    }

    #[test]
    fn test_empty_graphs() {
        assert_eq!(
            compute_graph_distance(&Graph::empty(), &Graph::empty()).unwrap(),
            0
        );
    }

    #[test]
    fn test_missing_edge() {
        let reference = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let candidate = graph(&["A", "B", "C"], &[("A", "B")]);

        let d = GraphComparator::new().compare(&candidate, &reference).unwrap();
        assert_eq!(d.total(), 1);
        assert!(d.missing_edges.contains(&Edge::new("B", "C")));
    }

    #[test]
    fn test_extra_node_and_edge() {
        let reference = graph(&["A", "B"], &[("A", "B")]);
        let candidate = graph(&["A", "B", "D"], &[("A", "B"), ("B", "D")]);

        let d = GraphComparator::new().compare(&candidate, &reference).unwrap();
        assert_eq!(d.total(), 2);
        assert_eq!(d.node_cost(), 1);
        assert_eq!(d.edge_cost(), 1);
        assert!(d.extra_nodes.contains("D"));
        assert!(d.extra_edges.contains(&Edge::new("B", "D")));
    }

    #[test]
    fn test_ignore_policy_absorbs_unmatched_edges() {
        let reference = graph(&["A", "B"], &[("A", "B")]);
        let candidate = graph(&["A", "B", "D"], &[("A", "B"), ("B", "D")]);

        let d = GraphComparator::new()
            .with_unmatched_edges(UnmatchedEdgePolicy::Ignore)
            .compare(&candidate, &reference)
            .unwrap();
        assert_eq!(d.total(), 1);
        assert!(d.extra_edges.is_empty());
    }

    #[test]
    fn test_ignore_policy_still_counts_matched_edges() {
        let reference = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let candidate = graph(&["A", "B", "C"], &[("A", "B"), ("A", "C")]);

        let d = GraphComparator::new()
            .with_unmatched_edges(UnmatchedEdgePolicy::Ignore)
            .compare(&candidate, &reference)
            .unwrap();
        assert_eq!(d.total(), 2);
    }

    #[test]
    fn test_symmetry() {
        let a = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let b = graph(&["A", "C", "E"], &[("A", "C"), ("C", "E"), ("E", "E")]);
        assert_eq!(
            compute_graph_distance(&a, &b).unwrap(),
            compute_graph_distance(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_isolated_extra_node_adds_one() {
        let reference = graph(&["A", "B"], &[("A", "B")]);
        let base = graph(&["A", "B", "C"], &[("B", "A")]);
        let baseline = compute_graph_distance(&base, &reference).unwrap();

        let with_extra = graph(&["A", "B", "C", "X"], &[("B", "A")]);
        assert_eq!(
            compute_graph_distance(&with_extra, &reference).unwrap(),
            baseline + 1
        );
    }

    #[test]
    fn test_removed_reference_edge_adds_one() {
        let reference = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
        let full = reference.clone();
        let fewer = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);

        let baseline = compute_graph_distance(&full, &reference).unwrap();
        assert_eq!(compute_graph_distance(&fewer, &reference).unwrap(), baseline + 1);
    }

    #[test]
    fn test_reversed_edge_costs_two() {
        let reference = graph(&["A", "B"], &[("A", "B")]);
        let candidate = graph(&["A", "B"], &[("B", "A")]);
        assert_eq!(compute_graph_distance(&candidate, &reference).unwrap(), 2);
    }

    #[test]
    fn test_disjoint_graphs() {
        let reference = graph(&["A", "B"], &[("A", "B")]);
        let candidate = graph(&["X"], NO_EDGES.as_slice());
        // 2 missing nodes, 1 extra node, 1 missing edge
        assert_eq!(compute_graph_distance(&candidate, &reference).unwrap(), 4);
    }

    #[test]
    fn test_zero_only_when_identical() {
        let reference = graph(&["A", "B"], &[("A", "B")]);
        let self_loop = graph(&["A", "B"], &[("A", "B"), ("A", "A")]);
        assert_eq!(compute_graph_distance(&self_loop, &reference).unwrap(), 1);
    }

    #[test]
    fn test_aliases_make_renamed_graph_identical() {
        let reference = graph(&["write_query", "execute"], &[("write_query", "execute")]);
        let candidate = graph(&["gen_sql", "execute"], &[("gen_sql", "execute")]);
        assert_eq!(compute_graph_distance(&candidate, &reference).unwrap(), 4);

        let aliases = AliasTable::from_pairs([("gen_sql", "write_query")]).unwrap();
        let d = GraphComparator::new()
            .with_aliases(aliases)
            .compare(&candidate, &reference)
            .unwrap();
        assert!(d.is_identical());
    }

    #[test]
    fn test_display() {
        let reference = graph(&["A", "B"], &[("A", "B")]);
        let candidate = graph(&["A", "B", "D"], &[("A", "B"), ("B", "D")]);
        let d = GraphComparator::new().compare(&candidate, &reference).unwrap();
        assert_eq!(d.to_string(), "distance 2 (nodes: +1 -0, edges: +1 -0)");
    }
}
