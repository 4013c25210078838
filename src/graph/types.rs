// SPDX-License-Identifier: MIT

//! Graph type definitions
//!
//! A [`Graph`] is an immutable snapshot of a workflow's topology: a set of
//! uniquely named nodes plus a set of directed edges between them. Ordered
//! sets keep iteration, rendering and diffs deterministic.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::GraphError;

/// Pseudo-node marking where a workflow starts
pub const START_NODE: &str = "__start__";
/// Pseudo-node marking where a workflow ends
pub const END_NODE: &str = "__end__";

/// A directed edge between two named nodes
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether the edge starts and ends on the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// A validated directed graph
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Graph {
    nodes: BTreeSet<String>,
    edges: BTreeSet<Edge>,
}

impl Graph {
    /// Build a graph, rejecting duplicate node names and dangling edges.
    ///
    /// Duplicate edges collapse into one. Self-loops are kept as ordinary edges.
    pub fn new<N, E>(nodes: N, edges: E) -> Result<Self, GraphError>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator<Item = Edge>,
    {
        let mut node_set = BTreeSet::new();
        for node in nodes {
            let node = node.into();
            if !node_set.insert(node.clone()) {
                return Err(GraphError::DuplicateNode(node));
            }
        }

        let mut edge_set = BTreeSet::new();
        for edge in edges {
            for endpoint in [&edge.source, &edge.target] {
                if !node_set.contains(endpoint) {
                    return Err(GraphError::InvalidGraph {
                        source_node: edge.source.clone(),
                        target: edge.target.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
            edge_set.insert(edge);
        }

        Ok(Self {
            nodes: node_set,
            edges: edge_set,
        })
    }

    /// Convenience constructor from string pairs
    pub fn from_pairs<'a, N, E>(nodes: N, edges: E) -> Result<Self, GraphError>
    where
        N: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::new(nodes, edges.into_iter().map(|(s, t)| Edge::new(s, t)))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &BTreeSet<String> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains(&Edge::new(source, target))
    }

    /// Rename every node through `rename`, keeping edges attached.
    ///
    /// The caller guarantees `rename` is injective over this graph's nodes.
    pub(crate) fn relabel<F>(&self, rename: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        Self {
            nodes: self.nodes.iter().map(|n| rename(n.as_str())).collect(),
            edges: self
                .edges
                .iter()
                .map(|e| Edge::new(rename(e.source.as_str()), rename(e.target.as_str())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_EDGES: [(&str, &str); 0] = [];

    #[test]
    fn test_build_graph() {
        let graph = Graph::from_pairs(["A", "B", "C"], [("A", "B"), ("B", "C")]).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge("A", "B"));
        assert!(!graph.contains_edge("B", "A"));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new(Vec::<String>::new(), Vec::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph, Graph::empty());
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let result = Graph::from_pairs(["A"], [("A", "B")]);
        assert_eq!(
            result.unwrap_err(),
            GraphError::InvalidGraph {
                source_node: "A".to_string(),
                target: "B".to_string(),
                missing: "B".to_string(),
            }
        );
    }

    #[test]
    fn test_dangling_source_rejected() {
        let result = Graph::from_pairs(["B"], [("A", "B")]);
        assert!(matches!(
            result,
            Err(GraphError::InvalidGraph { ref missing, .. }) if missing == "A"
        ));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let result = Graph::from_pairs(["A", "A"], NO_EDGES);
        assert_eq!(result.unwrap_err(), GraphError::DuplicateNode("A".to_string()));
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let graph = Graph::from_pairs(["A", "B"], [("A", "B"), ("A", "B")]).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_kept() {
        let graph = Graph::from_pairs(["A"], [("A", "A")]).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.edges().iter().next().unwrap().is_self_loop());
    }

    #[test]
    fn test_relabel() {
        let graph = Graph::from_pairs(["a", "b"], [("a", "b")]).unwrap();
        let renamed = graph.relabel(|n| n.to_uppercase());
        assert!(renamed.contains_node("A"));
        assert!(renamed.contains_edge("A", "B"));
    }
}
