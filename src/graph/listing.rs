// SPDX-License-Identifier: MIT

//! Graph listings - the `{nodes, edges}` documents a workflow-introspection
//! facility dumps
//!
//! ```json
//! { "nodes": ["A", {"id": "B"}], "edges": [["A", "B"], {"source": "A", "target": "B"}] }
//! ```

use serde::{Deserialize, Serialize};

use super::types::{Edge, Graph};
use crate::error::GraphError;

/// A node entry: bare name or an object carrying an `id`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum NodeEntry {
    Name(String),
    Object { id: String },
}

impl NodeEntry {
    pub fn name(&self) -> &str {
        match self {
            NodeEntry::Name(name) => name,
            NodeEntry::Object { id } => id,
        }
    }
}

/// An edge entry: `[source, target]` or an object with `source`/`target`
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EdgeEntry {
    Pair(String, String),
    Object {
        source: String,
        target: String,
        /// Conditional edges are compared like any other edge
        #[serde(default)]
        conditional: bool,
    },
}

impl From<EdgeEntry> for Edge {
    fn from(entry: EdgeEntry) -> Self {
        match entry {
            EdgeEntry::Pair(source, target) => Edge::new(source, target),
            EdgeEntry::Object { source, target, .. } => Edge::new(source, target),
        }
    }
}

/// A raw, unvalidated graph listing
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct GraphListing {
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
}

impl GraphListing {
    /// Read a listing out of an arbitrary JSON value.
    ///
    /// Both collections are required; anything else is a malformed input.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, GraphError> {
        let obj = value.as_object().ok_or_else(|| {
            GraphError::MalformedGraph(format!(
                "expected an object with 'nodes' and 'edges', got {}",
                json_type_name(value)
            ))
        })?;

        let nodes = obj
            .get("nodes")
            .ok_or_else(|| GraphError::MalformedGraph("missing 'nodes' collection".to_string()))?;
        let edges = obj
            .get("edges")
            .ok_or_else(|| GraphError::MalformedGraph("missing 'edges' collection".to_string()))?;

        let nodes: Vec<NodeEntry> = serde_json::from_value(nodes.clone())
            .map_err(|e| GraphError::MalformedGraph(format!("invalid 'nodes': {}", e)))?;
        let edges: Vec<EdgeEntry> = serde_json::from_value(edges.clone())
            .map_err(|e| GraphError::MalformedGraph(format!("invalid 'edges': {}", e)))?;

        Ok(Self { nodes, edges })
    }

    /// Validate into a [`Graph`]
    pub fn into_graph(self) -> Result<Graph, GraphError> {
        Graph::new(
            self.nodes.iter().map(|n| n.name().to_string()),
            self.edges.into_iter().map(Edge::from),
        )
    }
}

impl From<&Graph> for GraphListing {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().iter().cloned().map(NodeEntry::Name).collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeEntry::Pair(e.source.clone(), e.target.clone()))
                .collect(),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
