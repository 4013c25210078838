// SPDX-License-Identifier: MIT

//! Typed error handling for graphscore-rs
//!
//! Graph construction and comparison fail fast with [`GraphError`]; workflow
//! reduction fails with [`WorkflowError`]. Both roll up into [`GraderError`].

use thiserror::Error;

/// Top-level error type for graphscore-rs
#[derive(Debug, Error)]
pub enum GraderError {
    /// Malformed or inconsistent graph input
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Workflow definition could not be reduced to a graph
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Configuration errors (bad env vars, invalid score constants)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised while building or comparing graphs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references a node absent from its own graph
    #[error("Invalid graph: edge {source_node} -> {target} references unknown node '{missing}'")]
    InvalidGraph {
        source_node: String,
        target: String,
        missing: String,
    },

    /// The same node name appears twice in one graph
    #[error("Duplicate node '{0}'")]
    DuplicateNode(String),

    /// Input is not graph-shaped (missing node or edge collection, wrong types)
    #[error("Malformed graph input: {0}")]
    MalformedGraph(String),

    /// Two candidate nodes would map onto the same reference node
    #[error("Alias table is not injective: '{first}' and '{second}' both map to '{target}'")]
    NonInjectiveAlias {
        first: String,
        second: String,
        target: String,
    },

    /// One candidate node was given two different reference names
    #[error("Alias for '{name}' is ambiguous: mapped to both '{first}' and '{second}'")]
    ConflictingAlias {
        name: String,
        first: String,
        second: String,
    },
}

/// Workflow-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Missing agent in Direct workflow
    #[error("Missing agent definition in Direct workflow")]
    MissingAgent,

    /// Missing workflow definition in Composite workflow
    #[error("Missing workflow definition in Composite workflow")]
    MissingWorkflow,

    /// Missing graph definition in Graph workflow
    #[error("Missing graph definition in Graph workflow")]
    MissingGraph,

    /// Unknown workflow kind
    #[error("Unknown workflow kind: {0}")]
    UnknownKind(String),

    /// Invalid execution mode
    #[error("Invalid execution mode: {0}")]
    InvalidExecutionMode(String),

    /// Two graph nodes share an id
    #[error("Duplicate node id in workflow: {0}")]
    DuplicateNodeId(String),
}

impl GraderError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Short name of the error variant, used in scorecard messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Graph(GraphError::InvalidGraph { .. }) => "InvalidGraphError",
            Self::Graph(GraphError::MalformedGraph(_)) => "MalformedGraphError",
            Self::Graph(_) => "GraphError",
            Self::Workflow(_) => "WorkflowError",
            Self::Config(_) => "ConfigError",
            Self::Io(_) => "IoError",
            Self::Json(_) => "JsonError",
            Self::Yaml(_) => "YamlError",
        }
    }

    /// Message of the underlying error, without the category prefix that
    /// [`kind`](Self::kind) already names
    pub fn detail(&self) -> String {
        match self {
            Self::Graph(e) => e.to_string(),
            Self::Workflow(e) => e.to_string(),
            Self::Config(msg) => msg.clone(),
            Self::Io(e) => e.to_string(),
            Self::Json(e) => e.to_string(),
            Self::Yaml(e) => e.to_string(),
        }
    }
}
