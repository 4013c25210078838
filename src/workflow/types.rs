// SPDX-License-Identifier: MIT

//! Schema types for workflow definition files
//!
//! Only the parts of a definition that shape its topology are modelled;
//! other keys (instructions, models, tools) are accepted and ignored.

use serde::{Deserialize, Serialize};

/// Top-level workflow definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkflowDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Workflow kind: "Direct", "Composite", or "Graph"
    pub kind: String,
    /// Agent definition (for Direct workflows)
    pub agent: Option<AgentDefinition>,
    /// Composite workflow definition (for Composite workflows)
    pub workflow: Option<CompositeWorkflowDefinition>,
    /// Graph workflow definition (for Graph workflows)
    pub graph: Option<GraphDefinition>,
}

/// Graph workflow definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GraphDefinition {
    #[serde(default)]
    pub nodes: Vec<GraphNodeDefinition>,
}

/// A node in a graph workflow
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GraphNodeDefinition {
    /// Unique node identifier
    pub id: String,
    /// Nodes that must complete before this one runs
    #[serde(default)]
    pub depends_on: DependsOn,
}

/// Dependency specification (single string or array)
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(untagged)]
pub enum DependsOn {
    /// No dependencies (entry node)
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl DependsOn {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            DependsOn::None => vec![],
            DependsOn::Single(s) => vec![s.clone()],
            DependsOn::Multiple(v) => v.clone(),
        }
    }

    /// Check if this node has no dependencies (is an entry node)
    pub fn is_empty(&self) -> bool {
        match self {
            DependsOn::None => true,
            DependsOn::Single(_) => false,
            DependsOn::Multiple(v) => v.is_empty(),
        }
    }
}

/// Agent definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Composite workflow definition
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CompositeWorkflowDefinition {
    /// Execution mode: "sequential", "parallel", "loop"
    pub execution: String,
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

/// Agent configuration - either inline definition or file reference
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum AgentConfig {
    Inline(Box<AgentDefinition>),
    Reference(WorkflowReference),
}

/// Reference to an external agent file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkflowReference {
    pub file: String,
}
