//! Workflow normalization - reduces Direct/Composite/Graph definitions to a
//! topology [`Graph`]

use std::collections::HashSet;

use super::types::{CompositeWorkflowDefinition, GraphDefinition, WorkflowDefinition};
use crate::error::{GraderError, WorkflowError};
use crate::graph::{Edge, Graph, END_NODE, START_NODE};

/// Options controlling how a definition becomes a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Add `__start__`/`__end__` pseudo-nodes wired to entry and terminal nodes
    pub sentinels: bool,
}

/// Nodes and edges before validation, plus where execution enters and leaves
#[derive(Debug, Default)]
struct Topology {
    nodes: Vec<String>,
    edges: Vec<Edge>,
    entries: Vec<String>,
    terminals: Vec<String>,
}

/// Normalize any workflow definition to a graph
pub fn normalize_to_graph(
    def: &WorkflowDefinition,
    options: NormalizeOptions,
) -> Result<Graph, GraderError> {
    let mut topology = match def.kind.as_str() {
        "Direct" => normalize_direct(def)?,
        "Composite" => normalize_composite(
            def.workflow.as_ref().ok_or(WorkflowError::MissingWorkflow)?,
        )?,
        "Graph" => normalize_graph(def.graph.as_ref().ok_or(WorkflowError::MissingGraph)?)?,
        other => return Err(WorkflowError::UnknownKind(other.to_string()).into()),
    };

    if options.sentinels {
        add_sentinels(&mut topology);
    }

    log::debug!(
        "Normalized workflow '{}' ({}): {} nodes, {} edges",
        def.name,
        def.kind,
        topology.nodes.len(),
        topology.edges.len()
    );

    Ok(Graph::new(topology.nodes, topology.edges)?)
}

fn normalize_direct(def: &WorkflowDefinition) -> Result<Topology, WorkflowError> {
    let agent = def.agent.as_ref().ok_or(WorkflowError::MissingAgent)?;
    let id = if agent.name.trim().is_empty() {
        "main".to_string()
    } else {
        agent.name.clone()
    };

    Ok(Topology {
        nodes: vec![id.clone()],
        edges: vec![],
        entries: vec![id.clone()],
        terminals: vec![id],
    })
}

fn normalize_composite(workflow: &CompositeWorkflowDefinition) -> Result<Topology, WorkflowError> {
    let count = workflow.agents.len();

    let prefix = match workflow.execution.as_str() {
        "sequential" => "step",
        "parallel" => "parallel",
        "loop" => "loop",
        other => return Err(WorkflowError::InvalidExecutionMode(other.to_string())),
    };
    let nodes: Vec<String> = (0..count).map(|i| format!("{}_{}", prefix, i)).collect();

    let topology = match workflow.execution.as_str() {
        "parallel" => Topology {
            entries: nodes.clone(),
            terminals: nodes.clone(),
            edges: vec![],
            nodes,
        },
        "loop" => {
            // Chain plus a back edge from the last node to the first
            let mut edges = chain(&nodes);
            if let (Some(first), Some(last)) = (nodes.first(), nodes.last()) {
                edges.push(Edge::new(last.clone(), first.clone()));
            }
            Topology {
                entries: nodes.first().cloned().into_iter().collect(),
                terminals: nodes.last().cloned().into_iter().collect(),
                edges,
                nodes,
            }
        }
        _ => Topology {
            entries: nodes.first().cloned().into_iter().collect(),
            terminals: nodes.last().cloned().into_iter().collect(),
            edges: chain(&nodes),
            nodes,
        },
    };

    Ok(topology)
}

fn chain(nodes: &[String]) -> Vec<Edge> {
    nodes
        .windows(2)
        .map(|pair| Edge::new(pair[0].clone(), pair[1].clone()))
        .collect()
}

fn normalize_graph(graph: &GraphDefinition) -> Result<Topology, WorkflowError> {
    let mut seen = HashSet::new();
    for node in &graph.nodes {
        if !seen.insert(node.id.as_str()) {
            return Err(WorkflowError::DuplicateNodeId(node.id.clone()));
        }
    }

    let mut topology = Topology::default();
    let mut depended_on = HashSet::new();

    for node in &graph.nodes {
        topology.nodes.push(node.id.clone());
        if node.depends_on.is_empty() {
            topology.entries.push(node.id.clone());
        }
        for dep in node.depends_on.to_vec() {
            depended_on.insert(dep.clone());
            topology.edges.push(Edge::new(dep, node.id.clone()));
        }
    }

    topology.terminals = graph
        .nodes
        .iter()
        .filter(|n| !depended_on.contains(&n.id))
        .map(|n| n.id.clone())
        .collect();

    Ok(topology)
}

fn add_sentinels(topology: &mut Topology) {
    for entry in &topology.entries {
        topology.edges.push(Edge::new(START_NODE, entry.clone()));
    }
    for terminal in &topology.terminals {
        topology.edges.push(Edge::new(terminal.clone(), END_NODE));
    }
    topology.nodes.push(START_NODE.to_string());
    topology.nodes.push(END_NODE.to_string());
}
