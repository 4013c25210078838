// SPDX-License-Identifier: MIT

//! Structural grading of agent workflow graphs
//!
//! Candidate and reference topologies are loaded as [`graph::Graph`]
//! snapshots, compared by edit distance, and mapped to points on a
//! scorecard.

pub mod config;
pub mod error;
pub mod grader;
pub mod graph;
pub mod scoring;
pub mod workflow;

pub use error::{GraderError, GraphError, WorkflowError};
pub use graph::{compute_graph_distance, Graph, GraphComparator, GraphDistance};
