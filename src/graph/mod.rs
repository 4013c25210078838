// SPDX-License-Identifier: MIT

//! Graph model and structural comparison
//!
//! Graphs are validated snapshots of a workflow's topology. The comparator
//! aligns two graphs by node name and counts the node and edge insertions
//! and deletions separating them.

pub mod correspondence;
pub mod distance;
pub mod listing;
mod mermaid;
pub mod types;

pub use correspondence::{AliasTable, Correspondence};
pub use distance::{compute_graph_distance, GraphComparator, GraphDistance, UnmatchedEdgePolicy};
pub use listing::{EdgeEntry, GraphListing, NodeEntry};
pub use types::{Edge, Graph, END_NODE, START_NODE};
