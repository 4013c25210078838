// SPDX-License-Identifier: MIT

//! Workflow definitions and their reduction to topology graphs

pub mod loader;
pub mod normalizer;
pub mod types;

pub use loader::WorkflowLoader;
pub use normalizer::{normalize_to_graph, NormalizeOptions};
pub use types::{DependsOn, WorkflowDefinition};
