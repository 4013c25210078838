// SPDX-License-Identifier: MIT

//! Mermaid flowchart rendering
//!
//! Node ids are `n<index>` over the sorted node set, so distinct names never
//! share an id and no name can clash with a Mermaid keyword. The real name
//! is kept in the label.

use std::collections::HashMap;

use super::types::{Graph, END_NODE, START_NODE};

impl Graph {
    /// Render as a top-down Mermaid flowchart
    pub fn to_mermaid(&self) -> String {
        let ids: HashMap<&str, String> = self
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), format!("n{}", i)))
            .collect();

        let mut out = String::from("graph TD;\n");

        for node in self.nodes() {
            let id = &ids[node.as_str()];
            let label = node.replace('"', "#quot;");
            if node == START_NODE || node == END_NODE {
                out.push_str(&format!("    {}([\"{}\"]);\n", id, label));
            } else {
                out.push_str(&format!("    {}[\"{}\"];\n", id, label));
            }
        }

        for edge in self.edges() {
            out.push_str(&format!(
                "    {} --> {};\n",
                ids[edge.source.as_str()],
                ids[edge.target.as_str()]
            ));
        }

        out
    }
}
