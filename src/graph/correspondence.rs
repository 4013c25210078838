// SPDX-License-Identifier: MIT

//! Node correspondence between a candidate and a reference graph
//!
//! Nodes correspond when their names are identical (case-sensitive). An
//! optional alias table renames candidate nodes first, which is the only way
//! a renamed node is recognised: no fuzzy matching is attempted.

use std::collections::{BTreeMap, BTreeSet};

use super::types::Graph;
use crate::error::GraphError;

/// Injective alias table from candidate node names to reference node names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting two candidate names mapping to the same target
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (from, to) in pairs {
            table.insert(from, to)?;
        }
        Ok(table)
    }

    /// Parse `candidate=reference` entries
    pub fn parse_entries<S: AsRef<str>>(entries: &[S]) -> Result<Self, GraphError> {
        let mut table = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (from, to) = entry.split_once('=').ok_or_else(|| {
                GraphError::MalformedGraph(format!(
                    "alias '{}' must have the form candidate=reference",
                    entry
                ))
            })?;
            table.insert(from.trim(), to.trim())?;
        }
        Ok(table)
    }

    /// Add `from -> to`. Repeating an identical entry is a no-op; giving
    /// `from` a second, different target is an error.
    pub fn insert(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<(), GraphError> {
        let from = from.into();
        let to = to.into();
        if let Some(previous) = self.aliases.get(&from) {
            if *previous != to {
                return Err(GraphError::ConflictingAlias {
                    first: previous.clone(),
                    second: to,
                    name: from,
                });
            }
            return Ok(());
        }
        if let Some((existing, _)) = self
            .aliases
            .iter()
            .find(|(_, v)| **v == to)
        {
            return Err(GraphError::NonInjectiveAlias {
                first: existing.clone(),
                second: from,
                target: to,
            });
        }
        self.aliases.insert(from, to);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// The reference-side name for a candidate node
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// Alignment of candidate nodes onto reference nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correspondence {
    /// Candidate graph expressed in reference node names
    aligned: Graph,
    /// Reference names that have a candidate counterpart
    matched: BTreeSet<String>,
    /// Candidate nodes (after aliasing) with no reference counterpart
    extra: BTreeSet<String>,
    /// Reference nodes with no candidate counterpart
    missing: BTreeSet<String>,
}

impl Correspondence {
    /// Match nodes by identical name
    pub fn exact(candidate: &Graph, reference: &Graph) -> Self {
        Self::build(candidate.clone(), reference)
    }

    /// Apply `aliases` to the candidate, then match by identical name.
    ///
    /// Fails when aliasing would merge a renamed node with an existing
    /// candidate node of the same name.
    pub fn with_aliases(
        candidate: &Graph,
        reference: &Graph,
        aliases: &AliasTable,
    ) -> Result<Self, GraphError> {
        if aliases.is_empty() {
            return Ok(Self::exact(candidate, reference));
        }

        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for node in candidate.nodes() {
            let resolved = aliases.resolve(node);
            if let Some(previous) = seen.insert(resolved, node.as_str()) {
                return Err(GraphError::NonInjectiveAlias {
                    first: previous.to_string(),
                    second: node.clone(),
                    target: resolved.to_string(),
                });
            }
        }

        let aligned = candidate.relabel(|n| aliases.resolve(n).to_string());
        Ok(Self::build(aligned, reference))
    }

    fn build(aligned: Graph, reference: &Graph) -> Self {
        let matched = aligned
            .nodes()
            .intersection(reference.nodes())
            .cloned()
            .collect();
        let extra = aligned
            .nodes()
            .difference(reference.nodes())
            .cloned()
            .collect();
        let missing = reference
            .nodes()
            .difference(aligned.nodes())
            .cloned()
            .collect();

        Self {
            aligned,
            matched,
            extra,
            missing,
        }
    }

    pub fn aligned_candidate(&self) -> &Graph {
        &self.aligned
    }

    pub fn matched(&self) -> &BTreeSet<String> {
        &self.matched
    }

    pub fn extra_nodes(&self) -> &BTreeSet<String> {
        &self.extra
    }

    pub fn missing_nodes(&self) -> &BTreeSet<String> {
        &self.missing
    }

    pub fn is_matched(&self, name: &str) -> bool {
        self.matched.contains(name)
    }
}
