// SPDX-License-Identifier: MIT

//! Grader configuration resolved from the environment
//!
//! `.env` is loaded by the binary before this runs. CLI flags override
//! anything resolved here.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use crate::error::GraderError;
use crate::scoring::{ScoreConfig, DEFAULT_DISTANCE_CAP, DEFAULT_MAX_POINTS};

pub const CANDIDATE_NAME_VAR: &str = "CANDIDATE_NAME";
pub const CANDIDATE_GRAPH_VAR: &str = "CANDIDATE_GRAPH_PATH";
pub const REFERENCE_GRAPH_VAR: &str = "REFERENCE_GRAPH_PATH";
pub const MAX_POINTS_VAR: &str = "GRAPH_DIST_MAX_POINTS";
pub const DISTANCE_CAP_VAR: &str = "GRAPH_DIST_CAP";
pub const RESULTS_DIR_VAR: &str = "RESULTS_DIR";

const UNKNOWN_CANDIDATE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraderConfig {
    pub candidate_name: String,
    pub candidate_path: Option<PathBuf>,
    pub reference_path: Option<PathBuf>,
    pub score: ScoreConfig,
    pub results_dir: PathBuf,
}

impl GraderConfig {
    /// Resolve from process environment, falling back to the git branch
    /// for the candidate name
    pub fn from_env() -> Result<Self, GraderError> {
        Self::from_lookup(|key| env::var(key).ok(), current_git_branch)
    }

    /// Resolve through arbitrary lookups
    pub fn from_lookup<F, B>(lookup: F, branch: B) -> Result<Self, GraderError>
    where
        F: Fn(&str) -> Option<String>,
        B: FnOnce() -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let candidate_name = non_empty(CANDIDATE_NAME_VAR)
            .or_else(branch)
            .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string());

        let max_points = parse_u32(MAX_POINTS_VAR, non_empty(MAX_POINTS_VAR), DEFAULT_MAX_POINTS)?;
        let distance_cap =
            parse_u32(DISTANCE_CAP_VAR, non_empty(DISTANCE_CAP_VAR), DEFAULT_DISTANCE_CAP)?;

        Ok(Self {
            candidate_name,
            candidate_path: non_empty(CANDIDATE_GRAPH_VAR).map(PathBuf::from),
            reference_path: non_empty(REFERENCE_GRAPH_VAR).map(PathBuf::from),
            score: ScoreConfig::new(max_points, distance_cap)?,
            results_dir: non_empty(RESULTS_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("results")),
        })
    }
}

fn parse_u32(key: &str, value: Option<String>, default: u32) -> Result<u32, GraderError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| GraderError::config(format!("{} must be a non-negative integer, got '{}'", key, raw))),
    }
}

/// Current git branch, if the working directory is inside a repository
pub fn current_git_branch() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        log::debug!("git rev-parse failed; candidate name falls back");
        return None;
    }
    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    // Detached checkouts report HEAD
    if branch.is_empty() || branch == "HEAD" {
        None
    } else {
        Some(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GraderConfig::from_lookup(lookup(&[]), || None).unwrap();
        assert_eq!(config.candidate_name, "unknown");
        assert_eq!(config.score, ScoreConfig::default());
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert!(config.candidate_path.is_none());
    }

    #[test]
    fn test_branch_fallback() {
        let config =
            GraderConfig::from_lookup(lookup(&[]), || Some("feature-sql".to_string())).unwrap();
        assert_eq!(config.candidate_name, "feature-sql");
    }

    #[test]
    fn test_env_overrides() {
        let config = GraderConfig::from_lookup(
            lookup(&[
                (CANDIDATE_NAME_VAR, "alice"),
                (CANDIDATE_GRAPH_VAR, "cand.json"),
                (REFERENCE_GRAPH_VAR, "gold.json"),
                (MAX_POINTS_VAR, "10"),
                (DISTANCE_CAP_VAR, " 20 "),
                (RESULTS_DIR_VAR, "out"),
            ]),
            || Some("ignored".to_string()),
        )
        .unwrap();

        assert_eq!(config.candidate_name, "alice");
        assert_eq!(config.candidate_path, Some(PathBuf::from("cand.json")));
        assert_eq!(config.reference_path, Some(PathBuf::from("gold.json")));
        assert_eq!(config.score, ScoreConfig::new(10, 20).unwrap());
        assert_eq!(config.results_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_invalid_number() {
        let err = GraderConfig::from_lookup(lookup(&[(MAX_POINTS_VAR, "five")]), || None)
            .unwrap_err();
        assert!(err.to_string().contains(MAX_POINTS_VAR));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let result = GraderConfig::from_lookup(lookup(&[(DISTANCE_CAP_VAR, "0")]), || None);
        assert!(matches!(result, Err(GraderError::Config(_))));
    }
}
