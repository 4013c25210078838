// SPDX-License-Identifier: MIT

//! Distance-to-points mapping and the JSON scorecard
//!
//! `points = max(0, round(max_points * (1 - min(d, cap) / cap)))`, with
//! halves rounded to even.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::GraderError;

/// Scorecard bucket for the structural comparison
pub const GRAPH_DIST_BUCKET: &str = "graph_dist";

pub const DEFAULT_MAX_POINTS: u32 = 5;
pub const DEFAULT_DISTANCE_CAP: u32 = 10;

/// Constants of the linear score mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub max_points: u32,
    pub distance_cap: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            distance_cap: DEFAULT_DISTANCE_CAP,
        }
    }
}

impl ScoreConfig {
    pub fn new(max_points: u32, distance_cap: u32) -> Result<Self, GraderError> {
        if distance_cap == 0 {
            return Err(GraderError::config("distance cap must be greater than zero"));
        }
        Ok(Self {
            max_points,
            distance_cap,
        })
    }

    /// Map an edit distance onto `0..=max_points`
    pub fn score_distance(&self, distance: usize) -> u32 {
        let cap = f64::from(self.distance_cap);
        let capped = (distance as f64).min(cap);
        let raw = f64::from(self.max_points) * (1.0 - capped / cap);
        raw.round_ties_even().max(0.0) as u32
    }
}

/// One line of a scorecard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub key: String,
    pub points: u32,
    pub passed: bool,
    pub msg: String,
}

/// Per-candidate, per-bucket score record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub candidate: String,
    pub bucket: String,
    pub points: u32,
    pub max_points: u32,
    pub details: Vec<ScoreDetail>,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

impl Scorecard {
    pub fn new(candidate: impl Into<String>, bucket: impl Into<String>, max_points: u32) -> Self {
        Self {
            candidate: candidate.into(),
            bucket: bucket.into(),
            points: 0,
            max_points,
            details: Vec::new(),
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
        }
    }

    /// Record a check; points are credited only when `ok`
    pub fn add(&mut self, points: u32, key: impl Into<String>, ok: bool, msg: impl Into<String>) {
        let awarded = if ok { points } else { 0 };
        self.details.push(ScoreDetail {
            key: key.into(),
            points: awarded,
            passed: ok,
            msg: msg.into(),
        });
        self.points += awarded;
    }

    /// File name under the results directory.
    ///
    /// The candidate part is reduced to `[A-Za-z0-9_-]` so any name stays a
    /// single path component inside the results directory.
    pub fn file_name(&self) -> String {
        format!("{}_{}.json", self.bucket, file_safe(&self.candidate))
    }

    /// Write as pretty JSON into `results_dir`, creating it when missing
    pub fn write(&self, results_dir: &Path) -> Result<PathBuf, GraderError> {
        fs::create_dir_all(results_dir)?;
        let path = results_dir.join(self.file_name());
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        log::info!("Wrote scorecard to {}", path.display());
        Ok(path)
    }

    pub fn read(path: &Path) -> Result<Self, GraderError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn file_safe(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if safe.is_empty() {
        "unknown".to_string()
    } else {
        safe
    }
}
