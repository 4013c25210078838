// SPDX-License-Identifier: MIT

//! Graph-distance grading: load both graphs, compare, score, persist
//!
//! Evaluation failures never abort grading; they are recorded as failed
//! scorecard entries. Only persisting the scorecard can fail the call.

use std::path::{Path, PathBuf};

use crate::error::GraderError;
use crate::graph::{GraphComparator, GraphDistance};
use crate::scoring::{ScoreConfig, Scorecard, GRAPH_DIST_BUCKET};
use crate::workflow::WorkflowLoader;

const DETAIL_KEY: &str = "graph_distance";

/// How a grading run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeOutcome {
    /// Both graphs compared and scored
    Passed,
    /// No candidate graph to grade
    Skipped(String),
    /// Loading or comparison failed
    Failed(String),
}

/// Result of one grading run
#[derive(Debug, Clone)]
pub struct GradeReport {
    pub scorecard: Scorecard,
    pub outcome: GradeOutcome,
    pub distance: Option<GraphDistance>,
    pub scorecard_path: PathBuf,
}

/// Grades a candidate graph against a reference graph
#[derive(Debug, Clone)]
pub struct Grader {
    loader: WorkflowLoader,
    comparator: GraphComparator,
    score: ScoreConfig,
    results_dir: PathBuf,
}

impl Grader {
    pub fn new(score: ScoreConfig, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            loader: WorkflowLoader::new(),
            comparator: GraphComparator::new(),
            score,
            results_dir: results_dir.into(),
        }
    }

    pub fn with_loader(mut self, loader: WorkflowLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_comparator(mut self, comparator: GraphComparator) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn grade(
        &self,
        candidate_name: &str,
        candidate_path: &Path,
        reference_path: &Path,
    ) -> Result<GradeReport, GraderError> {
        let mut scorecard =
            Scorecard::new(candidate_name, GRAPH_DIST_BUCKET, self.score.max_points);

        if !candidate_path.exists() {
            let msg = format!("No candidate graph found at {}", candidate_path.display());
            log::warn!("{}; skipping", msg);
            scorecard.add(0, DETAIL_KEY, false, msg.clone());
            let scorecard_path = scorecard.write(&self.results_dir)?;
            return Ok(GradeReport {
                scorecard,
                outcome: GradeOutcome::Skipped(msg),
                distance: None,
                scorecard_path,
            });
        }

        let (outcome, distance) = match self.evaluate(candidate_path, reference_path) {
            Ok(distance) => {
                let total = distance.total();
                let points = self.score.score_distance(total);
                log::info!(
                    "Structural edit distance: {}; score {}/{}",
                    total,
                    points,
                    self.score.max_points
                );
                scorecard.add(points, DETAIL_KEY, true, format!("Edit distance: {}", total));
                (GradeOutcome::Passed, Some(distance))
            }
            Err(e) => {
                let msg = format!("Error: {}: {}", e.kind(), e.detail());
                log::error!("Graph distance grading failed: {}", msg);
                scorecard.add(0, DETAIL_KEY, false, msg.clone());
                (GradeOutcome::Failed(msg), None)
            }
        };

        let scorecard_path = scorecard.write(&self.results_dir)?;
        Ok(GradeReport {
            scorecard,
            outcome,
            distance,
            scorecard_path,
        })
    }

    fn evaluate(
        &self,
        candidate_path: &Path,
        reference_path: &Path,
    ) -> Result<GraphDistance, GraderError> {
        let candidate = self.loader.load_graph(candidate_path)?;
        let reference = self.loader.load_graph(reference_path)?;
        Ok(self.comparator.compare(&candidate, &reference)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const REFERENCE: &str = r#"{"nodes": ["A", "B", "C"], "edges": [["A", "B"], ["B", "C"]]}"#;

    fn setup(candidate: Option<&str>) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.json");
        fs::write(&reference, REFERENCE).unwrap();
        let cand = dir.path().join("candidate.json");
        if let Some(content) = candidate {
            fs::write(&cand, content).unwrap();
        }
        (dir, cand, reference)
    }

    #[test]
    fn test_grade_passed() {
        let (dir, cand, reference) =
            setup(Some(r#"{"nodes": ["A", "B", "C"], "edges": [["A", "B"]]}"#));
        let grader = Grader::new(ScoreConfig::default(), dir.path().join("results"));

        let report = grader.grade("cand", &cand, &reference).unwrap();
        assert_eq!(report.outcome, GradeOutcome::Passed);
        assert_eq!(report.distance.unwrap().total(), 1);
        assert_eq!(report.scorecard.points, 4);
        assert_eq!(report.scorecard.details[0].msg, "Edit distance: 1");
        assert!(report.scorecard_path.ends_with("graph_dist_cand.json"));
        assert!(report.scorecard_path.exists());
    }

    #[test]
    fn test_grade_skipped_when_candidate_missing() {
        let (dir, cand, reference) = setup(None);
        let grader = Grader::new(ScoreConfig::default(), dir.path().join("results"));

        let report = grader.grade("cand", &cand, &reference).unwrap();
        assert!(matches!(report.outcome, GradeOutcome::Skipped(_)));
        assert_eq!(report.scorecard.points, 0);
        assert!(report.scorecard.details[0]
            .msg
            .starts_with("No candidate graph found at"));
        assert!(report.scorecard_path.exists());
    }

    #[test]
    fn test_grade_failed_on_dangling_edge() {
        let (dir, cand, reference) = setup(Some(r#"{"nodes": ["A"], "edges": [["A", "Q"]]}"#));
        let grader = Grader::new(ScoreConfig::default(), dir.path().join("results"));

        let report = grader.grade("cand", &cand, &reference).unwrap();
        match report.outcome {
            GradeOutcome::Failed(msg) => assert_eq!(
                msg,
                "Error: InvalidGraphError: Invalid graph: edge A -> Q references unknown node 'Q'"
            ),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!report.scorecard.details[0].passed);
        assert!(!report.scorecard.details[0].msg.contains("Graph error:"));
    }

    #[test]
    fn test_grade_name_with_slash_writes_inside_results_dir() {
        let (dir, cand, reference) = setup(Some(REFERENCE));
        let results = dir.path().join("results");
        let grader = Grader::new(ScoreConfig::default(), results.clone());

        let report = grader.grade("team/alice", &cand, &reference).unwrap();
        assert_eq!(report.outcome, GradeOutcome::Passed);
        assert_eq!(report.scorecard_path, results.join("graph_dist_team-alice.json"));
        assert!(report.scorecard_path.exists());
        assert_eq!(report.scorecard.candidate, "team/alice");
    }
}
