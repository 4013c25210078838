use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use graphscore_rs::config::GraderConfig;
use graphscore_rs::grader::{GradeOutcome, Grader};
use graphscore_rs::graph::{AliasTable, GraphComparator, UnmatchedEdgePolicy};
use graphscore_rs::scoring::ScoreConfig;
use graphscore_rs::workflow::{NormalizeOptions, WorkflowLoader};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the edit distance between two graphs
    Distance {
        /// Candidate graph listing or workflow file
        #[arg(short, long)]
        candidate: PathBuf,

        /// Reference graph listing or workflow file
        #[arg(short, long)]
        reference: PathBuf,

        /// Treat a renamed candidate node as its reference counterpart (candidate=reference)
        #[arg(short, long)]
        alias: Vec<String>,

        /// Do not charge edges whose endpoint is unmatched
        #[arg(long)]
        ignore_unmatched_edges: bool,

        /// Add __start__/__end__ nodes to workflow definitions
        #[arg(long)]
        sentinels: bool,

        /// Print the full breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score a candidate graph and write its scorecard
    Score {
        /// Candidate graph file (defaults to CANDIDATE_GRAPH_PATH)
        #[arg(short, long)]
        candidate: Option<PathBuf>,

        /// Reference graph file (defaults to REFERENCE_GRAPH_PATH)
        #[arg(short, long)]
        reference: Option<PathBuf>,

        /// Candidate name (defaults to CANDIDATE_NAME, then the git branch)
        #[arg(short, long)]
        name: Option<String>,

        /// Scorecard directory (defaults to RESULTS_DIR, then ./results)
        #[arg(long)]
        results_dir: Option<PathBuf>,

        /// Points for an identical graph
        #[arg(long)]
        max_points: Option<u32>,

        /// Distance at which the score reaches zero
        #[arg(long)]
        cap: Option<u32>,

        /// Add __start__/__end__ nodes to workflow definitions
        #[arg(long)]
        sentinels: bool,
    },
    /// Print a graph as a Mermaid flowchart
    Render {
        /// Graph listing or workflow file
        #[arg(short, long)]
        file: PathBuf,

        /// Add __start__/__end__ nodes to workflow definitions
        #[arg(long)]
        sentinels: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Distance {
            candidate,
            reference,
            alias,
            ignore_unmatched_edges,
            sentinels,
            json,
        } => {
            let loader = WorkflowLoader::with_options(NormalizeOptions { sentinels });
            let candidate_graph = loader
                .load_graph(&candidate)
                .with_context(|| format!("loading candidate {}", candidate.display()))?;
            let reference_graph = loader
                .load_graph(&reference)
                .with_context(|| format!("loading reference {}", reference.display()))?;

            let policy = if ignore_unmatched_edges {
                UnmatchedEdgePolicy::Ignore
            } else {
                UnmatchedEdgePolicy::Count
            };
            let comparator = GraphComparator::new()
                .with_aliases(AliasTable::parse_entries(alias.as_slice())?)
                .with_unmatched_edges(policy);

            let distance = comparator.compare(&candidate_graph, &reference_graph)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&distance)?);
            } else {
                println!("{}", distance.total());
                log::info!("{}", distance);
            }
        }
        Commands::Score {
            candidate,
            reference,
            name,
            results_dir,
            max_points,
            cap,
            sentinels,
        } => {
            let config = GraderConfig::from_env()?;

            let candidate = candidate
                .or(config.candidate_path)
                .context("no candidate graph given (--candidate or CANDIDATE_GRAPH_PATH)")?;
            let reference = reference
                .or(config.reference_path)
                .context("no reference graph given (--reference or REFERENCE_GRAPH_PATH)")?;
            let name = name.unwrap_or(config.candidate_name);
            let score = ScoreConfig::new(
                max_points.unwrap_or(config.score.max_points),
                cap.unwrap_or(config.score.distance_cap),
            )?;

            log::info!("Grading candidate '{}' against {}", name, reference.display());
            let grader = Grader::new(score, results_dir.unwrap_or(config.results_dir))
                .with_loader(WorkflowLoader::with_options(NormalizeOptions { sentinels }));
            let report = grader.grade(&name, &candidate, &reference)?;

            println!(
                "Score: {}/{} points",
                report.scorecard.points, report.scorecard.max_points
            );
            match report.outcome {
                GradeOutcome::Passed => {}
                GradeOutcome::Skipped(reason) => log::warn!("Skipped: {}", reason),
                GradeOutcome::Failed(reason) => bail!("graph distance grading failed: {}", reason),
            }
        }
        Commands::Render { file, sentinels } => {
            let loader = WorkflowLoader::with_options(NormalizeOptions { sentinels });
            let graph = loader
                .load_graph(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            print!("{}", graph.to_mermaid());
        }
    }

    Ok(())
}
