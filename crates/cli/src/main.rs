//! taskrank CLI - rank a task file from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde_json::Value;
use taskrank_api::{RankRequest, RequestValidator};
use taskrank_core::ScoredTask;
use taskrank_engine::Ranker;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskrank")]
#[command(about = "Rank tasks by computed priority", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every pending task in a file
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Show the single best next task
    Suggest {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// JSON file: {"strategy": ..., "tasks": [...]} or a bare task list
    file: PathBuf,

    /// Strategy, overriding the one in the file
    #[arg(long)]
    strategy: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input } => {
            let (ranker, request) = prepare(&input)?;
            let ranked = ranker.rank(&request.pending());
            info!("Ranked {} tasks", ranked.len());

            if input.json {
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                print_ranking(&ranked);
            }
        }
        Commands::Suggest { input } => {
            let (ranker, request) = prepare(&input)?;
            let best = ranker.suggest(&request.pending());

            if input.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({ "recommended_task": best }))?
                );
            } else {
                match best {
                    Some(task) => print_task(&task),
                    None => println!("Nothing to do: every task is completed"),
                }
            }
        }
    }

    Ok(())
}

fn prepare(input: &InputArgs) -> Result<(Ranker, RankRequest)> {
    let request = load_request(&input.file, input.strategy.as_deref())?;
    let today = input.today.unwrap_or_else(|| Local::now().date_naive());
    debug!("Ranking with {} as of {}", request.strategy, today);

    Ok((Ranker::new(request.strategy).with_today(today), request))
}

fn load_request(path: &Path, strategy: Option<&str>) -> Result<RankRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_request(&text, strategy).with_context(|| format!("invalid task file {}", path.display()))
}

fn parse_request(text: &str, strategy: Option<&str>) -> Result<RankRequest> {
    let mut value: Value = serde_json::from_str(text)?;
    if value.is_array() {
        value = serde_json::json!({ "tasks": value });
    }

    let mut request = RequestValidator::validate_request(&value)?;
    if let Some(name) = strategy {
        request.strategy = RequestValidator::validate_strategy(name)?;
    }
    Ok(request)
}

fn print_ranking(ranked: &[ScoredTask]) {
    let strategy = ranked.first().map(|t| t.strategy).unwrap_or_default();
    println!("Ranking ({} tasks, {})", ranked.len(), strategy);
    for (rank, task) in ranked.iter().enumerate() {
        println!(
            "  {:>2}. {:>6.2} | {} - {}{}",
            rank + 1,
            task.final_score,
            task.id,
            task.title,
            if task.circular_dependency { " [cycle]" } else { "" },
        );
    }
}

fn print_task(task: &ScoredTask) {
    println!("Next: {} - {}", task.id, task.title);
    println!("  Score: {:.2} ({})", task.final_score, task.strategy);
    println!(
        "  Urgency: {:.1}  Effort: {:.1}  Dependency: {:.1}",
        task.urgency_score, task.effort_score, task.dependency_score
    );
    if let Some(due) = task.due_date {
        println!("  Due: {}", due);
    }
    for line in &task.explanations {
        println!("  - {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskrank_core::Strategy;

    const FILE: &str = r#"{
        "strategy": "high_impact",
        "tasks": [
            {"id": "T1", "title": "Write", "importance": 8, "estimated_hours": 3,
             "due_date": "2025-06-12", "dependencies": [], "completed": false},
            {"id": "T2", "title": "Ship", "importance": 6, "estimated_hours": 1,
             "due_date": "2025-06-11", "dependencies": ["T1"], "completed": true}
        ]
    }"#;

    #[test]
    fn test_parse_request_keeps_file_strategy() {
        let request = parse_request(FILE, None).unwrap();
        assert_eq!(request.strategy, Strategy::HighImpact);
        assert_eq!(request.pending().len(), 1);
    }

    #[test]
    fn test_strategy_flag_overrides_file() {
        let request = parse_request(FILE, Some("fastest_wins")).unwrap();
        assert_eq!(request.strategy, Strategy::FastestWins);
    }

    #[test]
    fn test_strategy_flag_is_validated() {
        let err = parse_request(FILE, Some("FASTEST")).unwrap_err();
        assert!(err.to_string().starts_with("Invalid strategy 'FASTEST'"));
    }

    #[test]
    fn test_bare_task_list_is_accepted() {
        let text = r#"[{"id": "A", "title": "Alpha", "importance": 5, "estimated_hours": 2,
                       "due_date": "2025-06-20", "dependencies": [], "completed": false}]"#;
        let request = parse_request(text, None).unwrap();
        assert_eq!(request.strategy, Strategy::SmartBalance);
        assert_eq!(request.tasks.len(), 1);
    }

    #[test]
    fn test_validation_errors_surface() {
        let err = parse_request(r#"{"tasks": []}"#, None).unwrap_err();
        assert_eq!(err.to_string(), "'tasks' must be a non-empty list.");
    }
}
