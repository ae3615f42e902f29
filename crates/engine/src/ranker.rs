//! Aggregation and ranking.
//!
//! Combines the factor scores of every task under a strategy's weights,
//! applies the prerequisite and cycle penalties, and sorts the batch.

use std::cmp::Ordering;

use chrono::{Local, NaiveDate};
use taskrank_core::{clamp_importance, ScoredTask, Strategy, Task};
use tracing::debug;

use crate::dependency::DepGraph;
use crate::factors;

/// Multiplier applied to the score of a task on a dependency cycle.
pub const CYCLE_PENALTY: f64 = 0.7;

/// Ranks task batches under one strategy and reference date.
#[derive(Debug, Clone)]
pub struct Ranker {
    strategy: Strategy,
    today: NaiveDate,
}

impl Ranker {
    /// Create a ranker for `strategy`, dated to the local current day.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            today: Local::now().date_naive(),
        }
    }

    /// Pin the reference date due dates are compared against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Score and sort a batch.
    ///
    /// Output is ordered by final score, then urgency score, both
    /// descending; remaining ties keep input order.
    pub fn rank(&self, tasks: &[Task]) -> Vec<ScoredTask> {
        let graph = DepGraph::build(tasks);
        let cycles = graph.detect_cycles();

        debug!(
            "Ranking {} tasks with strategy {} ({} on cycles)",
            tasks.len(),
            self.strategy,
            cycles.len()
        );

        let mut scored: Vec<ScoredTask> = tasks
            .iter()
            .map(|task| self.score(task, &graph, cycles.contains(task.id.as_str())))
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| {
            descending(a.final_score, b.final_score)
                .then_with(|| descending(a.urgency_score, b.urgency_score))
        });

        scored
    }

    /// The best next task of a batch, if any.
    pub fn suggest(&self, tasks: &[Task]) -> Option<ScoredTask> {
        self.rank(tasks).into_iter().next()
    }

    fn score(&self, task: &Task, graph: &DepGraph<'_>, circular: bool) -> ScoredTask {
        let weights = self.strategy.weights();
        let importance = clamp_importance(i64::from(task.importance));

        let urgency = factors::urgency(task.due_date, self.today);
        let effort = factors::effort(task.estimated_hours);
        let blocking = graph.blocking_factor(task.id.as_str());
        let penalty = factors::prerequisite_penalty(task.prerequisite_count());

        let base = weights.urgency * urgency.score
            + weights.importance * f64::from(importance)
            + weights.effort * effort.score
            + weights.dependency * blocking.score
            + penalty.score;

        let mut explanations = vec![
            urgency.explanation,
            effort.explanation,
            blocking.explanation,
            penalty.explanation,
            format!("Importance: {importance}/10"),
        ];

        let final_score = if circular {
            explanations.push("Circular dependency detected. Score reduced.".to_string());
            base * CYCLE_PENALTY
        } else {
            base
        };

        ScoredTask {
            id: task.id.clone(),
            title: task.title.clone(),
            due_date: task.due_date,
            estimated_hours: task.estimated_hours,
            importance,
            dependencies: task.dependencies.clone(),
            urgency_score: urgency.score,
            effort_score: effort.score,
            dependency_score: blocking.score,
            final_score: round2(final_score),
            strategy: self.strategy,
            circular_dependency: circular,
            explanations,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(Strategy::default())
    }
}

/// Rank a batch under a strategy given by name.
///
/// Unknown names rank with [`Strategy::SmartBalance`]; rejecting them is the
/// caller's job.
pub fn rank_tasks(tasks: &[Task], strategy: &str, today: NaiveDate) -> Vec<ScoredTask> {
    Ranker::new(Strategy::resolve(strategy))
        .with_today(today)
        .rank(tasks)
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Round to two decimals from the exact binary value, ties to even.
fn round2(value: f64) -> f64 {
    // + 0.0 folds -0.0 into 0.0
    format!("{value:.2}").parse::<f64>().unwrap_or(value) + 0.0
}
