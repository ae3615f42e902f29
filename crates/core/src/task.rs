//! Task model - the unit being ranked, and its scored form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::strategy::Strategy;

/// Lowest accepted importance.
pub const MIN_IMPORTANCE: u8 = 1;

/// Highest accepted importance.
pub const MAX_IMPORTANCE: u8 = 10;

/// Importance used when a caller does not state one.
pub const DEFAULT_IMPORTANCE: u8 = 5;

/// Clamp a raw importance into `[MIN_IMPORTANCE, MAX_IMPORTANCE]`.
pub fn clamp_importance(raw: i64) -> u8 {
    raw.clamp(MIN_IMPORTANCE as i64, MAX_IMPORTANCE as i64) as u8
}

/// A task submitted for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Caller-chosen identifier
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Calendar due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Estimated effort in hours
    #[serde(default)]
    pub estimated_hours: Option<f64>,

    /// Importance in `[1, 10]`
    #[serde(default = "default_importance")]
    pub importance: u8,

    /// Ids of the tasks this one depends on
    #[serde(default)]
    pub dependencies: Vec<TaskId>,

    /// Whether the task is already done
    #[serde(default)]
    pub completed: bool,
}

fn default_importance() -> u8 {
    DEFAULT_IMPORTANCE
}

impl Task {
    /// Create a new pending task with no due date, effort, or dependencies.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            estimated_hours: None,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
            completed: false,
        }
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Set the estimated effort.
    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Set the importance, clamped into range.
    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = clamp_importance(importance);
        self
    }

    /// Add a dependency.
    pub fn depends_on(mut self, id: impl Into<TaskId>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    /// Mark the task as completed.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Number of prerequisites this task declares.
    pub fn prerequisite_count(&self) -> usize {
        self.dependencies.len()
    }
}

/// A task after ranking: its inputs plus every component score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    /// Task identifier
    pub id: TaskId,
    /// Task title
    pub title: String,
    /// Due date as submitted
    pub due_date: Option<NaiveDate>,
    /// Estimated hours as submitted
    pub estimated_hours: Option<f64>,
    /// Importance after clamping
    pub importance: u8,
    /// Dependencies as submitted
    pub dependencies: Vec<TaskId>,

    /// Urgency factor score
    pub urgency_score: f64,
    /// Effort factor score
    pub effort_score: f64,
    /// Blocking-count factor score
    pub dependency_score: f64,
    /// Weighted, penalised, rounded score
    pub final_score: f64,

    /// Strategy the weights came from
    pub strategy: Strategy,
    /// Whether the task lies on a dependency cycle
    pub circular_dependency: bool,
    /// Rationale, in factor order
    pub explanations: Vec<String>,
}
