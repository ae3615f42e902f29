//! Request validation - turns raw JSON into typed ranking requests.
//!
//! Checks run in a fixed order and stop at the first violation, so every
//! error names exactly one cause.

use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};
use taskrank_core::{clamp_importance, ParseStrategyError, Strategy, Task, TaskId};

/// Fields every submitted task must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "id",
    "title",
    "importance",
    "estimated_hours",
    "due_date",
    "dependencies",
    "completed",
];

/// Text format of due dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Body is not valid JSON
    #[error("JSON parse error: {0}")]
    MalformedJson(String),

    /// Body is JSON but not an object
    #[error("Request body must be a JSON object.")]
    BodyNotObject,

    /// No `tasks` key
    #[error("'tasks' field is required.")]
    MissingTasks,

    /// `tasks` is not a list, or is empty
    #[error("'tasks' must be a non-empty list.")]
    EmptyTasks,

    /// Unknown strategy name
    #[error(transparent)]
    Strategy(#[from] ParseStrategyError),

    /// A task entry is not an object
    #[error("Each task must be a JSON object.")]
    TaskNotObject,

    /// A required task field is absent
    #[error("Task is missing required field '{0}'.")]
    MissingField(&'static str),

    /// Blank title
    #[error("Task {0}: title cannot be empty.")]
    EmptyTitle(String),

    /// Importance is not a number
    #[error("Task {0}: importance must be a number between 1 and 10.")]
    ImportanceNotNumber(String),

    /// Importance outside `[1, 10]`
    #[error("Task {0}: importance must be between 1 and 10.")]
    ImportanceOutOfRange(String),

    /// Hours is not a finite number
    #[error("Task {0}: estimated_hours must be a positive number.")]
    HoursNotNumber(String),

    /// Hours below one
    #[error("Task {0}: estimated_hours must be at least 1 hour.")]
    HoursTooSmall(String),

    /// Blank due date
    #[error("Task {0}: due_date is required.")]
    MissingDueDate(String),

    /// Due date not in `YYYY-MM-DD` form, or not a real date
    #[error("Task {0}: due_date must be a valid date in 'YYYY-MM-DD' format.")]
    InvalidDueDate(String),

    /// Dependencies is not a list
    #[error("Task {0}: dependencies must be a list of task ids (e.g. ['T1','T2']).")]
    DependenciesNotList(String),

    /// A dependency names no submitted task
    #[error("Task {task}: dependency '{dependency}' does not exist in the submitted tasks.")]
    UnknownDependency {
        /// Task declaring the dependency
        task: String,
        /// The missing id
        dependency: String,
    },

    /// Completed flag is not a boolean
    #[error("Task {0}: 'completed' must be true or false.")]
    CompletedNotBool(String),

    /// Two tasks share an id
    #[error("Task {0}: duplicate id in the submitted tasks.")]
    DuplicateId(String),
}

/// A validated ranking request.
#[derive(Debug, Clone, PartialEq)]
pub struct RankRequest {
    /// Strategy to rank with
    pub strategy: Strategy,
    /// Every submitted task, completed ones included
    pub tasks: Vec<Task>,
}

impl RankRequest {
    /// Parse and validate a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;
        RequestValidator::validate_request(&value)
    }

    /// Tasks still to be done, in submission order.
    pub fn pending(&self) -> Vec<Task> {
        self.tasks.iter().filter(|t| !t.completed).cloned().collect()
    }
}

/// Validator for ranking requests.
pub struct RequestValidator;

impl RequestValidator {
    /// Validate a whole request: `{"strategy": ..., "tasks": [...]}`.
    ///
    /// A missing strategy means smart balance.
    pub fn validate_request(value: &Value) -> Result<RankRequest, ValidationError> {
        let body = value.as_object().ok_or(ValidationError::BodyNotObject)?;

        let raw_tasks = body.get("tasks").ok_or(ValidationError::MissingTasks)?;
        let raw_tasks = match raw_tasks.as_array() {
            Some(list) if !list.is_empty() => list,
            _ => return Err(ValidationError::EmptyTasks),
        };

        let strategy = match body.get("strategy") {
            None => Strategy::default(),
            Some(name) => Self::validate_strategy(&value_text(name))?,
        };

        let all_ids: HashSet<String> = raw_tasks
            .iter()
            .filter_map(|t| t.as_object()?.get("id").map(value_text))
            .collect();

        let tasks = raw_tasks
            .iter()
            .map(|raw| Self::validate_task(raw, Some(&all_ids)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::with_capacity(tasks.len());
        if let Some(dup) = tasks.iter().find(|t| !seen.insert(t.id.as_str())) {
            return Err(ValidationError::DuplicateId(dup.id.to_string()));
        }

        Ok(RankRequest { strategy, tasks })
    }

    /// Strict strategy check: exact wire names only.
    pub fn validate_strategy(name: &str) -> Result<Strategy, ValidationError> {
        Ok(name.parse::<Strategy>()?)
    }

    /// Validate one task object.
    ///
    /// When `all_ids` is given, every dependency must name one of them.
    pub fn validate_task(
        value: &Value,
        all_ids: Option<&HashSet<String>>,
    ) -> Result<Task, ValidationError> {
        let task = value.as_object().ok_or(ValidationError::TaskNotObject)?;

        if let Some(field) = REQUIRED_FIELDS.iter().copied().find(|f| !task.contains_key(*f)) {
            return Err(ValidationError::MissingField(field));
        }

        let id = value_text(&task["id"]);

        let title = match &task["title"] {
            Value::Null => String::new(),
            other => value_text(other),
        };
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle(id));
        }

        let importance = parse_importance(&task["importance"])
            .ok_or_else(|| ValidationError::ImportanceNotNumber(id.clone()))?;
        if !(1..=10).contains(&importance) {
            return Err(ValidationError::ImportanceOutOfRange(id));
        }

        let hours = parse_hours(&task["estimated_hours"])
            .ok_or_else(|| ValidationError::HoursNotNumber(id.clone()))?;
        if hours < 1.0 {
            return Err(ValidationError::HoursTooSmall(id));
        }

        let due_date = parse_due_date(&id, &task["due_date"])?;
        let dependencies = parse_dependencies(&id, task, all_ids)?;

        let completed = task["completed"]
            .as_bool()
            .ok_or_else(|| ValidationError::CompletedNotBool(id.clone()))?;

        Ok(Task {
            id: TaskId::new(id),
            title,
            due_date: Some(due_date),
            estimated_hours: Some(hours),
            importance: clamp_importance(importance),
            dependencies,
            completed,
        })
    }
}

/// Render a JSON value as an id-like string: strings as-is, anything else
/// as its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Integers, whole-number strings, and floats (truncated).
fn parse_importance(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Finite numbers and numeric strings.
fn parse_hours(value: &Value) -> Option<f64> {
    let hours = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    hours.is_finite().then_some(hours)
}

/// Four-digit year; month and day may drop their leading zero.
fn date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").expect("valid date regex"))
}

fn parse_due_date(id: &str, value: &Value) -> Result<NaiveDate, ValidationError> {
    let text = match value {
        Value::Null => String::new(),
        other => value_text(other),
    };
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::MissingDueDate(id.to_string()));
    }
    if !date_shape().is_match(text) {
        return Err(ValidationError::InvalidDueDate(id.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDueDate(id.to_string()))
}

fn parse_dependencies(
    id: &str,
    task: &Map<String, Value>,
    all_ids: Option<&HashSet<String>>,
) -> Result<Vec<TaskId>, ValidationError> {
    let raw = task["dependencies"]
        .as_array()
        .ok_or_else(|| ValidationError::DependenciesNotList(id.to_string()))?;

    raw.iter()
        .map(|dep| {
            let dep = value_text(dep);
            match all_ids {
                Some(ids) if !ids.contains(&dep) => Err(ValidationError::UnknownDependency {
                    task: id.to_string(),
                    dependency: dep,
                }),
                _ => Ok(TaskId::new(dep)),
            }
        })
        .collect()
}
