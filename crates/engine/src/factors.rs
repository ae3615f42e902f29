//! Single-attribute factor scorers.
//!
//! Each scorer maps one attribute of a task to a bounded score and a
//! human-readable reason. They are pure: the reference date is passed in.

use chrono::NaiveDate;

/// A factor score with the reason it was given.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    /// Numeric score
    pub score: f64,
    /// Why the score was given
    pub explanation: String,
}

impl Factor {
    fn new(score: f64, explanation: impl Into<String>) -> Self {
        Self {
            score,
            explanation: explanation.into(),
        }
    }
}

/// Score how pressing a due date is, relative to `today`.
///
/// Buckets are inclusive on their upper bound: 1 day left is still
/// "very soon", 3 days is "next few days".
pub fn urgency(due: Option<NaiveDate>, today: NaiveDate) -> Factor {
    let Some(due) = due else {
        return Factor::new(2.0, "No due date provided; low urgency.");
    };

    match (due - today).num_days() {
        days if days < 0 => Factor::new(10.0, "Task is overdue."),
        0..=1 => Factor::new(9.0, "Due very soon."),
        2..=3 => Factor::new(8.0, "Due in next few days."),
        4..=7 => Factor::new(6.0, "Due within a week."),
        8..=14 => Factor::new(4.0, "Due within two weeks."),
        _ => Factor::new(2.0, "Due after two weeks."),
    }
}

/// Score effort; smaller tasks score higher.
pub fn effort(hours: Option<f64>) -> Factor {
    let Some(hours) = hours else {
        return Factor::new(4.0, "Missing estimated hours.");
    };

    if hours <= 1.0 {
        Factor::new(10.0, "Very small task.")
    } else if hours <= 2.0 {
        Factor::new(8.0, "Small task.")
    } else if hours <= 4.0 {
        Factor::new(6.0, "Medium task.")
    } else if hours <= 8.0 {
        Factor::new(4.0, "Large task.")
    } else {
        Factor::new(2.0, "Very large task.")
    }
}

/// Score how many tasks in the batch wait on this one.
pub fn blocking(count: usize) -> Factor {
    match count {
        0 => Factor::new(0.0, "No tasks are blocked by this task."),
        1 => Factor::new(5.0, "This task blocks 1 other task."),
        2..=4 => Factor::new(8.0, format!("This task blocks {count} tasks.")),
        _ => Factor::new(10.0, format!("This task blocks many tasks ({count}).")),
    }
}

/// Additive penalty for the prerequisites a task declares itself.
///
/// The score is zero or negative and is applied after weighting.
pub fn prerequisite_penalty(count: usize) -> Factor {
    match count {
        0 => Factor::new(0.0, "No prerequisites. Can start immediately."),
        1 => Factor::new(-1.0, "Has 1 prerequisite task."),
        2 => Factor::new(-3.0, "Has 2 prerequisite tasks."),
        _ => Factor::new(-5.0, format!("Has {count} prerequisite tasks.")),
    }
}
