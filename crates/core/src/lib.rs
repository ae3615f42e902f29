//! taskrank core data models.
//!
//! This crate defines the task records that flow through the ranking
//! engine and the closed set of weighting strategies.

#![warn(missing_docs)]

mod id;
mod strategy;
mod task;

pub use id::TaskId;
pub use strategy::{ParseStrategyError, Strategy, Weights};
pub use task::{
    clamp_importance, ScoredTask, Task, DEFAULT_IMPORTANCE, MAX_IMPORTANCE, MIN_IMPORTANCE,
};
