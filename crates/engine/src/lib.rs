//! Ranking engine - factor scoring, dependency analysis, and ordering.
//!
//! The engine is a pure function of a task batch, a strategy, and a
//! reference date: no I/O, no shared state.

#![warn(missing_docs)]

pub mod dependency;
pub mod factors;
pub mod ranker;

pub use dependency::DepGraph;
pub use factors::Factor;
pub use ranker::{rank_tasks, Ranker, CYCLE_PENALTY};
