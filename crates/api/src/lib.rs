//! taskrank HTTP adapter.
//!
//! Validates ranking requests, filters out completed tasks, runs the
//! engine, and serializes its output.

pub mod clock;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod validation;

use std::sync::Arc;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::{Server, ServerConfig};
pub use validation::{RankRequest, RequestValidator, ValidationError};

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Reference date source
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create state around a clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}
