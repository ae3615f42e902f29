use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use taskrank_core::{ScoredTask, Task};
use taskrank_engine::Ranker;
use tracing::{debug, info};

use crate::{ApiError, ApiResult, AppState, RankRequest};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body of `POST /api/tasks/suggest/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub recommended_task: Option<ScoredTask>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Rank every pending task.
pub async fn analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Vec<ScoredTask>>> {
    let (ranker, pending) = prepare(&state, &body)?;
    if pending.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let ranked = tokio::task::spawn_blocking(move || ranker.rank(&pending))
        .await
        .map_err(|e| ApiError::computation("Failed to analyze tasks", e))?;

    info!("Analyzed {} tasks", ranked.len());
    Ok(Json(ranked))
}

/// Recommend the single best pending task.
pub async fn suggest(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SuggestionResponse>> {
    let (ranker, pending) = prepare(&state, &body)?;
    if pending.is_empty() {
        return Ok(Json(SuggestionResponse { recommended_task: None }));
    }

    let best = tokio::task::spawn_blocking(move || ranker.suggest(&pending))
        .await
        .map_err(|e| ApiError::computation("Failed to compute suggestion", e))?;

    if let Some(task) = &best {
        info!("Suggested task {} (score {})", task.id, task.final_score);
    }
    Ok(Json(SuggestionResponse { recommended_task: best }))
}

/// Validate a body and set up a ranker for its pending tasks.
fn prepare(state: &AppState, body: &[u8]) -> ApiResult<(Ranker, Vec<Task>)> {
    let request = RankRequest::from_slice(body).inspect_err(|e| debug!("Rejected request: {e}"))?;
    let pending = request.pending();

    debug!(
        "{} of {} tasks pending, strategy {}",
        pending.len(),
        request.tasks.len(),
        request.strategy
    );

    let ranker = Ranker::new(request.strategy).with_today(state.clock.today());
    Ok((ranker, pending))
}
