use crate::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))

        // Ranking, with and without the trailing slash
        .route("/api/tasks/analyze/", post(handlers::analyze))
        .route("/api/tasks/analyze", post(handlers::analyze))
        .route("/api/tasks/suggest/", post(handlers::suggest))
        .route("/api/tasks/suggest", post(handlers::suggest))

        .with_state(state)

        // The browser front end is served from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}
