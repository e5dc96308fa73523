use crate::api::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router; requests exceeding `request_timeout` get a 408.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health_check))
        // Dashboard
        .route("/v1/stats", get(handlers::get_stats))
        // Case queries
        .route("/v1/cases", get(handlers::list_cases))
        .route("/v1/cases", post(handlers::create_case))
        .route("/v1/cases/high-priority", get(handlers::high_priority_cases))
        .route("/v1/cases/incidents", get(handlers::incident_cases))
        .route("/v1/cases/open", get(handlers::open_cases))
        .route("/v1/cases/:case_id", get(handlers::get_case))
        .route("/v1/cases/:case_id/similar", get(handlers::similar_cases))
        // Taxonomy lookups
        .route("/v1/products", get(handlers::list_products))
        .route("/v1/types", get(handlers::list_types))
        .route("/v1/priorities", get(handlers::list_priorities))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
}
