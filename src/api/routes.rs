use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
///
/// Paths match the ones existing frontends already call.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Listings backed by the posts database
        .route("/getPosts", get(handlers::get_posts))
        .route("/getCourse", get(handlers::get_courses))
        .route("/getSkills", get(handlers::get_skills))
        // Similarity lookup
        .route("/getRecommendations", get(handlers::get_recommendations))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
