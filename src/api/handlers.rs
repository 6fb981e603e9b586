use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{CourseEntry, PostRecord, Record, SkillsEntry},
};

use super::AppState;

/// Category requested for a recommendation
///
/// Built from raw query pairs so repeated or conflicting parameters never
/// reject the request: `category` wins over the legacy `course`, and the
/// first occurrence of a key counts.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecommendationQuery {
    pub category: Option<String>,
}

impl RecommendationQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        Self {
            category: first("category").or_else(|| first("course")),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// All posts joined with the owning student's email
pub async fn get_posts(State(state): State<AppState>) -> AppResult<Json<Vec<Record>>> {
    let posts = state.store.list_posts().await?;
    Ok(Json(posts))
}

/// Distinct course labels
pub async fn get_courses(State(state): State<AppState>) -> AppResult<Json<Vec<CourseEntry>>> {
    let courses = state.store.list_courses().await?;
    Ok(Json(courses))
}

/// Distinct skills labels
pub async fn get_skills(State(state): State<AppState>) -> AppResult<Json<Vec<SkillsEntry>>> {
    let skills = state.store.list_skills().await?;
    Ok(Json(skills))
}

/// Posts most similar to the first post of the requested category
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<PostRecord>>> {
    let category = RecommendationQuery::from_pairs(&pairs)
        .category
        .unwrap_or_else(|| state.default_category.to_string());

    let recommendations = state.resolver.recommend(&category).map_err(|e| {
        tracing::warn!(request_id = %request_id, category = %category, error = %e, "No recommendations");
        e
    })?;

    tracing::info!(
        request_id = %request_id,
        category = %category,
        count = recommendations.len(),
        "Recommendations resolved"
    );

    Ok(Json(recommendations))
}
