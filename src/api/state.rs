use std::sync::Arc;

use crate::services::{queries::PostStore, recommendations::RecommendationResolver};

/// Shared application state
///
/// Built once at startup; handlers only read from it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
    pub resolver: Arc<RecommendationResolver>,
    pub default_category: Arc<str>,
}

impl AppState {
    /// Creates the application state from its collaborators
    pub fn new(
        store: Arc<dyn PostStore>,
        resolver: RecommendationResolver,
        default_category: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            resolver: Arc::new(resolver),
            default_category: default_category.into(),
        }
    }
}
