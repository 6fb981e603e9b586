use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::PostRecord,
    services::similarity::SimilarityIndex,
};

/// Default number of posts returned per recommendation
pub const DEFAULT_LIMIT: usize = 3;

/// Finds posts similar to the first post of a category
///
/// The first post whose course equals the category is the anchor. Its
/// similarity row is ranked by descending score (ties by ascending index),
/// the anchor itself is skipped and the top `limit` posts are returned.
pub struct RecommendationResolver {
    index: Arc<dyn SimilarityIndex>,
    limit: usize,
}

impl RecommendationResolver {
    pub fn new(index: Arc<dyn SimilarityIndex>, limit: usize) -> Self {
        Self { index, limit }
    }

    /// Recommends up to `limit` posts for a category
    pub fn recommend(&self, category: &str) -> AppResult<Vec<PostRecord>> {
        let anchor = self
            .anchor_index(category)
            .ok_or_else(|| AppError::CategoryNotFound(category.to_string()))?;

        let ranked = self.rank(anchor)?;

        tracing::debug!(
            category = %category,
            anchor,
            ranked = ?ranked,
            "Ranked similar posts"
        );

        ranked
            .into_iter()
            .map(|(position, _)| {
                self.index.record_at(position).cloned().ok_or_else(|| {
                    AppError::Internal(format!("No post at matrix position {}", position))
                })
            })
            .collect()
    }

    fn anchor_index(&self, category: &str) -> Option<usize> {
        (0..self.index.record_count()).find(|&i| {
            self.index
                .record_at(i)
                .is_some_and(|post| post.course == category)
        })
    }

    fn rank(&self, anchor: usize) -> AppResult<Vec<(usize, f64)>> {
        let mut row = self.index.similarity_row(anchor).ok_or_else(|| {
            AppError::Internal(format!("No similarity row for position {}", anchor))
        })?;

        row.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(row
            .into_iter()
            .filter(|(position, _)| *position != anchor)
            .take(self.limit)
            .collect())
    }
}
