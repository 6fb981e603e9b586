pub mod queries;
pub mod recommendations;
pub mod similarity;

pub use queries::{PostStore, SqlitePostStore};
pub use recommendations::RecommendationResolver;
pub use similarity::{ArtifactError, SimilarityIndex, SimilarityStore};
