use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::models::PostRecord;

/// Read-only view over the post list and its similarity matrix
///
/// Index `i` in the matrix refers to the `i`-th post. Implementations must
/// keep that correspondence for their whole lifetime.
pub trait SimilarityIndex: Send + Sync {
    /// Number of posts (and matrix rows)
    fn record_count(&self) -> usize;

    /// Post at a matrix position
    fn record_at(&self, index: usize) -> Option<&PostRecord>;

    /// Scores of the post at `index` against every post, paired with their positions
    fn similarity_row(&self, index: usize) -> Option<Vec<(usize, f64)>>;
}

/// Errors raised while loading the offline artifacts at startup
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Similarity matrix row {row} has {len} columns, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("Similarity matrix has {rows} rows but there are {posts} posts")]
    DimensionMismatch { rows: usize, posts: usize },

    #[error("Similarity score at ({row}, {col}) is not finite")]
    NonFinite { row: usize, col: usize },
}

/// Post list and similarity matrix, loaded once and never mutated
#[derive(Debug, Clone)]
pub struct SimilarityStore {
    posts: Vec<PostRecord>,
    matrix: Vec<Vec<f64>>,
}

impl SimilarityStore {
    /// Loads both artifacts from JSON files and validates them against each other
    pub fn load(posts_path: &Path, matrix_path: &Path) -> Result<Self, ArtifactError> {
        let posts: Vec<PostRecord> = read_json(posts_path)?;
        let matrix: Vec<Vec<f64>> = read_json(matrix_path)?;

        let store = Self::from_parts(posts, matrix)?;

        tracing::info!(
            posts = store.posts.len(),
            posts_path = %posts_path.display(),
            matrix_path = %matrix_path.display(),
            "Similarity artifacts loaded"
        );

        Ok(store)
    }

    /// Builds a store from in-memory parts
    ///
    /// Rejects a matrix that is not square, whose size differs from the post
    /// count, or that contains NaN/infinite scores.
    pub fn from_parts(
        posts: Vec<PostRecord>,
        matrix: Vec<Vec<f64>>,
    ) -> Result<Self, ArtifactError> {
        if matrix.len() != posts.len() {
            return Err(ArtifactError::DimensionMismatch {
                rows: matrix.len(),
                posts: posts.len(),
            });
        }

        let expected = matrix.len();
        for (row, scores) in matrix.iter().enumerate() {
            if scores.len() != expected {
                return Err(ArtifactError::NotSquare {
                    row,
                    len: scores.len(),
                    expected,
                });
            }
            if let Some(col) = scores.iter().position(|score| !score.is_finite()) {
                return Err(ArtifactError::NonFinite { row, col });
            }
        }

        Ok(Self { posts, matrix })
    }
}

impl SimilarityIndex for SimilarityStore {
    fn record_count(&self) -> usize {
        self.posts.len()
    }

    fn record_at(&self, index: usize) -> Option<&PostRecord> {
        self.posts.get(index)
    }

    fn similarity_row(&self, index: usize) -> Option<Vec<(usize, f64)>> {
        self.matrix
            .get(index)
            .map(|row| row.iter().copied().enumerate().collect())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ArtifactError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn posts(courses: &[&str]) -> Vec<PostRecord> {
        courses.iter().map(|c| PostRecord::new(*c, None)).collect()
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_parts_accepts_matching_square_matrix() {
        let store = SimilarityStore::from_parts(
            posts(&["Biology", "Physics"]),
            vec![vec![1.0, 0.4], vec![0.4, 1.0]],
        )
        .unwrap();

        assert_eq!(store.record_count(), 2);
        assert_eq!(store.record_at(1).unwrap().course, "Physics");
        assert_eq!(store.similarity_row(0), Some(vec![(0, 1.0), (1, 0.4)]));
        assert!(store.record_at(2).is_none());
        assert!(store.similarity_row(2).is_none());
    }

    #[test]
    fn test_from_parts_rejects_dimension_mismatch() {
        let result = SimilarityStore::from_parts(posts(&["Biology"]), vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        assert!(matches!(
            result,
            Err(ArtifactError::DimensionMismatch { rows: 2, posts: 1 })
        ));
    }

    #[test]
    fn test_from_parts_rejects_ragged_rows() {
        let result = SimilarityStore::from_parts(
            posts(&["Biology", "Physics"]),
            vec![vec![1.0, 0.5], vec![0.5]],
        );
        assert!(matches!(
            result,
            Err(ArtifactError::NotSquare { row: 1, len: 1, expected: 2 })
        ));
    }

    #[test]
    fn test_from_parts_rejects_nan() {
        let result = SimilarityStore::from_parts(
            posts(&["Biology", "Physics"]),
            vec![vec![1.0, f64::NAN], vec![0.5, 1.0]],
        );
        assert!(matches!(result, Err(ArtifactError::NonFinite { row: 0, col: 1 })));
    }

    #[test]
    fn test_load_from_files() {
        let posts_file = write_temp(
            r#"[{"post_id": 1, "course": "Biology"}, {"post_id": 2, "course": "Physics", "skills": "Python"}]"#,
        );
        let matrix_file = write_temp("[[1.0, 0.3], [0.3, 1.0]]");

        let store = SimilarityStore::load(posts_file.path(), matrix_file.path()).unwrap();

        assert_eq!(store.record_count(), 2);
        assert_eq!(store.record_at(1).unwrap().skills.as_deref(), Some("Python"));
        assert_eq!(store.record_at(0).unwrap().fields["post_id"], 1);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let matrix_file = write_temp("[]");
        let result = SimilarityStore::load(Path::new("/nonexistent/postList.json"), matrix_file.path());
        assert!(matches!(result, Err(ArtifactError::Read { .. })));
    }

    #[test]
    fn test_load_malformed_json_fails() {
        let posts_file = write_temp(r#"[{"course": "Biology"}]"#);
        let matrix_file = write_temp("[[1.0,");

        let result = SimilarityStore::load(posts_file.path(), matrix_file.path());
        assert!(matches!(result, Err(ArtifactError::Malformed { .. })));
    }
}
