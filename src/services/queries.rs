use std::path::{Path, PathBuf};

use sqlx::{sqlite::SqliteConnectOptions, ConnectOptions, Connection, SqliteConnection};

use crate::{
    db,
    error::{AppError, AppResult},
    models::{CourseEntry, Record, SkillsEntry},
};

const POSTS_WITH_EMAIL: &str =
    "SELECT posts.*, s.email FROM posts JOIN students s ON posts.student = s.student_ID";
const DISTINCT_COURSES: &str = "SELECT DISTINCT course FROM posts";
const DISTINCT_SKILLS: &str = "SELECT DISTINCT skills FROM posts";

/// Read-only queries over the posts database
///
/// Every failure comes back as `AppError::StoreConnection` or
/// `AppError::StoreQuery`; raw driver errors never escape.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, each joined with its student's email
    async fn list_posts(&self) -> AppResult<Vec<Record>>;

    /// Distinct course labels
    async fn list_courses(&self) -> AppResult<Vec<CourseEntry>>;

    /// Distinct skills labels
    async fn list_skills(&self) -> AppResult<Vec<SkillsEntry>>;
}

/// SQLite-backed post store
///
/// Opens a fresh connection per call and closes it before returning,
/// whether the query succeeded or not.
pub struct SqlitePostStore {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl SqlitePostStore {
    pub fn new(database_path: impl AsRef<Path>) -> Self {
        let path = database_path.as_ref().to_path_buf();
        let options = db::connect_options(&path);
        Self { path, options }
    }

    async fn connect(&self) -> AppResult<SqliteConnection> {
        self.options.connect().await.map_err(|e| {
            tracing::error!(error = %e, path = %self.path.display(), "Database connection error");
            AppError::StoreConnection(e)
        })
    }

    async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "Failed to close database connection");
        }
    }

    fn query_failed(sql: &'static str, e: sqlx::Error) -> AppError {
        tracing::error!(error = %e, sql, "Database query error");
        AppError::StoreQuery(e)
    }

    async fn distinct<T>(&self, sql: &'static str) -> AppResult<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
    {
        let mut conn = self.connect().await?;
        let result = sqlx::query_as::<_, T>(sql).fetch_all(&mut conn).await;
        self.release(conn).await;

        result.map_err(|e| Self::query_failed(sql, e))
    }
}

#[async_trait::async_trait]
impl PostStore for SqlitePostStore {
    async fn list_posts(&self) -> AppResult<Vec<Record>> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(POSTS_WITH_EMAIL).fetch_all(&mut conn).await;
        self.release(conn).await;

        let rows = result.map_err(|e| Self::query_failed(POSTS_WITH_EMAIL, e))?;
        tracing::debug!(count = rows.len(), "Fetched posts");

        Ok(rows.iter().map(db::row_to_record).collect())
    }

    async fn list_courses(&self) -> AppResult<Vec<CourseEntry>> {
        self.distinct(DISTINCT_COURSES).await
    }

    async fn list_skills(&self) -> AppResult<Vec<SkillsEntry>> {
        self.distinct(DISTINCT_SKILLS).await
    }
}
