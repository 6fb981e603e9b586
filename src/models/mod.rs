use serde::{Deserialize, Serialize};

mod post;

pub use post::PostRecord;

/// A row of arbitrary columns keyed by column name
pub type Record = serde_json::Map<String, serde_json::Value>;

/// One distinct course label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct CourseEntry {
    pub course: Option<String>,
}

/// One distinct skills label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct SkillsEntry {
    pub skills: Option<String>,
}
