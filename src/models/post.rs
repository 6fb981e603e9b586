use serde::{Deserialize, Serialize};

use super::Record;

/// A post as exported by the offline similarity job
///
/// Only `course` is required. Everything else the job wrote is kept in
/// `fields` and handed back to clients untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostRecord {
    /// Course label, matched against the requested category
    pub course: String,
    /// Skills label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    /// Remaining attributes (identifier, student reference, text...)
    #[serde(flatten)]
    pub fields: Record,
}

impl PostRecord {
    /// Creates a post with no extra attributes
    pub fn new(course: impl Into<String>, skills: Option<String>) -> Self {
        Self {
            course: course.into(),
            skills,
            fields: Record::new(),
        }
    }

    /// Adds an extra attribute
    pub fn with_field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }
}
