use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Deserialize, FromRow)]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub content: String,
    pub number: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated lesson fields, ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub course_id: i64,
    pub name: String,
    pub content: String,
    pub number: i64,
}
