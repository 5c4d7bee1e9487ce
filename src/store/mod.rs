//! Story persistence.
//!
//! The store owns the `stories` table. It does not validate input; callers
//! go through [`crate::stories::StoryService`] which enforces the presence
//! checks.

pub mod sqlite;

use serde::Serialize;

use crate::error::AppError;

pub use sqlite::SqliteStoryStore;

pub type StoryId = i64;

/// A persisted story row.
///
/// `username` is `None` when the row came from a listing filtered by user,
/// since the caller already knows whose stories they asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    pub id: StoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "story")]
    pub text: String,
    pub created_at: String,
}

/// Capability to insert and query story rows.
pub trait StoryStore: Send + Sync {
    /// Inserts a row and returns its freshly assigned id. The row is committed
    /// before this returns.
    fn insert(&self, username: &str, text: &str) -> Result<StoryId, AppError>;

    /// Lists stories newest first, optionally restricted to one user.
    fn list(&self, username: Option<&str>) -> Result<Vec<Story>, AppError>;
}
