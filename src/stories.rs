use std::sync::Arc;

use crate::error::AppError;
use crate::store::{Story, StoryId, StoryStore};

/// Validation front for the story store.
#[derive(Clone)]
pub struct StoryService {
    store: Arc<dyn StoryStore>,
}

impl StoryService {
    pub fn new(store: Arc<dyn StoryStore>) -> Self {
        Self { store }
    }

    /// Saves a story. Both fields must be present and non-empty; nothing is
    /// trimmed or deduplicated.
    pub fn save(&self, username: Option<&str>, text: Option<&str>) -> Result<StoryId, AppError> {
        let username = required("username", username)?;
        let text = required("story", text)?;
        self.store.insert(username, text)
    }

    /// Lists stories newest first. No filter means every user's stories.
    pub fn list(&self, username: Option<&str>) -> Result<Vec<Story>, AppError> {
        self.store.list(username.filter(|u| !u.is_empty()))
    }
}

/// Presence check shared by every endpoint that takes text input.
pub fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::missing_field(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStoryStore;

    fn service() -> StoryService {
        StoryService::new(Arc::new(SqliteStoryStore::open_in_memory().unwrap()))
    }

    #[test]
    fn test_save_then_list_by_user() {
        let service = service();
        let id = service
            .save(Some("alice"), Some("went to the market"))
            .unwrap();

        let stories = service.list(Some("alice")).unwrap();
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, id);
        assert_eq!(stories[0].text, "went to the market");
    }

    #[test]
    fn test_save_rejects_missing_fields_without_writing() {
        let service = service();
        let cases = [
            (None, Some("text")),
            (Some(""), Some("text")),
            (Some("alice"), None),
            (Some("alice"), Some("")),
        ];

        for (username, text) in cases {
            let err = service.save(username, text).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(service.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        let service = service();
        service.save(Some("alice"), Some("  ")).unwrap();
        assert_eq!(service.list(Some("alice")).unwrap()[0].text, "  ");
    }

    #[test]
    fn test_unfiltered_list_covers_every_user() {
        let service = service();
        service.save(Some("alice"), Some("went to the market")).unwrap();
        service.save(Some("bob"), Some("flew a kite")).unwrap();

        let all = service.list(None).unwrap();
        for user in ["alice", "bob"] {
            for story in service.list(Some(user)).unwrap() {
                let found = all.iter().find(|s| s.id == story.id).unwrap();
                assert_eq!(found.text, story.text);
                assert_eq!(found.created_at, story.created_at);
                assert_eq!(found.username.as_deref(), Some(user));
            }
        }
    }

    #[test]
    fn test_empty_filter_lists_everyone() {
        let service = service();
        service.save(Some("alice"), Some("went to the market")).unwrap();
        assert_eq!(service.list(Some("")).unwrap().len(), 1);
    }

    #[test]
    fn test_required() {
        assert_eq!(required("x", Some("y")).unwrap(), "y");
        assert!(required("x", Some("")).is_err());
        assert!(required("x", None).is_err());
    }
}
