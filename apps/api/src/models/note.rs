use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::normalize_tags;
use crate::records::filter::Filterable;
use crate::store::{Record, StoreError};

pub const TITLE_REQUIRED: &str = "Title is required";

/// A persisted note. JSON keys follow the web UI (`_id`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "user_id")]
    pub user: Option<Uuid>,
}

/// The full field set written on create and on update (replace semantics).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub favorite: bool,
    pub user: Option<Uuid>,
}

/// Request body for `POST /api/notes` and `PUT /api/notes/:id`.
/// Every field is optional on the wire; omitted fields fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub favorite: Option<bool>,
    pub user: Option<Uuid>,
}

impl NoteInput {
    pub fn into_draft(self) -> NoteDraft {
        NoteDraft {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            favorite: self.favorite.unwrap_or(false),
            user: self.user,
        }
    }
}

impl Record for Note {
    type Draft = NoteDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(draft: NoteDraft) -> Result<NoteDraft, StoreError> {
        if draft.title.is_empty() {
            return Err(StoreError::Validation(TITLE_REQUIRED.to_string()));
        }
        Ok(NoteDraft {
            tags: normalize_tags(draft.tags),
            ..draft
        })
    }

    fn from_draft(id: Uuid, draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Note {
            id,
            title: draft.title,
            content: draft.content,
            tags: draft.tags,
            favorite: draft.favorite,
            created_at: now,
            user: draft.user,
        }
    }

    fn replace(&mut self, draft: NoteDraft, _now: DateTime<Utc>) {
        self.title = draft.title;
        self.content = draft.content;
        self.tags = draft.tags;
        self.favorite = draft.favorite;
        self.user = draft.user;
    }
}

impl Filterable for Note {
    fn searchable_text(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_favorite(&self) -> bool {
        self.favorite
    }
}
