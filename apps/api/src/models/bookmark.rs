use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::normalize_tags;
use crate::records::filter::Filterable;
use crate::store::{Record, StoreError};

pub const URL_REQUIRED: &str = "Valid URL is required";
pub const TITLE_REQUIRED: &str = "Title is required";

/// A persisted bookmark. JSON keys follow the web UI (`_id`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(rename = "user_id")]
    pub user: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub favorite: bool,
    pub user: Option<Uuid>,
}

/// Request body for `POST /api/bookmarks` and `PUT /api/bookmarks/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkInput {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub favorite: Option<bool>,
    pub user: Option<Uuid>,
}

/// A non-string `url` is treated as missing so it fails URL validation, not decoding.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

impl BookmarkInput {
    /// Builds the draft with `title` overriding whatever the body carried.
    pub fn into_draft_with_title(self, title: String) -> BookmarkDraft {
        BookmarkDraft {
            title,
            url: self.url.unwrap_or_default(),
            description: self.description,
            tags: self.tags.unwrap_or_default(),
            favorite: self.favorite.unwrap_or(false),
            user: self.user,
        }
    }

    pub fn into_draft(self) -> BookmarkDraft {
        let title = self.title.clone().unwrap_or_default();
        self.into_draft_with_title(title)
    }
}

/// Parses `raw` as an absolute http(s) URL with a host.
pub fn parse_web_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    let is_web = matches!(url.scheme(), "http" | "https");
    let has_host = url.host_str().is_some_and(|h| !h.is_empty());
    (is_web && has_host).then_some(url)
}

impl Record for Bookmark {
    type Draft = BookmarkDraft;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(draft: BookmarkDraft) -> Result<BookmarkDraft, StoreError> {
        if parse_web_url(&draft.url).is_none() {
            return Err(StoreError::Validation(URL_REQUIRED.to_string()));
        }
        if draft.title.is_empty() {
            return Err(StoreError::Validation(TITLE_REQUIRED.to_string()));
        }
        Ok(BookmarkDraft {
            tags: normalize_tags(draft.tags),
            ..draft
        })
    }

    fn from_draft(id: Uuid, draft: BookmarkDraft, now: DateTime<Utc>) -> Self {
        Bookmark {
            id,
            title: draft.title,
            url: draft.url,
            description: draft.description,
            tags: draft.tags,
            favorite: draft.favorite,
            created_at: now,
            updated_at: now,
            user: draft.user,
        }
    }

    fn replace(&mut self, draft: BookmarkDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.url = draft.url;
        self.description = draft.description;
        self.tags = draft.tags;
        self.favorite = draft.favorite;
        self.user = draft.user;
        self.updated_at = now;
    }
}

impl Filterable for Bookmark {
    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_favorite(&self) -> bool {
        self.favorite
    }
}
