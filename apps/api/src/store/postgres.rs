//! PostgreSQL backend. One `PgStore` serves both tables.
//!
//! The list query is a single prepared statement per table; each optional
//! filter constraint is bound as NULL/false when absent so the planner can
//! skip it.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::bookmark::{Bookmark, BookmarkDraft};
use crate::models::note::{Note, NoteDraft};
use crate::records::filter::RecordFilter;
use crate::store::{EntityStore, Record, StoreError};

const NOTE_COLUMNS: &str = "id, title, content, tags, favorite, created_at, user_id";
const BOOKMARK_COLUMNS: &str =
    "id, title, url, description, tags, favorite, created_at, updated_at, user_id";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds an `ILIKE` pattern matching `text` as a literal substring.
pub fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Bind values for the shared `WHERE` clause: `$1` pattern, `$2` tags, `$3` favorite-only.
fn filter_binds(filter: &RecordFilter) -> (Option<String>, Option<Vec<String>>, bool) {
    (
        filter.text.as_deref().map(like_pattern),
        filter.any_tags.clone(),
        filter.favorite_only,
    )
}

#[async_trait]
impl EntityStore<Note> for PgStore {
    async fn create(&self, draft: NoteDraft) -> Result<Note, StoreError> {
        let draft = Note::validate(draft)?;
        let note = sqlx::query_as::<_, Note>(&format!(
            r#"
            INSERT INTO notes (id, title, content, tags, favorite, created_at, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {NOTE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.tags)
        .bind(draft.favorite)
        .bind(Utc::now())
        .bind(draft.user)
        .fetch_one(&self.pool)
        .await?;
        Ok(note)
    }

    async fn find(&self, filter: &RecordFilter) -> Result<Vec<Note>, StoreError> {
        let (pattern, tags, favorite_only) = filter_binds(filter);
        let notes = sqlx::query_as::<_, Note>(&format!(
            r#"
            SELECT {NOTE_COLUMNS} FROM notes
            WHERE ($1::text IS NULL OR title ILIKE $1 OR content ILIKE $1)
              AND ($2::text[] IS NULL OR tags && $2)
              AND (NOT $3 OR favorite)
            ORDER BY seq
            "#
        ))
        .bind(pattern)
        .bind(tags)
        .bind(favorite_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, StoreError> {
        let note = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        draft: NoteDraft,
    ) -> Result<Option<Note>, StoreError> {
        let draft = Note::validate(draft)?;
        let note = sqlx::query_as::<_, Note>(&format!(
            r#"
            UPDATE notes
            SET title = $2, content = $3, tags = $4, favorite = $5, user_id = $6
            WHERE id = $1
            RETURNING {NOTE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.tags)
        .bind(draft.favorite)
        .bind(draft.user)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EntityStore<Bookmark> for PgStore {
    async fn create(&self, draft: BookmarkDraft) -> Result<Bookmark, StoreError> {
        let draft = Bookmark::validate(draft)?;
        let now = Utc::now();
        let bookmark = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            INSERT INTO bookmarks
                (id, title, url, description, tags, favorite, created_at, updated_at, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8)
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&draft.title)
        .bind(&draft.url)
        .bind(&draft.description)
        .bind(&draft.tags)
        .bind(draft.favorite)
        .bind(now)
        .bind(draft.user)
        .fetch_one(&self.pool)
        .await?;
        Ok(bookmark)
    }

    async fn find(&self, filter: &RecordFilter) -> Result<Vec<Bookmark>, StoreError> {
        let (pattern, tags, favorite_only) = filter_binds(filter);
        let bookmarks = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            SELECT {BOOKMARK_COLUMNS} FROM bookmarks
            WHERE ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)
              AND ($2::text[] IS NULL OR tags && $2)
              AND (NOT $3 OR favorite)
            ORDER BY seq
            "#
        ))
        .bind(pattern)
        .bind(tags)
        .bind(favorite_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookmarks)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bookmark>, StoreError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(&format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(bookmark)
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        draft: BookmarkDraft,
    ) -> Result<Option<Bookmark>, StoreError> {
        let draft = Bookmark::validate(draft)?;
        let bookmark = sqlx::query_as::<_, Bookmark>(&format!(
            r#"
            UPDATE bookmarks
            SET title = $2, url = $3, description = $4, tags = $5, favorite = $6,
                user_id = $7, updated_at = $8
            WHERE id = $1
            RETURNING {BOOKMARK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.url)
        .bind(&draft.description)
        .bind(&draft.tags)
        .bind(draft.favorite)
        .bind(draft.user)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(bookmark)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_in_wildcards() {
        assert_eq!(like_pattern("groc"), "%groc%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn test_filter_binds_for_unconstrained_filter() {
        let (pattern, tags, favorite_only) = filter_binds(&RecordFilter::default());
        assert!(pattern.is_none());
        assert!(tags.is_none());
        assert!(!favorite_only);
    }

    #[test]
    fn test_filter_binds_pass_empty_tag_list_through() {
        let filter = RecordFilter {
            any_tags: Some(vec![]),
            ..Default::default()
        };
        let (_, tags, _) = filter_binds(&filter);
        assert_eq!(tags, Some(vec![]));
    }
}
