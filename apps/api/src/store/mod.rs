//! Entity Store — keyed storage for notes and bookmarks.
//!
//! Two backends implement `EntityStore`: `PgStore` (PostgreSQL via sqlx) and
//! `MemoryStore` (in-process, used for `memory:` URLs and in tests).
//! Services hold an `Arc<dyn EntityStore<R>>` so the backend is chosen once at startup.
//!
//! Writes to the same id are last-write-wins. There is no version column, so
//! two concurrent updates of one record race and the later one is kept.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::records::filter::{Filterable, RecordFilter};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A storable entity together with its write-side draft.
pub trait Record: Filterable + Clone + Send + Sync + 'static {
    type Draft: Send + Sync + 'static;

    fn id(&self) -> Uuid;

    /// Checks required fields and normalizes the draft. Runs before every write.
    fn validate(draft: Self::Draft) -> Result<Self::Draft, StoreError>;

    fn from_draft(id: Uuid, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Overwrites every mutable field (replace, not merge).
    fn replace(&mut self, draft: Self::Draft, now: DateTime<Utc>);
}

#[async_trait]
pub trait EntityStore<R: Record>: Send + Sync {
    async fn create(&self, draft: R::Draft) -> Result<R, StoreError>;

    /// All records accepted by `filter`, in insertion order.
    async fn find(&self, filter: &RecordFilter) -> Result<Vec<R>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<R>, StoreError>;

    /// `Ok(None)` when no record has `id`.
    async fn update_by_id(&self, id: Uuid, draft: R::Draft) -> Result<Option<R>, StoreError>;

    /// Hard delete. `Ok(false)` when no record has `id`.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}
