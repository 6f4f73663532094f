use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::note::{Note, NoteInput};
use crate::records::filter::{resolve, ListQuery};
use crate::records::parse_id;
use crate::store::EntityStore;

/// Note lifecycle. Stateless apart from the injected store.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn EntityStore<Note>>,
}

impl NoteService {
    pub fn new(store: Arc<dyn EntityStore<Note>>) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NoteInput) -> Result<Note, AppError> {
        let note = self.store.create(input.into_draft()).await?;
        info!("Created note {}", note.id);
        Ok(note)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Note>, AppError> {
        let filter = resolve(query);
        debug!("Listing notes with {filter:?}");
        Ok(self.store.find(&filter).await?)
    }

    /// `Ok(None)` when the id does not exist.
    pub async fn get(&self, id: &str) -> Result<Option<Note>, AppError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.store.find_by_id(id).await?)
    }

    /// Replaces every field with `input`; omitted fields are reset to defaults.
    pub async fn update(&self, id: &str, input: NoteInput) -> Result<Option<Note>, AppError> {
        let draft = input.into_draft();
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let updated = self.store.update_by_id(id, draft).await?;
        if updated.is_some() {
            info!("Updated note {id}");
        }
        Ok(updated)
    }

    /// `Ok(false)` when the id does not exist.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            info!("Deleted note {id}");
        }
        Ok(deleted)
    }
}
