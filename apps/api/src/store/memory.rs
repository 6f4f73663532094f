use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::records::filter::RecordFilter;
use crate::store::{EntityStore, Record, StoreError};

/// In-process store. Records live in a vector so `find` keeps insertion order.
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> EntityStore<R> for MemoryStore<R> {
    async fn create(&self, draft: R::Draft) -> Result<R, StoreError> {
        let draft = R::validate(draft)?;
        let record = R::from_draft(Uuid::new_v4(), draft, Utc::now());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find(&self, filter: &RecordFilter) -> Result<Vec<R>, StoreError> {
        let records = self.records.read().await;
        if filter.is_unconstrained() {
            return Ok(records.to_vec());
        }
        Ok(records.iter().filter(|r| filter.matches(*r)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, draft: R::Draft) -> Result<Option<R>, StoreError> {
        let draft = R::validate(draft)?;
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id() == id).map(|record| {
            record.replace(draft, Utc::now());
            record.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.id() == id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bookmark::{Bookmark, BookmarkDraft};
    use crate::models::note::{Note, NoteDraft};

    fn note(title: &str, tags: &[&str]) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_find_by_id_returns_it() {
        let store = MemoryStore::<Note>::new();
        let created = store.create(note("Groceries", &[])).await.unwrap();
        assert!(!created.id.is_nil());

        let found = store.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft_without_writing() {
        let store = MemoryStore::<Note>::new();
        let err = store.create(NoteDraft::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.find(&RecordFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let store = MemoryStore::<Note>::new();
        for title in ["first", "second", "third"] {
            store.create(note(title, &[])).await.unwrap();
        }
        let titles: Vec<_> = store
            .find(&RecordFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_find_applies_filter() {
        let store = MemoryStore::<Note>::new();
        store.create(note("a", &["work"])).await.unwrap();
        store.create(note("b", &["home"])).await.unwrap();

        let filter = RecordFilter {
            any_tags: Some(vec!["home".to_string()]),
            ..Default::default()
        };
        let found = store.find(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "b");
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let store = MemoryStore::<Note>::new();
        let created = store
            .create(NoteDraft {
                content: "milk".to_string(),
                ..note("Groceries", &["food"])
            })
            .await
            .unwrap();

        let updated = store
            .update_by_id(created.id, note("Groceries", &[]))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.content, "");
        assert!(updated.tags.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_none() {
        let store = MemoryStore::<Note>::new();
        let result = store.update_by_id(Uuid::new_v4(), note("x", &[])).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_then_find_by_id_is_none() {
        let store = MemoryStore::<Bookmark>::new();
        let created = store
            .create(BookmarkDraft {
                title: "Example".to_string(),
                url: "https://example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(store.delete_by_id(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
        assert!(!store.delete_by_id(created.id).await.unwrap());
    }
}
