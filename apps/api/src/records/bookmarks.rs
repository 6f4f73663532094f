use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::bookmark::{parse_web_url, Bookmark, BookmarkInput, URL_REQUIRED};
use crate::records::filter::{resolve, ListQuery};
use crate::records::parse_id;
use crate::records::title::TitleResolver;
use crate::store::EntityStore;

/// Bookmark lifecycle. Create is the only path that consults the title resolver.
#[derive(Clone)]
pub struct BookmarkService {
    store: Arc<dyn EntityStore<Bookmark>>,
    titles: TitleResolver,
}

impl BookmarkService {
    pub fn new(store: Arc<dyn EntityStore<Bookmark>>, titles: TitleResolver) -> Self {
        Self { store, titles }
    }

    /// URL is checked before any fetch; the store is only called once the title is settled.
    pub async fn create(&self, input: BookmarkInput) -> Result<Bookmark, AppError> {
        let url = input
            .url
            .as_deref()
            .and_then(parse_web_url)
            .ok_or_else(|| AppError::Validation(URL_REQUIRED.to_string()))?;

        let title = self.titles.resolve(&url, input.title.as_deref()).await;
        let bookmark = self.store.create(input.into_draft_with_title(title)).await?;
        info!("Created bookmark {} for {}", bookmark.id, bookmark.url);
        Ok(bookmark)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Bookmark>, AppError> {
        let filter = resolve(query);
        debug!("Listing bookmarks with {filter:?}");
        Ok(self.store.find(&filter).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Bookmark>, AppError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.store.find_by_id(id).await?)
    }

    /// Full replacement. A missing `description` clears the stored one.
    pub async fn update(
        &self,
        id: &str,
        input: BookmarkInput,
    ) -> Result<Option<Bookmark>, AppError> {
        let draft = input.into_draft();
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let updated = self.store.update_by_id(id, draft).await?;
        if updated.is_some() {
            info!("Updated bookmark {id}");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            info!("Deleted bookmark {id}");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::records::title::tests::StubFetcher;
    use crate::records::title::FALLBACK_TITLE;
    use crate::store::MemoryStore;

    fn service(fetcher: &Arc<StubFetcher>) -> BookmarkService {
        BookmarkService::new(
            Arc::new(MemoryStore::<Bookmark>::new()),
            TitleResolver::new(fetcher.clone(), Duration::from_secs(5)),
        )
    }

    fn input(url: Option<&str>, title: Option<&str>) -> BookmarkInput {
        BookmarkInput {
            url: url.map(str::to_string),
            title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_without_url_is_validation_error() {
        let fetcher = Arc::new(StubFetcher::page(""));
        let err = service(&fetcher).create(input(None, Some("t"))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == URL_REQUIRED));
    }

    #[tokio::test]
    async fn test_create_with_malformed_url_never_fetches() {
        let fetcher = Arc::new(StubFetcher::page("<title>x</title>"));
        let err = service(&fetcher)
            .create(input(Some("not a url"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_derives_title_from_page() {
        let fetcher = Arc::new(StubFetcher::page("<html><TITLE>Hello</TITLE></html>"));
        let bookmark = service(&fetcher)
            .create(input(Some("https://example.com"), None))
            .await
            .unwrap();
        assert_eq!(bookmark.title, "Hello");
        assert!(!bookmark.favorite);
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_title() {
        let fetcher = Arc::new(StubFetcher::page("<title>Fetched</title>"));
        let bookmark = service(&fetcher)
            .create(input(Some("https://example.com"), Some("My Title")))
            .await
            .unwrap();
        assert_eq!(bookmark.title, "My Title");
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_with_blank_page_title_falls_back() {
        let fetcher = Arc::new(StubFetcher::page("<title>   </title>"));
        let bookmark = service(&fetcher)
            .create(input(Some("https://example.com"), None))
            .await
            .unwrap();
        assert_eq!(bookmark.title, FALLBACK_TITLE);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_title_whitespace() {
        let fetcher = Arc::new(StubFetcher::page("<title>Fetched</title>"));
        let bookmark = service(&fetcher)
            .create(input(Some("https://example.com"), Some(" Padded ")))
            .await
            .unwrap();
        assert_eq!(bookmark.title, " Padded ");
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_falls_back_when_fetch_fails() {
        let fetcher = Arc::new(StubFetcher::status(404));
        let bookmark = service(&fetcher)
            .create(input(Some("https://example.com"), None))
            .await
            .unwrap();
        assert_eq!(bookmark.title, FALLBACK_TITLE);
    }

    #[tokio::test]
    async fn test_update_clears_omitted_description() {
        let fetcher = Arc::new(StubFetcher::page(""));
        let svc = service(&fetcher);
        let created = svc
            .create(BookmarkInput {
                description: Some("reference docs".to_string()),
                ..input(Some("https://example.com"), Some("Docs"))
            })
            .await
            .unwrap();
        assert_eq!(created.description.as_deref(), Some("reference docs"));

        let updated = svc
            .update(
                &created.id.to_string(),
                input(Some("https://example.com"), Some("Docs")),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.id, created.id);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_url() {
        let fetcher = Arc::new(StubFetcher::page(""));
        let svc = service(&fetcher);
        let created = svc
            .create(input(Some("https://example.com"), Some("Docs")))
            .await
            .unwrap();
        let err = svc
            .update(&created.id.to_string(), input(Some("nope"), Some("Docs")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == URL_REQUIRED));
    }

    #[tokio::test]
    async fn test_update_missing_record_is_none() {
        let fetcher = Arc::new(StubFetcher::page(""));
        let result = service(&fetcher)
            .update(
                &uuid::Uuid::new_v4().to_string(),
                input(Some("https://example.com"), Some("Docs")),
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
