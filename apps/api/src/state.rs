use std::sync::Arc;

use crate::models::bookmark::Bookmark;
use crate::models::note::Note;
use crate::page_client::PageFetcher;
use crate::records::bookmarks::BookmarkService;
use crate::records::notes::NoteService;
use crate::records::title::TitleResolver;
use crate::store::EntityStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub bookmarks: BookmarkService,
}

impl AppState {
    pub fn new(
        notes: Arc<dyn EntityStore<Note>>,
        bookmarks: Arc<dyn EntityStore<Bookmark>>,
        fetcher: Arc<dyn PageFetcher>,
        fetch_timeout: std::time::Duration,
    ) -> Self {
        Self {
            notes: NoteService::new(notes),
            bookmarks: BookmarkService::new(bookmarks, TitleResolver::new(fetcher, fetch_timeout)),
        }
    }
}
