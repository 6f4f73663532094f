//! Title Resolver — picks the title persisted for a new bookmark.
//!
//! A supplied title wins. Otherwise the page is fetched once and the first
//! `<title>` element is used; every failure path ends in `FALLBACK_TITLE`.

use std::sync::Arc;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use tracing::{debug, warn};

use crate::page_client::PageFetcher;

pub const FALLBACK_TITLE: &str = "Untitled Bookmark";

lazy_static! {
    // No (?s): a title split across lines does not match.
    static ref TITLE_TAG: Regex = Regex::new(r"(?i)<title>(.*?)</title>").unwrap();
}

/// Returns the inner text of the first `<title>` element, verbatim.
/// An empty or whitespace-only element counts as no title.
pub fn extract_title(markup: &str) -> Option<&str> {
    TITLE_TAG
        .captures(markup)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|t| !t.trim().is_empty())
}

#[derive(Clone)]
pub struct TitleResolver {
    fetcher: Arc<dyn PageFetcher>,
    timeout: Duration,
}

impl TitleResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    /// Never fails. Does not touch the network when `supplied` has text.
    pub async fn resolve(&self, url: &Url, supplied: Option<&str>) -> String {
        if let Some(title) = supplied.filter(|t| !t.trim().is_empty()) {
            return title.to_string();
        }

        match tokio::time::timeout(self.timeout, self.fetcher.fetch(url)).await {
            Ok(Ok(body)) => match extract_title(&body) {
                Some(title) => {
                    debug!("Resolved title for {url}");
                    title.to_string()
                }
                None => {
                    debug!("No <title> in {url}, using fallback");
                    FALLBACK_TITLE.to_string()
                }
            },
            Ok(Err(e)) => {
                warn!("Title fetch for {url} failed: {e}");
                FALLBACK_TITLE.to_string()
            }
            Err(_) => {
                warn!("Title fetch for {url} timed out after {:?}", self.timeout);
                FALLBACK_TITLE.to_string()
            }
        }
    }
}
