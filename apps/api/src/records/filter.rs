//! Filter resolution — turns list query parameters into a `RecordFilter`.
//!
//! The filter is plain data so each store can evaluate it its own way:
//! `MemoryStore` calls `RecordFilter::matches`, `PgStore` binds it into SQL.

use serde::Deserialize;

/// Raw `?q=&tags=&favorite=` parameters accepted by both list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub tags: Option<String>,
    pub favorite: Option<String>,
}

/// Conjunction of the constraints a list request asked for.
/// The default value accepts every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Case-insensitive substring over the record's searchable text fields.
    pub text: Option<String>,
    /// Any-of tag match. `Some(vec![])` matches nothing.
    pub any_tags: Option<Vec<String>>,
    pub favorite_only: bool,
}

/// What a record exposes to filtering.
pub trait Filterable {
    fn searchable_text(&self) -> Vec<&str>;
    fn tags(&self) -> &[String];
    fn is_favorite(&self) -> bool;
}

/// Maps query parameters to a filter.
///
/// - `q`: empty or absent imposes nothing.
/// - `tags`: comma-separated; tokens are trimmed and blanks dropped. A
///   non-empty parameter made only of blanks yields a filter matching nothing.
/// - `favorite`: only the literal `"true"` constrains; `"false"` is a no-op.
pub fn resolve(query: &ListQuery) -> RecordFilter {
    let text = query.q.as_ref().filter(|q| !q.is_empty()).cloned();

    let any_tags = query.tags.as_ref().filter(|t| !t.is_empty()).map(|t| {
        t.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    RecordFilter {
        text,
        any_tags,
        favorite_only: query.favorite.as_deref() == Some("true"),
    }
}

impl RecordFilter {
    pub fn is_unconstrained(&self) -> bool {
        self.text.is_none() && self.any_tags.is_none() && !self.favorite_only
    }

    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        if self.favorite_only && !record.is_favorite() {
            return false;
        }

        if let Some(wanted) = &self.any_tags {
            let tags = record.tags();
            if !wanted.iter().any(|w| tags.contains(w)) {
                return false;
            }
        }

        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !record
                .searchable_text()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        true
    }
}
