pub mod bookmark;
pub mod note;

/// Trims every tag and drops the blank ones, keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
