//! Cuisine tags.
//!
//! Source files store a restaurant's cuisine either as a single string or as
//! an ordered list of strings. Everything downstream of ingestion sees an
//! ordered `Vec<String>`; the joined form only exists at display time.

/// Separator used when a multi-cuisine restaurant is shown on one line.
pub const CATEGORY_SEPARATOR: &str = " & ";

/// Trim each tag and drop empty ones, preserving order.
#[must_use]
pub fn normalize_categories<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Join cuisine tags for display: `["Pizza", "Italian"]` → `"Pizza & Italian"`.
#[must_use]
pub fn format_categories(categories: &[String]) -> String {
    categories.join(CATEGORY_SEPARATOR)
}
