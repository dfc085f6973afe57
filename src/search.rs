//! Search query matching for highlighted bars.

/// A bar is highlighted when a non-empty query is a substring of its name
pub fn is_match(query: &str, name: &str) -> bool {
    !query.is_empty() && name.contains(query)
}

/// Whether a query is active at all
pub fn is_active(query: Option<&str>) -> bool {
    query.is_some_and(|q| !q.is_empty())
}
