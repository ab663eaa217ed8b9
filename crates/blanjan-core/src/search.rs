//! Search over the in-memory item list
//!
//! Matching is a case-insensitive substring test. Results are always
//! recomputed from the current items; nothing is cached.

use crate::Item;

/// Check whether `text` contains `query`, ignoring case.
///
/// An empty query matches everything.
#[must_use]
pub fn matches(text: &str, query: &str) -> bool {
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Items whose text matches `query`, in list order.
#[must_use]
pub fn filter_items<'a>(items: &'a [Item], query: &str) -> Vec<&'a Item> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.text.to_lowercase().contains(&needle))
        .collect()
}
