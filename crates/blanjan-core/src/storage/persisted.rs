//! JSON encoding of the persisted application state
//!
//! Missing, `null`, or malformed values load as defaults instead of failing.

use std::collections::HashSet;

use super::{Storage, DARK_MODE_KEY, ITEMS_KEY};
use crate::error::Result;
use crate::Item;

/// Load the item list, defaulting to empty
///
/// Duplicate ids keep their first occurrence.
pub fn load_items(storage: &impl Storage) -> Result<Vec<Item>> {
    let Some(raw) = storage.get(ITEMS_KEY)? else {
        return Ok(Vec::new());
    };

    let items = match serde_json::from_str::<Option<Vec<Item>>>(&raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(error) => {
            tracing::warn!("Ignoring malformed `{ITEMS_KEY}` value: {error}");
            return Ok(Vec::new());
        }
    };

    let mut seen = HashSet::with_capacity(items.len());
    let total = items.len();
    let unique = items
        .into_iter()
        .filter(|item| seen.insert(item.id))
        .collect::<Vec<_>>();
    if unique.len() < total {
        tracing::warn!(
            "Dropped {} stored items with duplicate ids",
            total - unique.len()
        );
    }

    Ok(unique)
}

/// Persist the full item list
pub fn save_items(storage: &mut impl Storage, items: &[Item]) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    storage.set(ITEMS_KEY, &raw)?;
    tracing::debug!("Persisted {} items", items.len());
    Ok(())
}

/// Load the dark mode flag, defaulting to `false`
pub fn load_dark_mode(storage: &impl Storage) -> Result<bool> {
    let Some(raw) = storage.get(DARK_MODE_KEY)? else {
        return Ok(false);
    };

    match serde_json::from_str::<Option<bool>>(&raw) {
        Ok(value) => Ok(value.unwrap_or(false)),
        Err(error) => {
            tracing::warn!("Ignoring malformed `{DARK_MODE_KEY}` value: {error}");
            Ok(false)
        }
    }
}

/// Persist the dark mode flag
pub fn save_dark_mode(storage: &mut impl Storage, dark_mode: bool) -> Result<()> {
    storage.set(DARK_MODE_KEY, &serde_json::to_string(&dark_mode)?)?;
    tracing::debug!("Persisted dark mode = {dark_mode}");
    Ok(())
}
