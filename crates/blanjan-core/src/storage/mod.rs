//! Key-value storage layer for Blanjan
//!
//! Application state is persisted as whole JSON documents under two keys.
//! Backends only need to store and return strings.

mod memory;
mod migrations;
mod persisted;
mod sqlite;

pub use memory::MemoryStorage;
pub use persisted::{load_dark_mode, load_items, save_dark_mode, save_items};
pub use sqlite::SqliteStorage;

use crate::error::Result;

/// Key holding the JSON array of items
pub const ITEMS_KEY: &str = "shoppingList";

/// Key holding the JSON boolean dark mode flag
pub const DARK_MODE_KEY: &str = "darkMode";

/// Synchronous string key-value storage
pub trait Storage {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
