//! blanjan-core - Core library for Blanjan
//!
//! This crate contains the item model, the key-value storage layer, and the
//! list store that owns all shopping-list state. Interfaces (the CLI today)
//! render that state and forward user intents to [`ListStore`].

pub mod error;
pub mod export;
pub mod models;
pub mod search;
pub mod storage;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use models::{Item, ItemId, Theme};
pub use store::{EditSession, EmptyState, ListStore, NoopThemeIndicator, ThemeIndicator};
