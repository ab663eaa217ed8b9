//! Data models for Blanjan

mod item;
mod theme;

pub use item::{Item, ItemId};
pub use theme::Theme;
