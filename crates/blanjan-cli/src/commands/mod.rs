pub mod add;
pub mod common;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod search;
pub mod session;
pub mod theme;
pub mod toggle;
