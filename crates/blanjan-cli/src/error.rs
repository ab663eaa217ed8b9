use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] blanjan_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No item text provided")]
    EmptyText,
    #[error("Item ID cannot be empty")]
    EmptyItemId,
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Item not found for id/prefix: {0}")]
    ItemNotFound(String),
    #[error("{0}")]
    AmbiguousItemId(String),
    #[error("Item {0} is completed; toggle it back or pass --force")]
    CompletedItem(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Unknown session command: {0} (try `help`)")]
    UnknownSessionCommand(String),
}
