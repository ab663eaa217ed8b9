use std::path::Path;

use crate::commands::common::{open_store, resolve_item_text};
use crate::error::CliError;

pub fn run_add(text_parts: &[String], db_path: &Path) -> Result<(), CliError> {
    let text = resolve_item_text(text_parts)?;

    let mut store = open_store(db_path)?;
    let id = store.add_item(&text)?.ok_or(CliError::EmptyText)?;

    println!("{id}");
    Ok(())
}
