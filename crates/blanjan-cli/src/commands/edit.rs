use std::path::Path;

use crate::commands::common::{
    capture_editor_input_with_initial, open_store, resolve_item_id, resolve_item_text,
};
use crate::error::CliError;

pub fn run_edit(
    id: &str,
    text_parts: &[String],
    force: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let mut store = open_store(db_path)?;
    let item_id = resolve_item_id(id, &store)?;
    if !force && !store.can_modify(item_id) {
        return Err(CliError::CompletedItem(item_id.to_string()));
    }

    store.start_editing(item_id);
    let text = if text_parts.is_empty() {
        let current = store
            .editing()
            .map(|session| session.text.clone())
            .unwrap_or_default();
        capture_editor_input_with_initial(&current)?.ok_or(CliError::EmptyText)?
    } else {
        resolve_item_text(text_parts)?
    };

    store.set_edit_text(text);
    store.save_edit(item_id)?;
    println!("{item_id}");
    Ok(())
}
