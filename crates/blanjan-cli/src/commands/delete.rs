use std::path::Path;

use crate::commands::common::{open_store, resolve_item_id, resolve_item_ids};
use crate::error::CliError;

pub fn run_delete(ids: &[String], all: bool, force: bool, db_path: &Path) -> Result<(), CliError> {
    let mut store = open_store(db_path)?;

    if all {
        if !store.all_selected() {
            store.toggle_select_all();
        }
        let removed = store.delete_selected()?;
        println!("Deleted {removed} items");
        return Ok(());
    }

    if let [id] = ids {
        let item_id = resolve_item_id(id, &store)?;
        if !force && !store.can_modify(item_id) {
            return Err(CliError::CompletedItem(item_id.to_string()));
        }
        store.delete_item(item_id)?;
        println!("{item_id}");
        return Ok(());
    }

    // Resolve everything first so a bad id deletes nothing.
    let item_ids = resolve_item_ids(ids, &store)?;
    for item_id in &item_ids {
        if !store.is_selected(*item_id) {
            store.toggle_select(*item_id);
        }
    }

    store.delete_selected()?;
    for item_id in item_ids {
        println!("{item_id}");
    }
    Ok(())
}
