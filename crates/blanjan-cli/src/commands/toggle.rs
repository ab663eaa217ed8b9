use std::path::Path;

use crate::commands::common::{open_store, resolve_item_id};
use crate::error::CliError;

pub fn run_toggle(ids: &[String], db_path: &Path) -> Result<(), CliError> {
    let mut store = open_store(db_path)?;

    for id in ids {
        let item_id = resolve_item_id(id, &store)?;
        store.toggle_complete(item_id)?;

        let mark = if store.get(item_id).is_some_and(|item| item.completed) {
            'x'
        } else {
            ' '
        };
        println!("{item_id}  [{mark}]");
    }

    Ok(())
}
