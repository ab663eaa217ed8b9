use std::path::Path;

use crate::commands::common::{format_item_lines, item_to_list_entry, open_store, ItemListEntry};
use crate::error::CliError;

pub fn run_list(search: Option<&str>, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let mut store = open_store(db_path)?;
    if let Some(query) = search {
        store.set_search_query(query.trim());
    }

    let items = store.filtered_items();
    if as_json {
        let json_items = items
            .iter()
            .map(|item| item_to_list_entry(item))
            .collect::<Vec<ItemListEntry>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if let Some(empty_state) = store.empty_state() {
        println!("{}", empty_state.message());
    } else {
        for line in format_item_lines(&items) {
            println!("{line}");
        }
    }

    Ok(())
}
