use std::path::Path;

use crate::commands::common::open_store;
use crate::error::CliError;

pub fn run_theme(show: bool, db_path: &Path) -> Result<(), CliError> {
    let mut store = open_store(db_path)?;
    let theme = if show {
        store.theme()
    } else {
        store.toggle_dark_mode()?
    };

    println!("{}", theme.as_str());
    Ok(())
}
