use std::path::Path;

use crate::commands::common::normalize_search_query;
use crate::commands::list::run_list;
use crate::error::CliError;

pub fn run_search(query: &str, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let normalized_query = normalize_search_query(query)?;
    run_list(Some(&normalized_query), as_json, db_path)
}
