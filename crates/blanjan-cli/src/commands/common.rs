use std::collections::HashSet;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use blanjan_core::storage::{SqliteStorage, Storage};
use blanjan_core::util::{normalize_text, unix_timestamp_millis_now};
use blanjan_core::{Item, ItemId, ListStore, Theme, ThemeIndicator};
use serde::Serialize;

use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ItemListEntry {
    pub id: ItemId,
    pub text: String,
    pub completed: bool,
    pub relative_time: String,
}

/// Logs theme changes; the terminal has no document to restyle.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingThemeIndicator;

impl ThemeIndicator for LoggingThemeIndicator {
    fn apply(&mut self, theme: Theme) {
        tracing::debug!("Theme set to {}", theme.as_str());
    }
}

pub fn open_store(db_path: &Path) -> Result<ListStore<SqliteStorage>, CliError> {
    let storage = SqliteStorage::open(db_path)?;
    Ok(ListStore::load(storage)?.with_theme_indicator(LoggingThemeIndicator))
}

/// Resolve an exact item ID or a unique prefix of one.
pub fn resolve_item_id<S: Storage>(
    item_query: &str,
    store: &ListStore<S>,
) -> Result<ItemId, CliError> {
    let item_query = normalize_item_identifier(item_query)?;

    if let Ok(id) = item_query.parse::<ItemId>() {
        if store.get(id).is_some() {
            return Ok(id);
        }
    }

    let matching_ids = store
        .items()
        .iter()
        .map(|item| item.id)
        .filter(|id| id.to_string().starts_with(&item_query))
        .collect::<Vec<_>>();

    match matching_ids.as_slice() {
        [] => Err(CliError::ItemNotFound(item_query)),
        [id] => Ok(*id),
        _ => {
            let options = matching_ids
                .iter()
                .take(3)
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousItemId(format!(
                "ID prefix '{item_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

/// Resolve several ids or prefixes, keeping the first occurrence of each item.
pub fn resolve_item_ids<S: Storage>(
    item_queries: &[String],
    store: &ListStore<S>,
) -> Result<Vec<ItemId>, CliError> {
    let mut seen = HashSet::new();
    let mut item_ids = Vec::with_capacity(item_queries.len());

    for item_query in item_queries {
        let item_id = resolve_item_id(item_query, store)?;
        if seen.insert(item_id) {
            item_ids.push(item_id);
        }
    }

    Ok(item_ids)
}

pub fn format_item_lines(items: &[&Item]) -> Vec<String> {
    let now_ms = unix_timestamp_millis_now();
    items
        .iter()
        .map(|item| {
            let id = item.id.to_string();
            let mark = if item.completed { 'x' } else { ' ' };
            let preview = item_preview(item, 40);
            let relative_time = format_relative_time(item.id.value(), now_ms);
            format!("{id:<13}  [{mark}] {preview:<40}  {relative_time}")
        })
        .collect()
}

pub fn item_to_list_entry(item: &Item) -> ItemListEntry {
    let now_ms = unix_timestamp_millis_now();

    ItemListEntry {
        id: item.id,
        text: item.text.clone(),
        completed: item.completed,
        relative_time: format_relative_time(item.id.value(), now_ms),
    }
}

pub fn item_preview(item: &Item, max_chars: usize) -> String {
    let collapsed = item.text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

/// Item ids are creation times in Unix ms, so they double as an age.
pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn resolve_item_text(text_parts: &[String]) -> Result<String, CliError> {
    normalize_text(&text_parts.join(" ")).ok_or(CliError::EmptyText)
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    normalize_text(query).ok_or(CliError::EmptySearchQuery)
}

pub fn normalize_item_identifier(id: &str) -> Result<String, CliError> {
    normalize_text(id).ok_or(CliError::EmptyItemId)
}

pub fn capture_editor_input_with_initial(initial_text: &str) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_item_file_path();
    std::fs::write(&temp_file, initial_text)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let edited = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_text(&edited))
}

fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    let status = match Command::new(editor).arg(file_path).status() {
        Ok(status) => status,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            // Editor commands with args, e.g. "code --wait"
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };
            Command::new(program).args(parts).arg(file_path).status()?
        }
        Err(err) => return Err(CliError::Io(err)),
    };

    if status.success() {
        Ok(())
    } else {
        Err(CliError::EditorFailed(format!(
            "`{editor}` exited with status {status}"
        )))
    }
}

fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

fn create_temp_item_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("blanjan-item-{}-{now}.txt", std::process::id()))
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("BLANJAN_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("blanjan")
        .join("blanjan.db")
}
