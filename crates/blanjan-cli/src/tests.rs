use std::path::{Path, PathBuf};

use blanjan_core::storage::{MemoryStorage, SqliteStorage, Storage, ITEMS_KEY};
use blanjan_core::{Item, ItemId, ListStore, Theme};
use pretty_assertions::assert_eq;

use clap_complete::Shell;

use crate::cli::ExportFormat;
use crate::commands::add::run_add;
use crate::commands::common::{
    default_editor, format_item_lines, format_relative_time, item_preview,
    normalize_item_identifier, normalize_search_query, open_store, resolve_item_id,
    resolve_item_ids, resolve_item_text,
};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::session::{drive, Session, SessionFlow};
use crate::commands::theme::run_theme;
use crate::commands::toggle::run_toggle;
use crate::error::CliError;

fn store_from_json(raw: &str) -> ListStore<MemoryStorage> {
    let mut storage = MemoryStorage::new();
    storage.set(ITEMS_KEY, raw).unwrap();
    ListStore::load(storage).unwrap()
}

fn sample_store() -> ListStore<MemoryStorage> {
    store_from_json(
        r#"[
            {"id":1700000000300,"text":"Bread","completed":false},
            {"id":1700000000200,"text":"Eggs","completed":true},
            {"id":1700000000100,"text":"Milk","completed":false}
        ]"#,
    )
}

fn test_db_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("blanjan.db")
}

fn texts(db_path: &Path) -> Vec<String> {
    open_store(db_path)
        .unwrap()
        .items()
        .iter()
        .map(|item| item.text.clone())
        .collect()
}

fn run_lines(session: &mut Session<MemoryStorage>, lines: &str) -> String {
    let mut out = Vec::new();
    drive(session, lines.as_bytes(), &mut out, false).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn resolve_item_text_joins_and_trims() {
    let parts = vec!["  oat".to_string(), "milk ".to_string()];
    assert_eq!(resolve_item_text(&parts).unwrap(), "oat milk");
    assert!(matches!(
        resolve_item_text(&[" ".to_string()]),
        Err(CliError::EmptyText)
    ));
    assert!(matches!(resolve_item_text(&[]), Err(CliError::EmptyText)));
}

#[test]
fn normalize_search_query_rejects_empty() {
    assert!(matches!(
        normalize_search_query("   "),
        Err(CliError::EmptySearchQuery)
    ));
    assert_eq!(normalize_search_query("  milk ").unwrap(), "milk");
}

#[test]
fn normalize_item_identifier_rejects_empty() {
    assert!(matches!(
        normalize_item_identifier(" \t"),
        Err(CliError::EmptyItemId)
    ));
    assert_eq!(normalize_item_identifier(" 17 ").unwrap(), "17");
}

#[test]
fn default_editor_is_defined() {
    assert!(!default_editor().is_empty());
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
}

#[test]
fn item_preview_truncates_with_ellipsis() {
    let item = Item::new(ItemId::new(1), "a very long shopping list entry");
    assert_eq!(item_preview(&item, 10), "a very ...");
    assert_eq!(item_preview(&item, 80), "a very long shopping list entry");
}

#[test]
fn format_item_lines_show_completion_mark() {
    let done = Item {
        completed: true,
        ..Item::new(ItemId::new(1_700_000_000_000), "Milk")
    };
    let open = Item::new(ItemId::new(1_700_000_000_001), "Eggs");

    let lines = format_item_lines(&[&done, &open]);
    assert!(lines[0].starts_with("1700000000000  [x] Milk"));
    assert!(lines[1].starts_with("1700000000001  [ ] Eggs"));
}

#[test]
fn resolve_item_id_supports_exact_and_prefix_id() {
    let store = sample_store();

    assert_eq!(
        resolve_item_id("1700000000200", &store).unwrap(),
        ItemId::new(1_700_000_000_200)
    );
    assert_eq!(
        resolve_item_id("17000000003", &store).unwrap(),
        ItemId::new(1_700_000_000_300)
    );
}

#[test]
fn resolve_item_id_rejects_ambiguous_prefix() {
    let store = sample_store();

    let error = resolve_item_id("170000000", &store).unwrap_err();
    match error {
        CliError::AmbiguousItemId(message) => {
            assert!(message.contains("ID prefix '170000000' is ambiguous"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn resolve_item_ids_drops_repeated_items_in_order() {
    let store = sample_store();
    let queries = ["1700000000100", "17000000003", "1700000000100", "17000000001"]
        .map(String::from);

    assert_eq!(
        resolve_item_ids(&queries, &store).unwrap(),
        vec![ItemId::new(1_700_000_000_100), ItemId::new(1_700_000_000_300)]
    );
}

#[test]
fn resolve_item_id_rejects_missing_item() {
    let store = sample_store();

    assert!(matches!(
        resolve_item_id("999", &store),
        Err(CliError::ItemNotFound(query)) if query == "999"
    ));
    assert!(matches!(
        resolve_item_id("", &store),
        Err(CliError::EmptyItemId)
    ));
}

#[test]
fn run_add_prepends_items() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);

    run_add(&["Milk".to_string()], &db_path).unwrap();
    run_add(&["Eggs".to_string(), "x12".to_string()], &db_path).unwrap();

    assert_eq!(texts(&db_path), vec!["Eggs x12", "Milk"]);
    assert!(matches!(
        run_add(&["  ".to_string()], &db_path),
        Err(CliError::EmptyText)
    ));
}

#[test]
fn run_edit_replaces_text_and_refuses_completed_items() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);
    run_add(&["Milk".to_string()], &db_path).unwrap();
    let id = open_store(&db_path).unwrap().items()[0].id.to_string();

    run_edit(&id, &["Oat".to_string(), "milk".to_string()], false, &db_path).unwrap();
    assert_eq!(texts(&db_path), vec!["Oat milk"]);

    run_toggle(std::slice::from_ref(&id), &db_path).unwrap();
    assert!(matches!(
        run_edit(&id, &["Soy milk".to_string()], false, &db_path),
        Err(CliError::CompletedItem(_))
    ));

    run_edit(&id, &["Soy milk".to_string()], true, &db_path).unwrap();
    let store = open_store(&db_path).unwrap();
    assert_eq!(store.items()[0].text, "Soy milk");
    assert!(store.items()[0].completed);
}

#[test]
fn run_delete_handles_single_many_and_all() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);
    for text in ["Milk", "Eggs", "Bread", "Tea"] {
        run_add(&[text.to_string()], &db_path).unwrap();
    }
    let ids = open_store(&db_path)
        .unwrap()
        .items()
        .iter()
        .map(|item| item.id.to_string())
        .collect::<Vec<_>>();

    run_delete(&ids[..1], false, false, &db_path).unwrap();
    assert_eq!(texts(&db_path), vec!["Bread", "Eggs", "Milk"]);

    run_delete(&[ids[1].clone(), ids[3].clone()], false, false, &db_path).unwrap();
    assert_eq!(texts(&db_path), vec!["Eggs"]);

    run_delete(&[], true, false, &db_path).unwrap();
    assert!(texts(&db_path).is_empty());
}

#[test]
fn run_delete_with_unknown_id_deletes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);
    run_add(&["Milk".to_string()], &db_path).unwrap();
    let id = open_store(&db_path).unwrap().items()[0].id.to_string();

    assert!(matches!(
        run_delete(&[id, "42".to_string()], false, false, &db_path),
        Err(CliError::ItemNotFound(_))
    ));
    assert_eq!(texts(&db_path), vec!["Milk"]);
}

#[test]
fn run_delete_with_repeated_id_removes_item_once() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);
    run_add(&["Milk".to_string()], &db_path).unwrap();
    run_add(&["Eggs".to_string()], &db_path).unwrap();
    let id = open_store(&db_path).unwrap().items()[0].id.to_string();

    run_delete(&[id.clone(), id], false, false, &db_path).unwrap();
    assert_eq!(texts(&db_path), vec!["Milk"]);
}

#[test]
fn run_delete_refuses_single_completed_item_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);
    run_add(&["Milk".to_string()], &db_path).unwrap();
    let id = open_store(&db_path).unwrap().items()[0].id.to_string();
    run_toggle(std::slice::from_ref(&id), &db_path).unwrap();

    assert!(matches!(
        run_delete(std::slice::from_ref(&id), false, false, &db_path),
        Err(CliError::CompletedItem(_))
    ));
    run_delete(&[id], false, true, &db_path).unwrap();
    assert!(texts(&db_path).is_empty());
}

#[test]
fn run_theme_toggles_persisted_flag() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);

    run_theme(true, &db_path).unwrap();
    assert_eq!(open_store(&db_path).unwrap().theme(), Theme::Light);

    run_theme(false, &db_path).unwrap();
    assert_eq!(open_store(&db_path).unwrap().theme(), Theme::Dark);
}

#[test]
fn run_export_writes_markdown_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);
    run_add(&["Milk".to_string()], &db_path).unwrap();
    run_add(&["Eggs".to_string()], &db_path).unwrap();
    let output_path = dir.path().join("list.md");

    run_export(ExportFormat::Markdown, Some(&output_path), &db_path).unwrap();

    let exported = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(exported, "- [ ] Eggs\n- [ ] Milk\n");
}

#[test]
fn run_export_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = test_db_path(&dir);
    run_add(&["Milk".to_string()], &db_path).unwrap();
    let output_path = dir.path().join("list.json");

    run_export(ExportFormat::Json, Some(&output_path), &db_path).unwrap();

    let exported = std::fs::read_to_string(&output_path).unwrap();
    let items: Vec<Item> = serde_json::from_str(&exported).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text, "Milk");
}

#[test]
fn run_completions_writes_bash_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("blanjan.bash");

    run_completions(Shell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_blanjan()"));
    assert!(script.contains("complete -F _blanjan"));
}

#[test]
fn render_completions_covers_list_subcommands() {
    let script = String::from_utf8(render_completions(Shell::Fish)).unwrap();

    for subcommand in ["add", "toggle", "delete", "session"] {
        assert!(
            script.contains(&format!("-a \"{subcommand}\"")),
            "missing {subcommand} in fish completions"
        );
    }
    assert!(script.contains("complete -c blanjan"));
}

#[test]
fn session_keeps_selection_between_commands() {
    let mut session = Session::new(ListStore::load(MemoryStorage::new()).unwrap());
    run_lines(&mut session, "add Milk\nadd Eggs\nadd Bread\n");
    let ids = session
        .store()
        .items()
        .iter()
        .map(|item| item.id.to_string())
        .collect::<Vec<_>>();

    let output = run_lines(
        &mut session,
        &format!("select {}\nselect {}\ndelete-selected\n", ids[0], ids[2]),
    );

    assert!(output.contains("2 selected"));
    assert!(output.contains("Deleted 2 items"));
    let remaining = session
        .store()
        .items()
        .iter()
        .map(|item| item.text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(remaining, vec!["Eggs"]);
}

#[test]
fn session_edit_flow_rejects_blank_save() {
    let mut session = Session::new(ListStore::load(MemoryStorage::new()).unwrap());
    run_lines(&mut session, "add Milk\n");
    let id = session.store().items()[0].id;

    let output = run_lines(&mut session, &format!("edit {id}\ntext   \nsave\n"));
    assert!(output.contains(&format!("Editing {id}: Milk")));
    assert!(output.contains("Error: Item text cannot be empty"));
    assert!(session.store().editing().is_some());

    let output = run_lines(&mut session, "text Oat milk\nsave\n");
    assert!(output.contains(&format!("Saved {id}")));
    assert_eq!(session.store().items()[0].text, "Oat milk");
    assert_eq!(session.store().editing(), None);
}

#[test]
fn session_list_reports_empty_states() {
    let mut session = Session::new(ListStore::load(MemoryStorage::new()).unwrap());

    let output = run_lines(&mut session, "list\n");
    assert!(output.contains("Your shopping list is empty"));

    let output = run_lines(&mut session, "add Milk\nsearch tea\nlist\n");
    assert!(output.contains("search: \"tea\""));
    assert!(output.contains("No items match your search"));

    let output = run_lines(&mut session, "search MIL\nlist\n");
    assert!(output.contains("[ ] Milk"));
}

#[test]
fn session_select_all_toggles() {
    let mut session = Session::new(ListStore::load(MemoryStorage::new()).unwrap());
    run_lines(&mut session, "add Milk\nadd Eggs\n");

    let output = run_lines(&mut session, "select-all\nselect-all\n");
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec!["2 selected", "0 selected"]
    );
}

#[test]
fn session_reports_unknown_commands_and_quits() {
    let mut session = Session::new(ListStore::load(MemoryStorage::new()).unwrap());
    let mut out = Vec::new();

    assert!(matches!(
        session.execute("frobnicate", &mut out),
        Err(CliError::UnknownSessionCommand(command)) if command == "frobnicate"
    ));
    assert_eq!(session.execute("quit", &mut out).unwrap(), SessionFlow::Quit);

    let output = run_lines(&mut session, "quit\nadd Milk\n");
    assert!(output.is_empty());
    assert!(session.store().items().is_empty());
}

#[test]
fn session_theme_toggles_dark_mode() {
    let mut session = Session::new(ListStore::load(MemoryStorage::new()).unwrap());

    let output = run_lines(&mut session, "theme\ntheme\n");
    assert_eq!(output.lines().collect::<Vec<_>>(), vec!["dark", "light"]);
    assert!(!session.store().dark_mode());
}

#[test]
fn sqlite_store_opens_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("a").join("b").join("blanjan.db");

    let store = open_store(&db_path).unwrap();
    assert!(store.items().is_empty());
    assert!(SqliteStorage::open(&db_path).is_ok());
}
