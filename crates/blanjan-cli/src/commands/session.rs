//! Line-oriented interactive session.
//!
//! One-shot commands reload state on every run, which throws away the
//! selection, the edit session, and the search query. A session keeps a single
//! store alive and reads one command per line.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use blanjan_core::storage::Storage;
use blanjan_core::ListStore;

use crate::commands::common::{open_store, resolve_item_id};
use crate::error::CliError;

const HELP: &str = "\
add <text>         add an item to the top of the list
edit <id>          start editing an item
text <text>        replace the text being edited
save               save the edit
cancel             discard the edit
toggle <id>        mark an item completed or open
select <id>        add or remove an item from the selection
select-all         select everything, or nothing if all are selected
delete <id>        delete one item
delete-selected    delete every selected item
search [query]     filter the list (no query clears the filter)
theme              switch between light and dark
list               show the list
quit               leave the session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFlow {
    Continue,
    Quit,
}

pub struct Session<S: Storage> {
    store: ListStore<S>,
}

impl<S: Storage> Session<S> {
    pub const fn new(store: ListStore<S>) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &ListStore<S> {
        &self.store
    }

    /// Run one command line, writing its output to `out`.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<SessionFlow, CliError> {
        let line = line.trim_start();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        match command {
            "" => {}
            "add" => {
                if let Some(id) = self.store.add_item(rest)? {
                    writeln!(out, "{id}")?;
                }
            }
            "edit" => {
                let id = resolve_item_id(rest, &self.store)?;
                if !self.store.can_modify(id) {
                    return Err(CliError::CompletedItem(id.to_string()));
                }
                self.store.start_editing(id);
                writeln!(out, "Editing {id}: {}", self.draft())?;
            }
            "text" => {
                if self.store.editing().is_none() {
                    writeln!(out, "No edit in progress")?;
                } else {
                    self.store.set_edit_text(rest);
                }
            }
            "save" => match self.store.editing().map(|session| session.id) {
                Some(id) => {
                    self.store.save_edit(id)?;
                    writeln!(out, "Saved {id}")?;
                }
                None => writeln!(out, "No edit in progress")?,
            },
            "cancel" => self.store.cancel_edit(),
            "toggle" => {
                let id = resolve_item_id(rest, &self.store)?;
                self.store.toggle_complete(id)?;
            }
            "select" => {
                let id = resolve_item_id(rest, &self.store)?;
                self.store.toggle_select(id);
                writeln!(out, "{} selected", self.store.selected_count())?;
            }
            "select-all" => {
                self.store.toggle_select_all();
                writeln!(out, "{} selected", self.store.selected_count())?;
            }
            "delete" => {
                let id = resolve_item_id(rest, &self.store)?;
                if !self.store.can_modify(id) {
                    return Err(CliError::CompletedItem(id.to_string()));
                }
                self.store.delete_item(id)?;
            }
            "delete-selected" => {
                let removed = self.store.delete_selected()?;
                writeln!(out, "Deleted {removed} items")?;
            }
            "search" => self.store.set_search_query(rest.trim()),
            "theme" => {
                let theme = self.store.toggle_dark_mode()?;
                writeln!(out, "{}", theme.as_str())?;
            }
            "list" => self.render_list(out)?,
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(SessionFlow::Quit),
            other => return Err(CliError::UnknownSessionCommand(other.to_string())),
        }

        Ok(SessionFlow::Continue)
    }

    fn draft(&self) -> &str {
        self.store
            .editing()
            .map_or("", |session| session.text.as_str())
    }

    fn render_list(&self, out: &mut impl Write) -> Result<(), CliError> {
        let store = &self.store;
        writeln!(
            out,
            "theme: {} | selected: {}/{} | search: {:?}",
            store.theme().as_str(),
            store.selected_count(),
            store.items().len(),
            store.search_query()
        )?;

        if let Some(empty_state) = store.empty_state() {
            writeln!(out, "{}", empty_state.message())?;
            return Ok(());
        }

        for item in store.filtered_items() {
            let selected = if store.is_selected(item.id) { '*' } else { ' ' };
            let mark = if item.completed { 'x' } else { ' ' };
            match store.editing() {
                Some(session) if session.id == item.id => writeln!(
                    out,
                    "{selected} {}  [{mark}] {}  (editing: {})",
                    item.id, item.text, session.text
                )?,
                _ => writeln!(out, "{selected} {}  [{mark}] {}", item.id, item.text)?,
            }
        }

        Ok(())
    }
}

/// Feed lines from `input` to the session until EOF or `quit`.
///
/// Command errors are reported inline and do not end the session.
pub fn drive<S: Storage>(
    session: &mut Session<S>,
    input: impl BufRead,
    out: &mut impl Write,
    prompt: bool,
) -> Result<(), CliError> {
    if prompt {
        write!(out, "> ")?;
        out.flush()?;
    }

    for line in input.lines() {
        match session.execute(&line?, out) {
            Ok(SessionFlow::Quit) => break,
            Ok(SessionFlow::Continue) => {}
            Err(error) => writeln!(out, "Error: {error}")?,
        }

        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }

    Ok(())
}

pub fn run_session(db_path: &Path) -> Result<(), CliError> {
    let mut session = Session::new(open_store(db_path)?);
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();

    if interactive {
        writeln!(stdout, "Type `help` for commands.")?;
    }
    drive(&mut session, stdin.lock(), &mut stdout, interactive)
}
