//! List store: owner of all shopping-list state
//!
//! [`ListStore`] holds the items, the dark mode flag, and the transient
//! selection/edit/search state. Every mutation goes through it and writes the
//! persisted parts back to storage before returning. A mutation whose write
//! fails returns the error and leaves the store as it was.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{Item, ItemId, Theme};
use crate::search::filter_items;
use crate::storage::{load_dark_mode, load_items, save_dark_mode, save_items, Storage};
use crate::util::{normalize_text, unix_timestamp_millis_now};

/// Receiver for the document-wide theme side effect
pub trait ThemeIndicator {
    /// Apply the given theme
    fn apply(&mut self, theme: Theme);
}

/// Theme indicator that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThemeIndicator;

impl ThemeIndicator for NoopThemeIndicator {
    fn apply(&mut self, _theme: Theme) {}
}

/// The item currently being edited and its uncommitted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: ItemId,
    pub text: String,
}

/// Why the visible list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// There are no items at all
    EmptyList,
    /// Items exist but none match the search query
    NoMatches,
}

impl EmptyState {
    /// User-facing message for this state
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyList => "Your shopping list is empty",
            Self::NoMatches => "No items match your search",
        }
    }
}

/// Shopping-list state and its only mutation surface
pub struct ListStore<S: Storage> {
    storage: S,
    items: Vec<Item>,
    dark_mode: bool,
    selected: HashSet<ItemId>,
    editing: Option<EditSession>,
    search_query: String,
    last_id: Option<ItemId>,
    theme_indicator: Box<dyn ThemeIndicator>,
}

impl<S: Storage> ListStore<S> {
    /// Load persisted state from `storage`
    ///
    /// Missing or malformed values fall back to an empty list and light theme.
    pub fn load(storage: S) -> Result<Self> {
        let items = load_items(&storage)?;
        let dark_mode = load_dark_mode(&storage)?;
        let last_id = items.iter().map(|item| item.id).max();
        tracing::debug!("Loaded {} items (dark mode = {dark_mode})", items.len());

        Ok(Self {
            storage,
            items,
            dark_mode,
            selected: HashSet::new(),
            editing: None,
            search_query: String::new(),
            last_id,
            theme_indicator: Box::new(NoopThemeIndicator),
        })
    }

    /// Attach a theme indicator and apply the current theme to it
    #[must_use]
    pub fn with_theme_indicator(mut self, indicator: impl ThemeIndicator + 'static) -> Self {
        self.theme_indicator = Box::new(indicator);
        self.theme_indicator.apply(self.theme());
        self
    }

    /// Underlying storage
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Add an item to the top of the list
    ///
    /// Returns `None` without changing anything when `text` is blank.
    pub fn add_item(&mut self, text: &str) -> Result<Option<ItemId>> {
        let Some(text) = normalize_text(text) else {
            return Ok(None);
        };

        let id = ItemId::next_after(self.last_id, unix_timestamp_millis_now());
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.push(Item::new(id, text));
        items.extend_from_slice(&self.items);
        save_items(&mut self.storage, &items)?;

        self.items = items;
        self.last_id = Some(id);
        Ok(Some(id))
    }

    /// Flip the completed flag of an item
    pub fn toggle_complete(&mut self, id: ItemId) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let items = self.items_with(id, |item| item.completed = !item.completed);
        save_items(&mut self.storage, &items)?;

        self.items = items;
        Ok(true)
    }

    /// Remove a single item, dropping it from the selection too
    pub fn delete_item(&mut self, id: ItemId) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let items = self.items_without(|item_id| item_id == id);
        save_items(&mut self.storage, &items)?;

        self.items = items;
        self.selected.remove(&id);
        if self.editing.as_ref().is_some_and(|session| session.id == id) {
            self.editing = None;
        }
        Ok(true)
    }

    /// Remove every selected item and clear the selection
    ///
    /// Returns the number of items removed.
    pub fn delete_selected(&mut self) -> Result<usize> {
        if self.selected.is_empty() {
            return Ok(0);
        }

        let items = self.items_without(|id| self.selected.contains(&id));
        save_items(&mut self.storage, &items)?;

        let removed = self.items.len() - items.len();
        self.items = items;
        if self
            .editing
            .as_ref()
            .is_some_and(|session| self.selected.contains(&session.id))
        {
            self.editing = None;
        }
        self.selected.clear();
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Open an edit session for an item, abandoning any other session
    pub fn start_editing(&mut self, id: ItemId) -> bool {
        let Some(item) = self.get(id) else {
            return false;
        };

        self.editing = Some(EditSession {
            id,
            text: item.text.clone(),
        });
        true
    }

    /// Replace the draft text of the open edit session
    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.text = text.into();
        }
    }

    /// Commit the edit session for `id`
    ///
    /// A blank draft is rejected with [`Error::EmptyText`] and the session
    /// stays open. Returns `false` when no session is open for `id`.
    pub fn save_edit(&mut self, id: ItemId) -> Result<bool> {
        let Some(session) = self.editing.as_ref().filter(|session| session.id == id) else {
            return Ok(false);
        };
        let Some(text) = normalize_text(&session.text) else {
            return Err(Error::EmptyText);
        };

        if self.get(id).is_none() {
            self.editing = None;
            return Ok(false);
        }

        let items = self.items_with(id, |item| item.text = text);
        save_items(&mut self.storage, &items)?;

        self.items = items;
        self.editing = None;
        Ok(true)
    }

    /// Close the edit session without saving
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Open edit session, if any
    pub const fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Add or remove an item from the selection
    ///
    /// Returns whether the item is selected afterwards. Unknown ids are ignored.
    pub fn toggle_select(&mut self, id: ItemId) -> bool {
        if self.selected.remove(&id) {
            return false;
        }
        if self.get(id).is_none() {
            return false;
        }

        self.selected.insert(id);
        true
    }

    /// Select everything, or clear the selection when everything is selected
    pub fn toggle_select_all(&mut self) {
        if self.selected.len() == self.items.len() {
            self.selected.clear();
        } else {
            self.selected = self.items.iter().map(|item| item.id).collect();
        }
    }

    /// Selected item ids
    pub const fn selected(&self) -> &HashSet<ItemId> {
        &self.selected
    }

    /// Check if an item is selected
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// Number of selected items
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether the list is non-empty and every item is selected
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.selected.len() == self.items.len()
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Replace the search query
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Current search query
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Items matching the search query, in list order
    pub fn filtered_items(&self) -> Vec<&Item> {
        filter_items(&self.items, &self.search_query)
    }

    /// Why nothing is visible, or `None` when some item is
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.filtered_items().is_empty() {
            None
        } else if self.search_query.is_empty() {
            Some(EmptyState::EmptyList)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    // -----------------------------------------------------------------------
    // Theme
    // -----------------------------------------------------------------------

    /// Switch between light and dark theme
    pub fn toggle_dark_mode(&mut self) -> Result<Theme> {
        let dark_mode = !self.dark_mode;
        save_dark_mode(&mut self.storage, dark_mode)?;
        self.dark_mode = dark_mode;

        let theme = self.theme();
        self.theme_indicator.apply(theme);
        Ok(theme)
    }

    /// Persisted dark mode flag
    pub const fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Current theme
    pub const fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// All items, most recent first
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by id
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether single-item edit/delete applies (the item exists and is open)
    pub fn can_modify(&self, id: ItemId) -> bool {
        self.get(id).is_some_and(|item| !item.completed)
    }

    /// Copy of the items with `update` applied to the one with `id`
    fn items_with(&self, id: ItemId, update: impl FnOnce(&mut Item)) -> Vec<Item> {
        let mut items = self.items.clone();
        if let Some(item) = items.iter_mut().find(|item| item.id == id) {
            update(item);
        }
        items
    }

    /// Copy of the items minus those whose id matches `remove`
    fn items_without(&self, remove: impl Fn(ItemId) -> bool) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| !remove(item.id))
            .cloned()
            .collect()
    }
}
