use std::sync::mpsc;

use indexmap::IndexMap;

use crate::io::store::TodoStore;
use crate::model::{ItemId, TodoItem};

/// Hard cap on the number of items in the list
pub const MAX_ITEMS: usize = 10;

/// Change notification sent to every subscriber after a successful mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Added(ItemId),
    Toggled(ItemId),
    Deleted(ItemId),
    TextEdited(ItemId),
    /// The whole list was replaced from the store
    Reloaded,
}

impl ListChange {
    /// True when the change can move or add/remove rows
    pub fn is_structural(&self) -> bool {
        !matches!(self, ListChange::TextEdited(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// Receiving end of a list subscription
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    rx: mpsc::Receiver<ListChange>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Drain every pending notification without blocking
    pub fn drain(&self) -> Vec<ListChange> {
        let mut changes = Vec::new();
        while let Ok(change) = self.rx.try_recv() {
            changes.push(change);
        }
        changes
    }
}

/// The ordered, capped todo list.
///
/// Items are kept arena-by-id in insertion order, so id lookups survive the
/// position shifts a delete causes. Every mutation that changes something
/// notifies subscribers synchronously and saves through the store; save
/// failures are logged and otherwise ignored.
pub struct TodoList {
    items: IndexMap<ItemId, TodoItem>,
    store: Box<dyn TodoStore>,
    subscribers: Vec<(SubscriberId, mpsc::Sender<ListChange>)>,
    next_subscriber: u64,
    /// Text edits not yet written to the store
    dirty: bool,
    save_every_keystroke: bool,
    /// What the store held after our last load or successful save
    last_saved: Vec<TodoItem>,
}

impl TodoList {
    /// Load the list from `store`. A failing or malformed store yields an
    /// empty list.
    pub fn open(store: Box<dyn TodoStore>) -> Self {
        let loaded = match store.load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "could not load todo items, starting empty");
                Vec::new()
            }
        };
        let mut list = TodoList {
            items: IndexMap::new(),
            store,
            subscribers: Vec::new(),
            next_subscriber: 0,
            dirty: false,
            save_every_keystroke: false,
            last_saved: Vec::new(),
        };
        list.replace_items(loaded);
        list.last_saved = list.to_vec();
        tracing::info!(items = list.len(), "todo list loaded");
        list
    }

    /// Save after every `set_text` instead of coalescing edits
    pub fn set_save_every_keystroke(&mut self, eager: bool) {
        self.save_every_keystroke = eager;
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, tx));
        Subscription { id, rx }
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    // -- reads --

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_ITEMS
    }

    pub fn items(&self) -> impl Iterator<Item = &TodoItem> {
        self.items.values()
    }

    /// Item at a display position
    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    pub fn find(&self, id: ItemId) -> Option<&TodoItem> {
        self.items.get(&id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    pub fn to_vec(&self) -> Vec<TodoItem> {
        self.items.values().cloned().collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // -- mutations --

    /// Append a new item. Whitespace-only text and a full list are silent
    /// no-ops (`None`).
    pub fn add(&mut self, text: &str) -> Option<ItemId> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.is_full() {
            tracing::debug!(full = self.is_full(), "add ignored");
            return None;
        }
        let item = TodoItem::new(trimmed);
        let id = item.id;
        self.items.insert(id, item);
        self.commit(ListChange::Added(id));
        Some(id)
    }

    pub fn toggle(&mut self, id: ItemId) {
        let Some(item) = self.items.get_mut(&id) else {
            return;
        };
        item.is_done = !item.is_done;
        self.commit(ListChange::Toggled(id));
    }

    /// Remove an item; later items move up one position.
    pub fn delete(&mut self, id: ItemId) {
        if self.items.shift_remove(&id).is_none() {
            return;
        }
        self.commit(ListChange::Deleted(id));
    }

    /// Live edit of an existing item's text. No trimming and no emptiness
    /// check: a row may be blank while its text is retyped.
    pub fn set_text(&mut self, id: ItemId, text: &str) {
        let Some(item) = self.items.get_mut(&id) else {
            return;
        };
        if item.text == text {
            return;
        }
        item.text = text.to_string();
        self.dirty = true;
        self.notify(ListChange::TextEdited(id));
        if self.save_every_keystroke {
            self.save();
        }
    }

    /// Write pending text edits, if any
    pub fn flush(&mut self) {
        if self.dirty {
            self.save();
        }
    }

    /// Replace the list with what another writer put in the store.
    ///
    /// An echo of our own last save is ignored. Unsaved text edits are
    /// dropped when a genuinely different list arrives.
    pub fn reload(&mut self, items: Vec<TodoItem>) {
        if items == self.last_saved || items == self.to_vec() {
            return;
        }
        self.replace_items(items);
        self.last_saved = self.to_vec();
        self.dirty = false;
        tracing::info!(items = self.len(), "todo list reloaded from store");
        self.notify(ListChange::Reloaded);
    }

    /// Re-read the store and apply whatever another writer left there
    pub fn refresh(&mut self) {
        match self.store.load() {
            Ok(items) => self.reload(items),
            Err(e) => tracing::warn!(error = %e, "could not reload todo items"),
        }
    }

    fn replace_items(&mut self, items: Vec<TodoItem>) {
        if items.len() > MAX_ITEMS {
            tracing::warn!(
                found = items.len(),
                kept = MAX_ITEMS,
                "store holds more items than the list allows, dropping the rest"
            );
        }
        self.items = items
            .into_iter()
            .take(MAX_ITEMS)
            .map(|item| (item.id, item))
            .collect();
    }

    fn commit(&mut self, change: ListChange) {
        self.notify(change);
        self.save();
    }

    fn notify(&mut self, change: ListChange) {
        // Subscribers whose receiver is gone are detached here.
        self.subscribers.retain(|(_, tx)| tx.send(change).is_ok());
    }

    fn save(&mut self) {
        let items = self.to_vec();
        match self.store.save(&items) {
            Ok(()) => {
                self.dirty = false;
                self.last_saved = items;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not save todo items");
            }
        }
    }
}

impl std::fmt::Debug for TodoList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoList")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}
