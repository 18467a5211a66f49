use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::ItemId;
use crate::ops::{ListChange, Subscription, TodoList};

use super::chrome::{FocusTarget, WindowChrome};
use super::edit::LineEditor;
use super::monitor::{KeyMonitor, MonitorId};
use super::rows::{Row, clamp_selection, derive_rows};
use super::scheduler::{Scheduler, Task};

/// Keyboard commands handled ahead of text editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCommand {
    Up,
    Down,
    /// Enter: add from the input row, or step down from a filled row
    Submit,
    ToggleDone,
    Delete,
}

/// Whether an intercepted key was used or should reach the text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Consumed,
    PassThrough,
}

/// "Cmd" is Super when the terminal reports it, Ctrl otherwise.
///
/// Without the kitty protocol a raw-mode terminal sends Ctrl+Enter as LF and
/// Ctrl+Backspace as BS, which arrive as Ctrl+J and Ctrl+H.
fn is_command_chord(m: KeyModifiers) -> bool {
    m.intersects(KeyModifiers::SUPER | KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT)
}

/// Map a key to a row command. Everything else belongs to the text field.
pub fn command_for(key: &KeyEvent) -> Option<RowCommand> {
    let m = key.modifiers;
    match key.code {
        KeyCode::Up if m.is_empty() => Some(RowCommand::Up),
        KeyCode::Down if m.is_empty() => Some(RowCommand::Down),
        KeyCode::BackTab => Some(RowCommand::Up),
        KeyCode::Tab if m.contains(KeyModifiers::SHIFT) => Some(RowCommand::Up),
        KeyCode::Tab => Some(RowCommand::Down),
        KeyCode::Enter if is_command_chord(m) => Some(RowCommand::ToggleDone),
        KeyCode::Enter if m.is_empty() || m == KeyModifiers::SHIFT => Some(RowCommand::Submit),
        KeyCode::Backspace | KeyCode::Delete if is_command_chord(m) => Some(RowCommand::Delete),
        KeyCode::Char('j') if m == KeyModifiers::CONTROL => Some(RowCommand::ToggleDone),
        KeyCode::Char('h') if m == KeyModifiers::CONTROL => Some(RowCommand::Delete),
        _ => None,
    }
}

/// The row the text field is currently attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    index: usize,
    row: Row,
}

/// Row-management state machine.
///
/// Derives the visible rows from the list, owns the selection, turns key
/// commands into list mutations and selection moves, and keeps the panel
/// sized to the row count. Rows are rebuilt from scratch on every
/// structural list change. Focus, after a rebuild or a selection move, is
/// deferred to the scheduler so it lands once the rows are laid out.
pub struct RowController {
    rows: Vec<Row>,
    selected: usize,
    /// Text field of the focused row
    editor: LineEditor,
    bound: Option<Binding>,
    /// Unsubmitted text of the input row, kept across navigation and rebuilds
    draft: String,
    subscription: Subscription,
    scheduler: Scheduler,
    chrome: Box<dyn WindowChrome>,
    monitor: Box<dyn KeyMonitor>,
    monitor_id: Option<MonitorId>,
}

impl RowController {
    /// Subscribe to `list`, install the key monitor, and do the initial
    /// rebuild with the input row selected.
    pub fn new(
        list: &mut TodoList,
        chrome: Box<dyn WindowChrome>,
        mut monitor: Box<dyn KeyMonitor>,
    ) -> Self {
        let subscription = list.subscribe();
        let monitor_id = Some(monitor.install());
        let mut controller = RowController {
            rows: Vec::new(),
            selected: list.len(),
            editor: LineEditor::default(),
            bound: None,
            draft: String::new(),
            subscription,
            scheduler: Scheduler::new(),
            chrome,
            monitor,
            monitor_id,
        };
        controller.rebuild(list);
        controller
    }

    /// Detach from the list. The key monitor goes when `self` is dropped.
    pub fn detach(self, list: &mut TodoList) {
        list.unsubscribe(self.subscription.id());
    }

    // -- reads --

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.rows.get(self.selected).copied()
    }

    /// Index of the row holding the text field, if focus has been applied
    pub fn focused(&self) -> Option<usize> {
        self.bound
            .filter(|b| self.rows.get(b.index) == Some(&b.row))
            .map(|b| b.index)
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn input_index(&self) -> Option<usize> {
        self.rows.iter().position(|r| *r == Row::Input)
    }

    pub fn has_deferred_work(&self) -> bool {
        !self.scheduler.is_idle()
    }

    // -- keyboard --

    /// Intercept first, then hand the key to the text field.
    pub fn handle_key(&mut self, list: &mut TodoList, key: KeyEvent) {
        if self.intercept(list, key) == KeyDisposition::PassThrough {
            self.edit(list, key);
        }
    }

    /// Run the command table. Commands whose preconditions fail are still
    /// consumed; keys that are not commands pass through.
    pub fn intercept(&mut self, list: &mut TodoList, key: KeyEvent) -> KeyDisposition {
        let Some(command) = command_for(&key) else {
            return KeyDisposition::PassThrough;
        };
        tracing::debug!(?command, selected = self.selected, "row command");
        match command {
            RowCommand::Up => self.move_up(),
            RowCommand::Down => self.move_down(),
            RowCommand::Submit => self.submit(list),
            RowCommand::ToggleDone => self.toggle_selected(list),
            RowCommand::Delete => self.delete_selected(list),
        }
        KeyDisposition::Consumed
    }

    /// Text editing on the focused row. Filled rows write through to the
    /// list on every change; the input row only updates its draft.
    pub fn edit(&mut self, list: &mut TodoList, key: KeyEvent) {
        let Some(row) = self.focused_row() else {
            return;
        };
        if self.editor.handle_key(key) {
            self.write_back(list, row);
        }
    }

    /// Insert pasted text into the focused row
    pub fn paste(&mut self, list: &mut TodoList, text: &str) {
        let Some(row) = self.focused_row() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        self.editor.insert_str(text);
        self.write_back(list, row);
    }

    fn focused_row(&self) -> Option<Row> {
        let index = self.focused()?;
        self.rows.get(index).copied().filter(Row::is_editable)
    }

    fn write_back(&mut self, list: &mut TodoList, row: Row) {
        match row {
            Row::Filled(id) => {
                list.set_text(id, self.editor.text());
                self.sync(list);
            }
            Row::Input => self.draft = self.editor.text().to_string(),
            Row::Empty(_) => {}
        }
    }

    // -- transitions --

    pub fn move_up(&mut self) {
        if self.selected == 0 {
            return;
        }
        self.selected -= 1;
        self.request_focus();
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 >= self.rows.len() {
            return;
        }
        self.selected += 1;
        self.request_focus();
    }

    /// Enter: a filled row steps down; the input row adds its text.
    pub fn submit(&mut self, list: &mut TodoList) {
        match self.selected_row() {
            Some(Row::Filled(_)) => self.move_down(),
            Some(Row::Input) => {
                if self.draft.trim().is_empty() {
                    return;
                }
                let text = std::mem::take(&mut self.draft);
                self.editor.clear();
                if list.add(&text).is_none() {
                    self.draft = text;
                    return;
                }
                // The new input row sits one below the old one.
                self.selected = list.len();
                self.sync(list);
            }
            _ => {}
        }
    }

    pub fn toggle_selected(&mut self, list: &mut TodoList) {
        if let Some(id) = self.selected_item() {
            list.toggle(id);
            self.sync(list);
        }
    }

    pub fn delete_selected(&mut self, list: &mut TodoList) {
        if let Some(id) = self.selected_item() {
            list.delete(id);
            self.sync(list);
        }
    }

    /// Select a row directly (mouse click). Focus follows on the next
    /// layout pass.
    pub fn select(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        self.selected = index;
        self.request_focus();
    }

    pub fn toggle_at(&mut self, list: &mut TodoList, index: usize) {
        if let Some(Row::Filled(id)) = self.rows.get(index).copied() {
            list.toggle(id);
            self.sync(list);
        }
    }

    pub fn delete_at(&mut self, list: &mut TodoList, index: usize) {
        if let Some(Row::Filled(id)) = self.rows.get(index).copied() {
            list.delete(id);
            self.sync(list);
        }
    }

    fn selected_item(&self) -> Option<ItemId> {
        self.selected_row().and_then(|r| r.item_id())
    }

    // -- rebuild & focus --

    /// Drain list notifications and rebuild if the rows may have changed.
    /// Text edits leave the rows, the panel size and the caret alone.
    pub fn sync(&mut self, list: &mut TodoList) {
        let changes = self.subscription.drain();
        if !changes.iter().any(ListChange::is_structural) {
            return;
        }
        if changes.contains(&ListChange::Reloaded) {
            // Text under the field may have changed; reload it on refocus.
            self.bound = None;
        }
        self.rebuild(list);
    }

    /// Ask for focus on the selected row after the next layout pass
    pub fn request_focus(&mut self) {
        self.scheduler.defer(Task::FocusRow(self.selected));
    }

    /// Run deferred tasks. Call after the rows have been laid out.
    pub fn run_deferred(&mut self, list: &mut TodoList, target: &mut dyn FocusTarget) {
        for task in self.scheduler.take_pending() {
            match task {
                Task::FocusRow(index) => {
                    if index < self.rows.len() && target.focus_row(index) {
                        self.bind(list, index);
                    } else {
                        // Off screen: nothing may edit it.
                        self.unbind(list);
                    }
                }
            }
        }
    }

    fn rebuild(&mut self, list: &TodoList) {
        let ids: Vec<ItemId> = list.items().map(|item| item.id).collect();
        self.rows = derive_rows(&ids);
        self.selected = clamp_selection(self.selected, self.rows.len());
        self.chrome.resize(self.rows.len());
        self.request_focus();
    }

    /// Attach the text field to a row. Re-focusing the row that already has
    /// it keeps the caret where it is.
    fn bind(&mut self, list: &mut TodoList, index: usize) {
        let Some(row) = self.rows.get(index).copied() else {
            return;
        };
        let next = Binding { index, row };
        if self.bound == Some(next) {
            return;
        }
        self.unbind(list);
        self.editor = match row {
            Row::Filled(id) => {
                LineEditor::with_text(list.find(id).map_or("", |item| item.text.as_str()))
            }
            Row::Input => LineEditor::with_text(&self.draft),
            Row::Empty(_) => LineEditor::default(),
        };
        self.bound = Some(next);
    }

    fn unbind(&mut self, list: &mut TodoList) {
        if let Some(Binding {
            row: Row::Filled(_),
            ..
        }) = self.bound.take()
        {
            // Leaving an edited row writes its text out.
            list.flush();
        }
    }
}

impl Drop for RowController {
    fn drop(&mut self) {
        if let Some(id) = self.monitor_id.take() {
            self.monitor.remove(id);
        }
    }
}

impl std::fmt::Debug for RowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowController")
            .field("rows", &self.rows)
            .field("selected", &self.selected)
            .field("focused", &self.focused())
            .field("draft", &self.draft)
            .finish()
    }
}
