use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

use crate::io::config_io::{config_path, load_config, resolve_data_dir};
use crate::io::logging;
use crate::io::store::JsonFileStore;
use crate::io::watcher::StoreWatcher;
use crate::model::Config;
use crate::ops::TodoList;

use super::chrome::{FocusTarget, PanelChrome, PanelMetrics};
use super::controller::RowController;
use super::input;
use super::monitor::LocalKeyMonitor;
use super::render;
use super::theme::Theme;

/// Pending text edits are written after this long without a key press
pub const IDLE_FLUSH: Duration = Duration::from_secs(1);

const TICK: Duration = Duration::from_millis(250);

/// Screen rectangles of one rendered row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRects {
    pub row: Rect,
    pub circle: Rect,
    /// Only filled rows have a delete affordance
    pub delete: Option<Rect>,
}

/// What the mouse landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Icon,
    Circle(usize),
    Delete(usize),
    Row(usize),
    /// Inside the panel but on its border or padding
    Panel,
    MenuQuit,
    Outside,
}

/// Geometry recorded by the last render pass. Focus requests are accepted
/// only for rows that were actually laid out.
#[derive(Debug, Clone, Default)]
pub struct PanelLayout {
    pub icon: Option<Rect>,
    pub panel: Option<Rect>,
    pub rows: Vec<RowRects>,
    pub menu_quit: Option<Rect>,
}

impl PanelLayout {
    pub fn clear(&mut self) {
        *self = PanelLayout::default();
    }

    pub fn hit(&self, column: u16, row: u16) -> HitTarget {
        let pos = Position::new(column, row);
        if self.menu_quit.is_some_and(|r| r.contains(pos)) {
            return HitTarget::MenuQuit;
        }
        if self.icon.is_some_and(|r| r.contains(pos)) {
            return HitTarget::Icon;
        }
        for (index, rects) in self.rows.iter().enumerate() {
            if rects.circle.contains(pos) {
                return HitTarget::Circle(index);
            }
            if rects.delete.is_some_and(|r| r.contains(pos)) {
                return HitTarget::Delete(index);
            }
            if rects.row.contains(pos) {
                return HitTarget::Row(index);
            }
        }
        if self.panel.is_some_and(|r| r.contains(pos)) {
            return HitTarget::Panel;
        }
        HitTarget::Outside
    }
}

impl FocusTarget for PanelLayout {
    fn focus_row(&mut self, index: usize) -> bool {
        self.panel.is_some() && index < self.rows.len()
    }
}

/// Main application state
pub struct App {
    pub list: TodoList,
    pub rows: RowController,
    pub theme: Theme,
    /// Shared with the controller, which resizes it
    pub chrome: PanelChrome,
    pub monitor: LocalKeyMonitor,
    pub panel_visible: bool,
    /// Right-click menu under the status-bar icon
    pub quit_menu: bool,
    pub should_quit: bool,
    pub layout: PanelLayout,
    pub last_key_at: Option<Instant>,
}

impl App {
    pub fn new(mut list: TodoList, config: &Config) -> Self {
        list.set_save_every_keystroke(config.store.save_every_keystroke);
        let chrome = PanelChrome::new(PanelMetrics::from_config(&config.panel));
        let monitor = LocalKeyMonitor::new();
        let rows = RowController::new(
            &mut list,
            Box::new(chrome.clone()),
            Box::new(monitor.clone()),
        );
        App {
            list,
            rows,
            theme: Theme::from_config(&config.ui),
            chrome,
            monitor,
            panel_visible: !config.panel.start_hidden,
            quit_menu: false,
            should_quit: false,
            layout: PanelLayout::default(),
            last_key_at: None,
        }
    }

    pub fn show_panel(&mut self) {
        if self.panel_visible {
            return;
        }
        tracing::debug!("panel shown");
        self.panel_visible = true;
        self.quit_menu = false;
        self.rows.request_focus();
    }

    pub fn hide_panel(&mut self) {
        if !self.panel_visible {
            return;
        }
        tracing::debug!("panel hidden");
        self.panel_visible = false;
        self.list.flush();
    }

    pub fn toggle_panel(&mut self) {
        if self.panel_visible {
            self.hide_panel();
        } else {
            self.show_panel();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Apply deferred focus against the last render. Returns true when
    /// something was focused and the frame should be redrawn.
    pub fn run_deferred(&mut self) -> bool {
        if !self.rows.has_deferred_work() {
            return false;
        }
        let before = self.rows.focused();
        self.rows.run_deferred(&mut self.list, &mut self.layout);
        self.rows.focused() != before
    }

    /// Idle tick: write coalesced text edits once typing pauses
    pub fn flush_if_idle(&mut self, now: Instant) {
        if !self.list.is_dirty() {
            return;
        }
        let idle = self
            .last_key_at
            .is_none_or(|at| now.duration_since(at) >= IDLE_FLUSH);
        if idle {
            self.list.flush();
        }
    }

    /// Pick up edits another process made to the store
    pub fn reload_from_store(&mut self) {
        self.list.refresh();
        self.rows.sync(&mut self.list);
    }
}

/// Run the panel until quit. `data_dir` and `config` override the default
/// locations.
pub fn run(data_dir: Option<&Path>, config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config_file = config.map_or_else(config_path, Path::to_path_buf);
    let (config, config_warning) = load_config(&config_file);
    let data_dir = resolve_data_dir(&config, data_dir);

    let _log_guard = logging::init(&data_dir);
    if let Some(warning) = config_warning {
        tracing::warn!(path = %config_file.display(), "{warning}; using defaults");
    }

    let list = TodoList::open(Box::new(JsonFileStore::new(&data_dir)));
    let mut app = App::new(list, &config);

    let watcher = match StoreWatcher::start(&data_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "store watcher unavailable, external edits need a restart");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    // Super is only reported under the kitty protocol.
    let kitty = config.ui.kitty_keyboard.unwrap_or(true)
        && supports_keyboard_enhancement().unwrap_or(false);
    if kitty {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        if kitty {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    tracing::info!(data_dir = %data_dir.display(), kitty, "panel started");
    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    app.list.flush();
    let App { mut list, rows, .. } = app;
    rows.detach(&mut list);
    tracing::info!("panel closed");

    // Restore terminal
    disable_raw_mode()?;
    if kitty {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;
        // Focus lands once the rebuilt rows are on screen.
        if app.run_deferred() {
            terminal.draw(|frame| render::render(frame, app))?;
        }

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    app.last_key_at = Some(Instant::now());
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if watcher.is_some_and(StoreWatcher::poll) {
            app.reload_from_store();
        }
        app.flush_if_idle(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::model::TodoItem;
    use pretty_assertions::assert_eq;

    fn app_with(store: &MemoryStore) -> App {
        App::new(TodoList::open(Box::new(store.clone())), &Config::default())
    }

    fn laid_out(rows: usize) -> PanelLayout {
        let rect = |y| Rect::new(0, y, 20, 1);
        PanelLayout {
            icon: Some(Rect::new(20, 0, 4, 1)),
            panel: Some(Rect::new(0, 1, 20, rows as u16 + 2)),
            rows: (0..rows as u16)
                .map(|i| RowRects {
                    row: rect(i + 2),
                    circle: Rect::new(1, i + 2, 1, 1),
                    delete: Some(Rect::new(18, i + 2, 1, 1)),
                })
                .collect(),
            menu_quit: None,
        }
    }

    #[test]
    fn hit_testing_prefers_affordances() {
        let layout = laid_out(3);
        assert_eq!(layout.hit(21, 0), HitTarget::Icon);
        assert_eq!(layout.hit(1, 2), HitTarget::Circle(0));
        assert_eq!(layout.hit(18, 3), HitTarget::Delete(1));
        assert_eq!(layout.hit(8, 4), HitTarget::Row(2));
        assert_eq!(layout.hit(8, 1), HitTarget::Panel);
        assert_eq!(layout.hit(40, 10), HitTarget::Outside);
    }

    #[test]
    fn hidden_panel_rejects_focus() {
        let mut layout = laid_out(3);
        assert!(layout.focus_row(2));
        assert!(!layout.focus_row(3));
        layout.clear();
        assert!(!layout.focus_row(0));
    }

    #[test]
    fn deferred_focus_needs_a_layout() {
        let store = MemoryStore::new();
        let mut app = app_with(&store);
        assert!(!app.run_deferred());
        assert_eq!(app.rows.focused(), None);

        app.rows.request_focus();
        app.layout = laid_out(3);
        assert!(app.run_deferred());
        assert_eq!(app.rows.focused(), Some(0));
    }

    #[test]
    fn hiding_flushes_pending_edits() {
        let store = MemoryStore::with_items(vec![TodoItem::new("milk")]);
        let mut app = app_with(&store);
        let id = app.list.get(0).unwrap().id;
        app.list.set_text(id, "oat milk");
        assert!(app.list.is_dirty());

        app.hide_panel();
        assert!(!app.panel_visible);
        assert!(!app.list.is_dirty());
        assert_eq!(store.items()[0].text, "oat milk");
    }

    #[test]
    fn idle_flush_waits_for_a_pause() {
        let store = MemoryStore::with_items(vec![TodoItem::new("milk")]);
        let mut app = app_with(&store);
        let id = app.list.get(0).unwrap().id;
        let t0 = Instant::now();
        app.last_key_at = Some(t0);
        app.list.set_text(id, "milk!");

        app.flush_if_idle(t0 + Duration::from_millis(300));
        assert!(app.list.is_dirty());
        app.flush_if_idle(t0 + IDLE_FLUSH);
        assert!(!app.list.is_dirty());
        assert_eq!(store.items()[0].text, "milk!");
    }

    #[test]
    fn start_hidden_from_config() {
        let mut config = Config::default();
        config.panel.start_hidden = true;
        let app = App::new(TodoList::open(Box::new(MemoryStore::new())), &config);
        assert!(!app.panel_visible);
        assert_eq!(app.chrome.size().row_count, 3);
    }

    #[test]
    fn reload_rebuilds_rows() {
        let store = MemoryStore::new();
        let mut app = app_with(&store);
        assert_eq!(app.rows.row_count(), 3);

        // Another writer adds two items behind our back.
        let mut other = TodoList::open(Box::new(store.clone()));
        other.add("a");
        other.add("b");

        app.reload_from_store();
        assert_eq!(app.list.len(), 2);
        assert_eq!(app.rows.row_count(), 5);
    }
}
