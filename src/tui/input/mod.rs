mod common;
mod mouse;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;

use common::normalize_key;
pub use mouse::handle_mouse;

/// Handle a key event. Global chords first, then the quit menu, then the
/// panel's rows.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q') if ctrl => {
            app.quit();
            return;
        }
        KeyCode::Char('t') if ctrl => {
            app.toggle_panel();
            return;
        }
        KeyCode::F(2) => {
            app.toggle_panel();
            return;
        }
        _ => {}
    }

    if app.quit_menu {
        handle_quit_menu(app, key);
        return;
    }
    if !app.panel_visible {
        return;
    }
    if key.code == KeyCode::Esc {
        app.hide_panel();
        return;
    }

    if app.monitor.is_active() {
        app.rows.handle_key(&mut app.list, key);
    } else {
        app.rows.edit(&mut app.list, key);
    }
}

fn handle_quit_menu(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') => app.quit(),
        _ => app.quit_menu = false,
    }
}

/// Handle a bracketed paste: inserted into the focused row as one line
pub fn handle_paste(app: &mut App, text: &str) {
    if !app.panel_visible || app.quit_menu {
        return;
    }
    app.rows.paste(&mut app.list, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemoryStore;
    use crate::model::Config;
    use crate::ops::TodoList;
    use crate::tui::app::PanelLayout;
    use crate::tui::rows::Row;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        App::new(TodoList::open(Box::new(MemoryStore::new())), &Config::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn chord(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    /// Pretend every row is on screen, then apply deferred focus
    fn settle(app: &mut App) {
        let rows = app.rows.row_count();
        app.layout = PanelLayout {
            panel: Some(ratatui::layout::Rect::new(0, 1, 34, 12)),
            rows: vec![
                crate::tui::app::RowRects {
                    row: ratatui::layout::Rect::default(),
                    circle: ratatui::layout::Rect::default(),
                    delete: None,
                };
                rows
            ],
            ..PanelLayout::default()
        };
        app.run_deferred();
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            handle_key(app, key(KeyCode::Char(c)));
            settle(app);
        }
    }

    #[test]
    fn typing_and_enter_add_an_item() {
        let mut app = app();
        settle(&mut app);
        type_str(&mut app, "Buy milk");
        handle_key(&mut app, key(KeyCode::Enter));
        settle(&mut app);
        assert_eq!(app.list.len(), 1);
        assert_eq!(app.rows.selected_row(), Some(Row::Input));
    }

    #[test]
    fn kitty_shift_letters_insert_uppercase() {
        let mut app = app();
        settle(&mut app);
        handle_key(&mut app, chord(KeyCode::Char('b'), KeyModifiers::SHIFT));
        assert_eq!(app.rows.draft(), "B");
    }

    #[test]
    fn toggle_and_escape() {
        let mut app = app();
        handle_key(&mut app, chord(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert!(!app.panel_visible);
        handle_key(&mut app, key(KeyCode::F(2)));
        assert!(app.panel_visible);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.panel_visible);
    }

    #[test]
    fn hidden_panel_ignores_typing() {
        let mut app = app();
        settle(&mut app);
        app.hide_panel();
        type_str(&mut app, "x");
        handle_paste(&mut app, "pasted");
        assert_eq!(app.rows.draft(), "");
    }

    #[test]
    fn quit_menu_keys() {
        let mut app = app();
        app.quit_menu = true;
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.quit_menu);
        assert!(!app.should_quit);
        // Esc closed the menu, not the panel
        assert!(app.panel_visible);

        app.quit_menu = true;
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_q_quits_from_anywhere() {
        let mut app = app();
        app.hide_panel();
        handle_key(&mut app, chord(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn paste_into_input_row() {
        let mut app = app();
        settle(&mut app);
        handle_paste(&mut app, "Buy\nmilk");
        assert_eq!(app.rows.draft(), "Buy milk");
    }
}
