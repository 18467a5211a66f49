pub mod panel;
pub mod quit_menu;
pub mod status_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function. Also records the frame's geometry into
/// `app.layout` for focus and mouse hit-testing.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.layout.clear();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);
    if area.height == 0 {
        return;
    }

    let bar = Rect { height: 1, ..area };
    let icon = status_bar::render_status_bar(frame, app, bar);
    app.layout.icon = Some(icon);

    if app.panel_visible {
        panel::render_panel(frame, app, area, icon);
    }
    // Menu goes on top of the panel
    if app.quit_menu {
        quit_menu::render_quit_menu(frame, app, area, icon);
    }
}
