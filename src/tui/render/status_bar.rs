use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

const APP_NAME: &str = " floaty";

/// Icon text: a check box and the number of open items
pub fn icon_label(app: &App) -> String {
    let open = app.list.items().filter(|item| !item.is_done).count();
    if open == 0 {
        " \u{2611} ".to_string()
    } else {
        format!(" \u{2611} {open} ")
    }
}

/// Render the one-line status bar. Returns where the icon was drawn.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) -> Rect {
    let bg = app.theme.background;
    let label = icon_label(app);
    let label_width = (display_width(&label) as u16).min(area.width);
    let icon = Rect {
        x: area.right() - label_width,
        width: label_width,
        ..area
    };

    let icon_style = if app.panel_visible || app.quit_menu {
        Style::default()
            .fg(app.theme.background)
            .bg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text_bright).bg(bg)
    };

    let name_width = display_width(APP_NAME);
    let mut spans = Vec::new();
    let free = (area.width - label_width) as usize;
    if name_width <= free {
        spans.push(Span::styled(APP_NAME, Style::default().fg(app.theme.dim).bg(bg)));
        spans.push(Span::styled(
            " ".repeat(free - name_width),
            Style::default().bg(bg),
        ));
    } else {
        spans.push(Span::styled(" ".repeat(free), Style::default().bg(bg)));
    }
    spans.push(Span::styled(label, icon_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
    icon
}
