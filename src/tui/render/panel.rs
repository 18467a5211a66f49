use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::ops::MAX_ITEMS;
use crate::tui::app::{App, RowRects};
use crate::tui::chrome::PanelSize;
use crate::tui::rows::Row;
use crate::util::unicode::{caret_window, display_width, truncate_to_width};

const CIRCLE: &str = "\u{25CB}";
const CHECK: &str = "\u{2713}";
const CROSS: &str = "\u{00D7}";
const PLACEHOLDER: &str = "New todo";
/// " ○ " before the text, " × " after it
const ROW_GUTTERS: u16 = 6;

/// Panel rectangle hanging under the icon, clamped to the terminal
pub fn panel_rect(area: Rect, icon: Rect, size: PanelSize) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height.saturating_sub(1));
    let x = icon.right().saturating_sub(width).max(area.x);
    Rect::new(x, area.y + 1, width, height)
}

pub fn render_panel(frame: &mut Frame, app: &mut App, area: Rect, icon: Rect) {
    let rect = panel_rect(area, icon, app.chrome.size());
    if rect.width < 3 || rect.height < 3 {
        return;
    }

    let bg = app.theme.background;
    let count = format!(" {}/{} ", app.list.len(), MAX_ITEMS);
    let block = Block::bordered()
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(bg))
        .title(Span::styled(
            " Todos ",
            Style::default().fg(app.theme.text_bright).add_modifier(Modifier::BOLD),
        ))
        .title(Line::from(Span::styled(count, Style::default().fg(app.theme.dim))).right_aligned());
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    app.layout.panel = Some(rect);

    let row_height = app.chrome.metrics().row_height;
    let rows = app.rows.rows().to_vec();
    for (index, row) in rows.iter().enumerate() {
        let y = inner.y + (index as u16).saturating_mul(row_height);
        if y >= inner.bottom() {
            break;
        }
        let height = row_height.min(inner.bottom() - y);
        let row_rect = Rect::new(inner.x, y, inner.width, height);
        let line_rect = Rect { height: 1, ..row_rect };
        render_row(frame, app, *row, index, line_rect);

        if height >= 2 && index + 1 < rows.len() {
            let divider = Rect {
                y: row_rect.bottom() - 1,
                height: 1,
                ..row_rect
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "\u{2500}".repeat(inner.width as usize),
                    Style::default().fg(app.theme.border).bg(bg),
                )),
                divider,
            );
        }

        app.layout.rows.push(RowRects {
            row: row_rect,
            circle: Rect::new(inner.x + 1, y, 1, 1),
            delete: matches!(row, Row::Filled(_))
                .then(|| Rect::new(inner.right().saturating_sub(2), y, 1, 1)),
        });
    }
}

fn render_row(frame: &mut Frame, app: &App, row: Row, index: usize, area: Rect) {
    let theme = &app.theme;
    let selected = app.rows.selected() == index;
    let focused = app.rows.focused() == Some(index) && row.is_editable();
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);
    let text_width = area.width.saturating_sub(ROW_GUTTERS) as usize;

    let (circle, circle_style, text, text_style, placeholder) = match row {
        Row::Filled(id) => {
            let Some(item) = app.list.find(id) else {
                return;
            };
            let text = if focused {
                app.rows.editor().text()
            } else {
                item.text.as_str()
            };
            if item.is_done {
                (
                    CHECK,
                    base.fg(theme.green),
                    text,
                    base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT),
                    false,
                )
            } else {
                (CIRCLE, base.fg(theme.text), text, base.fg(theme.text_bright), false)
            }
        }
        Row::Input => {
            let text = if focused {
                app.rows.editor().text()
            } else {
                app.rows.draft()
            };
            if text.is_empty() {
                (CIRCLE, base.fg(theme.fade_near), PLACEHOLDER, base.fg(theme.dim), true)
            } else {
                (CIRCLE, base.fg(theme.fade_near), text, base.fg(theme.text_bright), false)
            }
        }
        Row::Empty(fade) => (CIRCLE, base.fg(theme.fade_color(fade)), "", base, false),
    };

    let caret_visible = focused && app.panel_visible && !app.quit_menu;
    let shown = if caret_visible && !placeholder {
        let editor = app.rows.editor();
        let (start, end) = caret_window(text, editor.caret(), text_width);
        let col = display_width(&text[start..editor.caret().max(start)]) as u16;
        frame.set_cursor_position(Position::new(area.x + 3 + col, area.y));
        text[start..end].to_string()
    } else {
        if caret_visible {
            frame.set_cursor_position(Position::new(area.x + 3, area.y));
        }
        truncate_to_width(text, text_width)
    };
    let pad = text_width.saturating_sub(display_width(&shown));

    let mut spans = vec![
        Span::styled(" ", base),
        Span::styled(circle, circle_style),
        Span::styled(" ", base),
        Span::styled(shown, text_style),
        Span::styled(" ".repeat(pad), base),
    ];
    if area.width >= ROW_GUTTERS {
        let cross = if matches!(row, Row::Filled(_)) { CROSS } else { " " };
        spans.push(Span::styled(" ", base));
        spans.push(Span::styled(cross, base.fg(theme.dim)));
        spans.push(Span::styled(" ", base));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}
