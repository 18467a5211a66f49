use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::tui::app::App;

const MENU_WIDTH: u16 = 16;
const QUIT_LABEL: &str = " Quit floaty";

/// Right-click menu hanging under the icon
pub fn render_quit_menu(frame: &mut Frame, app: &mut App, area: Rect, icon: Rect) {
    let width = MENU_WIDTH.min(area.width);
    // Bar line plus a bordered one-entry box
    if area.height < 4 {
        return;
    }
    let rect = Rect::new(
        icon.right().saturating_sub(width).max(area.x),
        area.y + 1,
        width,
        3,
    );

    let block = Block::bordered()
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            QUIT_LABEL,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        )))
        .style(Style::default().bg(app.theme.selection_bg)),
        inner,
    );
    app.layout.menu_quit = Some(inner);
}
