use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, HitTarget};

/// Handle a mouse event against the geometry of the last render
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let target = app.layout.hit(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => left_click(app, target),
        MouseEventKind::Down(MouseButton::Right) => {
            if target == HitTarget::Icon {
                app.quit_menu = !app.quit_menu;
            } else {
                app.quit_menu = false;
            }
        }
        _ => {}
    }
}

fn left_click(app: &mut App, target: HitTarget) {
    if app.quit_menu {
        app.quit_menu = false;
        if target == HitTarget::MenuQuit {
            app.quit();
        }
        return;
    }
    tracing::debug!(?target, "click");
    match target {
        HitTarget::Icon => app.toggle_panel(),
        HitTarget::Circle(index) => app.rows.toggle_at(&mut app.list, index),
        HitTarget::Delete(index) => app.rows.delete_at(&mut app.list, index),
        HitTarget::Row(index) => app.rows.select(index),
        HitTarget::Panel | HitTarget::MenuQuit | HitTarget::Outside => {}
    }
}
