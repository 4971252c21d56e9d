// Views module - screen-level rendering logic
//
// Shell layout: title bar, page content, status bar. The page content is
// the table with its pager and, on pages that can add rows, the form.

mod modal;

use super::app::App;
use crate::tui::components::{form_view, pager, status_bar, table_view, title_bar};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(form_view::height(app)),
            Constraint::Length(2),
        ])
        .split(f.area());

    title_bar::render(f, chunks[0], app);

    let table_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(chunks[1]);
    table_view::render(f, table_area[0], app);
    pager::render(f, table_area[1], app);

    form_view::render(f, chunks[2], app);
    status_bar::render(f, chunks[3], app);

    // Modal overlay (on top of everything)
    if let Some(modal_state) = app.modal.take() {
        modal::render(f, &modal_state, app);
        app.modal = Some(modal_state);
    }

    // Toast notification (on top of modal too)
    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    app.clear_expired_toast();
}
