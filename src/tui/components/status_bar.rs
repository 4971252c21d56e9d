// Status bar component
//
// Page state on the left, key hints for the current focus on the right.

use crate::i18n::Translate;
use crate::pages::PageStatus;
use crate::tui::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Hint text for the current input state
pub fn hints(app: &App) -> &'static str {
    if app.input.is_some() {
        return "type to edit  ⏎ apply  Esc leave";
    }
    match app.focus {
        Focus::Table if app.row == 0 => "⏎ filter  ␣/+/- choose  s sort  Tab form  ? help",
        Focus::Table => "⏎ edit/update  ␣/+/- change  Esc cancel  d remove  y copy  v view",
        Focus::Form => "⏎ edit/add  ␣/+/- change  Tab table  ? help",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let status = match app.page().map(|p| (p.status(), p.is_loading())) {
        Some((PageStatus::Broken(message), _)) => {
            format!(" {}: {}", app.catalog.translate("error.config"), message)
        }
        Some((_, true)) => format!(
            " {} {}",
            app.spinner_char(),
            app.catalog.translate("status.loading")
        ),
        Some((_, false)) => {
            let rows = app.page().and_then(|p| p.table()).map_or(0, |t| t.rows().len());
            format!(" {} │ {} rows", app.catalog.translate("status.ready"), rows)
        }
        None => String::new(),
    };

    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(app.theme.status_bar)),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(hints(app)).right_aligned())
            .style(Style::default().fg(app.theme.muted)),
        chunks[1],
    );
}
