// Pager component
//
// One line under the table, drawn only when there is more than one page.

use crate::i18n::Translate;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(pages) = app.page().map(|p| *p.pages()) else {
        return;
    };
    if !pages.is_visible() {
        return;
    }

    let muted = Style::default().fg(app.theme.muted);
    let prev = if pages.page() > 1 { "◀ PgUp" } else { "" };
    let next = if pages.page() < pages.total_pages() {
        "PgDn ▶"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(format!("{prev:>6}  "), muted),
        Span::styled(
            format!(
                "{} {} / {}",
                app.catalog.translate("pager.page"),
                pages.page(),
                pages.total_pages()
            ),
            Style::default()
                .fg(app.theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {next}"), muted),
    ])
    .centered();

    f.render_widget(Paragraph::new(line), area);
}
