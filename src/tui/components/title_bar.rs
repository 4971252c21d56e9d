// Title bar component
//
// Renders the resource tabs with their number keys and a loading spinner
// for the active page.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app
        .pages
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            let marker = if idx == app.active && page.is_loading() {
                format!(" {}", app.spinner_char())
            } else {
                String::new()
            };
            Line::from(format!("{} {}{}", idx + 1, page.title(), marker))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active)
        .style(Style::default().fg(app.theme.foreground))
        .highlight_style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title(" catalog-admin ")
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(tabs, area);
}
