// Modal overlay rendering
//
// - Help: keyboard shortcuts
// - Logs: captured tracing output, newest last
// - Detail: pretty JSON of one row

use crate::logging::LogLevel;
use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &mut App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Logs => render_logs(f, app),
        Modal::Detail { title, content } => render_detail(f, app, title, content),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Nearly full screen (90% width, 85% height)
fn large_rect(area: Rect) -> Rect {
    let width = (area.width * 90 / 100).max(40);
    let height = (area.height * 85 / 100).max(10);
    centered_rect(width, height, area)
}

fn modal_block<'a>(app: &App, title: &'a str, hint: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight))
        .border_type(app.theme.border_type)
        .title(title)
        .title_bottom(Line::from(hint).centered())
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.title);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Pages", header_style)),
        kb("1-9", "Switch resource tab"),
        kb("Tab", "Table / add form"),
        kb("PgUp/PgDn", "Previous / next page"),
        kb("r", "Reload page"),
        Line::raw(""),
        Line::from(Span::styled("  Table", header_style)),
        kb("↑↓←→", "Move (top row filters)"),
        kb("Enter", "Filter / edit / update"),
        kb("Space, +, -", "Change select or color"),
        kb("Esc", "Cancel edit"),
        kb("s", "Sort by column"),
        kb("d", "Remove row"),
        kb("v", "Row details"),
        kb("y", "Copy row as JSON"),
        Line::raw(""),
        Line::from(Span::styled("  Form", header_style)),
        kb("Enter", "Edit field / add"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("L", "Logs"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
    ]);

    let area = centered_rect(44, 28, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(content)
            .style(Style::default().bg(app.theme.background))
            .block(modal_block(app, " Help ", " Press ? or Esc to close ")),
        area,
    );
}

fn render_logs(f: &mut Frame, app: &mut App) {
    let entries = app.log_buffer.get_all();
    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Error => app.theme.error,
                LogLevel::Warn => app.theme.highlight,
                LogLevel::Info => app.theme.success,
                LogLevel::Debug | LogLevel::Trace => app.theme.muted,
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(app.theme.muted),
                ),
                Span::styled(format!("{:<5} ", entry.level.as_str()), Style::default().fg(color)),
                Span::raw(entry.message.clone()),
            ])
        })
        .collect();

    let area = large_rect(f.area());
    let viewport = area.height.saturating_sub(2);
    let max_scroll = (lines.len() as u16).saturating_sub(viewport);
    // u16::MAX from End means "follow the tail"
    app.modal_scroll = app.modal_scroll.min(max_scroll);

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .style(
                Style::default()
                    .fg(app.theme.foreground)
                    .bg(app.theme.background),
            )
            .scroll((app.modal_scroll, 0))
            .block(modal_block(app, " Logs ", " ↑↓ scroll  Esc close ")),
        area,
    );
}

fn render_detail(f: &mut Frame, app: &mut App, title: &str, content: &str) {
    let area = large_rect(f.area());
    let viewport = area.height.saturating_sub(2);
    let max_scroll = (content.lines().count() as u16).saturating_sub(viewport);
    app.modal_scroll = app.modal_scroll.min(max_scroll);

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(content.to_string())
            .style(
                Style::default()
                    .fg(app.theme.foreground)
                    .bg(app.theme.background),
            )
            .scroll((app.modal_scroll, 0))
            .block(modal_block(app, title, " y copy  Esc close ")),
        area,
    );
}
