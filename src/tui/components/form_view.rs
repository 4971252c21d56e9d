// Add-row form component
//
// One line per form field and an Add button. The button is dimmed until
// every field has a value.

use crate::i18n::Translate;
use crate::table::FieldKind;
use crate::theme::Theme;
use crate::tui::app::{App, Focus, InputTarget};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Lines the form needs including borders
pub fn height(app: &App) -> u16 {
    app.page()
        .and_then(|p| p.form())
        .map_or(0, |form| form.columns().len() as u16 + 3)
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.page().and_then(|p| p.form()) else {
        return;
    };
    let theme = &app.theme;
    let focused = app.focus == Focus::Form;
    let label_width = form
        .columns()
        .iter()
        .map(|(_, d, _)| d.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = form
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, (key, descriptor, placeholder))| {
            let value = form.value(key);
            let typing = app.input == Some(InputTarget::Form(key.to_string()));
            let mut spans = vec![Span::styled(
                format!(" {:<label_width$}  ", descriptor.label),
                Style::default().fg(theme.title),
            )];

            if value.is_empty() && !typing {
                spans.push(Span::styled(
                    placeholder.to_string(),
                    Style::default()
                        .fg(theme.muted)
                        .add_modifier(Modifier::ITALIC),
                ));
            } else if let (FieldKind::Color, Some(color)) = (&descriptor.kind, Theme::swatch(&value)) {
                spans.push(Span::styled("■ ", Style::default().fg(color)));
                spans.push(Span::raw(value.clone()));
            } else {
                let mut text = descriptor.kind.display(&value).to_string();
                if typing {
                    text.push('▏');
                }
                spans.push(Span::raw(text));
            }
            if form.is_sticky(key) {
                spans.push(Span::styled(
                    format!("  ({})", app.catalog.translate("form.sticky")),
                    Style::default().fg(theme.muted),
                ));
            }

            let line = Line::from(spans);
            if focused && app.form_field == idx {
                line.style(Style::default().bg(theme.selection))
            } else {
                line
            }
        })
        .collect();

    let mut button = Style::default().add_modifier(Modifier::BOLD);
    button = if form.is_complete() {
        button.fg(theme.success)
    } else {
        button.fg(theme.muted)
    };
    if focused && app.form_field == form.columns().len() {
        button = button.add_modifier(Modifier::REVERSED);
    }
    lines.push(Line::from(Span::styled(
        format!(" [ {} ] ", app.catalog.translate("form.add")),
        button,
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(if focused {
            theme.highlight
        } else {
            theme.border
        }))
        .title(format!(" {} ", app.catalog.translate("form.title")));

    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.foreground))
            .block(block),
        area,
    );
}
