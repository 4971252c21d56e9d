// Table view component
//
// Header with sort indicators, the filter row, then one row per record.
// The cursor cell is reversed; cells changed in the pending edit use the
// theme's `edited` color.

use crate::i18n::Translate;
use crate::pages::PageStatus;
use crate::table::{EditableTable, FieldDescriptor, FieldKind, Record, Row as _};
use crate::theme::Theme;
use crate::tui::app::{App, Focus, InputTarget};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use std::iter::once;

const ACTIONS_WIDTH: u16 = 24;
const INPUT_CURSOR: &str = "▏";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(page) = app.page() else {
        return;
    };
    let theme = &app.theme;
    let focused = app.focus == Focus::Table;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(if focused {
            theme.highlight
        } else {
            theme.border
        }))
        .title(format!(" {} ", page.title()));

    let Some(table) = page.table() else {
        let text = match page.status() {
            PageStatus::Broken(message) => message.clone(),
            _ => app.catalog.translate("status.loading"),
        };
        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(theme.muted))
                .block(block),
            area,
        );
        return;
    };

    let header = Row::new(
        table
            .columns()
            .iter()
            .map(|(key, descriptor, _)| {
                Cell::from(format!("{}{}", descriptor.label, page.sort().indicator(key)))
            })
            .chain(once(Cell::from(app.catalog.translate("table.actions")))),
    )
    .style(
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let mut rows = vec![filter_row(app, table)];
    if table.rows().is_empty() {
        rows.push(Row::new(vec![Cell::from(Span::styled(
            app.catalog.translate("table.empty"),
            Style::default().fg(theme.muted),
        ))]));
    }
    rows.extend(
        table
            .rows()
            .iter()
            .enumerate()
            .map(|(idx, record)| data_row(app, table, record, idx + 1)),
    );

    let widths: Vec<Constraint> = table
        .columns()
        .keys()
        .iter()
        .map(|_| Constraint::Fill(1))
        .chain(once(Constraint::Length(ACTIONS_WIDTH)))
        .collect();

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(Style::default().fg(theme.foreground))
        .row_highlight_style(Style::default().bg(theme.selection));

    let mut state = TableState::default().with_selected(focused.then_some(app.row));
    f.render_stateful_widget(widget, area, &mut state);
}

fn cursor_style(app: &App, row: usize, col: usize, base: Style) -> Style {
    if app.focus == Focus::Table && app.row == row && app.col == col {
        base.fg(app.theme.selection_fg)
            .add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

fn filter_row<'a>(app: &'a App, table: &'a EditableTable<Record>) -> Row<'a> {
    let theme = &app.theme;
    let cells = table
        .columns()
        .iter()
        .enumerate()
        .map(|(col, (key, descriptor, placeholder))| {
            let value = table.filters().get(key);
            let typing = app.input == Some(InputTarget::Filter(key.to_string()));
            let span = if !descriptor.kind.is_filterable() {
                Span::raw("")
            } else if value.is_empty() && !typing {
                Span::styled(
                    format!("⌕ {placeholder}"),
                    Style::default()
                        .fg(theme.muted)
                        .add_modifier(Modifier::ITALIC),
                )
            } else {
                let mut text = descriptor.kind.display(&value).to_string();
                if typing {
                    text.push_str(INPUT_CURSOR);
                }
                Span::styled(text, Style::default().fg(theme.highlight))
            };
            Cell::from(span).style(cursor_style(app, 0, col, Style::default()))
        })
        .chain(once(Cell::from(Span::styled(
            format!("⏎ {}", app.catalog.translate("table.filter")),
            Style::default().fg(theme.muted),
        ))))
        .collect::<Vec<_>>();
    Row::new(cells)
}

fn data_row<'a>(
    app: &'a App,
    table: &'a EditableTable<Record>,
    record: &'a Record,
    row_idx: usize,
) -> Row<'a> {
    let id = record.id();
    let editing = table.is_editing(id);
    let cells = table
        .columns()
        .iter()
        .enumerate()
        .map(|(col, (key, descriptor, _))| {
            let value = table.cell_value(id, key);
            let changed = editing && value != record.text(key);
            let typing = app.input
                == Some(InputTarget::Cell {
                    id: id.to_string(),
                    key: key.to_string(),
                });
            let base = if changed {
                Style::default().fg(app.theme.edited)
            } else if !descriptor.editable {
                Style::default().fg(app.theme.muted)
            } else {
                Style::default()
            };
            let line = cell_line(descriptor, &value, typing);
            Cell::from(line).style(cursor_style(app, row_idx, col, base))
        })
        .chain(once(actions_cell(app, table, editing)))
        .collect::<Vec<_>>();
    Row::new(cells)
}

fn cell_line(descriptor: &FieldDescriptor, value: &str, typing: bool) -> Line<'static> {
    match descriptor.kind {
        FieldKind::Color => match Theme::swatch(value) {
            Some(color) => Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::raw(value.to_string()),
            ]),
            None => Line::from(value.to_string()),
        },
        _ => {
            let mut text = descriptor.kind.display(value).to_string();
            if typing {
                text.push_str(INPUT_CURSOR);
            }
            Line::from(text)
        }
    }
}

fn actions_cell<'a>(app: &App, table: &EditableTable<Record>, editing: bool) -> Cell<'a> {
    let t = &app.catalog;
    if editing {
        Cell::from(Span::styled(
            format!("⏎ {}  Esc {}", t.translate("table.update"), t.translate("table.cancel")),
            Style::default().fg(app.theme.edited),
        ))
    } else if table.can_remove() {
        Cell::from(Span::styled(
            format!("d {}", t.translate("table.remove")),
            Style::default().fg(app.theme.muted),
        ))
    } else {
        Cell::from("")
    }
}
