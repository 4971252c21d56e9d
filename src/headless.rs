//! `catalog-admin list`: one page of a resource on stdout
//!
//! Drives a [`ResourcePage`] the same way the TUI does, executing each
//! request inline instead of on a background task.

use crate::api::ApiClient;
use crate::cli::ListArgs;
use crate::config::Config;
use crate::i18n::Catalog;
use crate::pages::{execute, Effects, NoticeKind, PageStatus, Request, ResourcePage};
use crate::table::{EditableTable, Record, Row};
use anyhow::{anyhow, bail, Context, Result};
use unicode_width::UnicodeWidthStr;

pub async fn run_list(config: &Config, client: &ApiClient, args: ListArgs) -> Result<()> {
    let resource = config.resource(&args.resource).cloned().ok_or_else(|| {
        let known: Vec<&str> = config.resources.iter().map(|r| r.name.as_str()).collect();
        anyhow!(
            "unknown resource `{}` (known: {})",
            args.resource,
            known.join(", ")
        )
    })?;
    let catalog = Catalog::new(config.locale.clone(), &config.strings);
    let mut page = ResourcePage::new(0, resource, config.results_on_page, &catalog);
    let locale = config.locale.as_str();

    // Options first; the default list they trigger is replaced below
    let mut effects = page.start(&catalog);
    while let Some(pos) = effects.requests.iter().position(|r| *r == Request::Options) {
        let request = effects.requests.remove(pos);
        let outcome = execute(client, &page.config().clone(), locale, request).await;
        effects = page.handle_event(outcome, &catalog);
    }
    check(&effects)?;
    if let PageStatus::Broken(message) = page.status() {
        bail!("{}: {}", page.name(), message);
    }

    let table = page
        .table_mut()
        .with_context(|| format!("{} has no table", args.resource))?;
    for (key, value) in &args.filters {
        table
            .set_filter(key, value)
            .with_context(|| format!("filter `{key}`"))?;
    }

    if let Some(field) = &args.sort {
        let action = page
            .table()
            .and_then(|t| t.request_sort(field))
            .with_context(|| format!("`{field}` is not sortable"))?;
        page.perform(action.clone());
        if args.desc {
            page.perform(action);
        }
    }

    let request = page
        .go_to_page(args.page)
        .context("nothing to list")?;
    let outcome = execute(client, &page.config().clone(), locale, request).await;
    let effects = page.handle_event(outcome, &catalog);
    check(&effects)?;

    let table = page.table().context("table missing after list")?;
    print!("{}", render_table(table));
    if page.config().paginated {
        println!(
            "\n{} {} / {}",
            page.title(),
            page.pages().page(),
            page.pages().total_pages()
        );
    }
    Ok(())
}

/// First error notice as an error
fn check(effects: &Effects) -> Result<()> {
    match effects.notices.iter().find(|n| n.kind == NoticeKind::Error) {
        Some(notice) => bail!("{}", notice.message),
        None => Ok(()),
    }
}

/// Plain text table with display values (option text for selects)
pub fn render_table(table: &EditableTable<Record>) -> String {
    let columns = table.columns();
    let mut grid: Vec<Vec<String>> = vec![columns
        .iter()
        .map(|(_, descriptor, _)| descriptor.label.clone())
        .collect()];
    for row in table.rows() {
        grid.push(
            columns
                .iter()
                .map(|(key, descriptor, _)| descriptor.kind.display(&row.text(key)).to_string())
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..columns.len())
        .map(|col| grid.iter().map(|r| r[col].width()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for (idx, cells) in grid.iter().enumerate() {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.width());
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
        if idx == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            out.push_str(&rule.join("  "));
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Columns, FieldDescriptor, SelectOption};
    use serde_json::json;

    #[test]
    fn render_table_aligns_and_shows_option_text() {
        let columns = Columns::new(
            vec!["name".into(), "country".into()],
            vec![
                FieldDescriptor::text("Name"),
                FieldDescriptor::select("Country", vec![SelectOption::new("UA", "Україна")]),
            ],
            vec![String::new(), String::new()],
        )
        .unwrap();
        let mut table = EditableTable::new(columns);
        table.set_rows(vec![Record::from_json(
            json!({ "_id": "b1", "name": "Acme Ltd", "country": "UA" }),
            "_id",
        )
        .unwrap()]);

        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name      Country");
        assert_eq!(lines[1], "────────  ───────");
        assert_eq!(lines[2], "Acme Ltd  Україна");
    }
}
