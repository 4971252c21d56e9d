// TUI application state
//
// Holds one ResourcePage per tab plus cursor, input mode, modal and toast
// state. Page operations never touch the network: they queue requests in an
// outbox that the event loop drains into the dispatcher.

use super::clipboard;
use super::components::Toast;
use super::modal::Modal;
use crate::config::Config;
use crate::i18n::{Catalog, Translate};
use crate::logging::LogBuffer;
use crate::pages::{Effects, Notice, PageEvent, Request, ResourcePage};
use crate::table::{CellMode, EditableTable, FieldKind, Record, Row, TableAction};
use crate::theme::Theme;

/// Which half of the page receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Form,
}

/// Text field currently receiving typed characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    Filter(String),
    Cell { id: String, key: String },
    Form(String),
}

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct App {
    pub pages: Vec<ResourcePage>,
    pub active: usize,
    pub focus: Focus,

    /// Table cursor row: 0 is the filter row, data rows start at 1
    pub row: usize,
    pub col: usize,

    /// Form cursor; one past the last field is the Add button
    pub form_field: usize,

    pub input: Option<InputTarget>,
    pub modal: Option<Modal>,
    pub modal_scroll: u16,
    pub toast: Option<Toast>,

    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub catalog: Catalog,
    pub palette: Vec<String>,
    pub should_quit: bool,

    started: Vec<bool>,
    outbox: Vec<(usize, Request)>,
    spinner_frame: usize,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        let catalog = Catalog::new(config.locale.clone(), &config.strings);
        let pages: Vec<ResourcePage> = config
            .resources
            .iter()
            .cloned()
            .enumerate()
            .map(|(idx, resource)| {
                ResourcePage::new(idx, resource, config.results_on_page, &catalog)
            })
            .collect();

        let mut app = Self {
            started: vec![false; pages.len()],
            pages,
            active: 0,
            focus: Focus::Table,
            row: 0,
            col: 0,
            form_field: 0,
            input: None,
            modal: None,
            modal_scroll: 0,
            toast: None,
            log_buffer,
            theme: Theme::by_name(&config.theme),
            catalog,
            palette: config.color_palette.clone(),
            should_quit: false,
            outbox: Vec::new(),
            spinner_frame: 0,
        };
        app.select_tab(0);
        app
    }

    // ─── Tabs and outbox ─────────────────────────────────────

    /// Switch tabs; a page loads the first time it is shown
    pub fn select_tab(&mut self, idx: usize) {
        if idx >= self.pages.len() {
            return;
        }
        self.active = idx;
        self.focus = Focus::Table;
        self.row = 0;
        self.col = 0;
        self.form_field = 0;
        self.input = None;

        if !self.started[idx] {
            self.started[idx] = true;
            let effects = self.pages[idx].start(&self.catalog);
            self.apply_effects(idx, effects);
        }
    }

    pub fn page(&self) -> Option<&ResourcePage> {
        self.pages.get(self.active)
    }

    fn table(&self) -> Option<&EditableTable<Record>> {
        self.page()?.table()
    }

    fn table_mut(&mut self) -> Option<&mut EditableTable<Record>> {
        self.pages.get_mut(self.active)?.table_mut()
    }

    /// Requests queued since the last call, tagged with their page
    pub fn take_requests(&mut self) -> Vec<(usize, Request)> {
        std::mem::take(&mut self.outbox)
    }

    fn queue(&mut self, request: Option<Request>) {
        if let Some(request) = request {
            self.outbox.push((self.active, request));
        }
    }

    /// Route a table action through the active page
    fn perform(&mut self, action: TableAction<Record>) {
        let request = self
            .pages
            .get_mut(self.active)
            .and_then(|page| page.perform(action));
        self.queue(request);
    }

    pub fn handle_page_event(&mut self, event: PageEvent) {
        let Some(page) = self.pages.get_mut(event.page) else {
            tracing::warn!(page = event.page, "Event for unknown page");
            return;
        };
        let effects = page.handle_event(event.outcome, &self.catalog);
        self.apply_effects(event.page, effects);
        self.clamp_cursor();
    }

    fn apply_effects(&mut self, page: usize, effects: Effects) {
        for notice in effects.notices {
            self.show_notice(notice);
        }
        self.outbox
            .extend(effects.requests.into_iter().map(|request| (page, request)));
    }

    // ─── Notifications ───────────────────────────────────────

    pub fn show_notice(&mut self, notice: Notice) {
        self.toast = Some(Toast::from_notice(notice));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn tick_animation(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.spinner_frame]
    }

    // ─── Cursor ──────────────────────────────────────────────

    pub fn current_key(&self) -> Option<String> {
        self.table()?.columns().key(self.col).map(String::from)
    }

    /// Identifier of the data row under the cursor
    pub fn current_row_id(&self) -> Option<String> {
        let idx = self.row.checked_sub(1)?;
        self.table()?.rows().get(idx).map(|r| r.id().to_string())
    }

    fn current_row(&self) -> Option<&Record> {
        let idx = self.row.checked_sub(1)?;
        self.table()?.rows().get(idx)
    }

    fn current_form_key(&self) -> Option<String> {
        self.page()?
            .form()?
            .columns()
            .key(self.form_field)
            .map(String::from)
    }

    fn form_len(&self) -> usize {
        self.page()
            .and_then(ResourcePage::form)
            .map_or(0, |f| f.columns().len())
    }

    pub fn clamp_cursor(&mut self) {
        let (rows, cols) = self
            .table()
            .map_or((0, 0), |t| (t.rows().len(), t.columns().len()));
        self.row = self.row.min(rows);
        self.col = self.col.min(cols.saturating_sub(1));
        self.form_field = self.form_field.min(self.form_len());
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Table => self.row = self.row.saturating_sub(1),
            Focus::Form => self.form_field = self.form_field.saturating_sub(1),
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Table => self.row += 1,
            Focus::Form => self.form_field += 1,
        }
        self.clamp_cursor();
    }

    pub fn move_left(&mut self) {
        if self.focus == Focus::Table {
            self.col = self.col.saturating_sub(1);
        }
    }

    pub fn move_right(&mut self) {
        if self.focus == Focus::Table {
            self.col += 1;
            self.clamp_cursor();
        }
    }

    /// Table ↔ form, only on pages that can add rows
    pub fn toggle_focus(&mut self) {
        if self.page().and_then(ResourcePage::form).is_none() {
            self.focus = Focus::Table;
            return;
        }
        self.input = None;
        self.focus = match self.focus {
            Focus::Table => Focus::Form,
            Focus::Form => Focus::Table,
        };
    }

    // ─── Text input ──────────────────────────────────────────

    pub fn push_char(&mut self, c: char) {
        self.edit_input(|value| value.push(c));
    }

    pub fn pop_char(&mut self) {
        self.edit_input(|value| {
            value.pop();
        });
    }

    fn edit_input(&mut self, change: impl FnOnce(&mut String)) {
        let Some(target) = self.input.clone() else {
            return;
        };
        let result = match &target {
            InputTarget::Filter(key) => self.table_mut().map(|table| {
                let mut value = table.filters().get(key);
                change(&mut value);
                table.set_filter(key, &value).map(|_| ())
            }),
            InputTarget::Cell { id, key } => self.table_mut().map(|table| {
                let mut value = table.cell_value(id, key).into_owned();
                change(&mut value);
                table.edit_text(id, key, &value)
            }),
            InputTarget::Form(key) => self
                .pages
                .get_mut(self.active)
                .and_then(ResourcePage::form_mut)
                .map(|form| {
                    let mut value = form.value(key);
                    change(&mut value);
                    form.set_value(key, &value)
                }),
        };
        if let Some(Err(err)) = result {
            tracing::debug!(error = %err, "Input rejected");
        }
    }

    /// Enter while typing: apply the filter, commit the cell or leave the
    /// form field
    pub fn finish_input(&mut self) {
        let Some(target) = self.input.take() else {
            return;
        };
        match target {
            InputTarget::Filter(_) => {
                if let Some(action) = self.table().map(EditableTable::apply_filters) {
                    self.perform(action);
                }
            }
            InputTarget::Cell { .. } => self.commit_edit(),
            InputTarget::Form(_) => {}
        }
    }

    /// Esc while typing: a cell edit is discarded, filter and form text stay
    pub fn abort_input(&mut self) {
        if let Some(InputTarget::Cell { .. }) = self.input.take() {
            if let Some(table) = self.table_mut() {
                table.cancel();
            }
        }
    }

    // ─── Actions ─────────────────────────────────────────────

    /// Enter outside text input
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Table => self.activate_cell(),
            Focus::Form => self.activate_form_field(),
        }
    }

    fn activate_cell(&mut self) {
        let Some(key) = self.current_key() else {
            return;
        };
        let Some(kind) = self
            .table()
            .and_then(|t| t.columns().descriptor_for(&key))
            .map(|d| d.kind.clone())
        else {
            return;
        };

        let Some(id) = self.current_row_id() else {
            // Filter row
            match kind {
                FieldKind::Text => self.input = Some(InputTarget::Filter(key)),
                FieldKind::Select { .. } => {
                    if let Some(action) = self.table().map(EditableTable::apply_filters) {
                        self.perform(action);
                    }
                }
                FieldKind::Color => {}
            }
            return;
        };

        let mode = self
            .table()
            .map_or(CellMode::ReadOnly, |t| t.cell_mode(&id, &key));
        match mode {
            CellMode::TextView | CellMode::TextInput => {
                let begun = self.table_mut().map(|t| t.begin_edit(&id, &key));
                match begun {
                    Some(Ok(())) => self.input = Some(InputTarget::Cell { id, key }),
                    Some(Err(err)) => self.show_notice(Notice::error(err.to_string())),
                    None => {}
                }
            }
            CellMode::Select | CellMode::Color | CellMode::ReadOnly => {
                if self.table().is_some_and(|t| t.is_editing(&id)) {
                    self.commit_edit();
                }
            }
        }
    }

    fn activate_form_field(&mut self) {
        if self.form_field >= self.form_len() {
            self.submit_form();
            return;
        }
        let Some(key) = self.current_form_key() else {
            return;
        };
        let is_text = self
            .page()
            .and_then(ResourcePage::form)
            .and_then(|f| f.columns().descriptor_for(&key))
            .is_some_and(|d| d.kind == FieldKind::Text);
        if is_text {
            self.input = Some(InputTarget::Form(key));
        }
    }

    pub fn commit_edit(&mut self) {
        if let Some(action) = self.table().and_then(EditableTable::commit) {
            self.perform(action);
        }
    }

    /// Esc outside text input drops the pending row edit
    pub fn cancel_edit(&mut self) -> bool {
        match self.table_mut() {
            Some(table) if table.editing_id().is_some() => {
                table.cancel();
                true
            }
            _ => false,
        }
    }

    pub fn submit_form(&mut self) {
        match self.page().and_then(ResourcePage::submit_form) {
            Some(request) => self.queue(Some(request)),
            None => {
                let message = self.catalog.translate("form.incomplete");
                self.show_notice(Notice::error(message));
            }
        }
    }

    /// Space, `+` and `-`: step through select options or palette colors
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            Focus::Table => self.cycle_cell(forward),
            Focus::Form => self.cycle_form_field(forward),
        }
    }

    fn cycle_cell(&mut self, forward: bool) {
        let Some(key) = self.current_key() else {
            return;
        };
        let Some(kind) = self
            .table()
            .and_then(|t| t.columns().descriptor_for(&key))
            .map(|d| d.kind.clone())
        else {
            return;
        };

        match self.current_row_id() {
            None => {
                if !matches!(kind, FieldKind::Select { .. }) {
                    return;
                }
                let current = self.table().map(|t| t.filters().get(&key)).unwrap_or_default();
                let next = cycle_with_blank(&kind, &current, forward);
                let applied = self.table_mut().map(|t| t.set_filter(&key, &next));
                match applied {
                    Some(Ok(Some(action))) => self.perform(action),
                    Some(Err(err)) => self.show_notice(Notice::error(err.to_string())),
                    _ => {}
                }
            }
            Some(id) => {
                let editable = matches!(
                    self.table().map(|t| t.cell_mode(&id, &key)),
                    Some(CellMode::Select | CellMode::Color)
                );
                if !editable {
                    return;
                }
                let current = self
                    .table()
                    .map(|t| t.cell_value(&id, &key).into_owned())
                    .unwrap_or_default();
                let Some(next) = kind.cycle(&current, &self.palette, forward) else {
                    return;
                };
                if let Some(Err(err)) = self.table_mut().map(|t| t.choose(&id, &key, &next)) {
                    self.show_notice(Notice::error(err.to_string()));
                }
            }
        }
    }

    fn cycle_form_field(&mut self, forward: bool) {
        let Some(key) = self.current_form_key() else {
            return;
        };
        let palette = self.palette.clone();
        let Some(form) = self
            .pages
            .get_mut(self.active)
            .and_then(ResourcePage::form_mut)
        else {
            return;
        };
        let Some(kind) = form.columns().descriptor_for(&key).map(|d| d.kind.clone()) else {
            return;
        };
        if let Some(next) = kind.cycle(&form.value(&key), &palette, forward) {
            if let Err(err) = form.set_value(&key, &next) {
                tracing::debug!(error = %err, "Form value rejected");
            }
        }
    }

    pub fn sort_current(&mut self) {
        if self.focus != Focus::Table {
            return;
        }
        let action = self
            .current_key()
            .and_then(|key| self.table()?.request_sort(&key));
        if let Some(action) = action {
            self.perform(action);
        }
    }

    pub fn remove_current(&mut self) {
        if self.focus != Focus::Table {
            return;
        }
        let action = self
            .current_row_id()
            .and_then(|id| self.table()?.request_remove(&id));
        if let Some(action) = action {
            self.perform(action);
        }
    }

    pub fn next_page(&mut self) {
        let request = self.pages.get_mut(self.active).and_then(|p| p.next_page());
        self.queue(request);
    }

    pub fn previous_page(&mut self) {
        let request = self
            .pages
            .get_mut(self.active)
            .and_then(|p| p.previous_page());
        self.queue(request);
    }

    pub fn refresh(&mut self) {
        let request = self.pages.get_mut(self.active).and_then(|p| p.refresh());
        self.queue(request);
    }

    pub fn copy_row(&mut self) {
        let Some(json) = self.current_row().map(Record::to_json) else {
            return;
        };
        let notice = match clipboard::copy_json(&json) {
            Ok(()) => Notice::success(self.catalog.translate("notice.copied")),
            Err(err) => {
                tracing::warn!(error = %err, "Clipboard copy failed");
                Notice::error(self.catalog.translate("error.clipboard"))
            }
        };
        self.show_notice(notice);
    }

    pub fn open_detail(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        let title = format!(" {} ", row.id());
        let content = clipboard::pretty_json(&row.to_json());
        self.open_modal(Modal::detail(title, content));
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal_scroll = 0;
        self.modal = Some(modal);
    }
}

/// Option cycling for select filters, with the empty "all" choice between
/// the last and the first option
fn cycle_with_blank(kind: &FieldKind, current: &str, forward: bool) -> String {
    let options = kind.options();
    let at_edge = if forward {
        options.last().is_some_and(|o| o.value == current)
    } else {
        options.first().is_some_and(|o| o.value == current)
    };
    if at_edge {
        return String::new();
    }
    kind.cycle(current, &[], forward).unwrap_or_default()
}
