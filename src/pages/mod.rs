//! Resource pages
//!
//! A [`ResourcePage`] owns everything one tab shows: the table engine, the
//! add form, sort and page state. It never talks to the network itself.
//! Operations produce [`Request`]s, the dispatcher runs them and the results
//! come back through [`ResourcePage::handle_event`], which applies them and
//! reports [`Notice`]s plus any follow-up requests.

mod dispatch;

pub use dispatch::{execute, spawn_request};

use crate::api::{ApiError, ListPage, ListQuery};
use crate::config::{KindName, OptionList, ResourceConfig};
use crate::i18n::{countries, Translate};
use crate::table::{
    AddForm, Columns, EditableTable, FieldDescriptor, FormField, PageState, Record, Row,
    SelectOption, SortState, TableAction,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Work for the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Load every `options_from` source of the resource
    Options,
    List { seq: u64, query: ListQuery },
    Update(Record),
    Remove(String),
    Add(Record),
}

/// Result of a dispatched request
#[derive(Debug)]
pub enum Outcome {
    Options(Result<Vec<(String, Vec<SelectOption>)>, ApiError>),
    Listed {
        seq: u64,
        result: Result<ListPage, ApiError>,
    },
    Updated {
        row: Record,
        result: Result<(), ApiError>,
    },
    Removed(Result<(), ApiError>),
    Added(Result<(), ApiError>),
}

/// Outcome addressed to a page by tab index
#[derive(Debug)]
pub struct PageEvent {
    pub page: usize,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Message for the notification area (already translated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Transport failures and rejections share one display path
    pub fn from_api_error(err: &ApiError, t: &dyn Translate) -> Self {
        match err {
            ApiError::Rejected(message) => Self::error(t.translate(message)),
            other => Self::error(other.to_string()),
        }
    }
}

/// Notices and follow-up requests produced by one page operation
#[derive(Debug, Default, PartialEq)]
pub struct Effects {
    pub notices: Vec<Notice>,
    pub requests: Vec<Request>,
}

impl Effects {
    fn request(request: Request) -> Self {
        Self {
            notices: Vec::new(),
            requests: vec![request],
        }
    }

    fn notice(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            requests: Vec::new(),
        }
    }

    fn and_request(mut self, request: Request) -> Self {
        self.requests.push(request);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    /// Waiting for options or the first list
    Loading,
    Ready,
    /// The resource schema could not be turned into columns
    Broken(String),
}

pub struct ResourcePage {
    index: usize,
    config: Arc<ResourceConfig>,
    title: String,
    results_on_page: usize,
    status: PageStatus,
    table: Option<EditableTable<Record>>,
    form: Option<AddForm<Record>>,
    sort: SortState,
    pages: PageState,
    fetch_seq: u64,
    loading: bool,
}

impl ResourcePage {
    pub fn new(
        index: usize,
        config: ResourceConfig,
        results_on_page: usize,
        t: &dyn Translate,
    ) -> Self {
        Self {
            index,
            title: t.translate(&config.title),
            config: Arc::new(config),
            results_on_page: results_on_page.max(1),
            status: PageStatus::Loading,
            table: None,
            form: None,
            sort: SortState::default(),
            pages: PageState::default(),
            fetch_seq: 0,
            loading: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn config(&self) -> &Arc<ResourceConfig> {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> &PageStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn table(&self) -> Option<&EditableTable<Record>> {
        self.table.as_ref()
    }

    pub fn table_mut(&mut self) -> Option<&mut EditableTable<Record>> {
        self.table.as_mut()
    }

    pub fn form(&self) -> Option<&AddForm<Record>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut AddForm<Record>> {
        self.form.as_mut()
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn pages(&self) -> &PageState {
        &self.pages
    }

    /// First request of the page: options when the schema needs them,
    /// otherwise build the columns right away and list
    pub fn start(&mut self, t: &dyn Translate) -> Effects {
        if self.config.option_sources().next().is_some() {
            self.loading = true;
            return Effects::request(Request::Options);
        }
        self.build(&HashMap::new(), t)
    }

    /// Re-list with the current filters, sort and page
    pub fn refresh(&mut self) -> Option<Request> {
        let filters = self.table.as_ref()?.filters().commit();
        Some(self.fetch(&filters))
    }

    fn build(&mut self, loaded: &HashMap<String, Vec<SelectOption>>, t: &dyn Translate) -> Effects {
        match build_engines(&self.config, loaded, t) {
            Ok((table, form)) => {
                let filters = table.filters().commit();
                self.table = Some(table);
                self.form = form;
                self.status = PageStatus::Ready;
                Effects::request(self.fetch(&filters))
            }
            Err(message) => {
                tracing::error!(resource = %self.config.name, "{}", message);
                self.loading = false;
                self.status = PageStatus::Broken(message.clone());
                Effects::notice(Notice::error(format!(
                    "{}: {}",
                    t.translate("error.config"),
                    message
                )))
            }
        }
    }

    fn fetch(&mut self, filters: &Record) -> Request {
        self.fetch_seq += 1;
        self.loading = true;
        let filter_params = self
            .table
            .as_ref()
            .map(|table| {
                table
                    .filters()
                    .keys()
                    .iter()
                    .map(|key| {
                        let param = self
                            .config
                            .field(key)
                            .map(|f| f.filter_param().to_string())
                            .unwrap_or_else(|| key.clone());
                        (param, filters.text(key).into_owned())
                    })
                    .collect()
            })
            .unwrap_or_default();

        Request::List {
            seq: self.fetch_seq,
            query: ListQuery {
                page: self.pages.page(),
                results_on_page: self.results_on_page,
                filters: filter_params,
                sort_field: self.sort.field.clone(),
                sort_desc: self.sort.descending,
            },
        }
    }

    /// Turn a table action into backend work
    pub fn perform(&mut self, action: TableAction<Record>) -> Option<Request> {
        match action {
            TableAction::Filter(filters) => {
                self.pages.go_to(1);
                Some(self.fetch(&filters))
            }
            TableAction::Sort(key) => {
                self.sort.toggle(&key);
                self.refresh()
            }
            TableAction::Update(row) => Some(Request::Update(row)),
            TableAction::Remove(id) => Some(Request::Remove(id)),
        }
    }

    pub fn next_page(&mut self) -> Option<Request> {
        if self.pages.next() {
            self.refresh()
        } else {
            None
        }
    }

    pub fn previous_page(&mut self) -> Option<Request> {
        if self.pages.previous() {
            self.refresh()
        } else {
            None
        }
    }

    /// Request a page by number before its total is known. The next list
    /// response clamps it to the real page count.
    pub fn go_to_page(&mut self, page: usize) -> Option<Request> {
        if self.config.paginated {
            let total = self.pages.total_pages();
            self.pages.set_total(page.max(total));
            self.pages.go_to(page);
        }
        self.refresh()
    }

    /// `None` while any form field is empty
    pub fn submit_form(&self) -> Option<Request> {
        self.form.as_ref()?.submit().map(Request::Add)
    }

    /// Apply a dispatched result
    pub fn handle_event(&mut self, outcome: Outcome, t: &dyn Translate) -> Effects {
        match outcome {
            Outcome::Options(Ok(loaded)) => {
                let loaded: HashMap<_, _> = loaded.into_iter().collect();
                self.build(&loaded, t)
            }
            Outcome::Options(Err(err)) => {
                self.loading = false;
                self.status = PageStatus::Broken(err.to_string());
                Effects::notice(Notice::from_api_error(&err, t))
            }
            Outcome::Listed { seq, .. } if seq != self.fetch_seq => {
                tracing::debug!(resource = %self.config.name, seq, latest = self.fetch_seq, "Stale list response dropped");
                Effects::default()
            }
            Outcome::Listed { result, .. } => {
                self.loading = false;
                match result {
                    Ok(page) => {
                        if self.config.paginated {
                            self.pages = self.pages.from_count(page.count, self.results_on_page);
                        } else {
                            self.pages = PageState::default();
                        }
                        if let Some(table) = self.table.as_mut() {
                            table.set_rows(page.items);
                        }
                        Effects::default()
                    }
                    Err(err) => {
                        tracing::warn!(resource = %self.config.name, error = %err, "List failed");
                        Effects::notice(Notice::from_api_error(&err, t))
                    }
                }
            }
            Outcome::Updated { row, result } => match result {
                Ok(()) => {
                    if let Some(table) = self.table.as_mut() {
                        table.apply_update(row);
                    }
                    Effects::notice(Notice::success(t.translate("notice.update-success")))
                }
                Err(err) => {
                    tracing::warn!(resource = %self.config.name, id = row.id(), error = %err, "Update failed");
                    Effects::notice(Notice::from_api_error(&err, t))
                }
            },
            Outcome::Removed(result) => match result {
                Ok(()) => {
                    let effects =
                        Effects::notice(Notice::success(t.translate("notice.remove-success")));
                    match self.refresh() {
                        Some(request) => effects.and_request(request),
                        None => effects,
                    }
                }
                Err(err) => Effects::notice(Notice::from_api_error(&err, t)),
            },
            Outcome::Added(result) => match result {
                Ok(()) => {
                    if let Some(form) = self.form.as_mut() {
                        form.reset_after_submit();
                    }
                    let effects =
                        Effects::notice(Notice::success(t.translate("notice.add-success")));
                    match self.refresh() {
                        Some(request) => effects.and_request(request),
                        None => effects,
                    }
                }
                Err(err) => Effects::notice(Notice::from_api_error(&err, t)),
            },
        }
    }
}

/// Table and (when the resource can add) form for a schema
fn build_engines(
    config: &ResourceConfig,
    loaded: &HashMap<String, Vec<SelectOption>>,
    t: &dyn Translate,
) -> Result<(EditableTable<Record>, Option<AddForm<Record>>), String> {
    let can_update = config.update_path.is_some();

    let mut keys = Vec::new();
    let mut descriptors = Vec::new();
    let mut placeholders = Vec::new();
    let mut form_keys = Vec::new();
    let mut form_fields = Vec::new();
    let mut form_placeholders = Vec::new();

    for field in &config.fields {
        let label = t.translate(&field.label);
        let mut descriptor = match field.kind {
            KindName::Text => FieldDescriptor::text(label),
            KindName::Color => FieldDescriptor::color(label),
            KindName::Select => {
                let options = match (loaded.get(&field.key), field.option_list) {
                    (Some(options), _) => options.clone(),
                    (None, Some(OptionList::Countries)) => countries::options(t.locale()),
                    (None, None) => field
                        .options
                        .iter()
                        .map(|o| SelectOption::new(o.value.clone(), t.translate(&o.text)))
                        .collect(),
                };
                FieldDescriptor::select(label, options)
            }
        };
        let placeholder = if field.placeholder.is_empty() {
            String::new()
        } else {
            t.translate(&field.placeholder)
        };

        if field.in_form {
            form_keys.push(field.key.clone());
            let form_field = FormField::new(descriptor.clone());
            form_fields.push(if field.sticky {
                form_field.sticky()
            } else {
                form_field
            });
            form_placeholders.push(placeholder.clone());
        }

        if !(field.editable && can_update) {
            descriptor = descriptor.read_only();
        }
        keys.push(field.key.clone());
        descriptors.push(descriptor);
        placeholders.push(placeholder);
    }

    let columns = Columns::new(keys, descriptors, placeholders).map_err(|e| e.to_string())?;
    let mut table = EditableTable::new(columns);
    if config.remove_path.is_some() {
        table = table.with_remove();
    }

    let form = if config.has_add() {
        Some(
            AddForm::from_fields(form_keys, form_fields, form_placeholders)
                .map_err(|e| e.to_string())?,
        )
    } else {
        None
    };

    Ok((table, form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_resources, resources::find};
    use crate::i18n::Catalog;
    use serde_json::json;

    fn page(name: &str) -> ResourcePage {
        let config = find(&default_resources(), name).unwrap().clone();
        ResourcePage::new(0, config, 20, &Catalog::default())
    }

    fn brand(id: &str, name: &str) -> Record {
        Record::from_json(json!({ "_id": id, "name": name, "country": "UA" }), "_id").unwrap()
    }

    fn listed(seq: u64, items: Vec<Record>, count: usize) -> Outcome {
        Outcome::Listed {
            seq,
            result: Ok(ListPage { items, count }),
        }
    }

    /// Start a page and feed it one list response
    fn ready_brands(count: usize) -> ResourcePage {
        let t = Catalog::default();
        let mut page = page("brands");
        let effects = page.start(&t);
        let Request::List { seq, .. } = &effects.requests[0] else {
            panic!("expected list");
        };
        page.handle_event(
            listed(*seq, vec![brand("a", "Acme"), brand("b", "Bolt")], count),
            &t,
        );
        page
    }

    #[test]
    fn start_lists_or_loads_options() {
        let t = Catalog::default();
        let mut brands = page("brands");
        let effects = brands.start(&t);
        assert!(matches!(effects.requests[..], [Request::List { seq: 1, .. }]));
        assert_eq!(brands.status(), &PageStatus::Ready);
        assert_eq!(brands.title(), "Brands");

        let mut sizes = page("sizes");
        assert_eq!(sizes.start(&t).requests, vec![Request::Options]);
        assert_eq!(sizes.status(), &PageStatus::Loading);

        let effects = sizes.handle_event(
            Outcome::Options(Ok(vec![(
                "categoryId".to_string(),
                vec![SelectOption::new("c1", "Shoes")],
            )])),
            &t,
        );
        assert!(matches!(effects.requests[..], [Request::List { .. }]));
        assert!(sizes.form().is_some());
    }

    #[test]
    fn brand_country_filter_accepts_any_iso_code() {
        let mut brands = ready_brands(2);
        let table = brands.table_mut().unwrap();
        assert!(matches!(table.set_filter("country", "CA"), Ok(Some(_))));
        assert!(matches!(table.set_filter("country", "NZ"), Ok(Some(_))));
        assert!(table.set_filter("country", "XX").is_err());

        let uk = Catalog::new("uk", &Default::default());
        let config = find(&default_resources(), "brands").unwrap().clone();
        let mut brands = ResourcePage::new(0, config, 20, &uk);
        brands.start(&uk);
        let columns = brands.table().unwrap().columns();
        let country = columns.descriptor_for("country").unwrap();
        assert_eq!(country.kind.display("CA"), "Канада");
        assert_eq!(country.kind.options().len(), 250);
    }

    #[test]
    fn empty_loaded_options_break_the_page() {
        let t = Catalog::default();
        let mut sizes = page("sizes");
        sizes.start(&t);
        let effects = sizes.handle_event(
            Outcome::Options(Ok(vec![("categoryId".to_string(), Vec::new())])),
            &t,
        );
        assert!(matches!(sizes.status(), PageStatus::Broken(m) if m.contains("categoryId")));
        assert_eq!(effects.notices[0].kind, NoticeKind::Error);
        assert!(effects.requests.is_empty());
    }

    #[test]
    fn list_sets_rows_and_pages() {
        let page = ready_brands(45);
        assert_eq!(page.table().unwrap().rows().len(), 2);
        assert_eq!(page.pages().total_pages(), 3);
        assert!(!page.is_loading());
    }

    #[test]
    fn stale_list_response_is_dropped() {
        let t = Catalog::default();
        let mut page = ready_brands(45);
        let first = page.next_page().unwrap();
        let second = page.next_page().unwrap();
        let (Request::List { seq: old, .. }, Request::List { seq: new, .. }) = (first, second)
        else {
            panic!("expected lists");
        };

        page.handle_event(listed(new, vec![brand("z", "Zeta")], 45), &t);
        page.handle_event(listed(old, vec![brand("y", "Old")], 45), &t);
        assert_eq!(page.table().unwrap().rows()[0].id(), "z");
    }

    #[test]
    fn text_filter_fetches_once_on_trigger_with_page_reset() {
        let mut page = ready_brands(45);
        page.next_page();
        assert_eq!(page.pages().page(), 2);

        let table = page.table_mut().unwrap();
        assert_eq!(table.set_filter("name", "red").unwrap(), None);
        let action = table.apply_filters();

        let Some(Request::List { query, .. }) = page.perform(action) else {
            panic!("expected list");
        };
        assert_eq!(query.page, 1);
        assert_eq!(
            query.filters,
            vec![
                ("name".to_string(), "red".to_string()),
                ("country".to_string(), String::new())
            ]
        );
    }

    #[test]
    fn filter_params_follow_schema() {
        let t = Catalog::default();
        let mut managers = page("managers");
        let effects = managers.start(&t);
        let Request::List { query, .. } = &effects.requests[0] else {
            panic!("expected list");
        };
        let params: Vec<_> = query.filters.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(params, vec!["email", "name", "role"]);
    }

    #[test]
    fn sort_toggles_and_refetches() {
        let mut page = ready_brands(45);
        let action = page.table().unwrap().request_sort("name").unwrap();
        let Some(Request::List { query, .. }) = page.perform(action.clone()) else {
            panic!("expected list");
        };
        assert_eq!((query.sort_field.as_str(), query.sort_desc), ("name", false));

        let Some(Request::List { query, .. }) = page.perform(action) else {
            panic!("expected list");
        };
        assert!(query.sort_desc);
    }

    #[test]
    fn failed_update_keeps_draft_success_patches_row() {
        let t = Catalog::default();
        let mut page = ready_brands(2);
        let table = page.table_mut().unwrap();
        table.begin_edit("a", "name").unwrap();
        table.edit_text("a", "name", "Acme Ltd").unwrap();
        let Some(TableAction::Update(row)) = table.commit() else {
            panic!("expected update");
        };

        let effects = page.handle_event(
            Outcome::Updated {
                row: row.clone(),
                result: Err(ApiError::Rejected("Brand exists".into())),
            },
            &t,
        );
        assert_eq!(effects.notices, vec![Notice::error("Brand exists")]);
        assert_eq!(page.table().unwrap().editing_id(), Some("a"));
        assert_eq!(page.table().unwrap().cell_value("a", "name"), "Acme Ltd");

        let effects = page.handle_event(Outcome::Updated { row, result: Ok(()) }, &t);
        assert_eq!(effects.notices, vec![Notice::success("Updated")]);
        assert_eq!(page.table().unwrap().editing_id(), None);
        assert_eq!(page.table().unwrap().rows()[0].text("name"), "Acme Ltd");
    }

    #[test]
    fn add_success_resets_form_and_refetches() {
        let t = Catalog::default();
        let mut page = ready_brands(2);
        let form = page.form_mut().unwrap();
        form.set_value("name", "Acme").unwrap();
        form.set_value("country", "UA").unwrap();
        assert!(matches!(page.submit_form(), Some(Request::Add(_))));

        let failed = page.handle_event(Outcome::Added(Err(ApiError::rejected(None))), &t);
        assert_eq!(failed.notices, vec![Notice::error("Unexpected error")]);
        assert_eq!(page.form().unwrap().value("name"), "Acme");

        let effects = page.handle_event(Outcome::Added(Ok(())), &t);
        assert_eq!(effects.notices, vec![Notice::success("Added")]);
        assert!(matches!(effects.requests[..], [Request::List { .. }]));
        assert_eq!(page.form().unwrap().value("name"), "");
        assert_eq!(page.form().unwrap().value("country"), "UA");
    }

    #[test]
    fn remove_success_refetches() {
        let t = Catalog::default();
        let mut page = ready_brands(2);
        let action = page.table().unwrap().request_remove("a").unwrap();
        assert_eq!(page.perform(action), Some(Request::Remove("a".into())));
        let effects = page.handle_event(Outcome::Removed(Ok(())), &t);
        assert!(matches!(effects.requests[..], [Request::List { .. }]));
    }

    #[test]
    fn managers_table_has_no_remove_and_no_form() {
        let t = Catalog::default();
        let mut managers = page("managers");
        managers.start(&t);
        assert!(!managers.table().unwrap().can_remove());
        assert!(managers.form().is_none());
    }

    #[test]
    fn go_to_page_jumps_ahead_of_the_count() {
        let t = Catalog::default();
        let mut brands = page("brands");
        brands.start(&t);
        let Some(Request::List { seq, query }) = brands.go_to_page(4) else {
            panic!("expected list");
        };
        assert_eq!(query.page, 4);

        brands.handle_event(listed(seq, Vec::new(), 45), &t);
        assert_eq!(brands.pages().page(), 3);
    }

    #[test]
    fn unpaginated_resources_have_one_page() {
        let t = Catalog::default();
        let mut orders = page("orders");
        let effects = orders.start(&t);
        let Request::List { seq, .. } = effects.requests[0] else {
            panic!("expected list");
        };
        orders.handle_event(listed(seq, Vec::new(), 500), &t);
        assert_eq!(orders.pages().total_pages(), 1);
        assert_eq!(orders.next_page(), None);
    }
}
