//! Editable table engine
//!
//! Owns the visible rows, the filter record and at most one edit draft.
//! Nothing here performs I/O: every operation that needs the data source
//! returns a [`TableAction`] for the owning page to execute.
//!
//! Per-row state machine:
//!
//! ```text
//! Viewing --begin_edit / choose--> Editing --commit--> (Update action, draft kept)
//!    ^                                |
//!    +------------- cancel -----------+
//!    +--- set_rows / apply_update ----+
//! ```
//!
//! The draft is kept after `commit` so a rejected update can be retried;
//! the page clears it by patching the row with [`EditableTable::apply_update`].

use super::field::{Columns, FieldDescriptor, FieldKind, FieldValueError};
use super::filter::FilterStore;
use super::record::Row;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Request for the owning page to talk to the data source
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction<R> {
    /// Fetch with this filter record
    Filter(R),
    /// Persist this edited row
    Update(R),
    /// Delete the row with this identifier
    Remove(String),
    /// Header activated for this field key
    Sort(String),
}

/// How a single cell should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMode {
    ReadOnly,
    /// Static text plus an edit trigger
    TextView,
    TextInput,
    Select,
    Color,
}

#[derive(Debug, Clone)]
struct EditDraft<R> {
    id: String,
    row: R,
    touched: BTreeSet<String>,
}

pub struct EditableTable<R: Row> {
    columns: Columns,
    rows: Vec<R>,
    filters: FilterStore<R>,
    draft: Option<EditDraft<R>>,
    removable: bool,
}

impl<R: Row> EditableTable<R> {
    pub fn new(columns: Columns) -> Self {
        let filter_keys = columns
            .filter_keys()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self {
            columns,
            rows: Vec::new(),
            filters: FilterStore::new(filter_keys),
            draft: None,
            removable: false,
        }
    }

    /// Enable the remove operation for this table instance
    pub fn with_remove(mut self) -> Self {
        self.removable = true;
        self
    }

    pub fn can_remove(&self) -> bool {
        self.removable
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == id)
    }

    pub fn filters(&self) -> &FilterStore<R> {
        &self.filters
    }

    /// Replace the collection. Any in-progress edit is cancelled.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.cancel();
    }

    /// Patch one row in place after a successful update.
    ///
    /// Returns false when no row carries that identifier.
    pub fn apply_update(&mut self, row: R) -> bool {
        let Some(slot) = self.rows.iter_mut().find(|r| r.id() == row.id()) else {
            return false;
        };
        *slot = row;
        self.cancel();
        true
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.draft.as_ref().map(|d| d.id.as_str())
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing_id() == Some(id)
    }

    /// Open a text field of a row for editing.
    ///
    /// Editing another row discards its draft. Reopening the row already
    /// being edited keeps the pending changes.
    pub fn begin_edit(&mut self, id: &str, key: &str) -> Result<(), FieldValueError> {
        let descriptor = self.editable_descriptor(key)?;
        if descriptor.kind != FieldKind::Text {
            return Ok(());
        }
        self.draft_for(id)?;
        Ok(())
    }

    /// Change a text field of the row being edited
    pub fn edit_text(&mut self, id: &str, key: &str, value: &str) -> Result<(), FieldValueError> {
        self.editable_descriptor(key)?;
        if !self.is_editing(id) {
            return self.begin_edit(id, key);
        }
        let draft = self.draft_for(id)?;
        draft.row.set_field(key, value.to_string());
        draft.touched.insert(key.to_string());
        Ok(())
    }

    /// Select or color change: enter Editing and record the value at once
    pub fn choose(&mut self, id: &str, key: &str, value: &str) -> Result<(), FieldValueError> {
        let descriptor = self.editable_descriptor(key)?;
        descriptor.kind.validate(value)?;
        let draft = self.draft_for(id)?;
        draft.row.set_field(key, value.to_string());
        draft.touched.insert(key.to_string());
        Ok(())
    }

    /// Hand the draft to the page. The draft stays until the row is patched
    /// or the edit is cancelled.
    pub fn commit(&self) -> Option<TableAction<R>> {
        self.draft
            .as_ref()
            .map(|d| TableAction::Update(d.row.clone()))
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Value shown in a cell: the draft's for touched fields of the row
    /// being edited, the source row's otherwise
    pub fn cell_value(&self, id: &str, key: &str) -> Cow<'_, str> {
        if let Some(draft) = &self.draft {
            if draft.id == id && draft.touched.contains(key) {
                return draft.row.text(key);
            }
        }
        self.row(id)
            .map(|r| r.text(key))
            .unwrap_or(Cow::Borrowed(""))
    }

    pub fn cell_mode(&self, id: &str, key: &str) -> CellMode {
        let Some(descriptor) = self.columns.descriptor_for(key) else {
            return CellMode::ReadOnly;
        };
        if !descriptor.editable {
            return CellMode::ReadOnly;
        }
        match descriptor.kind {
            FieldKind::Text if self.is_editing(id) => CellMode::TextInput,
            FieldKind::Text => CellMode::TextView,
            FieldKind::Select { .. } => CellMode::Select,
            FieldKind::Color => CellMode::Color,
        }
    }

    /// Change a filter value. Select filters apply at once, text filters
    /// wait for [`EditableTable::apply_filters`].
    pub fn set_filter(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<Option<TableAction<R>>, FieldValueError> {
        let descriptor = self
            .columns
            .descriptor_for(key)
            .filter(|d| d.kind.is_filterable())
            .ok_or_else(|| FieldValueError::UnknownField(key.to_string()))?;
        descriptor.kind.validate(value)?;
        let immediate = descriptor.kind.commits_immediately();

        self.filters.stage(key, value);
        Ok(immediate.then(|| TableAction::Filter(self.filters.commit())))
    }

    pub fn apply_filters(&self) -> TableAction<R> {
        TableAction::Filter(self.filters.commit())
    }

    /// `None` when this table has no remove operation, the row is unknown
    /// or the row is being edited
    pub fn request_remove(&self, id: &str) -> Option<TableAction<R>> {
        if !self.removable || self.is_editing(id) || self.row(id).is_none() {
            return None;
        }
        Some(TableAction::Remove(id.to_string()))
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.columns
            .descriptor_for(key)
            .is_some_and(|d| d.kind.is_filterable())
    }

    pub fn request_sort(&self, key: &str) -> Option<TableAction<R>> {
        self.is_sortable(key)
            .then(|| TableAction::Sort(key.to_string()))
    }

    fn editable_descriptor(&self, key: &str) -> Result<&FieldDescriptor, FieldValueError> {
        let descriptor = self
            .columns
            .descriptor_for(key)
            .ok_or_else(|| FieldValueError::UnknownField(key.to_string()))?;
        if !descriptor.editable {
            return Err(FieldValueError::ReadOnly(key.to_string()));
        }
        Ok(descriptor)
    }

    /// Draft for `id`, created as a fresh copy of the source row when the
    /// current draft belongs to another row (or there is none)
    fn draft_for(&mut self, id: &str) -> Result<&mut EditDraft<R>, FieldValueError> {
        let same_row = self.is_editing(id);
        if !same_row {
            let row = self
                .row(id)
                .cloned()
                .ok_or_else(|| FieldValueError::UnknownField(format!("row {id}")))?;
            self.draft = Some(EditDraft {
                id: id.to_string(),
                row,
                touched: BTreeSet::new(),
            });
        }
        self.draft
            .as_mut()
            .ok_or_else(|| FieldValueError::UnknownField(format!("row {id}")))
    }
}
