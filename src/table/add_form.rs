//! Add-row form engine
//!
//! Collects a new record field by field. The submit control is enabled only
//! when every field is non-empty. After the page reports a successful add,
//! [`AddForm::reset_after_submit`] clears the non-sticky fields.

use super::field::{Columns, FieldDescriptor, FieldValueError};
use super::record::Row;

/// Form field: descriptor plus whether its value survives a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub descriptor: FieldDescriptor,
    pub sticky: bool,
}

impl FormField {
    pub fn new(descriptor: FieldDescriptor) -> Self {
        Self {
            descriptor,
            sticky: false,
        }
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }
}

pub struct AddForm<R: Row> {
    columns: Columns,
    sticky: Vec<bool>,
    draft: R,
}

impl<R: Row> AddForm<R> {
    /// `columns` and `sticky` are parallel; a short `sticky` list treats the
    /// missing tail as non-sticky
    pub fn new(columns: Columns, sticky: Vec<bool>) -> Self {
        let draft = R::blank(columns.keys().iter().map(String::as_str));
        let sticky = (0..columns.len())
            .map(|i| sticky.get(i).copied().unwrap_or(false))
            .collect();
        Self {
            columns,
            sticky,
            draft,
        }
    }

    pub fn from_fields(
        keys: Vec<String>,
        fields: Vec<FormField>,
        placeholders: Vec<String>,
    ) -> Result<Self, super::ColumnsError> {
        let sticky = fields.iter().map(|f| f.sticky).collect();
        let descriptors = fields.into_iter().map(|f| f.descriptor).collect();
        let columns = Columns::new(keys, descriptors, placeholders)?;
        Ok(Self::new(columns, sticky))
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn is_sticky(&self, key: &str) -> bool {
        self.columns
            .position(key)
            .and_then(|i| self.sticky.get(i).copied())
            .unwrap_or(false)
    }

    pub fn value(&self, key: &str) -> String {
        self.draft.text(key).into_owned()
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    /// Write a value into the draft. Select and color values are checked
    /// against their field kind; read-only flags do not apply to new records.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), FieldValueError> {
        let descriptor = self
            .columns
            .descriptor_for(key)
            .ok_or_else(|| FieldValueError::UnknownField(key.to_string()))?;
        descriptor.kind.validate(value)?;
        self.draft.set_field(key, value.to_string());
        Ok(())
    }

    /// Submit control state
    pub fn is_complete(&self) -> bool {
        self.columns
            .keys()
            .iter()
            .all(|k| !self.draft.text(k).is_empty())
    }

    /// Record to hand to the add operation, `None` while incomplete
    pub fn submit(&self) -> Option<R> {
        self.is_complete().then(|| self.draft.clone())
    }

    /// Clear non-sticky fields after a successful add
    pub fn reset_after_submit(&mut self) {
        for (key, sticky) in self.columns.keys().iter().zip(&self.sticky) {
            if !sticky {
                self.draft.set_field(key, String::new());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Record, SelectOption};
    use serde_json::json;

    fn brand_form() -> AddForm<Record> {
        AddForm::from_fields(
            vec!["name".into(), "country".into()],
            vec![
                FormField::new(FieldDescriptor::text("Name")),
                FormField::new(FieldDescriptor::select(
                    "Country",
                    vec![
                        SelectOption::new("UA", "Ukraine"),
                        SelectOption::new("PL", "Poland"),
                    ],
                ))
                .sticky(),
            ],
            vec!["Name".into(), "Country".into()],
        )
        .unwrap()
    }

    #[test]
    fn submit_gated_on_every_field() {
        let mut form = brand_form();
        assert!(!form.is_complete());
        assert!(form.submit().is_none());

        form.set_value("name", "Acme").unwrap();
        assert!(!form.is_complete());
        form.set_value("country", "UA").unwrap();
        assert!(form.is_complete());

        form.set_value("name", "").unwrap();
        assert!(!form.is_complete());
    }

    #[test]
    fn sticky_fields_survive_reset() {
        let mut form = brand_form();
        form.set_value("name", "Acme").unwrap();
        form.set_value("country", "UA").unwrap();

        let submitted = form.submit().unwrap();
        assert_eq!(submitted.to_json(), json!({ "name": "Acme", "country": "UA" }));

        form.reset_after_submit();
        assert_eq!(form.draft().to_json(), json!({ "name": "", "country": "UA" }));
        assert!(form.is_sticky("country"));
        assert!(!form.is_sticky("name"));
    }

    #[test]
    fn failed_add_keeps_everything() {
        let mut form = brand_form();
        form.set_value("name", "Acme").unwrap();
        form.set_value("country", "PL").unwrap();
        let _ = form.submit();
        assert_eq!(form.value("name"), "Acme");
        assert_eq!(form.value("country"), "PL");
    }

    #[test]
    fn values_checked_by_kind() {
        let mut form = brand_form();
        assert_eq!(
            form.set_value("country", "XX"),
            Err(FieldValueError::UnknownOption("XX".into()))
        );
        assert_eq!(
            form.set_value("nope", "x"),
            Err(FieldValueError::UnknownField("nope".into()))
        );
    }
}
