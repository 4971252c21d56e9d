//! Field descriptor model
//!
//! A column is described by a [`FieldDescriptor`] and addressed by a field
//! key. [`Columns`] keeps keys, descriptors and placeholders together and
//! refuses to exist when they disagree, so render code can index all three
//! by the same position without bounds surprises.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

/// One entry of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }

    /// Order by display text, case-insensitive, with accented Latin letters
    /// next to their base letter and Ukrainian letters in alphabet order
    pub fn sort_by_text(options: &mut [SelectOption]) {
        options.sort_by_cached_key(|o| collation_key(&o.text));
    }
}

const UKRAINIAN_ALPHABET: &str = "абвгґдеєжзиіїйклмнопрстуфхцчшщьюя";

fn collation_key(text: &str) -> Vec<u32> {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !matches!(*c, '\'' | '’' | 'ʼ'))
        .map(|c| match UKRAINIAN_ALPHABET.chars().position(|u| u == c) {
            Some(rank) => 0xE000 + rank as u32,
            None => fold_latin(c) as u32,
        })
        .collect()
}

fn fold_latin(c: char) -> char {
    match c {
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

/// How a field is rendered and edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; edits are staged until explicitly committed
    Text,
    /// Fixed choice list; a change is recorded immediately
    Select { options: Vec<SelectOption> },
    /// `#rrggbb` swatch; a change is recorded immediately
    Color,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Select { .. } => "select",
            FieldKind::Color => "color",
        }
    }

    /// Select and color fields write through on change
    pub fn commits_immediately(&self) -> bool {
        !matches!(self, FieldKind::Text)
    }

    /// Color columns get neither a filter input nor a sortable header
    pub fn is_filterable(&self) -> bool {
        !matches!(self, FieldKind::Color)
    }

    pub fn options(&self) -> &[SelectOption] {
        match self {
            FieldKind::Select { options } => options,
            _ => &[],
        }
    }

    /// Display text for a stored value (option text for selects)
    pub fn display<'a>(&'a self, value: &'a str) -> &'a str {
        match self {
            FieldKind::Select { options } => options
                .iter()
                .find(|o| o.value == value)
                .map(|o| o.text.as_str())
                .unwrap_or(value),
            _ => value,
        }
    }

    /// Check a value before it is written into a draft or filter.
    ///
    /// The empty string is always accepted: it is the placeholder choice.
    pub fn validate(&self, value: &str) -> Result<(), FieldValueError> {
        if value.is_empty() {
            return Ok(());
        }
        match self {
            FieldKind::Text => Ok(()),
            FieldKind::Select { options } => {
                if options.iter().any(|o| o.value == value) {
                    Ok(())
                } else {
                    Err(FieldValueError::UnknownOption(value.to_string()))
                }
            }
            FieldKind::Color => {
                if is_hex_color(value) {
                    Ok(())
                } else {
                    Err(FieldValueError::InvalidColor(value.to_string()))
                }
            }
        }
    }

    /// Next choice after `current` for cycling controls (wraps)
    pub fn cycle(&self, current: &str, palette: &[String], forward: bool) -> Option<String> {
        let choices: Vec<&str> = match self {
            FieldKind::Text => return None,
            FieldKind::Select { options } => options.iter().map(|o| o.value.as_str()).collect(),
            FieldKind::Color => palette.iter().map(String::as_str).collect(),
        };
        if choices.is_empty() {
            return None;
        }
        let next = match choices.iter().position(|c| *c == current) {
            Some(idx) if forward => (idx + 1) % choices.len(),
            Some(idx) => (idx + choices.len() - 1) % choices.len(),
            None if forward => 0,
            None => choices.len() - 1,
        };
        Some(choices[next].to_string())
    }
}

/// `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("static regex"))
        .is_match(value)
}

/// Declarative description of one displayed column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub label: String,
    pub editable: bool,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            editable: true,
            kind: FieldKind::Text,
        }
    }

    pub fn select(label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            label: label.into(),
            editable: true,
            kind: FieldKind::Select { options },
        }
    }

    pub fn color(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            editable: true,
            kind: FieldKind::Color,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }
}

/// Configuration errors detected while assembling [`Columns`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnsError {
    #[error("{keys} field keys but {descriptors} field descriptors")]
    LengthMismatch { keys: usize, descriptors: usize },
    #[error("{keys} field keys but {placeholders} placeholders")]
    PlaceholderMismatch { keys: usize, placeholders: usize },
    #[error("select field `{0}` has no options")]
    EmptyOptions(String),
    #[error("field key `{0}` appears more than once")]
    DuplicateKey(String),
}

/// Rejected field value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldValueError {
    #[error("no field `{0}`")]
    UnknownField(String),
    #[error("`{0}` is not one of the field's options")]
    UnknownOption(String),
    #[error("`{0}` is not a #rrggbb color")]
    InvalidColor(String),
    #[error("field `{0}` is read-only")]
    ReadOnly(String),
}

/// Validated set of columns: position `i` of keys, descriptors and
/// placeholders always describes the same field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    keys: Vec<String>,
    descriptors: Vec<FieldDescriptor>,
    placeholders: Vec<String>,
}

impl Columns {
    pub fn new(
        keys: Vec<String>,
        descriptors: Vec<FieldDescriptor>,
        placeholders: Vec<String>,
    ) -> Result<Self, ColumnsError> {
        if keys.len() != descriptors.len() {
            return Err(ColumnsError::LengthMismatch {
                keys: keys.len(),
                descriptors: descriptors.len(),
            });
        }
        if keys.len() != placeholders.len() {
            return Err(ColumnsError::PlaceholderMismatch {
                keys: keys.len(),
                placeholders: placeholders.len(),
            });
        }

        let mut seen = HashSet::new();
        for (key, descriptor) in keys.iter().zip(&descriptors) {
            if !seen.insert(key.as_str()) {
                return Err(ColumnsError::DuplicateKey(key.clone()));
            }
            if let FieldKind::Select { options } = &descriptor.kind {
                if options.is_empty() {
                    return Err(ColumnsError::EmptyOptions(key.clone()));
                }
            }
        }

        Ok(Self {
            keys,
            descriptors,
            placeholders,
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn key(&self, idx: usize) -> Option<&str> {
        self.keys.get(idx).map(String::as_str)
    }

    pub fn descriptor(&self, idx: usize) -> Option<&FieldDescriptor> {
        self.descriptors.get(idx)
    }

    pub fn placeholder(&self, idx: usize) -> Option<&str> {
        self.placeholders.get(idx).map(String::as_str)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub fn descriptor_for(&self, key: &str) -> Option<&FieldDescriptor> {
        self.position(key).and_then(|idx| self.descriptors.get(idx))
    }

    /// `(key, descriptor, placeholder)` in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor, &str)> {
        self.keys
            .iter()
            .zip(&self.descriptors)
            .zip(&self.placeholders)
            .map(|((k, d), p)| (k.as_str(), d, p.as_str()))
    }

    /// Keys that get a filter input
    pub fn filter_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, d, _)| d.kind.is_filterable())
            .map(|(k, _, _)| k)
            .collect()
    }
}
