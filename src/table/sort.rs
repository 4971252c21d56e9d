//! Sort controller: one active column plus a direction flag

/// Single active sort column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub descending: bool,
}

impl SortState {
    /// Clicking the active column flips direction, any other column
    /// becomes active in ascending order
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.descending = !self.descending;
        } else {
            self.field = field.to_string();
            self.descending = false;
        }
    }

    pub fn is_active(&self, field: &str) -> bool {
        !self.field.is_empty() && self.field == field
    }

    /// Header arrow for a column (empty when not sorted by it)
    pub fn indicator(&self, field: &str) -> &'static str {
        match (self.is_active(field), self.descending) {
            (false, _) => "",
            (true, false) => " ▲",
            (true, true) => " ▼",
        }
    }
}
