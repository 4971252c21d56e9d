//! Filter state store
//!
//! Holds the current filter criteria as a row-shaped record. Staging a value
//! never talks to the data source; [`FilterStore::commit`] hands out the
//! record the container should fetch with.

use super::record::Row;

#[derive(Debug, Clone)]
pub struct FilterStore<R: Row> {
    keys: Vec<String>,
    values: R,
}

impl<R: Row> FilterStore<R> {
    /// Empty filters over `keys`
    pub fn new(keys: Vec<String>) -> Self {
        let values = R::blank(keys.iter().map(String::as_str));
        Self { keys, values }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn get(&self, key: &str) -> String {
        self.values.text(key).into_owned()
    }

    /// Record a value locally. Returns false for keys without a filter input.
    pub fn stage(&mut self, key: &str, value: impl Into<String>) -> bool {
        if !self.contains(key) {
            return false;
        }
        self.values.set_field(key, value.into());
        true
    }

    /// Snapshot to send to the data source
    pub fn commit(&self) -> R {
        self.values.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Record;

    #[test]
    fn stage_and_commit() {
        let mut filters: FilterStore<Record> =
            FilterStore::new(vec!["name".into(), "country".into()]);
        assert!(filters.stage("name", "red"));
        assert!(!filters.stage("hex", "#000000"));
        assert_eq!(filters.get("name"), "red");
        assert_eq!(filters.commit().text("country"), "");

        // Snapshots do not follow later staging
        let snapshot = filters.commit();
        filters.stage("name", "blue");
        assert_eq!(snapshot.text("name"), "red");
        assert_eq!(filters.get("name"), "blue");
    }
}
