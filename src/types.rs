//! Shared types for the file collection a build pass operates on.
//!
//! The host pipeline owns a [`FileCollection`] for the duration of one build:
//! every entry is a relative, forward-slash path mapped to an open metadata
//! record. Association passes read paths and write exactly one metadata key
//! per content file. They never add or remove entries.
//!
//! The collection serializes transparently as a JSON object, which is the
//! manifest format the CLI reads and writes:
//!
//! ```text
//! {
//!   "one/one.md": { "title": "One", "images": ["one/images/a.png"] },
//!   "one/images/a.png": {}
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Open, extensible metadata attached to a single file.
pub type FileRecord = serde_json::Map<String, serde_json::Value>;

/// Mapping from normalized relative path to its metadata record.
///
/// Backed by a `BTreeMap`, so iteration is in lexicographic path order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileCollection {
    files: BTreeMap<String, FileRecord>,
}

impl FileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, normalizing `\` separators to `/`.
    ///
    /// Returns the previous record stored under the same path, if any.
    pub fn insert(&mut self, path: impl Into<String>, record: FileRecord) -> Option<FileRecord> {
        self.files.insert(normalize_separators(path.into()), record)
    }

    pub fn remove(&mut self, path: &str) -> Option<FileRecord> {
        self.files.remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut FileRecord> {
        self.files.get_mut(path)
    }

    /// All paths in iteration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FileRecord> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, FileRecord)> for FileCollection {
    fn from_iter<I: IntoIterator<Item = (String, FileRecord)>>(iter: I) -> Self {
        let mut collection = FileCollection::new();
        for (path, record) in iter {
            collection.insert(path, record);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a FileCollection {
    type Item = (&'a String, &'a FileRecord);
    type IntoIter = btree_map::Iter<'a, String, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn normalize_separators(path: String) -> String {
    if path.contains('\\') {
        path.replace('\\', "/")
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_normalizes_backslashes() {
        let mut files = FileCollection::new();
        files.insert("one\\images\\a.png", FileRecord::new());
        assert!(files.contains("one/images/a.png"));
        assert!(!files.contains("one\\images\\a.png"));
    }

    #[test]
    fn paths_iterate_in_sorted_order() {
        let files: FileCollection = ["b.md", "a/z.png", "a.md"]
            .into_iter()
            .map(|p| (p.to_string(), FileRecord::new()))
            .collect();
        let paths: Vec<&str> = files.paths().collect();
        assert_eq!(paths, vec!["a.md", "a/z.png", "b.md"]);
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut record = FileRecord::new();
        record.insert("title".into(), json!("One"));
        let mut files = FileCollection::new();
        files.insert("one.md", record);

        let value = serde_json::to_value(&files).unwrap();
        assert_eq!(value, json!({ "one.md": { "title": "One" } }));

        let back: FileCollection = serde_json::from_value(value).unwrap();
        assert_eq!(back, files);
    }
}
