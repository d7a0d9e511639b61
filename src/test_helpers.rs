//! Shared test utilities for the unit test suite.
//!
//! Builders for in-memory collections and lookups that panic with a clear
//! message on a miss.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut files = collection(&["one/one.md", "one/images/a.png"]);
//! apply(&mut files, PartialOptions::new(), &GlobPatternMatcher::new());
//! assert_eq!(images_of(&files, "one/one.md", "images"), Some(vec!["one/images/a.png"]));
//! ```

use crate::types::{FileCollection, FileRecord};

// =========================================================================
// Collection builders
// =========================================================================

/// A collection holding `paths`, each with empty metadata.
pub fn collection(paths: &[&str]) -> FileCollection {
    paths
        .iter()
        .map(|p| (p.to_string(), FileRecord::new()))
        .collect()
}

// =========================================================================
// Lookups
// =========================================================================

/// The string entries stored under `key` on `path`, or `None` if the key is
/// absent. Panics if `path` is not in the collection or the value is not a
/// list of strings.
pub fn images_of<'a>(files: &'a FileCollection, path: &str, key: &str) -> Option<Vec<&'a str>> {
    let record = files.get(path).unwrap_or_else(|| {
        let paths: Vec<&str> = files.paths().collect();
        panic!("file '{path}' not found. Available: {paths:?}")
    });
    let value = record.get(key)?;
    let list = value
        .as_array()
        .unwrap_or_else(|| panic!("'{key}' on '{path}' is not a list: {value}"));
    Some(
        list.iter()
            .map(|v| {
                v.as_str()
                    .unwrap_or_else(|| panic!("non-string entry under '{key}' on '{path}': {v}"))
            })
            .collect(),
    )
}
