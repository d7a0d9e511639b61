//! Directory co-location lookup over the in-memory collection.
//!
//! Given a content file and a relative directory name, find every collection
//! entry that lives *directly* in that directory:
//!
//! ```text
//! projects/one.md                  reference file
//! projects/images/one.jpeg         ✓ direct child of projects/images
//! projects/images/two.jpg          ✓
//! projects/images/folder/three.jpg ✗ nested one level deeper
//! ```
//!
//! All path handling is pure string work on `/`-separated segments. Nothing
//! here touches the filesystem: a directory "exists" only in the sense that
//! some collection key has it as its parent.

use crate::types::FileCollection;

/// Every path in `files` whose parent directory is exactly
/// `parent_dir(reference) / relative_dir`, sorted lexicographically.
///
/// `relative_dir` may be `.` (the reference file's own directory) or contain
/// `..` segments. An empty result is not an error.
pub fn files_in_directory(
    files: &FileCollection,
    reference: &str,
    relative_dir: &str,
) -> Vec<String> {
    let target = join_dir(&parent_dir(reference), relative_dir);
    let mut found: Vec<String> = files
        .paths()
        .filter(|path| parent_dir(path) == target)
        .map(String::from)
        .collect();
    found.sort();
    found
}

/// Parent directory of a `/`-separated path.
///
/// - `projects/one.md` → `projects`
/// - `one.md` → `.`
/// - `/one.md` → `/`
pub fn parent_dir(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.starts_with('/') { "/" } else { "." }.to_string();
    }
    match trimmed.rfind('/') {
        None => ".".to_string(),
        Some(idx) => {
            let parent = trimmed[..idx].trim_end_matches('/');
            if parent.is_empty() {
                "/".to_string()
            } else {
                parent.to_string()
            }
        }
    }
}

/// Join `relative` onto `base` and normalize the result.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment
/// (or is kept when there is nothing left to remove on a relative path).
/// An empty relative result is `.`.
pub fn join_dir(base: &str, relative: &str) -> String {
    let absolute = base.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in base.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
