//! Populating a [`FileCollection`] for the CLI.
//!
//! Inside a build pipeline the host hands over a collection it already owns.
//! The command-line tool has no host, so it builds one itself, either by
//! walking a directory or by reading a JSON manifest written by an earlier
//! build step.
//!
//! Walking registers every regular file under its root-relative,
//! forward-slash path with empty metadata. Hidden entries (leading `.`) are
//! skipped, as is the config file itself.

use crate::config::CONFIG_FILENAME;
use crate::types::{FileCollection, FileRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Build a collection from the files under `root`.
pub fn load_dir(root: &Path) -> Result<FileCollection, SourceError> {
    if !root.is_dir() {
        return Err(SourceError::NotADirectory(root.to_path_buf()));
    }

    let mut files = FileCollection::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let key = relative_key(rel);
        if key == CONFIG_FILENAME {
            continue;
        }
        files.insert(key, FileRecord::new());
    }

    log::debug!("loaded {} file(s) from {}", files.len(), root.display());
    Ok(files)
}

/// Read a collection from a JSON manifest (`{ "path": { ...metadata } }`).
pub fn load_manifest(path: &Path) -> Result<FileCollection, SourceError> {
    let content = fs::read_to_string(path)?;
    let files: FileCollection = serde_json::from_str(&content)?;
    log::debug!("loaded {} file(s) from {}", files.len(), path.display());
    Ok(files)
}

/// Write `files` as a pretty-printed JSON manifest.
pub fn write_manifest(path: &Path, files: &FileCollection) -> Result<(), SourceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(files)?;
    fs::write(path, json)?;
    Ok(())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Join path components with `/` regardless of platform.
fn relative_key(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
