//! Attach co-located images to content files.
//!
//! One pass, for one [`Options`] value:
//!
//! ```text
//! 1. resolve options            PartialOptions → Options
//! 2. match content files        pattern over every collection path
//! 3. for each content file
//!    a. skip if no longer in the collection
//!    b. list direct children of <parent>/<images_directory>
//!    c. skip if there are none (no metadata written)
//!    d. make sure metadata[images_key] is a list
//!    e. append children with an authorized extension
//!    f. drop duplicates, keeping first occurrences
//! ```
//!
//! [`run`] applies a list of entries in order over the same collection. Later
//! entries see everything earlier entries wrote, so two passes with the same
//! `images_key` accumulate into one list.
//!
//! Nothing in this module fails. Missing files, empty directories, and empty
//! extension lists all degrade to "nothing written".

use crate::config::{self, Options, OptionsList, PartialOptions};
use crate::filter::is_authorized;
use crate::pattern::{GlobPatternMatcher, PatternMatcher, matching_files};
use crate::scan::files_in_directory;
use crate::types::{FileCollection, FileRecord};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Images written to one content file during a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub path: String,
    /// Entries this pass added after deduplication.
    pub added: usize,
    /// Length of the list once the pass is done with it.
    pub total: usize,
}

/// What a single pass did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassReport {
    pub pattern: String,
    pub images_key: String,
    /// Number of paths matched by the pattern.
    pub matched: usize,
    pub annotated: Vec<Annotation>,
    /// Matched paths no longer present when their turn came.
    pub skipped_missing: usize,
    /// Matched paths whose image directory had no entries.
    pub skipped_no_directory: usize,
}

/// Reports for every pass of a [`run`], in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub passes: Vec<PassReport>,
}

impl RunReport {
    pub fn annotated_count(&self) -> usize {
        self.passes.iter().map(|p| p.annotated.len()).sum()
    }

    pub fn added_count(&self) -> usize {
        self.passes
            .iter()
            .flat_map(|p| &p.annotated)
            .map(|a| a.added)
            .sum()
    }
}

/// Apply every entry of `options` in order over `files`.
pub fn run(
    files: &mut FileCollection,
    options: impl Into<OptionsList>,
    matcher: &dyn PatternMatcher,
) -> RunReport {
    let passes = options
        .into()
        .into_vec()
        .into_iter()
        .map(|entry| apply(files, entry, matcher))
        .collect();
    RunReport { passes }
}

/// Resolve `overrides` against the defaults and run one pass.
pub fn apply(
    files: &mut FileCollection,
    overrides: PartialOptions,
    matcher: &dyn PatternMatcher,
) -> PassReport {
    apply_resolved(files, &config::resolve(overrides), matcher)
}

/// Run one pass with already resolved options.
pub fn apply_resolved(
    files: &mut FileCollection,
    options: &Options,
    matcher: &dyn PatternMatcher,
) -> PassReport {
    let content_files = matching_files(files, &options.pattern, matcher);
    log::debug!(
        "pattern '{}' matched {} file(s)",
        options.pattern,
        content_files.len()
    );
    annotate(files, &content_files, options)
}

/// Steps 3a-3f for an explicit list of content paths.
fn annotate(files: &mut FileCollection, content_files: &[String], options: &Options) -> PassReport {
    let mut report = PassReport {
        pattern: options.pattern.clone(),
        images_key: options.images_key.clone(),
        matched: content_files.len(),
        ..PassReport::default()
    };

    for content_path in content_files {
        if !files.contains(content_path) {
            log::debug!("{content_path}: no longer in the collection, skipping");
            report.skipped_missing += 1;
            continue;
        }

        let candidates = files_in_directory(files, content_path, &options.images_directory);
        if candidates.is_empty() {
            report.skipped_no_directory += 1;
            continue;
        }

        let authorized: Vec<String> = candidates
            .into_iter()
            .filter(|candidate| {
                let ok = is_authorized(candidate, &options.authorized_exts);
                if !ok {
                    log::trace!("{content_path}: rejecting {candidate}");
                }
                ok
            })
            .collect();

        let Some(record) = files.get_mut(content_path) else {
            continue;
        };
        let mut list = take_image_list(record, content_path, &options.images_key);
        let before = list.len();
        list.extend(authorized.into_iter().map(Value::String));
        dedup_stable(&mut list);
        let total = list.len();
        record.insert(options.images_key.clone(), Value::Array(list));

        log::debug!(
            "{content_path}: {} image(s) under '{}'",
            total,
            options.images_key
        );
        report.annotated.push(Annotation {
            path: content_path.clone(),
            added: total.saturating_sub(before),
            total,
        });
    }

    report
}

/// Remove and return the list stored under `key`.
///
/// Absent and null yield an empty list. Any other non-list value is dropped.
fn take_image_list(record: &mut FileRecord, content_path: &str, key: &str) -> Vec<Value> {
    match record.remove(key) {
        Some(Value::Array(list)) => list,
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            log::warn!("{content_path}: replacing non-list value under '{key}'");
            Vec::new()
        }
    }
}

/// Remove repeated values, keeping the first occurrence of each.
fn dedup_stable(list: &mut Vec<Value>) {
    let mut seen = HashSet::new();
    list.retain(|value| seen.insert(value.to_string()));
}

/// A reusable association stage: a fixed options list plus a matcher.
///
/// Holds no state between runs; every [`Associator::run`] starts from the
/// collection as given.
#[derive(Debug)]
pub struct Associator<M = GlobPatternMatcher> {
    options: OptionsList,
    matcher: M,
}

impl Associator {
    pub fn new(options: impl Into<OptionsList>) -> Self {
        Self {
            options: options.into(),
            matcher: GlobPatternMatcher::new(),
        }
    }
}

impl Default for Associator {
    fn default() -> Self {
        Self::new(OptionsList::default())
    }
}

impl<M: PatternMatcher> Associator<M> {
    /// Swap in a different glob engine.
    pub fn with_matcher<N: PatternMatcher>(self, matcher: N) -> Associator<N> {
        Associator {
            options: self.options,
            matcher,
        }
    }

    pub fn options(&self) -> &OptionsList {
        &self.options
    }

    pub fn run(&self, files: &mut FileCollection) -> RunReport {
        run(files, self.options.clone(), &self.matcher)
    }
}
