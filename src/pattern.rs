//! Glob matching of collection paths.
//!
//! Association logic only needs one capability from a glob engine: "does this
//! path match this pattern?". That is the [`PatternMatcher`] trait. The
//! default implementation, [`GlobPatternMatcher`], is backed by `globset`
//! with a literal separator, so:
//!
//! - `*` matches within a single path segment (`*.md` does not match `a/b.md`)
//! - `**` matches across segments, including none (`**/*.md` matches `one.md`)
//!
//! Any `Fn(&str, &str) -> bool` is also a matcher, which keeps the orchestration
//! testable without a real glob engine.

use crate::types::FileCollection;
use globset::{GlobBuilder, GlobMatcher};
use std::cell::RefCell;
use std::collections::HashMap;

/// Tests a path against a glob pattern.
pub trait PatternMatcher {
    fn matches(&self, path: &str, pattern: &str) -> bool;
}

impl<F> PatternMatcher for F
where
    F: Fn(&str, &str) -> bool,
{
    fn matches(&self, path: &str, pattern: &str) -> bool {
        self(path, pattern)
    }
}

/// `globset`-backed matcher. Compiled patterns are cached per pattern string;
/// patterns that fail to compile are cached as "matches nothing".
#[derive(Debug, Default)]
pub struct GlobPatternMatcher {
    compiled: RefCell<HashMap<String, Option<GlobMatcher>>>,
}

impl GlobPatternMatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatternMatcher for GlobPatternMatcher {
    fn matches(&self, path: &str, pattern: &str) -> bool {
        let mut compiled = self.compiled.borrow_mut();
        let matcher = compiled
            .entry(pattern.to_string())
            .or_insert_with(|| build_glob_matcher(pattern));
        matcher.as_ref().is_some_and(|m| m.is_match(path))
    }
}

/// Build a matcher where `*` never crosses `/`.
///
/// Invalid patterns are logged and yield `None`.
fn build_glob_matcher(pattern: &str) -> Option<GlobMatcher> {
    match GlobBuilder::new(pattern).literal_separator(true).build() {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            log::warn!("invalid glob pattern '{}': {}", pattern, e);
            None
        }
    }
}

/// Paths in `files` matching `pattern`, in collection iteration order.
pub fn matching_files(
    files: &FileCollection,
    pattern: &str,
    matcher: &dyn PatternMatcher,
) -> Vec<String> {
    files
        .paths()
        .filter(|path| matcher.matches(path, pattern))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::collection;

    #[test]
    fn double_star_crosses_directories() {
        let m = GlobPatternMatcher::new();
        assert!(m.matches("projects/one.md", "**/*.md"));
        assert!(m.matches("a/b/c/deep.md", "**/*.md"));
        assert!(m.matches("top.md", "**/*.md"));
        assert!(!m.matches("projects/false.pdf", "**/*.md"));
    }

    #[test]
    fn single_star_stays_in_segment() {
        let m = GlobPatternMatcher::new();
        assert!(m.matches("test/a.md", "test/*.md"));
        assert!(!m.matches("test/sub/a.md", "test/*.md"));
        assert!(!m.matches("a/b.md", "*.md"));
    }

    #[test]
    fn invalid_pattern_matches_nothing() {
        let m = GlobPatternMatcher::new();
        assert!(!m.matches("a.md", "a[.md"));
        // Second call hits the cached failure.
        assert!(!m.matches("a.md", "a[.md"));
    }

    #[test]
    fn matching_files_filters_by_pattern() {
        let files = collection(&[
            "projects/one.md",
            "projects/two.md",
            "projects/try.md",
            "projects/false.pdf",
        ]);
        let matched = matching_files(&files, "**/*.md", &GlobPatternMatcher::new());
        assert_eq!(
            matched,
            vec!["projects/one.md", "projects/try.md", "projects/two.md"]
        );
    }

    #[test]
    fn closures_are_matchers() {
        let files = collection(&["a.md", "b.txt"]);
        let ends_with = |path: &str, pattern: &str| path.ends_with(pattern);
        assert_eq!(matching_files(&files, ".txt", &ends_with), vec!["b.txt"]);
    }
}
