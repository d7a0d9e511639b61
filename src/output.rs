//! CLI output formatting for association runs.
//!
//! Output is grouped by pass. Each pass leads with its pattern and target
//! key, followed by one entry per annotated content file with its image
//! paths as indented context lines:
//!
//! ```text
//! Pass 1: **/*.md → images
//! 001 one/one.md (+2, 2 total)
//!     one/images/Toadle.gif
//!     one/images/Toadle.png
//! 002 two/two.md (+1, 1 total)
//!     two/images/Toad.png
//! Skipped 1 without image directory
//!
//! Annotated 2 files, 3 images added
//! ```
//!
//! [`format_run_output`] is pure and returns lines for testability;
//! [`print_run_output`] writes them to stdout.

use crate::associate::{PassReport, RunReport};
use crate::types::FileCollection;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn format_pass(
    number: usize,
    pass: &PassReport,
    files: &FileCollection,
    lines: &mut Vec<String>,
) {
    lines.push(format!(
        "Pass {}: {} → {}",
        number, pass.pattern, pass.images_key
    ));

    if pass.matched == 0 {
        lines.push(format!("{}no matching files", indent(1)));
        return;
    }

    for (i, annotation) in pass.annotated.iter().enumerate() {
        lines.push(format!(
            "{} {} (+{}, {} total)",
            format_index(i + 1),
            annotation.path,
            annotation.added,
            annotation.total
        ));
        let images = files
            .get(&annotation.path)
            .and_then(|record| record.get(&pass.images_key))
            .and_then(|value| value.as_array());
        for image in images.into_iter().flatten() {
            let shown = image.as_str().map(String::from).unwrap_or_else(|| image.to_string());
            lines.push(format!("{}{}", indent(1), shown));
        }
    }

    if pass.skipped_no_directory > 0 {
        lines.push(format!(
            "Skipped {} without image directory",
            pass.skipped_no_directory
        ));
    }
    if pass.skipped_missing > 0 {
        lines.push(format!(
            "Skipped {} no longer in the collection",
            pass.skipped_missing
        ));
    }
}

/// Format a run report, listing each annotated file's final image list as
/// it stands in `files`.
pub fn format_run_output(report: &RunReport, files: &FileCollection) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, pass) in report.passes.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        format_pass(i + 1, pass, files, &mut lines);
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Annotated {}, {} added",
        plural(report.annotated_count(), "file"),
        plural(report.added_count(), "image")
    ));
    lines
}

/// Print run output to stdout.
pub fn print_run_output(report: &RunReport, files: &FileCollection) {
    for line in format_run_output(report, files) {
        println!("{}", line);
    }
}
