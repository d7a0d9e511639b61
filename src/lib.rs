//! # Colocated Images
//!
//! A build stage that attaches image files to content files by directory
//! co-location. Given a collection of files (path → metadata), every content
//! file matching a glob gets the images sitting in a sibling `images/`
//! directory written to its metadata:
//!
//! ```text
//! one/one.md                  →  images: ["one/images/Toadle.gif",
//! one/images/Toadle.gif                  "one/images/Toadle.png"]
//! one/images/Toadle.png
//! four/four.md                →  (untouched: no images directory)
//! ```
//!
//! # Pipeline Position
//!
//! The stage runs over an in-memory [`types::FileCollection`] owned by a host
//! build. It never reads file contents and never adds or removes entries; the
//! only effect is one metadata key per matched content file. The collection
//! is a single shared resource passed by `&mut` through every pass, so a
//! later pass always sees what earlier passes wrote.
//!
//! ```rust
//! use colocated_images::associate::Associator;
//! use colocated_images::config::PartialOptions;
//! use colocated_images::types::{FileCollection, FileRecord};
//!
//! let mut files: FileCollection = ["one/one.md", "one/images/a.png"]
//!     .into_iter()
//!     .map(|p| (p.to_string(), FileRecord::new()))
//!     .collect();
//!
//! Associator::new(PartialOptions::new()).run(&mut files);
//! assert_eq!(files.get("one/one.md").unwrap()["images"][0], "one/images/a.png");
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`associate`] | Orchestration: match content files, scan, filter, write metadata |
//! | [`config`] | Options, defaults, partial overrides, `images.toml` loading |
//! | [`pattern`] | Glob matching capability (`globset` by default, injectable) |
//! | [`scan`] | Direct-children lookup of a directory relative to a content file |
//! | [`filter`] | Case-sensitive extension allow-list |
//! | [`types`] | The file collection and its metadata records |
//! | [`source`] | CLI-side collection loading from a directory or JSON manifest |
//! | [`output`] | CLI output formatting of run reports |
//!
//! # Design Decisions
//!
//! ## No Errors in the Core
//!
//! Association cannot partially fail: every step is an in-memory lookup. A
//! pattern that matches nothing, a missing directory, or an empty extension
//! list all mean "nothing written", never an error. Only the CLI-side layers
//! ([`config`], [`source`]) return `Result`.
//!
//! ## Glob Engine as a Capability
//!
//! Orchestration talks to a [`pattern::PatternMatcher`] trait, not to
//! `globset` directly. Tests inject closures; hosts with their own glob
//! semantics can plug them in through [`associate::Associator::with_matcher`].
//!
//! ## Case-Sensitive Extensions
//!
//! `JPG` and `jpg` are different extensions. The default allow-list names
//! both spellings of every format so the common cases work, while a custom
//! list means exactly what it says.

pub mod associate;
pub mod config;
pub mod filter;
pub mod output;
pub mod pattern;
pub mod scan;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
