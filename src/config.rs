//! Association options: defaults, partial overrides, and config file loading.
//!
//! Each association pass is driven by one [`Options`] value. Users only
//! supply the fields they want to change ([`PartialOptions`]); everything else
//! falls back to the stock defaults via [`resolve`].
//!
//! ## Config File
//!
//! The CLI reads `images.toml` from the source directory (or any path passed
//! with `--config`). Top-level keys describe a single pass:
//!
//! ```toml
//! pattern = "**/*.md"            # Content files that receive images
//! images_directory = "images"    # Relative to each content file's directory
//! authorized_exts = ["jpg", "png"]
//! images_key = "images"          # Metadata field written on content files
//! ```
//!
//! Several passes are written as an array of tables. Top-level keys act as
//! shared defaults that every `[[pass]]` may override:
//!
//! ```toml
//! images_key = "gallery"
//!
//! [[pass]]
//! pattern = "projects/*.md"
//! authorized_exts = ["gif"]
//!
//! [[pass]]
//! pattern = "**/*.md"
//! ```
//!
//! ## Unknown Keys
//!
//! Unlike most config in a build, unknown keys are not rejected. They are kept
//! in [`Options::extra`] and reported with a warning so a newer config still
//! loads with an older binary. The camelCase spellings (`imagesDirectory`,
//! `authorizedExts`, `imagesKey`) are accepted as aliases.
//!
//! No validation of `pattern` syntax or `images_directory` contents is done:
//! malformed values simply match nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Name of the config file looked up in the source directory.
pub const CONFIG_FILENAME: &str = "images.toml";

pub const DEFAULT_PATTERN: &str = "**/*.md";
pub const DEFAULT_IMAGES_DIRECTORY: &str = "images";
pub const DEFAULT_IMAGES_KEY: &str = "images";

/// Extensions accepted by default. Matching is case-sensitive, so every
/// format is listed in both cases.
pub const DEFAULT_AUTHORIZED_EXTS: &[&str] = &[
    "jpg", "jpeg", "svg", "png", "gif", "JPG", "JPEG", "SVG", "PNG", "GIF",
];

/// Fully resolved options for one association pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Options {
    /// Glob selecting the content files that receive images.
    pub pattern: String,
    /// Directory scanned for images, relative to each content file's parent.
    /// `.` means the content file's own directory.
    pub images_directory: String,
    /// Allowed extensions (text after the last `.`), compared exactly.
    pub authorized_exts: Vec<String>,
    /// Metadata field the image list is written to.
    pub images_key: String,
    /// Unrecognized keys, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            images_directory: DEFAULT_IMAGES_DIRECTORY.to_string(),
            authorized_exts: DEFAULT_AUTHORIZED_EXTS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            images_key: DEFAULT_IMAGES_KEY.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// User-supplied overrides. Every unset field takes its default in [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(
        default,
        alias = "imagesDirectory",
        skip_serializing_if = "Option::is_none"
    )]
    pub images_directory: Option<String>,
    #[serde(
        default,
        alias = "authorizedExts",
        skip_serializing_if = "Option::is_none"
    )]
    pub authorized_exts: Option<Vec<String>>,
    #[serde(default, alias = "imagesKey", skip_serializing_if = "Option::is_none")]
    pub images_key: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PartialOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn images_directory(mut self, dir: impl Into<String>) -> Self {
        self.images_directory = Some(dir.into());
        self
    }

    pub fn authorized_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorized_exts = Some(exts.into_iter().map(Into::into).collect());
        self
    }

    pub fn images_key(mut self, key: impl Into<String>) -> Self {
        self.images_key = Some(key.into());
        self
    }

    /// True when no field, known or unknown, is set.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
            && self.images_directory.is_none()
            && self.authorized_exts.is_none()
            && self.images_key.is_none()
            && self.extra.is_empty()
    }

    /// Layer `overlay` on top of `self`: fields set in the overlay win,
    /// fields it leaves unset are kept.
    pub fn merge(mut self, overlay: PartialOptions) -> PartialOptions {
        if overlay.pattern.is_some() {
            self.pattern = overlay.pattern;
        }
        if overlay.images_directory.is_some() {
            self.images_directory = overlay.images_directory;
        }
        if overlay.authorized_exts.is_some() {
            self.authorized_exts = overlay.authorized_exts;
        }
        if overlay.images_key.is_some() {
            self.images_key = overlay.images_key;
        }
        self.extra.extend(overlay.extra);
        self
    }
}

impl From<Options> for PartialOptions {
    fn from(options: Options) -> Self {
        Self {
            pattern: Some(options.pattern),
            images_directory: Some(options.images_directory),
            authorized_exts: Some(options.authorized_exts),
            images_key: Some(options.images_key),
            extra: options.extra,
        }
    }
}

/// Complete `overrides` with the stock defaults.
///
/// Never fails. Unknown keys are logged and passed through in
/// [`Options::extra`].
pub fn resolve(overrides: PartialOptions) -> Options {
    for key in overrides.extra.keys() {
        log::warn!("ignoring unrecognized option `{key}`");
    }
    let defaults = Options::default();
    Options {
        pattern: overrides.pattern.unwrap_or(defaults.pattern),
        images_directory: overrides
            .images_directory
            .unwrap_or(defaults.images_directory),
        authorized_exts: overrides
            .authorized_exts
            .unwrap_or(defaults.authorized_exts),
        images_key: overrides.images_key.unwrap_or(defaults.images_key),
        extra: overrides.extra,
    }
}

/// Configuration accepted by a run: one entry or an ordered list of entries.
///
/// Entries are applied independently and in order over the same collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionsList {
    Many(Vec<PartialOptions>),
    Single(PartialOptions),
}

impl Default for OptionsList {
    fn default() -> Self {
        OptionsList::Single(PartialOptions::default())
    }
}

impl OptionsList {
    /// Normalize to the ordered sequence of entries to apply.
    pub fn into_vec(self) -> Vec<PartialOptions> {
        match self {
            OptionsList::Single(options) => vec![options],
            OptionsList::Many(list) => list,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OptionsList::Single(_) => 1,
            OptionsList::Many(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Layer `overlay` on top of every entry.
    pub fn merge_each(self, overlay: &PartialOptions) -> OptionsList {
        match self {
            OptionsList::Single(options) => OptionsList::Single(options.merge(overlay.clone())),
            OptionsList::Many(list) => OptionsList::Many(
                list.into_iter()
                    .map(|options| options.merge(overlay.clone()))
                    .collect(),
            ),
        }
    }
}

impl From<PartialOptions> for OptionsList {
    fn from(options: PartialOptions) -> Self {
        OptionsList::Single(options)
    }
}

impl From<Options> for OptionsList {
    fn from(options: Options) -> Self {
        OptionsList::Single(options.into())
    }
}

impl From<Vec<PartialOptions>> for OptionsList {
    fn from(list: Vec<PartialOptions>) -> Self {
        OptionsList::Many(list)
    }
}

impl From<Vec<Options>> for OptionsList {
    fn from(list: Vec<Options>) -> Self {
        OptionsList::Many(list.into_iter().map(Into::into).collect())
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse a TOML config: top-level keys, optionally with `[[pass]]` entries.
pub fn parse_config_toml(content: &str) -> Result<OptionsList, ConfigError> {
    let mut table: toml::Table = toml::from_str(content)?;
    let passes = table.remove("pass");
    let base: PartialOptions = toml::Value::Table(table).try_into()?;

    match passes {
        None => Ok(OptionsList::Single(base)),
        Some(passes) => {
            let passes: Vec<PartialOptions> = passes.try_into()?;
            Ok(OptionsList::Many(
                passes
                    .into_iter()
                    .map(|pass| base.clone().merge(pass))
                    .collect(),
            ))
        }
    }
}

/// Parse a JSON config: either one options object or an array of them.
pub fn parse_config_json(content: &str) -> Result<OptionsList, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Load options from a file, choosing the format by extension
/// (`.json` is JSON, anything else is TOML).
pub fn load_config(path: &Path) -> Result<OptionsList, ConfigError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        parse_config_json(&content)
    } else {
        parse_config_toml(&content)
    }
}

/// Path of `images.toml` in `root`, if present.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_FILENAME);
    path.is_file().then_some(path)
}

/// Returns a fully-commented stock `images.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Colocated Images Configuration
# ==============================
# All settings are optional. Values shown below are the defaults.
# Unknown keys are ignored with a warning.

# Glob selecting content files. `*` stays within one path segment,
# `**` crosses directories.
pattern = "**/*.md"

# Directory holding each content file's images, relative to the content
# file's own directory. Use "." to take files next to the content file.
images_directory = "images"

# Extensions (text after the last dot) that count as images.
# Matching is case-sensitive: list every spelling you use.
authorized_exts = ["jpg", "jpeg", "svg", "png", "gif", "JPG", "JPEG", "SVG", "PNG", "GIF"]

# Metadata field the image list is written to.
images_key = "images"

# ---------------------------------------------------------------------------
# Multiple passes
# ---------------------------------------------------------------------------
# Each [[pass]] runs in order over the same files. Keys above act as
# defaults for every pass.
#
# [[pass]]
# pattern = "projects/*.md"
# authorized_exts = ["gif"]
#
# [[pass]]
# pattern = "**/*.md"
"##
}
