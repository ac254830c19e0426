//! Expansion of the `{P}`, `{D}` and `{F}` placeholders inside a tool template.

use crate::paths;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([PpDdFf])\}").expect("placeholder pattern is valid"));

/// Values derived from the path the user clicked on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderContext {
    /// `{P}`: the path, separator-terminated when it is a directory.
    pub full_path: String,
    /// `{D}`: the directory itself, or the parent directory of a file, always separator-terminated.
    pub directory_path: String,
    /// `{F}`: the file name only, empty for directories.
    pub file_name: String,
}

impl PlaceholderContext {
    pub fn new(path: &str, is_directory: bool) -> Self {
        let path = path.trim();
        if is_directory {
            let full_path = paths::include_trailing_separator(path);
            Self {
                directory_path: full_path.clone(),
                file_name: String::new(),
                full_path,
            }
        } else {
            let parent = paths::parent_directory(path).unwrap_or_default();
            Self {
                full_path: path.to_string(),
                directory_path: paths::include_trailing_separator(parent),
                file_name: paths::file_name(path).to_string(),
            }
        }
    }

    fn value_for(&self, marker: &str) -> &str {
        match marker {
            "P" | "p" => &self.full_path,
            "D" | "d" => &self.directory_path,
            _ => &self.file_name,
        }
    }
}

/// Replaces every placeholder in `template` with its value from `context`.
///
/// Unknown markers such as `{X}` are left untouched.
pub fn substitute(template: &str, context: &PlaceholderContext) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| context.value_for(&caps[1]).to_string())
        .into_owned()
}
