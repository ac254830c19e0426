//! Path string helpers shared by the decoder, the placeholder substitution and the copy actions.
//!
//! Paths are handled as plain strings: the helper receives Windows paths from the shell
//! extension and has to treat `\` as a separator regardless of the host it is tested on.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use url::Url;

/// Separator appended to paths that do not contain one yet.
#[cfg(windows)]
pub const SEPARATOR: char = '\\';
#[cfg(not(windows))]
pub const SEPARATOR: char = '/';

pub fn is_separator(ch: char) -> bool {
    ch == '\\' || ch == '/'
}

pub fn ends_with_separator(path: &str) -> bool {
    path.chars().last().is_some_and(is_separator)
}

/// The separator style the path already uses, [`SEPARATOR`] if it contains none.
fn separator_of(path: &str) -> char {
    path.chars().find(|&ch| is_separator(ch)).unwrap_or(SEPARATOR)
}

/// Appends a separator unless the path is empty or already ends with one.
pub fn include_trailing_separator(path: &str) -> String {
    let mut result = path.to_string();
    if !result.is_empty() && !ends_with_separator(&result) {
        result.push(separator_of(path));
    }
    result
}

/// Removes a single trailing separator, if any.
pub fn exclude_trailing_separator(path: &str) -> &str {
    match path.chars().last() {
        Some(ch) if is_separator(ch) => &path[..path.len() - ch.len_utf8()],
        _ => path,
    }
}

/// Rooted at a drive (`C:`) or a separator, including UNC paths.
pub fn is_rooted(path: &str) -> bool {
    let mut chars = path.chars();
    match (chars.next(), chars.next()) {
        (Some(first), _) if is_separator(first) => true,
        (Some(drive), Some(':')) => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

/// Combines a directory with a relative item, inserting exactly one separator.
///
/// A rooted item is returned as is.
pub fn join_path(base: &str, item: &str) -> String {
    if is_rooted(item) {
        return item.to_string();
    }
    let mut result = include_trailing_separator(base);
    result.push_str(item);
    result
}

/// Last component of the path, empty if the path ends with a separator.
pub fn file_name(path: &str) -> &str {
    match path.rfind(is_separator) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Everything before the last separator, `None` if there is no separator.
pub fn parent_directory(path: &str) -> Option<&str> {
    path.rfind(is_separator).map(|pos| &path[..pos])
}

/// Orders directories before files, each group compared case-insensitively.
pub fn sort_filenames(paths: &mut [String], is_directory: impl Fn(&str) -> bool) {
    if paths.len() < 2 {
        return;
    }
    let mut keyed: Vec<(bool, String, String)> = paths
        .iter()
        .map(|p| (!is_directory(p), p.to_lowercase(), p.clone()))
        .collect();
    keyed.sort_by(|a, b| match a.0.cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });
    for (slot, (_, _, path)) in paths.iter_mut().zip(keyed) {
        *slot = path;
    }
}

/// How the copy-file action writes paths into the clipboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyFileFormat {
    #[default]
    OriginalPath,
    Uri,
    /// Backslashes escaped as in a C string literal.
    C,
}

/// How the copy-email action writes paths into the clipboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyEmailFormat {
    #[default]
    Outlook,
    Thunderbird,
}

impl CopyFileFormat {
    pub fn apply(self, path: &str) -> String {
        match self {
            CopyFileFormat::OriginalPath => path.to_string(),
            CopyFileFormat::Uri => to_uri(path),
            CopyFileFormat::C => to_c_literal(path),
        }
    }
}

impl CopyEmailFormat {
    pub fn apply(self, path: &str) -> String {
        match self {
            CopyEmailFormat::Outlook => to_outlook(path),
            CopyEmailFormat::Thunderbird => to_uri(path),
        }
    }
}

/// Converts a local or UNC path into a percent-encoded `file:` URI.
///
/// Input that cannot be expressed as a URI is returned unchanged.
pub fn to_uri(path: &str) -> String {
    let forward = path.replace('\\', "/");
    let candidate = if let Some(unc) = forward.strip_prefix("//") {
        format!("file://{unc}")
    } else if forward.starts_with('/') {
        format!("file://{forward}")
    } else {
        format!("file:///{forward}")
    };
    match Url::parse(&candidate) {
        Ok(url) => url.to_string(),
        Err(_) => path.to_string(),
    }
}

pub fn to_c_literal(path: &str) -> String {
    path.replace('\\', "\\\\")
}

/// Outlook only recognizes links enclosed in angle brackets.
pub fn to_outlook(path: &str) -> String {
    let mut chars = path.chars();
    let _drive = chars.next();
    if chars.next() == Some(':') {
        format!("<file://{path}>")
    } else if path.starts_with(r"\\") {
        format!("<{path}>")
    } else {
        path.to_string()
    }
}
