//! Decoding of the command line the shell extension starts the helper with.
//!
//! Expected layout: `["<own-path>"] [-<action>] "<base-directory>" "<item-1>" ["<item-2>" ...]`.

use crate::lexer;
use crate::paths;

const ACTION_MARKER: char = '-';

/// The decoded command line: an optional action keyword and the absolute paths it applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationArgs {
    pub action: Option<String>,
    pub paths: Vec<String>,
}

impl InvocationArgs {
    /// Nothing to do: no action, or no paths to apply it to.
    pub fn is_noop(&self) -> bool {
        self.action.is_none() || self.paths.is_empty()
    }
}

/// Decodes the raw command line of the helper process.
///
/// The calling shell sometimes includes the helper's own path as first token and sometimes
/// not, `own_executable_path` is used to recognize and drop it. Malformed input never fails,
/// it just decodes to missing action and/or paths.
pub fn decode(raw: &str, own_executable_path: &str) -> InvocationArgs {
    decode_tokens(lexer::split_into_tokens(raw), own_executable_path)
}

/// Same as [`decode`], for arguments the host already split.
pub fn decode_tokens(
    tokens: impl IntoIterator<Item = String>,
    own_executable_path: &str,
) -> InvocationArgs {
    let mut parts = tokens.into_iter().peekable();

    let own_executable_path = own_executable_path.to_lowercase();
    let _own_executable = parts.next_if(|first| first.to_lowercase() == own_executable_path);

    let action = parts.next_if(|first| first.starts_with(ACTION_MARKER));

    // The common directory must come first, followed by 1-n items.
    let rest: Vec<String> = parts.collect();
    let paths = match rest.split_first() {
        Some((directory, items)) if !items.is_empty() => items
            .iter()
            .map(|item| paths::join_path(directory, item))
            .collect(),
        _ => Vec::new(),
    };

    InvocationArgs { action, paths }
}
