//! The action keywords the context-menu entries put in front of the paths.

use std::num::ParseIntError;
use thiserror::Error;

/// Operation requested by the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CopyFile,
    CopyEmail,
    /// `-GotoTool-U-<index>` for user-defined tools, `-GotoTool-P-<index>` for predefined ones.
    GotoTool { custom: bool, index: usize },
    NewFolder,
    NewSymbolicLink,
    NewSymbolicLinkElevated,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("malformed goto tool action: {0}")]
    MalformedGotoTool(String),
    #[error("invalid tool index in {action}: {source}")]
    InvalidToolIndex {
        action: String,
        #[source]
        source: ParseIntError,
    },
}

const GOTO_TOOL_PREFIX: &str = "-gototool";

impl Action {
    /// Interprets an action keyword, ignoring case.
    ///
    /// Unknown keywords are not an error, they yield `Ok(None)`.
    pub fn parse(keyword: &str) -> Result<Option<Action>, ActionError> {
        let lower = keyword.to_lowercase();
        let action = match lower.as_str() {
            "-copyfile" => Action::CopyFile,
            "-copyemail" => Action::CopyEmail,
            "-newfolder" => Action::NewFolder,
            "-newsymboliclink" => Action::NewSymbolicLink,
            "-newsymboliclinkelevated" => Action::NewSymbolicLinkElevated,
            other if other.starts_with(GOTO_TOOL_PREFIX) => Self::parse_goto_tool(keyword)?,
            _ => return Ok(None),
        };
        Ok(Some(action))
    }

    fn parse_goto_tool(keyword: &str) -> Result<Action, ActionError> {
        let parts: Vec<&str> = keyword.split('-').filter(|p| !p.is_empty()).collect();
        let [_, kind, index] = parts[..] else {
            return Err(ActionError::MalformedGotoTool(keyword.to_string()));
        };
        let index = index
            .parse::<usize>()
            .map_err(|source| ActionError::InvalidToolIndex {
                action: keyword.to_string(),
                source,
            })?;
        Ok(Action::GotoTool {
            custom: kind.eq_ignore_ascii_case("U"),
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_keywords_ignore_case() {
        assert_eq!(Action::parse("-CopyFile"), Ok(Some(Action::CopyFile)));
        assert_eq!(Action::parse("-copyemail"), Ok(Some(Action::CopyEmail)));
        assert_eq!(Action::parse("-NEWFOLDER"), Ok(Some(Action::NewFolder)));
        assert_eq!(
            Action::parse("-NewSymbolicLink"),
            Ok(Some(Action::NewSymbolicLink))
        );
        assert_eq!(
            Action::parse("-NewSymbolicLinkElevated"),
            Ok(Some(Action::NewSymbolicLinkElevated))
        );
    }

    #[test]
    fn goto_tool_keywords() {
        assert_eq!(
            Action::parse("-GotoTool-U-3"),
            Ok(Some(Action::GotoTool { custom: true, index: 3 }))
        );
        assert_eq!(
            Action::parse("-GotoTool-P-0"),
            Ok(Some(Action::GotoTool { custom: false, index: 0 }))
        );
    }

    #[test]
    fn malformed_goto_tool_keywords() {
        assert_eq!(
            Action::parse("-GotoTool-U"),
            Err(ActionError::MalformedGotoTool("-GotoTool-U".to_string()))
        );
        assert!(matches!(
            Action::parse("-GotoTool-P-x"),
            Err(ActionError::InvalidToolIndex { .. })
        ));
        assert!(matches!(
            Action::parse("-GotoTool-P-1-2"),
            Err(ActionError::MalformedGotoTool(_))
        ));
    }

    #[test]
    fn unknown_keyword_is_none() {
        assert_eq!(Action::parse("-option1"), Ok(None));
        assert_eq!(Action::parse(""), Ok(None));
    }
}
