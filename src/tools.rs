//! Launch templates for the "go to tool" menu entries.

use crate::external::WindowStyle;
use serde::{Deserialize, Serialize};

/// A launch pattern, either predefined or configured by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolTemplate {
    /// Title shown in the context menu, not used for launching.
    pub menu_title: String,
    /// Executable and arguments, may contain `{P}`, `{D}` and `{F}` placeholders.
    pub command_line: String,
    pub run_elevated: bool,
    /// `hidden` for tools that run without user interaction.
    pub window: WindowStyle,
}

impl ToolTemplate {
    pub fn new(command_line: impl Into<String>, run_elevated: bool) -> Self {
        Self {
            menu_title: String::new(),
            command_line: command_line.into(),
            run_elevated,
            window: WindowStyle::Normal,
        }
    }
}

/// Built-in tools. Entries come in pairs, the odd index runs the same tool elevated.
///
/// Explorer needs a different switch depending on whether a directory or a file was clicked.
pub fn predefined_tool(index: usize, is_directory: bool) -> Option<ToolTemplate> {
    let run_elevated = index % 2 == 1;
    let command_line = match index {
        0 | 1 => r#"cmd.exe /k "cd /d {D}""#,
        2 | 3 => r"powershell.exe -noexit -command Set-Location -LiteralPath '{D}'",
        4 | 5 if is_directory => r#"explorer.exe /root,"{P}""#,
        4 | 5 => r#"explorer.exe /select,"{P}""#,
        _ => return None,
    };
    Some(ToolTemplate::new(command_line, run_elevated))
}
