//! Turning a tool template into something a process launcher can start.
//!
//! The substituted template is a single free-form string. Only the executable is interpreted:
//! it may be enclosed in `"` or `'`, and ends at the closing quote or at the first whitespace
//! outside of quotes. The remaining argument string is handed over verbatim, it is never
//! re-tokenized.

use crate::placeholder::{self, PlaceholderContext};
use crate::tools::ToolTemplate;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

const QUOTES: [char; 2] = ['"', '\''];

/// Whether the launched process shows its window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStyle {
    #[default]
    Normal,
    Hidden,
}

/// Everything needed to start a tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationDescriptor {
    /// Never enclosed in quotes.
    pub executable: String,
    /// Passed to the launcher as is, quoting included.
    pub arguments: String,
    pub elevated: bool,
    pub window: WindowStyle,
}

/// Determines where the executable ends, counted in characters.
///
/// The closing quote is part of the executable. A quote of the other kind inside a quoted
/// executable is an ordinary character.
pub fn determine_executable_length(command_line: &str) -> usize {
    let mut length = 0;
    let mut quote: Option<char> = None;
    for ch in command_line.trim().chars() {
        match quote {
            Some(open) if ch == open => return length + 1,
            None if QUOTES.contains(&ch) => quote = Some(ch),
            None if ch.is_whitespace() => return length,
            _ => {}
        }
        length += 1;
    }
    length
}

/// Splits a command line into the executable, without quotes, and the untouched arguments.
pub fn split_command_line(command_line: &str) -> (String, String) {
    let command_line = command_line.trim();
    let length = determine_executable_length(command_line);
    let boundary = command_line
        .char_indices()
        .nth(length)
        .map_or(command_line.len(), |(pos, _)| pos);
    let (executable, arguments) = command_line.split_at(boundary);
    (
        executable.trim_matches(&QUOTES[..]).to_string(),
        arguments.trim_start().to_string(),
    )
}

/// Builds the descriptor for `template` applied to the clicked `path`.
///
/// Looks at the file system to decide whether `path` is a directory.
pub fn build(template: &ToolTemplate, path: &str) -> InvocationDescriptor {
    let is_directory = Path::new(path.trim()).is_dir();
    build_with_context(template, &PlaceholderContext::new(path, is_directory))
}

pub fn build_with_context(
    template: &ToolTemplate,
    context: &PlaceholderContext,
) -> InvocationDescriptor {
    let command_line = placeholder::substitute(&template.command_line, context);
    let (executable, arguments) = split_command_line(&command_line);
    InvocationDescriptor {
        executable,
        arguments,
        elevated: template.run_elevated,
        window: template.window,
    }
}

/// Starts processes described by an [`InvocationDescriptor`].
pub trait ProcessLauncher {
    /// An empty executable is a no-op.
    fn launch(&self, descriptor: &InvocationDescriptor) -> Result<()>;
}

/// Launcher backed by the operating system. The started process is not waited for.
#[derive(Debug, Default)]
pub struct SystemLauncher;

#[cfg(windows)]
impl ProcessLauncher for SystemLauncher {
    fn launch(&self, descriptor: &InvocationDescriptor) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use windows_sys::Win32::UI::Shell::ShellExecuteW;
        use windows_sys::Win32::UI::WindowsAndMessaging::{SW_HIDE, SW_SHOWNORMAL};

        if descriptor.executable.is_empty() {
            return Ok(());
        }

        fn wide(s: &str) -> Vec<u16> {
            OsStr::new(s).encode_wide().chain(Some(0)).collect()
        }

        let verb = wide(if descriptor.elevated { "runas" } else { "open" });
        let file = wide(&descriptor.executable);
        let parameters = wide(&descriptor.arguments);
        let show = match descriptor.window {
            WindowStyle::Normal => SW_SHOWNORMAL,
            WindowStyle::Hidden => SW_HIDE,
        };
        tracing::debug!(?descriptor, "ShellExecuteW");
        // SAFETY: all strings are NUL-terminated and outlive the call.
        let instance = unsafe {
            ShellExecuteW(
                0,
                verb.as_ptr(),
                file.as_ptr(),
                parameters.as_ptr(),
                std::ptr::null(),
                show,
            )
        };
        // Values up to 32 are error codes.
        if instance <= 32 {
            anyhow::bail!(
                "can't start {} (ShellExecute error {})",
                descriptor.executable,
                instance
            );
        }
        Ok(())
    }
}

#[cfg(not(windows))]
impl ProcessLauncher for SystemLauncher {
    fn launch(&self, descriptor: &InvocationDescriptor) -> Result<()> {
        use anyhow::Context;
        use std::process::{Command, Stdio};

        if descriptor.executable.is_empty() {
            return Ok(());
        }
        if descriptor.elevated {
            anyhow::bail!("elevation is not supported on this platform");
        }
        let args = shlex::split(&descriptor.arguments)
            .with_context(|| format!("unbalanced quotes in arguments: {}", descriptor.arguments))?;
        let mut command = Command::new(&descriptor.executable);
        command.args(args);
        if descriptor.window == WindowStyle::Hidden {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }
        tracing::debug!(?descriptor, "spawning");
        command
            .spawn()
            .with_context(|| format!("can't start {}", descriptor.executable))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tool(command_line: &str) -> ToolTemplate {
        ToolTemplate::new(command_line, false)
    }

    #[test]
    fn executable_length() {
        assert_eq!(determine_executable_length(""), 0);
        assert_eq!(determine_executable_length("explorer.exe"), 12);
        assert_eq!(determine_executable_length("'explorer.exe'"), 14);
        assert_eq!(determine_executable_length(r#""explorer.exe""#), 14);
        assert_eq!(determine_executable_length(r#""ex plorer.exe""#), 15);
        assert_eq!(determine_executable_length(r#""ex'plorer.exe""#), 15);
        assert_eq!(determine_executable_length(r#"'ex"plorer.exe'"#), 15);
        assert_eq!(determine_executable_length("explorer.exe "), 12);
        assert_eq!(determine_executable_length("explorer.exe param1"), 12);
    }

    #[test]
    fn closing_quote_ends_executable_even_without_whitespace() {
        assert_eq!(determine_executable_length(r#""tool"arg"#), 6);
        assert_eq!(
            split_command_line(r#""tool"arg"#),
            ("tool".to_string(), "arg".to_string())
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(determine_executable_length("wörk.exe x"), 8);
        assert_eq!(
            split_command_line("wörk.exe x"),
            ("wörk.exe".to_string(), "x".to_string())
        );
    }

    #[test]
    fn splits_quoted_executable() {
        assert_eq!(
            split_command_line(r#""tool.exe" "param 1""#),
            ("tool.exe".to_string(), r#""param 1""#.to_string())
        );
        assert_eq!(
            split_command_line(r#""tool.exe""#),
            ("tool.exe".to_string(), String::new())
        );
        assert_eq!(
            split_command_line(r#"  "to ol.exe"  "#),
            ("to ol.exe".to_string(), String::new())
        );
        assert_eq!(split_command_line(""), (String::new(), String::new()));
    }

    #[test]
    fn arguments_keep_inner_spacing() {
        assert_eq!(
            split_command_line("cmd.exe   /k  \"cd /d C:\\\"").1,
            "/k  \"cd /d C:\\\""
        );
    }

    #[test]
    fn elevation_follows_template() {
        let res = build(&ToolTemplate::new("explorer.exe", false), r"D:\Test.txt");
        assert!(!res.elevated);
        let res = build(&ToolTemplate::new("explorer.exe", true), r"D:\Test.txt");
        assert!(res.elevated);
        assert_eq!(res.window, WindowStyle::Normal);
    }

    #[test]
    fn window_follows_template() {
        let template = ToolTemplate {
            window: WindowStyle::Hidden,
            ..tool(r#"robocopy.exe "{P}" "D:ackup""#)
        };
        let res = build_with_context(&template, &PlaceholderContext::new(r"C:\data", true));
        assert_eq!(res.window, WindowStyle::Hidden);
        assert_eq!(res.arguments, r#""C:\data" "D:ackup""#);
    }

    #[test]
    fn replaces_full_path() {
        let template = tool(r#"tool.exe "{P}" "{p}""#);

        let res = build(&template, r"C:\Windows\win.ini");
        assert_eq!(res.executable, "tool.exe");
        assert_eq!(res.arguments, r#""C:\Windows\win.ini" "C:\Windows\win.ini""#);

        let res = build_with_context(&template, &PlaceholderContext::new(r"C:\Windows", true));
        assert_eq!(res.executable, "tool.exe");
        assert_eq!(res.arguments, r#""C:\Windows\" "C:\Windows\""#);
    }

    #[test]
    fn replaces_directory_only() {
        let template = tool(r#"tool.exe "{D}" "{d}""#);

        let res = build(&template, r"C:\Windows\win.ini");
        assert_eq!(res.arguments, r#""C:\Windows\" "C:\Windows\""#);

        let res = build_with_context(&template, &PlaceholderContext::new(r"C:\Windows", true));
        assert_eq!(res.arguments, r#""C:\Windows\" "C:\Windows\""#);
    }

    #[test]
    fn replaces_file_only() {
        let template = tool(r#"tool.exe "{F}" "{f}""#);

        let res = build(&template, r"C:\Windows\win.ini");
        assert_eq!(res.arguments, r#""win.ini" "win.ini""#);

        for dir in [r"C:\Windows", r"C:\Windows\"] {
            let res = build_with_context(&template, &PlaceholderContext::new(dir, true));
            assert_eq!(res.executable, "tool.exe");
            assert_eq!(res.arguments, r#""" """#);
        }
    }

    #[test]
    fn placeholder_as_executable() {
        let res = build(&tool("{P}"), r"C:\Windows\writer.exe");
        assert_eq!(res.executable, r"C:\Windows\writer.exe");
        assert_eq!(res.arguments, "");

        let res = build(&tool(""), r"C:\Windows\win.ini");
        assert_eq!(res, InvocationDescriptor::default());
    }

    #[test]
    fn real_directory_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().to_string();
        let res = build(&tool("tool {D}|{F}"), &path);
        assert_eq!(res.arguments, format!("{}|", crate::paths::include_trailing_separator(&path)));
    }

    #[test]
    fn empty_executable_is_not_launched() {
        assert!(SystemLauncher.launch(&InvocationDescriptor::default()).is_ok());
    }
}
