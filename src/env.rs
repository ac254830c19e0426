use crate::invocation::{self, InvocationArgs};
use crate::paths;
use std::env as stdenv;
use std::path::{Path, PathBuf};

/// The command line as the platform hands it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// Verbatim line, tokenized by [`invocation::decode`].
    Raw(String),
    /// Arguments the host already split, own executable excluded.
    Split(Vec<String>),
}

impl CommandLine {
    pub fn decode(&self, own_executable: &str) -> InvocationArgs {
        match self {
            CommandLine::Raw(raw) => invocation::decode(raw, own_executable),
            CommandLine::Split(args) => {
                invocation::decode_tokens(args.iter().cloned(), own_executable)
            }
        }
    }
}

/// What the helper needs to know about how it was started.
#[derive(Debug, Clone)]
pub struct Environment {
    pub command_line: CommandLine,
    /// Path of the running helper, used to recognize itself on the command line.
    pub own_executable: String,
    /// Relative paths on the command line are resolved against this directory.
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state.
    pub fn capture() -> Self {
        let own_executable = stdenv::current_exe()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            command_line: command_line(),
            own_executable,
            current_dir,
        }
    }

    /// Makes `path` absolute against [`Environment::current_dir`].
    pub fn absolute(&self, path: &str) -> String {
        if path.starts_with(paths::is_separator) || Path::new(path).is_absolute() {
            path.to_string()
        } else {
            self.current_dir.join(path).to_string_lossy().into_owned()
        }
    }
}

/// The verbatim command line. The std argument splitter can't be used, it treats the `\"` in
/// `"D:\"` as an escaped quote.
#[cfg(windows)]
fn command_line() -> CommandLine {
    use windows_sys::Win32::System::Environment::GetCommandLineW;

    // SAFETY: GetCommandLineW returns a NUL-terminated string owned by the process,
    // valid for its whole lifetime.
    let raw = unsafe {
        let start = GetCommandLineW();
        if start.is_null() {
            return CommandLine::Raw(String::new());
        }
        let mut len = 0;
        while *start.add(len) != 0 {
            len += 1;
        }
        String::from_utf16_lossy(std::slice::from_raw_parts(start, len))
    };
    CommandLine::Raw(raw)
}

/// The arguments as split by the shell. Re-joining them would lose quotes inside file names.
#[cfg(not(windows))]
fn command_line() -> CommandLine {
    split_arguments(stdenv::args_os().map(|a| a.to_string_lossy().into_owned()))
}

/// Drops `argv[0]`. It is whatever the caller typed, not necessarily the canonical path of
/// the running executable, so it can't be matched against [`Environment::own_executable`].
#[cfg(not(windows))]
fn split_arguments(args: impl IntoIterator<Item = String>) -> CommandLine {
    CommandLine::Split(args.into_iter().skip(1).collect())
}
