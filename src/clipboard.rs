use anyhow::{Context, Result, bail};
use std::io::Write;
use std::process::{Command, Stdio};

/// Destination of the copy actions.
pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// A command line tool reading the new clipboard content from stdin.
struct CopyTool {
    program: &'static str,
    args: &'static [&'static str],
}

#[cfg(windows)]
const COPY_TOOLS: &[CopyTool] = &[CopyTool {
    program: "clip",
    args: &[],
}];

#[cfg(target_os = "macos")]
const COPY_TOOLS: &[CopyTool] = &[CopyTool {
    program: "pbcopy",
    args: &[],
}];

/// Wayland first, then the X11 tools.
#[cfg(not(any(windows, target_os = "macos")))]
const COPY_TOOLS: &[CopyTool] = &[
    CopyTool {
        program: "wl-copy",
        args: &[],
    },
    CopyTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    CopyTool {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
];

/// Writes to the system clipboard through the platform's command line tools.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        pipe_to_first(COPY_TOOLS, text)
    }
}

/// Tries the tools in order until one accepts the text. Fails with the last tool's error.
fn pipe_to_first(tools: &[CopyTool], text: &str) -> Result<()> {
    let mut last_error = None;
    for tool in tools {
        match pipe_to(tool, text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!(program = tool.program, error = %e, "clipboard tool failed");
                last_error = Some(e);
            }
        }
    }
    match last_error {
        Some(e) => Err(e.context("no clipboard tool accepted the text")),
        None => bail!("no clipboard tool known for this platform"),
    }
}

fn pipe_to(tool: &CopyTool, text: &str) -> Result<()> {
    let mut child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("can't start {}", tool.program))?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .with_context(|| format!("can't write to {}", tool.program))?;
    }
    let status = child
        .wait()
        .with_context(|| format!("{} did not finish", tool.program))?;
    if !status.success() {
        bail!("{} exited with {status}", tool.program);
    }
    Ok(())
}
