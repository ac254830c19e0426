use crate::action::Action;
use crate::clipboard::Clipboard;
use crate::external::{self, ProcessLauncher};
use crate::paths;
use crate::settings::Settings;
use crate::tools;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Line separator between paths placed in the clipboard.
const CLIPBOARD_SEPARATOR: &str = "\r\n";

/// Collaborators an action may use.
pub struct Context<'a> {
    pub settings: &'a Settings,
    pub clipboard: &'a dyn Clipboard,
    pub launcher: &'a dyn ProcessLauncher,
}

/// One menu action, executed once for the paths of a single invocation.
pub trait CmdAction {
    fn name(&self) -> &'static str;

    fn execute(self: Box<Self>, selection: Vec<String>, ctx: &Context<'_>) -> Result<()>;
}

/// Creates the action object for a parsed keyword.
pub fn create(action: Action) -> Box<dyn CmdAction> {
    match action {
        Action::CopyFile => Box::new(CopyFile),
        Action::CopyEmail => Box::new(CopyEmail),
        Action::GotoTool { custom, index } => Box::new(GotoTool { custom, index }),
        Action::NewFolder => Box::new(RequiresUi("new folder")),
        Action::NewSymbolicLink => Box::new(RequiresUi("new symbolic link")),
        Action::NewSymbolicLinkElevated => Box::new(NewSymbolicLinkElevated),
    }
}

fn is_directory(path: &str) -> bool {
    Path::new(path).is_dir()
}

/// Copies the paths, formatted per settings, one per line.
pub struct CopyFile;

impl CmdAction for CopyFile {
    fn name(&self) -> &'static str {
        "copy file"
    }

    fn execute(self: Box<Self>, mut selection: Vec<String>, ctx: &Context<'_>) -> Result<()> {
        paths::sort_filenames(&mut selection, is_directory);
        let format = ctx.settings.copy_file_format;
        let lines: Vec<String> = selection
            .iter()
            .map(|p| format.apply(p))
            .map(|p| {
                if ctx.settings.copy_file_only_filename {
                    paths::file_name(paths::exclude_trailing_separator(&p)).to_string()
                } else {
                    p
                }
            })
            .collect();
        ctx.clipboard.set_text(&lines.join(CLIPBOARD_SEPARATOR))
    }
}

/// Copies the paths as links an email client understands.
pub struct CopyEmail;

impl CmdAction for CopyEmail {
    fn name(&self) -> &'static str {
        "copy email"
    }

    fn execute(self: Box<Self>, mut selection: Vec<String>, ctx: &Context<'_>) -> Result<()> {
        paths::sort_filenames(&mut selection, is_directory);
        let format = ctx.settings.copy_email_format;
        let lines: Vec<String> = selection.iter().map(|p| format.apply(p)).collect();
        ctx.clipboard.set_text(&lines.join(CLIPBOARD_SEPARATOR))
    }
}

/// Opens a tool at the first selected path.
pub struct GotoTool {
    pub custom: bool,
    pub index: usize,
}

impl CmdAction for GotoTool {
    fn name(&self) -> &'static str {
        "goto tool"
    }

    fn execute(self: Box<Self>, mut selection: Vec<String>, ctx: &Context<'_>) -> Result<()> {
        paths::sort_filenames(&mut selection, is_directory);
        let Some(path) = selection.first().filter(|p| !p.is_empty()) else {
            return Ok(());
        };

        let template = if self.custom {
            ctx.settings
                .custom_goto_tools
                .get(self.index)
                .cloned()
                .with_context(|| format!("no custom tool with index {}", self.index))?
        } else {
            match tools::predefined_tool(self.index, is_directory(path)) {
                Some(template) => template,
                None => {
                    tracing::debug!(index = self.index, "unknown predefined tool");
                    return Ok(());
                }
            }
        };

        let descriptor = external::build(&template, path);
        ctx.launcher.launch(&descriptor)
    }
}

/// Actions that need a dialog to ask the user for input.
pub struct RequiresUi(&'static str);

impl CmdAction for RequiresUi {
    fn name(&self) -> &'static str {
        self.0
    }

    fn execute(self: Box<Self>, _selection: Vec<String>, _ctx: &Context<'_>) -> Result<()> {
        tracing::info!(action = self.0, "action needs an interactive dialog, nothing to do");
        Ok(())
    }
}

/// Creates a directory link inside the clicked directory, pointing at the chosen target.
///
/// Expects exactly `[clicked_directory, target_directory]`.
pub struct NewSymbolicLinkElevated;

impl CmdAction for NewSymbolicLinkElevated {
    fn name(&self) -> &'static str {
        "new symbolic link"
    }

    fn execute(self: Box<Self>, selection: Vec<String>, _ctx: &Context<'_>) -> Result<()> {
        let [clicked, target] = &selection[..] else {
            tracing::debug!(count = selection.len(), "symbolic link needs exactly two paths");
            return Ok(());
        };
        let name = paths::file_name(paths::exclude_trailing_separator(target));
        let link = paths::join_path(clicked, name);
        symlink_dir(target, &link)
            .with_context(|| format!("can't create symbolic link {link} -> {target}"))
    }
}

#[cfg(windows)]
fn symlink_dir(target: &str, link: &str) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

#[cfg(unix)]
fn symlink_dir(target: &str, link: &str) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}
