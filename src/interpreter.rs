use crate::action::Action;
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::command::{self, Context};
use crate::env::Environment;
use crate::external::{ProcessLauncher, SystemLauncher};
use crate::invocation::{self, InvocationArgs};
use crate::settings::Settings;
use anyhow::Result;

/// Dispatches one decoded command line to its action.
///
/// Settings, clipboard and launcher are injected so the dispatch can run without touching
/// the real system. See [`Default`] for the system-backed setup.
///
/// Example
/// ```
/// use genie_cmd::Interpreter;
/// let sh = Interpreter::default();
/// // Unknown action: nothing happens.
/// sh.run_command_line(r#"-Nothing "C:\" "a.txt""#, "").unwrap();
/// ```
pub struct Interpreter {
    settings: Settings,
    clipboard: Box<dyn Clipboard>,
    launcher: Box<dyn ProcessLauncher>,
}

impl Interpreter {
    pub fn new(
        settings: Settings,
        clipboard: Box<dyn Clipboard>,
        launcher: Box<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            settings,
            clipboard,
            launcher,
        }
    }

    /// Decodes `raw` and runs the action it names.
    pub fn run_command_line(&self, raw: &str, own_executable: &str) -> Result<()> {
        self.run(invocation::decode(raw, own_executable))
    }

    /// Decodes the process command line and runs its action on absolute paths.
    pub fn run_environment(&self, env: &Environment) -> Result<()> {
        let mut args = env.command_line.decode(&env.own_executable);
        args.paths = args.paths.iter().map(|p| env.absolute(p)).collect();
        self.run(args)
    }

    /// Runs the action on the paths. Missing action or paths is a no-op.
    pub fn run(&self, args: InvocationArgs) -> Result<()> {
        if args.is_noop() {
            tracing::debug!(?args, "nothing to do");
            return Ok(());
        }
        let Some(keyword) = args.action else {
            return Ok(());
        };
        let Some(action) = Action::parse(&keyword)? else {
            tracing::debug!(%keyword, "unknown action");
            return Ok(());
        };

        let cmd = command::create(action);
        tracing::info!(action = cmd.name(), paths = args.paths.len(), "executing");
        let ctx = Context {
            settings: &self.settings,
            clipboard: self.clipboard.as_ref(),
            launcher: self.launcher.as_ref(),
        };
        cmd.execute(args.paths, &ctx)
    }
}

impl Default for Interpreter {
    /// Settings from the default location, the system clipboard and launcher.
    fn default() -> Self {
        Self::new(
            Settings::load_or_default(&Settings::default_path()),
            Box::new(SystemClipboard),
            Box::new(SystemLauncher),
        )
    }
}
