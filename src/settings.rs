use crate::paths::{CopyEmailFormat, CopyFileFormat};
use crate::tools::ToolTemplate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the location of the settings file.
pub const SETTINGS_ENV_VAR: &str = "GENIE_SETTINGS";

/// User configuration read by the helper.
///
/// Every field is optional in the file, missing ones take their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub copy_file_format: CopyFileFormat,
    pub copy_file_only_filename: bool,
    pub copy_email_format: CopyEmailFormat,
    pub custom_goto_tools: Vec<ToolTemplate>,
}

impl Settings {
    /// Reads the settings file, falling back to defaults.
    ///
    /// A missing file is normal. A broken one is reported, but the helper keeps working.
    pub fn load_or_default(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "can't read settings");
                return Self::default();
            }
        };
        match toml::from_str(&text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed settings");
                Self::default()
            }
        }
    }

    /// `$GENIE_SETTINGS`, else `settings.toml` in the user's configuration directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(SETTINGS_ENV_VAR) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ExplorerGenie")
            .join("settings.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::WindowStyle;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::sync::Mutex;

    /// Held by every test that touches [`SETTINGS_ENV_VAR`].
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("nope.toml"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.copy_email_format, CopyEmailFormat::Outlook);
    }

    #[test]
    fn reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            r#"
copy_file_format = "uri"

[[custom_goto_tools]]
menu_title = "Notepad"
command_line = 'notepad.exe "{P}"'

[[custom_goto_tools]]
command_line = "regedit.exe"
run_elevated = true

[[custom_goto_tools]]
command_line = 'robocopy.exe "{P}" "D:\backup"'
window = "hidden"
"#,
        )
        .unwrap();

        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.copy_file_format, CopyFileFormat::Uri);
        assert!(!settings.copy_file_only_filename);
        assert_eq!(
            settings.custom_goto_tools,
            vec![
                ToolTemplate {
                    menu_title: "Notepad".to_string(),
                    command_line: r#"notepad.exe "{P}""#.to_string(),
                    ..ToolTemplate::default()
                },
                ToolTemplate::new("regedit.exe", true),
                ToolTemplate {
                    window: WindowStyle::Hidden,
                    ..ToolTemplate::new(r#"robocopy.exe "{P}" "D:\backup""#, false)
                },
            ]
        );
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "copy_file_format = 42").unwrap();
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn serializes_back() {
        let settings = Settings {
            copy_file_format: CopyFileFormat::C,
            ..Settings::default()
        };
        let text = toml::to_string(&settings).unwrap();
        assert!(text.contains(r#"copy_file_format = "c""#), "{text}");
    }

    #[test]
    fn default_path_honours_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let previous = std::env::var_os(SETTINGS_ENV_VAR);

        // SAFETY: the variable is only accessed by tests holding ENV_LOCK.
        unsafe { std::env::set_var(SETTINGS_ENV_VAR, &path) };
        let overridden = Settings::default_path();
        unsafe { std::env::remove_var(SETTINGS_ENV_VAR) };
        let fallback = Settings::default_path();
        if let Some(previous) = previous {
            unsafe { std::env::set_var(SETTINGS_ENV_VAR, previous) };
        }

        assert_eq!(overridden, path);
        assert!(
            fallback.ends_with(Path::new("ExplorerGenie").join("settings.toml")),
            "{}",
            fallback.display()
        );
    }
}
