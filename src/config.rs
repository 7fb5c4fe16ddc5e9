use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::editor::DEFAULT_TAB_STOP;

/// Default number of extra Ctrl-Q presses needed to quit with unsaved changes.
pub const DEFAULT_QUIT_TIMES: usize = 3;
/// Default lifetime of a status message.
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Flags as they appear on the command line or in a config file.
///
/// Every field is optional so that layers can be merged with
/// [`ConfigFlags::union`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub tab_stop: Option<usize>,
    pub quit_times: Option<usize>,
    pub message_timeout: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub perf: bool,
}

impl ConfigFlags {
    /// Merge two layers; values set in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            tab_stop: other.tab_stop.or(self.tab_stop),
            quit_times: other.quit_times.or(self.quit_times),
            message_timeout: other.message_timeout.or(self.message_timeout),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
            perf: self.perf || other.perf,
        }
    }
}

/// Resolved editor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub tab_stop: usize,
    pub quit_times: usize,
    pub message_timeout: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: DEFAULT_QUIT_TIMES,
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
        }
    }
}

impl EditorOptions {
    /// Fill in defaults for anything the flags leave unset.
    pub fn from_flags(flags: &ConfigFlags) -> Self {
        let defaults = Self::default();
        Self {
            tab_stop: flags.tab_stop.filter(|&n| n > 0).unwrap_or(defaults.tab_stop),
            quit_times: flags.quit_times.unwrap_or(defaults.quit_times),
            message_timeout: flags
                .message_timeout
                .map_or(defaults.message_timeout, Duration::from_secs),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("ctek").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("ctek")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("ctek").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("ctek").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".ctekrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# ctek defaults (saved with --save)".to_string()];
    if let Some(n) = flags.tab_stop {
        lines.push(format!("--tab-stop {n}"));
    }
    if let Some(n) = flags.quit_times {
        lines.push(format!("--quit-times {n}"));
    }
    if let Some(secs) = flags.message_timeout {
        lines.push(format!("--message-timeout {secs}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list. Unknown tokens (including the
/// program name and file argument) are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        if name == "--perf" && inline.is_none() {
            flags.perf = true;
            i += 1;
            continue;
        }
        if !matches!(
            name,
            "--tab-stop" | "--quit-times" | "--message-timeout" | "--log-file"
        ) {
            i += 1;
            continue;
        }
        let value = match inline {
            Some(value) => Some(value),
            None => {
                i += 1;
                tokens.get(i).map(String::as_str)
            }
        };
        if let Some(value) = value {
            match name {
                "--tab-stop" => flags.tab_stop = parse_number(name, value),
                "--quit-times" => flags.quit_times = parse_number(name, value),
                "--message-timeout" => flags.message_timeout = parse_number(name, value),
                _ => flags.log_file = Some(PathBuf::from(value)),
            }
        }
        i += 1;
    }
    flags
}

fn parse_number<T: FromStr>(flag: &str, value: &str) -> Option<T> {
    let parsed = value.parse().ok();
    if parsed.is_none() {
        tracing::warn!(flag, value, "ignoring invalid number");
    }
    parsed
}
