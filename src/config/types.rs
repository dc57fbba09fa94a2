//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::folder_io::{BackupOptions, ExistingPolicy};

use super::paths;

/// How much the `trees` binary logs. Each step also enables everything
/// the steps before it show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Failures only.
    Quiet,
    /// One line per finished command (backup summary, deleted tree).
    #[default]
    Normal,
    /// Per-operation detail: listings, skipped lock files, copied leaves.
    Info,
    /// Everything, including theme file fallbacks.
    Debug,
}

/// Accepted spellings, matched without regard to ASCII case.
const LEVEL_NAMES: &[(&str, LogLevel)] = &[
    ("quiet", LogLevel::Quiet),
    ("error", LogLevel::Quiet),
    ("none", LogLevel::Quiet),
    ("normal", LogLevel::Normal),
    ("info", LogLevel::Info),
    ("verbose", LogLevel::Info),
    ("detailed", LogLevel::Info),
    ("debug", LogLevel::Debug),
    ("trace", LogLevel::Debug),
];

impl LogLevel {
    /// Look up a level by name or alias; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        LEVEL_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, lvl)| lvl)
    }

    /// Canonical name, the one written to config templates.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = LEVEL_NAMES.iter().map(|(name, _)| *name).collect();
            format!("invalid log level '{s}' (expected one of: {})", known.join(", "))
        })
    }
}

/// Runtime configuration for the trees CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding every tree
    pub base_dir: PathBuf,
    /// Destination for `backup`
    pub backup_dir: PathBuf,
    /// File whose first line is the theme status
    pub theme_file: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Leave existing backup files alone instead of failing
    pub backup_skip_existing: bool,
    /// Copy file times into the backup
    pub backup_preserve_times: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: paths::default_base_dir(),
            backup_dir: paths::default_backup_dir(),
            theme_file: paths::default_theme_file(),
            log_level: LogLevel::Normal,
            log_file: None,
            backup_skip_existing: false,
            backup_preserve_times: true,
        }
    }
}

impl Config {
    /// Construct a Config rooted at `base_dir`; other fields use defaults.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    /// Backup options implied by this config.
    pub fn backup_options(&self, recursive: bool) -> BackupOptions {
        BackupOptions {
            recursive,
            on_existing: if self.backup_skip_existing {
                ExistingPolicy::Skip
            } else {
                ExistingPolicy::Fail
            },
            preserve_times: self.backup_preserve_times,
        }
    }
}
