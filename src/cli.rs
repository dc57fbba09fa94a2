//! CLI definition and parsing.
//! Defines Args (global flags + subcommands) and provides parse().
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug and wins over it.
//! - Tree and leaf arguments are names, resolved against the base directory.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Manage trees (folders) of leaves (documents) and back them up.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Manage folders of documents and back them up")]
pub struct Args {
    /// Override the directory holding every tree.
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub base_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location used by trees and exit.
    #[arg(long)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List trees under the base directory.
    ListTrees {
        /// Print full paths instead of names.
        #[arg(long)]
        paths: bool,
    },
    /// List leaves in a tree (editor lock files are hidden).
    ListLeaves {
        tree: String,
        /// Strip the document extension from each name.
        #[arg(long)]
        no_extension: bool,
    },
    /// Create a tree (no-op if it exists).
    CreateTree { tree: String },
    /// Delete a tree and everything in it.
    DeleteTree { tree: String },
    /// Delete one leaf; LEAF is given without its extension.
    DeleteLeaf { tree: String, leaf: String },
    /// Copy the base directory into the backup directory.
    Backup {
        /// Backup destination (overrides config).
        #[arg(long, value_hint = ValueHint::DirPath)]
        dest: Option<PathBuf>,
        /// Copy only top-level files.
        #[arg(long)]
        no_recurse: bool,
        /// Keep existing files in the destination instead of failing.
        #[arg(long)]
        skip_existing: bool,
    },
    /// Print the theme status, or set it with --set.
    Theme {
        #[arg(long, value_name = "STATUS")]
        set: Option<String>,
    },
    /// Write a template config file at the config location.
    InitConfig,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(base) = &self.base_dir {
            cfg.base_dir = base.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(Command::Backup {
            dest,
            skip_existing,
            ..
        }) = &self.command
        {
            if let Some(d) = dest {
                cfg.backup_dir = d.clone();
            }
            if *skip_existing {
                cfg.backup_skip_existing = true;
            }
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
