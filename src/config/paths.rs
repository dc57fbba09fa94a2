//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/data paths and detects symlinked ancestors for safety.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TREES_CONFIG";

const APP_DIR: &str = "trees";

fn app_config_dir() -> Option<PathBuf> {
    config_dir()
        .or_else(|| env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .map(|base| base.join(APP_DIR))
}

fn app_data_dir() -> Option<PathBuf> {
    data_dir()
        .or_else(|| {
            env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
        })
        .map(|base| base.join(APP_DIR))
}

/// Config file location: `$TREES_CONFIG` if set, else `<config_dir>/trees/config.xml`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    app_config_dir()
        .map(|d| d.join("config.xml"))
        .ok_or_else(|| anyhow!("could not determine a config directory (no HOME?)"))
}

/// Where trees live unless configured otherwise.
pub fn default_base_dir() -> PathBuf {
    app_data_dir()
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
        .join("trees")
}

/// Where backups go unless configured otherwise.
pub fn default_backup_dir() -> PathBuf {
    app_data_dir()
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
        .join("backup")
}

/// Theme status file unless configured otherwise.
pub fn default_theme_file() -> PathBuf {
    app_config_dir()
        .unwrap_or_else(|| PathBuf::from(APP_DIR))
        .join("theme.txt")
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
