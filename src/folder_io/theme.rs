//! Theme status marker: a single line stored at the top of a text file.

use std::fs;
use std::path::Path;
use tracing::{debug, trace};

use crate::errors::{Result, TreesError, io_error_with_help};

/// Status reported whenever the marker file cannot supply one.
pub const DEFAULT_THEME_STATUS: &str = "green";

/// First line of the status file, or [`DEFAULT_THEME_STATUS`].
///
/// Never fails: a missing file, a read error, non-UTF-8 content or an empty
/// file all map to the default. A leading byte-order mark is dropped.
pub fn get_theme_status(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => match content.lines().next() {
            Some(first) => first.trim_start_matches('\u{feff}').to_string(),
            None => {
                trace!(path = %path.display(), "Theme file empty; using default");
                DEFAULT_THEME_STATUS.to_string()
            }
        },
        Err(e) => {
            trace!(path = %path.display(), error = %e, "Theme file unreadable; using default");
            DEFAULT_THEME_STATUS.to_string()
        }
    }
}

/// Replace the status file with `status` on its first (and only) line.
pub fn set_theme_status(path: impl AsRef<Path>, status: &str) -> Result<()> {
    let path = path.as_ref();
    if status.contains(['\n', '\r']) {
        return Err(TreesError::InvalidStatus(status.to_string()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error_with_help("create theme directory", parent))?;
    }
    fs::write(path, format!("{status}\n")).map_err(io_error_with_help("write theme status", path))?;
    debug!(path = %path.display(), status, "Theme status updated");
    Ok(())
}
