//! Typed error definitions for trees.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! Filesystem failures keep the original `io::Error` as their source so callers
//! can still match on `io::ErrorKind` (see [`TreesError::io_kind`]).

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Library-wide result alias.
pub type Result<T, E = TreesError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TreesError {
    #[error("Source directory does not exist or could not be found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("{op} '{}': {source}{}", .path.display(), hint(.source))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Theme status must be a single line: {0:?}")]
    InvalidStatus(String),

    #[error("Invalid {kind} name {name:?}: must be a single path component")]
    InvalidName { kind: &'static str, name: String },
}

impl TreesError {
    /// Stable short code, used as a structured field in logs.
    pub fn code(&self) -> &'static str {
        match self {
            TreesError::SourceNotFound(_) => "source_not_found",
            TreesError::Io { .. } => "io",
            TreesError::InvalidStatus(_) => "invalid_status",
            TreesError::InvalidName { .. } => "invalid_name",
        }
    }

    /// Kind of the wrapped I/O error, if this is a filesystem failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            TreesError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Adapter for `.map_err(...)`: wraps an io::Error with the operation and path.
///
/// Usage:
///   fs::create_dir_all(dir).map_err(io_error_with_help("create tree", dir))?;
pub(crate) fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> TreesError + 'a {
    move |source: io::Error| TreesError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

/// Platform-aware hint appended to the error message, plus the raw OS code.
fn hint(e: &io::Error) -> String {
    let mut msg = String::new();

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" (permission denied; check ownership and permissions)");
                }
                libc::ENOENT => msg.push_str(" (path not found; verify it exists)"),
                libc::EEXIST => {
                    msg.push_str(" (already exists; remove the target or skip existing files)");
                }
                libc::ENOTEMPTY => msg.push_str(" (directory not empty)"),
                libc::ENOTDIR => msg.push_str(" (a path component is not a directory)"),
                libc::EBUSY => msg.push_str(" (resource busy; is a document still open?)"),
                libc::ENOSPC => msg.push_str(" (insufficient space on device)"),
                libc::EROFS => msg.push_str(" (read-only filesystem)"),
                libc::ENAMETOOLONG => msg.push_str(" (file name or path too long)"),
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" (access denied; check permissions)"), // ERROR_ACCESS_DENIED
                2 | 3 => msg.push_str(" (path not found; verify it exists)"),
                32 => msg.push_str(" (sharing violation; is a document still open?)"),
                80 | 183 => {
                    msg.push_str(" (already exists; remove the target or skip existing files)");
                }
                112 => msg.push_str(" (insufficient disk space)"),
                206 => msg.push_str(" (file name or path too long)"),
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => msg.push_str(" (permission denied)"),
            io::ErrorKind::NotFound => msg.push_str(" (path not found; verify it exists)"),
            io::ErrorKind::AlreadyExists => msg.push_str(" (already exists)"),
            _ => {}
        }
    }

    msg
}
