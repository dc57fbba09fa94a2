//! Tree backup: copy a source directory into a destination, optionally recursing.
//!
//! Traversal is depth-first and pre-order with an owned stack (walkdir): each
//! directory is created, its own files are copied, then its subdirectories are
//! visited. Files are never overwritten; what happens on a name clash is decided
//! by [`ExistingPolicy`].
//!
//! Symlinks are followed: a linked folder is backed up as a real folder. A
//! dangling link has nothing to copy and is counted in
//! [`BackupReport::broken_links`]; a link back to one of its own ancestors
//! fails the run.

use filetime::{FileTime, set_file_times};
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{Result, TreesError, io_error_with_help};

use super::io_copy::copy_no_clobber;

/// What to do when a destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingPolicy {
    /// Abort the backup with an `AlreadyExists` error.
    #[default]
    Fail,
    /// Leave the existing file alone and keep going.
    Skip,
}

/// Knobs for [`backup_trees_with`].
#[derive(Debug, Clone)]
pub struct BackupOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    pub on_existing: ExistingPolicy,
    /// Copy access/modification times onto each copied file (best-effort).
    pub preserve_times: bool,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            on_existing: ExistingPolicy::Fail,
            preserve_times: true,
        }
    }
}

/// Counts gathered during a backup run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackupReport {
    pub files_copied: u64,
    pub files_skipped: u64,
    pub dirs_created: u64,
    pub bytes: u64,
    /// Symlinks whose target does not exist.
    pub broken_links: u64,
}

/// Back up `source` into `dest`. Existing destination files make the run fail.
pub fn backup_trees(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    recursive: bool,
) -> Result<BackupReport> {
    let opts = BackupOptions {
        recursive,
        ..BackupOptions::default()
    };
    backup_trees_with(source, dest, &opts)
}

// Files before directories, then by name, so a directory's own files are
// copied before any of its subdirectories are entered.
// Entries reach the sorter before links are followed, so links are resolved here.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    dir_like(a)
        .cmp(&dir_like(b))
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn dir_like(e: &DirEntry) -> bool {
    e.file_type().is_dir() || (e.path_is_symlink() && e.path().is_dir())
}

/// True for a symlink whose target cannot be resolved.
fn is_broken_link(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
        && fs::metadata(path).is_err()
}

/// Back up `source` into `dest` according to `opts`.
pub fn backup_trees_with(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    opts: &BackupOptions,
) -> Result<BackupReport> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    if !source.is_dir() {
        return Err(TreesError::SourceNotFound(source.to_path_buf()));
    }

    let mut report = BackupReport::default();
    if !dest.is_dir() {
        fs::create_dir_all(dest).map_err(io_error_with_help("create backup directory", dest))?;
        report.dirs_created += 1;
    }

    // Walk canonical paths so a destination nested inside the source can be
    // recognized and left out of the walk.
    let source_real =
        fs::canonicalize(source).map_err(io_error_with_help("resolve source", source))?;
    let dest_real = fs::canonicalize(dest).map_err(io_error_with_help("resolve destination", dest))?;

    let walker = WalkDir::new(&source_real)
        .follow_links(true)
        .max_depth(if opts.recursive { usize::MAX } else { 1 })
        .sort_by(files_first)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.path() != dest_real);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.loop_ancestor().is_none() && e.path().is_some_and(is_broken_link) => {
                report.broken_links += 1;
                debug!(path = ?e.path(), "Skipping broken link");
                continue;
            }
            Err(e) => {
                let at = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| source_real.clone());
                return Err(io_error_with_help("read source", &at)(io::Error::from(e)));
            }
        };

        let target: PathBuf = match entry.path().strip_prefix(&source_real) {
            Ok(rel) if entry.depth() > 0 => dest.join(rel),
            _ => dest.to_path_buf(),
        };

        if entry.file_type().is_dir() {
            if entry.depth() == 0 || !opts.recursive {
                continue;
            }
            if !target.is_dir() {
                fs::create_dir_all(&target)
                    .map_err(io_error_with_help("create backup directory", &target))?;
                report.dirs_created += 1;
            }
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }

        match copy_no_clobber(entry.path(), &target) {
            Ok(bytes) => {
                if opts.preserve_times {
                    preserve_times(entry.path(), &target);
                }
                report.files_copied += 1;
                report.bytes += bytes;
                debug!(src = %entry.path().display(), dest = %target.display(), bytes, "Copied leaf");
            }
            Err(e)
                if e.kind() == io::ErrorKind::AlreadyExists
                    && opts.on_existing == ExistingPolicy::Skip =>
            {
                report.files_skipped += 1;
                debug!(dest = %target.display(), "Skipped existing file");
            }
            Err(e) => return Err(io_error_with_help("copy leaf", &target)(e)),
        }
    }

    info!(
        source = %source.display(),
        dest = %dest.display(),
        copied = report.files_copied,
        skipped = report.files_skipped,
        broken_links = report.broken_links,
        dirs = report.dirs_created,
        bytes = report.bytes,
        "Backup finished"
    );
    Ok(report)
}

fn preserve_times(src: &Path, dest: &Path) {
    let Ok(meta) = fs::metadata(src) else {
        return;
    };
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    if let Err(e) = set_file_times(dest, atime, mtime) {
        debug!(dest = %dest.display(), error = %e, "Could not preserve file times");
    }
}
