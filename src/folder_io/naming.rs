//! Pure name/path helpers for trees and leaves.
//!
//! `build_*` only concatenate. Names coming from a user go through
//! `resolve_*`, which refuse anything that is not a single plain component.

use std::ffi::{OsStr, OsString};
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use crate::errors::{Result, TreesError};

/// Extension every true leaf carries on disk.
pub const LEAF_EXTENSION: &str = ".docx";

/// Character marking transient editor meta/lock files.
pub const META_MARKER: char = '~';

/// Base directory, separator, tree name.
///
/// Unlike `Path::join`, an absolute `tree_name` does not replace the base.
pub fn build_tree_path(base_dir: impl AsRef<Path>, tree_name: &str) -> PathBuf {
    let base = base_dir.as_ref().as_os_str();
    let mut s = OsString::with_capacity(base.len() + 1 + tree_name.len());
    s.push(base);
    s.push(MAIN_SEPARATOR_STR);
    s.push(tree_name);
    PathBuf::from(s)
}

/// Leaf name with the document extension appended.
pub fn build_leaf_file_name(leaf_name: &str) -> String {
    let mut name = String::with_capacity(leaf_name.len() + LEAF_EXTENSION.len());
    name.push_str(leaf_name);
    name.push_str(LEAF_EXTENSION);
    name
}

/// Full path of a leaf inside a tree.
pub fn build_leaf_path(tree_path: impl AsRef<Path>, leaf_name: &str) -> PathBuf {
    build_tree_path(tree_path, &build_leaf_file_name(leaf_name))
}

/// Accept `name` only if it is exactly one normal path component.
///
/// Rejects empty names, `.`/`..`, absolute paths, drive prefixes and any
/// name carrying a `/` or `\`.
pub fn check_name<'a>(kind: &'static str, name: &'a str) -> Result<&'a str> {
    let mut parts = Path::new(name).components();
    let single = matches!(
        (parts.next(), parts.next()),
        (Some(Component::Normal(c)), None) if c == OsStr::new(name)
    );
    if single && !name.contains(['/', '\\']) {
        Ok(name)
    } else {
        Err(TreesError::InvalidName { kind, name: name.to_string() })
    }
}

/// Checked [`build_tree_path`]: the result always stays directly under `base_dir`.
pub fn resolve_tree_path(base_dir: impl AsRef<Path>, tree_name: &str) -> Result<PathBuf> {
    Ok(build_tree_path(base_dir, check_name("tree", tree_name)?))
}

/// Checked [`build_leaf_path`].
pub fn resolve_leaf_path(tree_path: impl AsRef<Path>, leaf_name: &str) -> Result<PathBuf> {
    Ok(build_leaf_path(tree_path, check_name("leaf", leaf_name)?))
}

/// Drop the trailing extension-length characters from `file_name`.
///
/// The suffix is not checked: a file stored as `notes.txt` comes back as
/// `note`. Names shorter than the extension become empty.
pub fn strip_leaf_extension(file_name: &str) -> String {
    let ext_chars = LEAF_EXTENSION.chars().count();
    let keep = file_name.chars().count().saturating_sub(ext_chars);
    file_name.chars().take(keep).collect()
}

/// True for editor meta/lock files, which are never leaves.
#[inline]
pub fn is_meta_file(file_name: &str) -> bool {
    file_name.contains(META_MARKER)
}
