//! Directory listings: trees under a base directory, leaves inside a tree.
//! Everything is one level deep. A symlink lists as whatever it points at;
//! a dangling one is neither a tree nor a leaf and is left out.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::errors::{Result, io_error_with_help};

use super::naming::{is_meta_file, strip_leaf_extension};

/// Direct children of `dir`, in filesystem enumeration order.
/// Errors reading `dir` propagate, naming the path that failed.
fn children(dir: &Path, op: &'static str) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .map(|entry| {
            entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                io_error_with_help(op, &path)(e.into())
            })
        })
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
    Other,
}

/// Kind of the entry, resolving symlinks. Dangling links are `Other`.
fn entry_kind(entry: &DirEntry) -> EntryKind {
    let ft = entry.file_type();
    if ft.is_dir() {
        return EntryKind::Dir;
    }
    if ft.is_file() {
        return EntryKind::File;
    }
    if !entry.path_is_symlink() {
        return EntryKind::Other;
    }
    match fs::metadata(entry.path()) {
        Ok(m) if m.is_dir() => EntryKind::Dir,
        Ok(m) if m.is_file() => EntryKind::File,
        Ok(_) => EntryKind::Other,
        Err(e) => {
            debug!(path = %entry.path().display(), error = %e, "Skipping unresolvable link");
            EntryKind::Other
        }
    }
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

/// Absolute (or base-relative, matching `base_dir`) paths of every tree.
pub fn list_tree_paths(base_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let base_dir = base_dir.as_ref();
    let trees: Vec<PathBuf> = children(base_dir, "list trees")?
        .into_iter()
        .filter(|e| entry_kind(e) == EntryKind::Dir)
        .map(DirEntry::into_path)
        .collect();
    debug!(base = %base_dir.display(), count = trees.len(), "Listed trees");
    Ok(trees)
}

/// Directory names of every tree under `base_dir`.
pub fn list_tree_names(base_dir: impl AsRef<Path>) -> Result<Vec<String>> {
    Ok(list_tree_paths(base_dir)?
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect())
}

/// File names of every leaf in `tree_path`, editor meta/lock files excluded.
pub fn list_leaf_names(tree_path: impl AsRef<Path>) -> Result<Vec<String>> {
    let tree_path = tree_path.as_ref();
    let mut skipped = 0usize;
    let leaves: Vec<String> = children(tree_path, "list leaves")?
        .iter()
        .filter(|e| entry_kind(e) == EntryKind::File)
        .map(entry_name)
        .filter(|name| {
            let meta = is_meta_file(name);
            skipped += usize::from(meta);
            !meta
        })
        .collect();
    debug!(tree = %tree_path.display(), count = leaves.len(), skipped, "Listed leaves");
    Ok(leaves)
}

/// Leaf names with the document extension removed, for display.
pub fn list_leaf_names_no_extension(tree_path: impl AsRef<Path>) -> Result<Vec<String>> {
    Ok(list_leaf_names(tree_path)?
        .iter()
        .map(|n| strip_leaf_extension(n))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TreesError;
    use assert_fs::prelude::*;
    use std::collections::BTreeSet;
    use std::io;

    fn sorted(v: Vec<String>) -> BTreeSet<String> {
        v.into_iter().collect()
    }

    #[test]
    fn trees_are_directories_only() {
        let base = assert_fs::TempDir::new().unwrap();
        base.child("Work").create_dir_all().unwrap();
        base.child("Home").create_dir_all().unwrap();
        base.child("stray.docx").touch().unwrap();

        let names = sorted(list_tree_names(base.path()).unwrap());
        assert_eq!(names, BTreeSet::from(["Home".to_string(), "Work".to_string()]));

        let paths = list_tree_paths(base.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.parent() == Some(base.path())));
    }

    #[test]
    fn leaves_skip_meta_files_and_subdirectories() {
        let tree = assert_fs::TempDir::new().unwrap();
        tree.child("plan.docx").touch().unwrap();
        tree.child("notes.docx").touch().unwrap();
        tree.child("~$plan.docx").touch().unwrap();
        tree.child("~WRL0005.tmp").touch().unwrap();
        tree.child("nested").create_dir_all().unwrap();

        let leaves = list_leaf_names(tree.path()).unwrap();
        assert!(leaves.iter().all(|n| !n.contains('~')));
        assert_eq!(
            sorted(leaves),
            BTreeSet::from(["notes.docx".to_string(), "plan.docx".to_string()])
        );
    }

    #[test]
    fn no_extension_listing_lines_up_with_plain_listing() {
        let tree = assert_fs::TempDir::new().unwrap();
        for name in ["a.docx", "budget 2024.docx", "~$a.docx"] {
            tree.child(name).touch().unwrap();
        }
        let full = list_leaf_names(tree.path()).unwrap();
        let bare = list_leaf_names_no_extension(tree.path()).unwrap();
        assert_eq!(full.len(), bare.len());
        for (f, b) in full.iter().zip(&bare) {
            assert_eq!(&f[..f.len() - 5], b);
        }
    }

    #[test]
    fn empty_tree_lists_nothing() {
        let tree = assert_fs::TempDir::new().unwrap();
        assert!(list_leaf_names(tree.path()).unwrap().is_empty());
        assert!(list_tree_paths(tree.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let missing = tmp.path().join("gone");
        let err = list_leaf_names(&missing).unwrap_err();
        assert!(matches!(err, TreesError::Io { .. }));
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
        assert!(list_tree_names(&missing).is_err());
    }

    #[test]
    fn error_names_the_directory_that_failed() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let missing = tmp.path().join("gone");
        match list_tree_paths(&missing).unwrap_err() {
            TreesError::Io { op, path, .. } => {
                assert_eq!(op, "list trees");
                assert_eq!(path, missing);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_lock_link_does_not_break_leaf_listing() {
        use std::os::unix::fs::symlink;

        let tree = assert_fs::TempDir::new().unwrap();
        tree.child("plan.docx").touch().unwrap();
        // Lock files some editors leave behind: a link to "user@host.pid".
        symlink("nobody@nowhere.1234", tree.path().join(".#plan.docx")).unwrap();

        assert_eq!(list_leaf_names(tree.path()).unwrap(), vec!["plan.docx".to_string()]);
        assert_eq!(list_leaf_names_no_extension(tree.path()).unwrap(), vec!["plan".to_string()]);
        assert!(list_tree_names(tree.path()).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn links_list_as_their_targets() {
        use std::os::unix::fs::symlink;

        let outside = assert_fs::TempDir::new().unwrap();
        outside.child("Shared").create_dir_all().unwrap();
        outside.child("shared.docx").touch().unwrap();

        let base = assert_fs::TempDir::new().unwrap();
        base.child("Work").create_dir_all().unwrap();
        symlink(outside.child("Shared").path(), base.path().join("Linked")).unwrap();
        symlink(outside.child("shared.docx").path(), base.path().join("linked.docx")).unwrap();

        assert_eq!(
            sorted(list_tree_names(base.path()).unwrap()),
            BTreeSet::from(["Linked".to_string(), "Work".to_string()])
        );
        assert_eq!(list_leaf_names(base.path()).unwrap(), vec!["linked.docx".to_string()]);
    }
}
