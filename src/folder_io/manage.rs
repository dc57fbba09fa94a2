//! Create and delete trees and leaves.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::{Result, io_error_with_help};

/// Create the tree folder (and any missing parents). Existing folders are left alone.
pub fn create_tree(full_tree_path: impl AsRef<Path>) -> Result<()> {
    let path = full_tree_path.as_ref();
    fs::create_dir_all(path).map_err(io_error_with_help("create tree", path))?;
    debug!(tree = %path.display(), "Created tree");
    Ok(())
}

/// Recursively delete a tree and every leaf in it. Fails if the tree is absent.
pub fn delete_tree(tree_path: impl AsRef<Path>) -> Result<()> {
    let path = tree_path.as_ref();
    fs::remove_dir_all(path).map_err(io_error_with_help("delete tree", path))?;
    debug!(tree = %path.display(), "Deleted tree");
    Ok(())
}

/// Delete one leaf file. Fails if the file is absent.
pub fn delete_leaf(leaf_path: impl AsRef<Path>) -> Result<()> {
    let path = leaf_path.as_ref();
    fs::remove_file(path).map_err(io_error_with_help("delete leaf", path))?;
    debug!(leaf = %path.display(), "Deleted leaf");
    Ok(())
}
