//! Folder operations over trees (directories) and leaves (documents).
//!
//! Stateless free functions; every filesystem failure surfaces as
//! [`crate::TreesError`] except [`get_theme_status`], which always answers.

mod backup;
mod io_copy;
mod listing;
mod manage;
mod naming;
mod theme;

pub use backup::{BackupOptions, BackupReport, ExistingPolicy, backup_trees, backup_trees_with};
pub use listing::{list_leaf_names, list_leaf_names_no_extension, list_tree_names, list_tree_paths};
pub use manage::{create_tree, delete_leaf, delete_tree};
pub use naming::{
    LEAF_EXTENSION, META_MARKER, build_leaf_file_name, build_leaf_path, build_tree_path,
    check_name, is_meta_file, resolve_leaf_path, resolve_tree_path, strip_leaf_extension,
};
pub use theme::{DEFAULT_THEME_STATUS, get_theme_status, set_theme_status};
