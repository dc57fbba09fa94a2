//! Core library for `trees`.
//!
//! A tree is a folder under a base directory; a leaf is a document inside a
//! tree. [`folder_io`] holds the filesystem operations, [`config`] the runtime
//! settings, and [`cli`] the argument model used by the `trees` binary.

pub mod cli;
pub mod config;
pub mod errors;
pub mod folder_io;
pub mod output;

pub use config::{Config, LogLevel, default_config_path, path_has_symlink_ancestor};
pub use errors::{Result, TreesError};
pub use folder_io::{
    BackupOptions, BackupReport, DEFAULT_THEME_STATUS, ExistingPolicy, LEAF_EXTENSION,
    backup_trees, backup_trees_with, build_leaf_file_name, build_leaf_path, build_tree_path,
    create_tree, delete_leaf, delete_tree, get_theme_status, list_leaf_names,
    list_leaf_names_no_extension, list_tree_names, list_tree_paths, resolve_leaf_path,
    resolve_tree_path, set_theme_status, strip_leaf_extension,
};
