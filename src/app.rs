//! Application orchestrator.
//! Loads/merges config, initializes logging, and dispatches the subcommand
//! to the folder operations.

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use trees::cli::{Args, Command};
use trees::config::{create_template_config, default_config_path, load_config};
use trees::output as out;
use trees::{Config, TreesError, folder_io};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        let path = default_config_path()?;
        out::print_info(&format!("trees config path:\n  {}", path.display()));
        if !path.exists() {
            out::print_info("No config file exists there yet. Run `trees init-config` to create one.");
        }
        return Ok(());
    }

    // Runs before config load so a missing $TREES_CONFIG file can be created.
    if matches!(args.command, Some(Command::InitConfig)) {
        return init_config();
    }

    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    // Held until the end of run() so the file appender flushes.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .context("initialize logging")?;

    debug!("Starting trees: {:?}", args);

    let Some(command) = args.command.clone() else {
        out::print_warn("No command given; see `trees --help`.");
        return Ok(());
    };

    dispatch(&cfg, command).inspect_err(|e| match e.downcast_ref::<TreesError>() {
        Some(te) => error!(code = te.code(), error = %te, "Command failed"),
        None => error!(error = ?e, "Command failed"),
    })
}

fn init_config() -> Result<()> {
    let path = default_config_path()?;
    create_template_config(&path)?;
    out::print_success(&format!("Template config written to: {}", path.display()));
    Ok(())
}

fn dispatch(cfg: &Config, command: Command) -> Result<()> {
    let base = &cfg.base_dir;
    match command {
        Command::ListTrees { paths } => {
            if paths {
                let trees = folder_io::list_tree_paths(base)?;
                out::print_lines(trees.iter().map(|p| p.display().to_string()));
            } else {
                out::print_lines(folder_io::list_tree_names(base)?);
            }
        }
        Command::ListLeaves { tree, no_extension } => {
            let tree_path = folder_io::resolve_tree_path(base, &tree)?;
            let leaves = if no_extension {
                folder_io::list_leaf_names_no_extension(&tree_path)?
            } else {
                folder_io::list_leaf_names(&tree_path)?
            };
            out::print_lines(leaves);
        }
        Command::CreateTree { tree } => {
            let tree_path = folder_io::resolve_tree_path(base, &tree)?;
            folder_io::create_tree(&tree_path)?;
            info!(tree = %tree_path.display(), "Tree ready");
        }
        Command::DeleteTree { tree } => {
            let tree_path = folder_io::resolve_tree_path(base, &tree)?;
            folder_io::delete_tree(&tree_path)?;
            info!(tree = %tree_path.display(), "Tree deleted");
        }
        Command::DeleteLeaf { tree, leaf } => {
            let tree_path = folder_io::resolve_tree_path(base, &tree)?;
            let leaf_path = folder_io::resolve_leaf_path(&tree_path, &leaf)?;
            folder_io::delete_leaf(&leaf_path)?;
            info!(leaf = %leaf_path.display(), "Leaf deleted");
        }
        Command::Backup { no_recurse, .. } => {
            let opts = cfg.backup_options(!no_recurse);
            let report = folder_io::backup_trees_with(base, &cfg.backup_dir, &opts)
                .with_context(|| format!("back up '{}'", base.display()))?;
            out::print_success(&format!(
                "Backed up {} file(s) to {} ({} skipped)",
                report.files_copied,
                cfg.backup_dir.display(),
                report.files_skipped
            ));
        }
        Command::Theme { set: Some(status) } => {
            folder_io::set_theme_status(&cfg.theme_file, &status)?;
            out::print_success(&format!("Theme status set to '{status}'"));
        }
        Command::Theme { set: None } => {
            out::print_user(&folder_io::get_theme_status(&cfg.theme_file));
        }
        Command::InitConfig => init_config()?,
    }
    Ok(())
}
