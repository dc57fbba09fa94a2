//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request.
//!
//! Notes:
//! - Unknown XML fields are rejected to surface misconfigurations early.
//! - Empty elements are treated as "not set".

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{
    CONFIG_ENV, default_backup_dir, default_base_dir, default_config_path, default_theme_file,
    path_has_symlink_ancestor,
};
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    base_dir: Option<String>,
    backup_dir: Option<String>,
    theme_file: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    backup_skip_existing: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    backup_preserve_times: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional bools
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            _ => Err(serde::de::Error::custom(format!("invalid boolean: '{s}'"))),
        },
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(PathBuf::from)
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(p) = non_empty_path(parsed.base_dir.as_deref()) {
        cfg.base_dir = p;
    }
    if let Some(p) = non_empty_path(parsed.backup_dir.as_deref()) {
        cfg.backup_dir = p;
    }
    if let Some(p) = non_empty_path(parsed.theme_file.as_deref()) {
        cfg.theme_file = p;
    }
    cfg.log_file = non_empty_path(parsed.log_file.as_deref());

    if let Some(s) = parsed.log_level.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }

    if let Some(v) = parsed.backup_skip_existing {
        cfg.backup_skip_existing = v;
    }
    if let Some(v) = parsed.backup_preserve_times {
        cfg.backup_preserve_times = v;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    let cfg = xml_to_config(parsed)
        .with_context(|| format!("invalid value in config xml '{}'", path.display()))?;
    debug!(path = %path.display(), "Loaded config");
    Ok(cfg)
}

/// Resolve and load the effective config.
///
/// - `$TREES_CONFIG` set: that file must exist and parse.
/// - Otherwise the default path is used if present; if it is missing, defaults apply.
pub fn load_config() -> Result<Config> {
    let explicit = env::var_os(CONFIG_ENV).is_some_and(|v| !v.is_empty());
    let path = default_config_path()?;
    if !path.exists() {
        if explicit {
            bail!("{} points to a missing file: {}", CONFIG_ENV, path.display());
        }
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(Config::default());
    }
    load_config_from_xml_path(&path)
}

/// Write a commented template config to `path`. Refuses to overwrite.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)
        .with_context(|| format!("inspect ancestors of '{}'", path.display()))?
    {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let content = format!(
        "<!--\n  trees configuration (XML)\n\n    base_dir               -> directory holding every tree\n    backup_dir             -> destination used by `trees backup`\n    theme_file             -> file whose first line is the theme status\n    log_level              -> quiet | normal | info | debug\n    log_file               -> path to log file (optional; stdout still used)\n    backup_skip_existing   -> true: keep existing backup files; false: fail on them\n    backup_preserve_times  -> copy file times into the backup\n\n  CLI flags override XML values.\n-->\n<config>\n  <base_dir>{}</base_dir>\n  <backup_dir>{}</backup_dir>\n  <theme_file>{}</theme_file>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <backup_skip_existing>false</backup_skip_existing>\n  <backup_preserve_times>true</backup_preserve_times>\n</config>\n",
        default_base_dir().display(),
        default_backup_dir().display(),
        default_theme_file().display(),
    );

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("create config '{}'", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("write config '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_parses_back_to_defaults() {
        let td = tempdir().unwrap();
        let path = td.path().join("cfg").join("config.xml");
        create_template_config(&path).unwrap();

        let cfg = load_config_from_xml_path(&path).unwrap();
        let def = Config::default();
        assert_eq!(cfg.base_dir, def.base_dir);
        assert_eq!(cfg.backup_dir, def.backup_dir);
        assert_eq!(cfg.log_level, LogLevel::Normal);
        assert!(cfg.log_file.is_none());
        assert!(!cfg.backup_skip_existing);
        assert!(cfg.backup_preserve_times);
    }

    #[test]
    fn template_refuses_overwrite() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(&path, "<config></config>").unwrap();
        assert!(create_template_config(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<config></config>");
    }

    #[test]
    fn bad_bool_is_rejected() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(
            &path,
            "<config><backup_skip_existing>maybe</backup_skip_existing></config>",
        )
        .unwrap();
        assert!(load_config_from_xml_path(&path).is_err());
    }
}
