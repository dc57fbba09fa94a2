use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use trees::config::{LogLevel, load_config_from_xml_path};

#[test]
fn loads_every_field() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    let xml = r#"<config>
  <base_dir> /srv/trees </base_dir>
  <backup_dir>/srv/backup</backup_dir>
  <theme_file>/srv/theme.txt</theme_file>
  <log_level>DEBUG</log_level>
  <log_file>/srv/trees.log</log_file>
  <backup_skip_existing> true </backup_skip_existing>
  <backup_preserve_times>false</backup_preserve_times>
</config>"#;
    fs::write(&cfg_path, xml).unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.base_dir, PathBuf::from("/srv/trees"));
    assert_eq!(cfg.backup_dir, PathBuf::from("/srv/backup"));
    assert_eq!(cfg.theme_file, PathBuf::from("/srv/theme.txt"));
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/srv/trees.log")));
    assert!(cfg.backup_skip_existing);
    assert!(!cfg.backup_preserve_times);
}

#[test]
fn missing_elements_keep_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><base_dir>/only/base</base_dir></config>").unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    let def = trees::Config::default();
    assert_eq!(cfg.base_dir, PathBuf::from("/only/base"));
    assert_eq!(cfg.backup_dir, def.backup_dir);
    assert_eq!(cfg.log_level, LogLevel::Normal);
    assert!(cfg.backup_preserve_times);
}

#[test]
fn malformed_xml_errors() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    // Missing closing tag for backup_dir
    fs::write(
        &cfg_path,
        "<config>\n  <base_dir>/tmp/trees</base_dir>\n  <backup_dir>/tmp/backup\n</config>",
    )
    .unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err}").contains("parse config xml"));
}

#[test]
fn unknown_field_errors() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><download_base>/x</download_base></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn invalid_log_level_errors() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><log_level>loud</log_level></config>").unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid log level"));
}
