use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use trees::config::{CONFIG_ENV, default_config_path, load_config};

struct EnvGuard;

impl EnvGuard {
    fn set(value: &std::path::Path) -> Self {
        unsafe { std::env::set_var(CONFIG_ENV, value) };
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe { std::env::remove_var(CONFIG_ENV) };
    }
}

#[test]
#[serial]
fn env_var_selects_config_file() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("custom.xml");
    fs::write(
        &cfg_path,
        "<config><base_dir>/from/env</base_dir><log_level>quiet</log_level></config>",
    )
    .unwrap();
    let _env = EnvGuard::set(&cfg_path);

    assert_eq!(default_config_path().unwrap(), cfg_path);
    let cfg = load_config().unwrap();
    assert_eq!(cfg.base_dir, PathBuf::from("/from/env"));
    assert_eq!(cfg.log_level.to_string(), "quiet");
}

#[test]
#[serial]
fn env_var_pointing_at_missing_file_is_an_error() {
    let td = tempdir().unwrap();
    let _env = EnvGuard::set(&td.path().join("absent.xml"));

    let err = load_config().unwrap_err();
    assert!(format!("{err}").contains(CONFIG_ENV));
}
