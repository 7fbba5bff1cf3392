// tests/config_loading.rs
// The shipped config file, strict TOML parsing and the env override.

use so_calc::config::{Config, ENV_CONFIG_PATH};
use so_calc::Language;
use std::{env, fs};

const SHIPPED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/so_calc.toml");

fn shipped_table() -> toml::Table {
    let text = fs::read_to_string(SHIPPED).unwrap();
    toml::from_str(&text).unwrap()
}

#[test]
fn shipped_config_matches_defaults() {
    let cfg = Config::from_path(SHIPPED).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn unknown_keys_are_rejected() {
    let mut table = shipped_table();
    table
        .get_mut("flags")
        .and_then(toml::Value::as_table_mut)
        .unwrap()
        .insert("use_telepathy".into(), toml::Value::Boolean(true));
    let err = Config::from_toml_str(&toml::to_string(&table).unwrap()).unwrap_err();
    assert!(format!("{err:#}").contains("use_telepathy"), "{err:#}");
}

#[test]
fn flags_section_is_required() {
    let mut table = shipped_table();
    table.remove("flags");
    assert!(Config::from_toml_str(&toml::to_string(&table).unwrap()).is_err());

    // optional sections fall back to defaults
    let mut table = shipped_table();
    table.remove("lists");
    table.remove("output");
    let cfg = Config::from_toml_str(&toml::to_string(&table).unwrap()).unwrap();
    assert_eq!(cfg.lists, Config::default().lists);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let err = Config::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[serial_test::serial]
#[test]
fn env_path_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spanish.toml");
    let text = fs::read_to_string(SHIPPED)
        .unwrap()
        .replace("language = \"english\"", "language = \"spanish\"");
    fs::write(&path, text).unwrap();

    env::set_var(ENV_CONFIG_PATH, &path);
    let cfg = Config::from_env().unwrap();
    assert_eq!(cfg.language, Language::Spanish);

    env::set_var(ENV_CONFIG_PATH, dir.path().join("missing.toml"));
    assert!(Config::from_env().is_err());
    env::remove_var(ENV_CONFIG_PATH);
}
