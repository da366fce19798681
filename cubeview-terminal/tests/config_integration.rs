//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use cubeview_terminal::config::ViewerConfig;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cubeview-{}-{}.toml", name, std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    std::env::remove_var("CUBEVIEW_PUZZLE__LAYERS");
    let config = ViewerConfig::load_from("does/not/exist.toml").unwrap();
    assert_eq!(config, ViewerConfig::default());
}

#[test]
#[serial]
fn test_file_overrides_defaults() {
    std::env::remove_var("CUBEVIEW_PUZZLE__LAYERS");
    let path = temp_config("file", "[puzzle]\nlayers = 2\n\n[input]\ncell_width = 9.0\ncell_height = 18.0\n");

    let config = ViewerConfig::load_from(&path).unwrap();
    assert_eq!(config.puzzle.layers, 2);
    // Keys absent from the file keep their defaults
    assert_eq!(config.puzzle.size, 3.0);
    assert_eq!(config.input.cell_width, 9.0);
    assert_eq!(config.render.fps, 30);

    fs::remove_file(path).unwrap();
}

#[test]
#[serial]
fn test_env_override() {
    let path = temp_config("env", "[puzzle]\nlayers = 2\n");
    std::env::set_var("CUBEVIEW_PUZZLE__LAYERS", "4");

    let config = ViewerConfig::load_from(&path).unwrap();
    assert_eq!(config.puzzle.layers, 4);

    std::env::remove_var("CUBEVIEW_PUZZLE__LAYERS");
    fs::remove_file(path).unwrap();
}

#[test]
#[serial]
fn test_invalid_value_is_reported() {
    std::env::remove_var("CUBEVIEW_PUZZLE__LAYERS");
    let path = temp_config("invalid", "[render]\nfps = \"fast\"\n");

    let err = ViewerConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));

    fs::remove_file(path).unwrap();
}

#[test]
#[serial]
fn test_invalid_env_value_falls_back_to_defaults() {
    std::env::set_var("CUBEVIEW_RENDER__FPS", "fast");

    let (config, error) = ViewerConfig::load_or_default("does/not/exist.toml");
    assert_eq!(config, ViewerConfig::default());
    assert!(error.is_some());

    std::env::remove_var("CUBEVIEW_RENDER__FPS");
}

#[test]
#[serial]
fn test_valid_sources_report_no_error() {
    std::env::remove_var("CUBEVIEW_PUZZLE__LAYERS");
    let path = temp_config("fallback", "[render]\nfps = 12\n");

    let (config, error) = ViewerConfig::load_or_default(&path);
    assert_eq!(config.render.fps, 12);
    assert!(error.is_none());

    fs::remove_file(path).unwrap();
}
