//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use arachne::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("ARACHNE_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("ARACHNE_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_overrides_nested_section() {
    std::env::set_var("ARACHNE_SIMULATION__PHYSICS_STEP", "0.01");
    let config = AppConfig::load().unwrap();
    assert!((config.simulation.physics_step - 0.01).abs() < 1e-6);
    std::env::remove_var("ARACHNE_SIMULATION__PHYSICS_STEP");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("ARACHNE_WINDOW__TITLE");
    let config = AppConfig::load().unwrap();
    // config/default.toml at the workspace root
    assert_eq!(config.window.title, "Arachne");
    assert_eq!(config.window.width, 640);
    assert!((config.simulation.physics_step - 0.02).abs() < 1e-6);
}
