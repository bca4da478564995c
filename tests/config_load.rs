//! Config loading from disk, including the error paths main relies on.
//!
//! Run: cargo test --test config_load

use std::fs;

use lantern_lights::config::{ConfigError, GameConfig};
use tempfile::TempDir;

const CONFIG: &str = include_str!("../assets/config/lantern.config.toml");

#[test]
fn loads_config_from_a_file() {
  let dir = TempDir::new().unwrap();
  let path = dir.path().join("lantern.config.toml");
  fs::write(&path, CONFIG).unwrap();

  let config = GameConfig::load(&path).unwrap();
  assert_eq!(config.window.title, "Lantern Lights");
  assert_eq!(config.player.max_air_jumps, 1);
  assert_eq!(config.level.ramps.len(), 2);
  assert!(!config.debug.markers);
}

#[test]
fn missing_file_is_an_io_error() {
  let dir = TempDir::new().unwrap();
  let err = GameConfig::load(dir.path().join("nope.toml")).unwrap_err();
  assert!(matches!(err, ConfigError::Io(_)), "got {}", err);
}

#[test]
fn omitted_optional_sections_use_defaults() {
  let mut text = String::new();
  let mut skipping = false;
  for line in CONFIG.lines() {
    if line.starts_with('[') {
      skipping = line == "[debug]";
    }
    if !skipping && !line.starts_with("max_air_jumps") {
      text.push_str(line);
      text.push('\n');
    }
  }

  let config = GameConfig::parse(&text).unwrap();
  assert_eq!(config.player.max_air_jumps, 1);
  assert!(!config.debug.markers);
  assert_eq!(config.debug.marker_lifetime, 2.0);
}

#[test]
fn negative_speeds_are_rejected() {
  let text = CONFIG.replace("max_run_speed = 250.0", "max_run_speed = -250.0");
  let err = GameConfig::parse(&text).unwrap_err();
  assert!(matches!(err, ConfigError::Invalid(_)));
  assert!(err.to_string().contains("max_run_speed"));
}
