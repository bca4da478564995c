mod plugin;

use std::path::Path;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use serde::{Deserialize, Deserializer, de};

/// Path of the config file relative to the working directory.
pub const CONFIG_PATH: &str = "assets/config/lantern.config.toml";

/// Same file, relative to the asset root (used for hot-reload).
pub const CONFIG_ASSET_PATH: &str = "config/lantern.config.toml";

#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub wand: WandConfig,
  #[serde(default)]
  pub debug: DebugConfig,
  pub level: LevelConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhysicsConfig {
  pub gravity: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerConfig {
  pub spawn_x: f32,
  pub spawn_y: f32,
  pub collider_radius: f32,
  pub collider_length: f32,
  /// Ground sensor box size, in world units.
  pub sensor_size: [f32; 2],
  pub gravity_scale: f32,
  pub max_run_speed: f32,
  pub seconds_to_max_speed: f32,
  pub grounded_seconds_to_stop: f32,
  pub airborne_seconds_to_stop: f32,
  pub jump_velocity: f32,
  #[serde(default = "default_max_air_jumps")]
  pub max_air_jumps: u32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
}

fn default_max_air_jumps() -> u32 {
  1
}

#[derive(Deserialize, Debug, Clone)]
pub struct WandConfig {
  pub radius: f32,
  pub launch_speed: f32,
  pub gravity_scale: f32,
  pub hook_speed: f32,
  pub max_tether_length: f32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
}

#[derive(Deserialize, Debug, Clone)]
pub struct DebugConfig {
  pub markers: bool,
  pub marker_lifetime: f32,
  pub marker_size: f32,
}

impl Default for DebugConfig {
  fn default() -> Self {
    Self {
      markers: false,
      marker_lifetime: 2.0,
      marker_size: 4.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LevelConfig {
  pub ground: GroundConfig,
  #[serde(default)]
  pub ramps: Vec<RampConfig>,
  pub platforms: PlatformsConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GroundConfig {
  pub width: f32,
  pub height: f32,
  pub y_position: f32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
}

/// A rotated platform acting as a slope.
#[derive(Deserialize, Debug, Clone)]
pub struct RampConfig {
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
  /// Counter-clockwise incline in degrees.
  pub angle: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlatformsConfig {
  pub seed: u64,
  pub count: u32,
  pub width_min: f32,
  pub width_max: f32,
  pub height: f32,
  pub x_min: f32,
  pub x_max: f32,
  pub y_min: f32,
  pub y_max: f32,
  #[serde(deserialize_with = "deserialize_hex_color")]
  pub color: [f32; 3],
}

fn deserialize_hex_color<'de, D>(deserializer: D) -> Result<[f32; 3], D::Error>
where
  D: Deserializer<'de>,
{
  let s: String = Deserialize::deserialize(deserializer)?;
  let s = s.trim_start_matches('#');
  if s.len() != 6 {
    return Err(de::Error::custom("hex color must be 6 characters"));
  }
  let r = u8::from_str_radix(&s[0..2], 16).map_err(de::Error::custom)?;
  let g = u8::from_str_radix(&s[2..4], 16).map_err(de::Error::custom)?;
  let b = u8::from_str_radix(&s[4..6], 16).map_err(de::Error::custom)?;
  Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Error loading or validating the game config.
#[derive(Debug)]
pub enum ConfigError {
  Io(std::io::Error),
  Parse(toml::de::Error),
  Invalid(String),
}

impl From<std::io::Error> for ConfigError {
  fn from(err: std::io::Error) -> Self {
    Self::Io(err)
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {}", e),
      Self::Parse(e) => write!(f, "parse error: {}", e),
      Self::Invalid(reason) => write!(f, "invalid config: {}", reason),
    }
  }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
  /// Parses and validates a config from TOML text.
  pub fn parse(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    Self::parse(&text)
  }

  /// Rejects tuning values the controller can't divide by or that would
  /// invert movement, and level ranges the generator can't sample from.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let player = &self.player;
    if !player.seconds_to_max_speed.is_finite() || player.seconds_to_max_speed <= 0.0 {
      return Err(ConfigError::Invalid(
        "player.seconds_to_max_speed must be positive".into(),
      ));
    }
    let non_negative = [
      ("player.max_run_speed", player.max_run_speed),
      ("player.jump_velocity", player.jump_velocity),
      ("player.grounded_seconds_to_stop", player.grounded_seconds_to_stop),
      ("player.airborne_seconds_to_stop", player.airborne_seconds_to_stop),
      ("wand.hook_speed", self.wand.hook_speed),
      ("wand.launch_speed", self.wand.launch_speed),
      ("wand.max_tether_length", self.wand.max_tether_length),
    ];
    for (name, value) in non_negative {
      if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid(format!("{} must not be negative", name)));
      }
    }

    let platforms = &self.level.platforms;
    let ranges = [
      ("level.platforms.width", platforms.width_min, platforms.width_max),
      ("level.platforms.x", platforms.x_min, platforms.x_max),
      ("level.platforms.y", platforms.y_min, platforms.y_max),
    ];
    for (name, min, max) in ranges {
      // random_range panics on an empty range
      if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(ConfigError::Invalid(format!(
          "{}_min must be below {}_max",
          name, name
        )));
      }
    }
    Ok(())
  }
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub wand: WandConfig,
  pub debug: DebugConfig,
  pub level: LevelConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      physics: config.physics,
      player: config.player,
      wand: config.wand,
      debug: config.debug,
      level: config.level,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = include_str!("../../assets/config/lantern.config.toml");

  #[test]
  fn bundled_config_parses() {
    let config = GameConfig::parse(SAMPLE).unwrap();
    assert!(config.player.max_run_speed > 0.0);
    assert!(config.player.seconds_to_max_speed > 0.0);
    assert!(!config.level.ramps.is_empty());
  }

  #[test]
  fn zero_time_to_max_speed_is_rejected() {
    let text = SAMPLE.replace("seconds_to_max_speed = 0.1", "seconds_to_max_speed = 0.0");
    let err = GameConfig::parse(&text).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {}", err);
  }

  #[test]
  fn nan_tuning_is_rejected() {
    let text = SAMPLE.replace("seconds_to_max_speed = 0.1", "seconds_to_max_speed = nan");
    let err = GameConfig::parse(&text).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {}", err);

    let text = SAMPLE.replace("max_run_speed = 250.0", "max_run_speed = nan");
    let err = GameConfig::parse(&text).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {}", err);
  }

  #[test]
  fn inverted_platform_ranges_are_rejected() {
    let text = SAMPLE.replace("width_min = 80.0", "width_min = 300.0");
    let err = GameConfig::parse(&text).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {}", err);

    let text = SAMPLE.replace("y_max = 400.0", "y_max = -60.0");
    let err = GameConfig::parse(&text).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {}", err);
  }

  #[test]
  fn bad_hex_color_is_a_parse_error() {
    let text = SAMPLE.replace("color = \"#f2c14e\"", "color = \"#f2c1\"");
    let err = GameConfig::parse(&text).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }
}
