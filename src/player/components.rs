use bevy::prelude::*;

#[derive(Component)]
pub struct Player;

/// Small child sprite that shows which way the player faces.
#[derive(Component)]
pub struct PlayerFace;

/// Axis and button values for this tick, decoupled from the input backend.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct MoverInput {
  pub axis: Vec2,
  pub fire: bool,
}

/// Gravity scale the body spawned with; restored whenever it leaves the
/// ground.
#[derive(Component, Debug, Clone, Copy)]
pub struct StartingGravity(pub f32);

/// Animation cue produced by the controller each tick.
#[derive(Component, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAnimation {
  MoveLeft,
  MoveRight,
  #[default]
  StandStill,
}

/// Trigger collider under the player that reports platform overlaps.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundSensor {
  pub owner: Entity,
}

/// Platforms currently overlapping the player's ground sensor.
#[derive(Component, Debug, Clone, Default)]
pub struct GroundContacts {
  pub platforms: Vec<Entity>,
  pub sensor_half_extents: Vec2,
}

impl GroundContacts {
  pub fn new(sensor_half_extents: Vec2) -> Self {
    Self {
      platforms: Vec::new(),
      sensor_half_extents,
    }
  }

  pub fn insert(&mut self, platform: Entity) {
    if !self.platforms.contains(&platform) {
      self.platforms.push(platform);
    }
  }

  pub fn remove(&mut self, platform: Entity) {
    self.platforms.retain(|&p| p != platform);
  }
}
