//! Level geometry: the ground slab, ramps and floating platforms.

mod platforms;

use bevy::prelude::*;
pub use platforms::spawn_platforms;

/// Tag for colliders the player can stand on and the wand can hook into.
#[derive(Component, Debug, Clone, Copy)]
pub struct Platform {
  /// Half width and height of the (possibly rotated) box collider.
  pub half_extents: Vec2,
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(Startup, platforms::spawn_platforms);
  }
}
