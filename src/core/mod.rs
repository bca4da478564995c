pub(crate) mod camera;
mod physics;

use bevy::prelude::*;
pub use physics::{GravityConfig, PIXELS_PER_METER, PhysicsPlugin};

pub struct CorePlugin;

impl Plugin for CorePlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(physics::PhysicsPlugin)
      .init_resource::<camera::CameraSmoothness>()
      .add_systems(Startup, camera::setup_camera)
      .add_systems(Update, camera::camera_follow);
  }
}
