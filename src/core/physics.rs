use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::ConfigLoaded;

/// Pixels per physics meter.
pub const PIXELS_PER_METER: f32 = 50.0;

/// Downward acceleration at gravity scale 1, in pixels/s^2.
#[derive(Resource)]
pub struct GravityConfig {
  pub value: f32,
}

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(
        RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PIXELS_PER_METER).in_fixed_schedule(),
      )
      .add_systems(Startup, setup_gravity)
      .add_systems(Update, sync_rapier_gravity);
  }
}

fn setup_gravity(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.insert_resource(GravityConfig {
    value: config.physics.gravity,
  });
}

/// Pushes [`GravityConfig`] into every Rapier context.
fn sync_rapier_gravity(
  gravity: Option<Res<GravityConfig>>,
  mut contexts: Query<&mut RapierConfiguration>,
) {
  let Some(gravity) = gravity else {
    return;
  };

  for mut configuration in &mut contexts {
    let wanted = Vec2::new(0.0, -gravity.value);
    if configuration.gravity != wanted {
      configuration.gravity = wanted;
    }
  }
}
