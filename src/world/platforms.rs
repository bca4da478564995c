use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::Platform;
use crate::config::ConfigLoaded;

fn platform_bundle(center: Vec2, size: Vec2, angle_degrees: f32, color: [f32; 3]) -> impl Bundle {
  let half_extents = size / 2.0;
  (
    Platform { half_extents },
    Sprite {
      color: Color::srgb(color[0], color[1], color[2]),
      custom_size: Some(size),
      ..default()
    },
    Transform::from_xyz(center.x, center.y, 0.0)
      .with_rotation(Quat::from_rotation_z(angle_degrees.to_radians())),
    RigidBody::Fixed,
    // Rapier cuboid uses half-extents
    Collider::cuboid(half_extents.x, half_extents.y),
  )
}

pub fn spawn_platforms(mut commands: Commands, config: Res<ConfigLoaded>) {
  let level = &config.level;
  let ground = &level.ground;
  let platforms = &level.platforms;

  commands.spawn(platform_bundle(
    Vec2::new(0.0, ground.y_position),
    Vec2::new(ground.width, ground.height),
    0.0,
    ground.color,
  ));

  for ramp in &level.ramps {
    commands.spawn(platform_bundle(
      Vec2::new(ramp.x, ramp.y),
      Vec2::new(ramp.width, ramp.height),
      ramp.angle,
      ground.color,
    ));
  }

  let mut rng = StdRng::seed_from_u64(platforms.seed);
  for _ in 0..platforms.count {
    let width = rng.random_range(platforms.width_min..platforms.width_max);
    let x = rng.random_range(platforms.x_min..platforms.x_max);
    let y = rng.random_range(platforms.y_min..platforms.y_max);

    commands.spawn(platform_bundle(
      Vec2::new(x, y),
      Vec2::new(width, platforms.height),
      0.0,
      platforms.color,
    ));
  }

  info!(
    "Spawned level: ground, {} ramps, {} platforms",
    level.ramps.len(),
    platforms.count
  );
}
