//! Short-lived sprites marking where the ground sensor touched a platform.

use bevy::prelude::*;

use crate::config::DebugConfig;

#[derive(Resource, Debug, Clone)]
pub struct DebugMarkers {
  pub enabled: bool,
  pub lifetime: f32,
  pub size: f32,
}

impl DebugMarkers {
  pub fn from_config(config: &DebugConfig) -> Self {
    Self {
      enabled: config.markers,
      lifetime: config.marker_lifetime,
      size: config.marker_size,
    }
  }
}

impl Default for DebugMarkers {
  fn default() -> Self {
    Self::from_config(&DebugConfig::default())
  }
}

#[derive(Component)]
pub struct DebugMarker(pub Timer);

/// Green for contacts that grounded the player, red for the rest.
pub fn spawn_debug_marker(
  commands: &mut Commands,
  markers: &DebugMarkers,
  position: Vec2,
  grounded: bool,
) {
  let color = if grounded {
    Color::srgb(0.2, 1.0, 0.3)
  } else {
    Color::srgb(1.0, 0.25, 0.2)
  };

  commands.spawn((
    DebugMarker(Timer::from_seconds(markers.lifetime, TimerMode::Once)),
    Sprite {
      color,
      custom_size: Some(Vec2::splat(markers.size)),
      ..default()
    },
    Transform::from_xyz(position.x, position.y, 50.0),
  ));
}

pub fn expire_debug_markers(
  mut commands: Commands,
  mut markers: Query<(Entity, &mut DebugMarker)>,
  time: Res<Time>,
) {
  for (entity, mut marker) in &mut markers {
    if marker.0.tick(time.delta()).is_finished() {
      commands.entity(entity).despawn();
    }
  }
}
