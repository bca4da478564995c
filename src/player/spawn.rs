use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  GroundContacts, GroundSensor, MoverInput, Player, PlayerAnimation, PlayerFace, StartingGravity,
};
use super::controller::{MoverState, MoverTuning};
use super::wand::{WandSlot, WandTuning};
use crate::config::ConfigLoaded;
use crate::input::{PlayerInput, player_input_actions};

/// Body, sensor and controller state for a player at `position`, without the
/// input bindings or visuals.
pub fn player_body(config: &ConfigLoaded, position: Vec2) -> impl Bundle {
  let player = &config.player;
  // Rapier capsule_y uses half_height (cylinder part) and radius
  let half_height = player.collider_length / 2.0;

  (
    (
      Player,
      Transform::from_xyz(position.x, position.y, 0.0),
      RigidBody::Dynamic,
      Collider::capsule_y(half_height, player.collider_radius),
      LockedAxes::ROTATION_LOCKED,
      // Grounded bodies have no gravity to press them into the floor, so
      // movement is entirely velocity driven
      Friction {
        coefficient: 0.0,
        combine_rule: CoefficientCombineRule::Min,
      },
      Velocity::zero(),
      GravityScale(player.gravity_scale),
      StartingGravity(player.gravity_scale),
      Ccd::enabled(),
    ),
    (
      MoverState::default(),
      MoverTuning::from_config(player),
      MoverInput::default(),
      PlayerAnimation::default(),
      GroundContacts::new(Vec2::from(player.sensor_size) / 2.0),
      WandSlot::default(),
      WandTuning::from_config(&config.wand),
    ),
  )
}

/// Trigger collider centred on the player; reports platform overlaps.
pub fn ground_sensor(config: &ConfigLoaded, owner: Entity) -> impl Bundle {
  let half_extents = Vec2::from(config.player.sensor_size) / 2.0;
  (
    GroundSensor { owner },
    Transform::default(),
    Collider::cuboid(half_extents.x, half_extents.y),
    Sensor,
    ActiveEvents::COLLISION_EVENTS,
    ChildOf(owner),
  )
}

pub fn spawn_player(mut commands: Commands, config: Res<ConfigLoaded>) {
  let player = &config.player;
  let spawn_pos = Vec2::new(player.spawn_x, player.spawn_y);
  let size = Vec2::new(
    player.collider_radius * 2.0,
    player.collider_length + player.collider_radius * 2.0,
  );

  let entity = commands
    .spawn((
      player_body(&config, spawn_pos),
      Sprite {
        color: Color::srgb(player.color[0], player.color[1], player.color[2]),
        custom_size: Some(size),
        ..default()
      },
      Visibility::default(),
      PlayerInput,
      player_input_actions(),
    ))
    .id();

  commands.spawn(ground_sensor(&config, entity));
  commands.spawn((
    PlayerFace,
    Sprite {
      color: Color::srgb(0.1, 0.1, 0.15),
      custom_size: Some(Vec2::new(4.0, 4.0)),
      ..default()
    },
    Transform::from_xyz(0.0, size.y / 4.0, 1.0),
    ChildOf(entity),
  ));

  info!("Spawned player {:?} at {:?}", entity, spawn_pos);
}
