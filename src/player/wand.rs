//! The wand: a tethered projectile thrown while fire is held.
//!
//! One press spawns it, release despawns it. Once it touches a platform it
//! freezes in place and pulls its owner toward the anchor for as long as fire
//! stays held.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{MoverInput, Player};
use super::controller::{Facing, MoverState};
use crate::config::WandConfig;
use crate::world::Platform;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct WandTuning {
  pub radius: f32,
  pub launch_speed: f32,
  pub gravity_scale: f32,
  pub hook_speed: f32,
  pub max_tether_length: f32,
  pub color: [f32; 3],
}

impl WandTuning {
  pub fn from_config(wand: &WandConfig) -> Self {
    Self {
      radius: wand.radius,
      launch_speed: wand.launch_speed,
      gravity_scale: wand.gravity_scale,
      hook_speed: wand.hook_speed,
      max_tether_length: wand.max_tether_length,
      color: wand.color,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WandState {
  Flying,
  Hooked,
}

#[derive(Component, Debug)]
pub struct Wand {
  pub owner: Entity,
  pub state: WandState,
}

/// The player's handle on its single wand.
#[derive(Component, Debug, Default)]
pub struct WandSlot {
  pub wand: Option<Entity>,
  /// Set once the wand is hooked.
  pub anchor: Option<Vec2>,
  /// Fire state from the previous tick, for edge detection.
  pub fire_held: bool,
}

impl WandSlot {
  pub fn is_tethered(&self) -> bool {
    self.anchor.is_some()
  }

  fn clear(&mut self) {
    self.wand = None;
    self.anchor = None;
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WandCommand {
  Spawn,
  Despawn,
  Keep,
}

/// Spawns on a fresh press with no wand out, despawns on release.
pub fn wand_command(fire: bool, was_fire: bool, wand_alive: bool) -> WandCommand {
  match (fire, was_fire) {
    (true, false) if !wand_alive => WandCommand::Spawn,
    (false, _) if wand_alive => WandCommand::Despawn,
    _ => WandCommand::Keep,
  }
}

/// Throw direction: the held direction if any, otherwise straight ahead.
pub fn aim_direction(axis: Vec2, facing: Facing) -> Vec2 {
  let aim = axis.normalize_or_zero();
  if aim == Vec2::ZERO {
    facing.direction()
  } else {
    aim
  }
}

/// Velocity added this tick to pull `player` toward `anchor`.
pub fn hook_pull(player: Vec2, anchor: Vec2, hook_speed: f32, dt: f32) -> Vec2 {
  (anchor - player).normalize_or_zero() * hook_speed * dt
}

pub fn fire_wand(
  mut commands: Commands,
  mut players: Query<
    (
      Entity,
      &Transform,
      &MoverInput,
      &MoverState,
      &WandTuning,
      &mut WandSlot,
    ),
    With<Player>,
  >,
) {
  for (entity, transform, input, mover, tuning, mut slot) in &mut players {
    match wand_command(input.fire, slot.fire_held, slot.wand.is_some()) {
      WandCommand::Spawn => {
        let direction = aim_direction(input.axis, mover.facing);
        let origin = transform.translation.truncate() + direction * tuning.radius * 2.0;
        let wand = commands
          .spawn((
            Wand {
              owner: entity,
              state: WandState::Flying,
            },
            Sprite {
              color: Color::srgb(tuning.color[0], tuning.color[1], tuning.color[2]),
              custom_size: Some(Vec2::splat(tuning.radius * 2.0)),
              ..default()
            },
            Transform::from_xyz(origin.x, origin.y, 10.0),
            RigidBody::Dynamic,
            Collider::ball(tuning.radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            Ccd::enabled(),
            Velocity::linear(direction * tuning.launch_speed),
            GravityScale(tuning.gravity_scale),
          ))
          .id();
        debug!("Wand {:?} thrown toward {:?}", wand, direction);
        slot.wand = Some(wand);
        slot.anchor = None;
      }
      WandCommand::Despawn => {
        if let Some(wand) = slot.wand {
          commands.entity(wand).despawn();
          debug!("Wand {:?} recalled", wand);
        }
        slot.clear();
      }
      WandCommand::Keep => {}
    }
    slot.fire_held = input.fire;
  }
}

/// Freezes a flying wand on the first platform it touches.
pub fn hook_wand(
  mut commands: Commands,
  mut collisions: MessageReader<CollisionEvent>,
  mut wands: Query<(&mut Wand, &Transform, &mut Velocity)>,
  platforms: Query<(), With<Platform>>,
  mut slots: Query<&mut WandSlot>,
) {
  for event in collisions.read() {
    let CollisionEvent::Started(a, b, _) = event else {
      continue;
    };

    let (wand_entity, other) = if wands.contains(*a) {
      (*a, *b)
    } else if wands.contains(*b) {
      (*b, *a)
    } else {
      continue;
    };

    if !platforms.contains(other) {
      continue;
    }

    let Ok((mut wand, transform, mut velocity)) = wands.get_mut(wand_entity) else {
      continue;
    };
    if wand.state != WandState::Flying {
      continue;
    }

    wand.state = WandState::Hooked;
    *velocity = Velocity::zero();
    commands.entity(wand_entity).insert(RigidBody::Fixed);

    let anchor = transform.translation.truncate();
    if let Ok(mut slot) = slots.get_mut(wand.owner) {
      slot.anchor = Some(anchor);
    }
    debug!("Wand {:?} hooked at {:?}", wand_entity, anchor);
  }
}

/// A flying wand that outruns its tether is lost.
pub fn limit_tether(
  mut commands: Commands,
  wands: Query<(Entity, &Wand, &Transform)>,
  mut owners: Query<(&Transform, &WandTuning, &mut WandSlot)>,
) {
  for (entity, wand, transform) in &wands {
    if wand.state != WandState::Flying {
      continue;
    }
    let Ok((owner_transform, tuning, mut slot)) = owners.get_mut(wand.owner) else {
      // Owner is gone, nothing will ever recall this wand
      commands.entity(entity).despawn();
      continue;
    };

    let distance = owner_transform
      .translation
      .truncate()
      .distance(transform.translation.truncate());
    if distance > tuning.max_tether_length {
      commands.entity(entity).despawn();
      if slot.wand == Some(entity) {
        slot.clear();
      }
      debug!("Wand {:?} exceeded tether length", entity);
    }
  }
}

pub fn pull_toward_hook(
  mut players: Query<(&Transform, &MoverInput, &WandTuning, &WandSlot, &mut Velocity), With<Player>>,
  time: Res<Time>,
) {
  for (transform, input, tuning, slot, mut velocity) in &mut players {
    let Some(anchor) = slot.anchor else {
      continue;
    };
    if !input.fire {
      continue;
    }
    velocity.linvel += hook_pull(
      transform.translation.truncate(),
      anchor,
      tuning.hook_speed,
      time.delta_secs(),
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn press_spawns_only_without_a_wand() {
    assert_eq!(wand_command(true, false, false), WandCommand::Spawn);
    assert_eq!(wand_command(true, false, true), WandCommand::Keep);
    assert_eq!(wand_command(true, true, false), WandCommand::Keep);
  }

  #[test]
  fn release_despawns() {
    assert_eq!(wand_command(false, true, true), WandCommand::Despawn);
    assert_eq!(wand_command(false, false, false), WandCommand::Keep);
  }

  #[test]
  fn aim_falls_back_to_facing() {
    assert_eq!(aim_direction(Vec2::ZERO, Facing::Left), Vec2::NEG_X);
    let diagonal = aim_direction(Vec2::new(1.0, 1.0), Facing::Left);
    assert!((diagonal.length() - 1.0).abs() < 1e-5);
    assert!(diagonal.x > 0.0 && diagonal.y > 0.0);
  }

  #[test]
  fn pull_points_at_anchor_and_scales_with_dt() {
    let pull = hook_pull(Vec2::ZERO, Vec2::new(0.0, 100.0), 600.0, 0.5);
    assert!((pull - Vec2::new(0.0, 300.0)).length() < 1e-4);
    assert_eq!(hook_pull(Vec2::ONE, Vec2::ONE, 600.0, 0.5), Vec2::ZERO);
  }
}
