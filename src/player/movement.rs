use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{MoverInput, Player, PlayerAnimation, PlayerFace, StartingGravity};
use super::controller::{JumpKind, MoverState, MoverTuning, Tick};
use super::wand::WandSlot;
use crate::input::{Fire, Move, MoveVertical, PlayerInput};

/// Copies this tick's action values into [`MoverInput`].
pub fn gather_mover_input(
  mut players: Query<(&Actions<PlayerInput>, &mut MoverInput), With<Player>>,
  move_actions: Query<(&Action<Move>, &ActionState)>,
  vertical_actions: Query<(&Action<MoveVertical>, &ActionState)>,
  fire_actions: Query<&ActionState, With<Action<Fire>>>,
) {
  for (actions, mut input) in &mut players {
    let mut axis = Vec2::ZERO;
    let mut fire = false;

    for action_entity in actions.iter() {
      // Only use input when action is active (Fired or Ongoing)
      if let Ok((action, state)) = move_actions.get(action_entity) {
        if matches!(state, ActionState::Fired | ActionState::Ongoing) {
          axis.x = **action;
        }
      }
      if let Ok((action, state)) = vertical_actions.get(action_entity) {
        if matches!(state, ActionState::Fired | ActionState::Ongoing) {
          axis.y = **action;
        }
      }
      if let Ok(state) = fire_actions.get(action_entity) {
        fire = matches!(state, ActionState::Fired | ActionState::Ongoing);
      }
    }

    input.axis = axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
    input.fire = fire;
  }
}

/// Runs the locomotion step for every player and writes the results back to
/// the rigid body.
pub fn drive_mover(
  mut players: Query<
    (
      &mut MoverState,
      &MoverTuning,
      &MoverInput,
      &mut Velocity,
      &mut GravityScale,
      &StartingGravity,
      &mut PlayerAnimation,
      Option<&WandSlot>,
    ),
    With<Player>,
  >,
  time: Res<Time>,
) {
  for (mut mover, tuning, input, mut velocity, mut gravity, starting, mut animation, slot) in
    &mut players
  {
    let tick = Tick {
      axis: input.axis,
      now: time.elapsed_secs(),
      dt: time.delta_secs(),
      tethered: slot.is_some_and(WandSlot::is_tethered),
    };

    let outcome = mover.step(tuning, tick, velocity.linvel);
    velocity.linvel = outcome.velocity;

    match outcome.jumped {
      Some(JumpKind::Ground) => {
        gravity.0 = starting.0;
        debug!("Jump from ground");
      }
      Some(JumpKind::Air) => {
        debug!("Air jump {}/{}", mover.air_jumps_used, tuning.max_air_jumps);
      }
      None => {}
    }

    if mover.grounded && gravity.0 != 0.0 {
      gravity.0 = 0.0;
    }

    animation.set_if_neq(outcome.animation);

    if input.axis != Vec2::ZERO || velocity.linvel.x.abs() > 1.0 {
      trace!(
        "Move: axis={:?}, vel={:.1?}, grounded={}, slope={:?}",
        input.axis, velocity.linvel, mover.grounded, mover.slope_axis
      );
    }
  }
}

/// Turns animation cues into visuals: the sprite flips and the face slides
/// to the side the player is running toward.
pub fn apply_animation(
  mut players: Query<(&PlayerAnimation, &mut Sprite, &Children), Changed<PlayerAnimation>>,
  mut faces: Query<&mut Transform, With<PlayerFace>>,
) {
  const FACE_OFFSET: f32 = 5.0;

  for (animation, mut sprite, children) in &mut players {
    let offset = match animation {
      PlayerAnimation::MoveLeft => -FACE_OFFSET,
      PlayerAnimation::MoveRight => FACE_OFFSET,
      PlayerAnimation::StandStill => 0.0,
    };
    match animation {
      PlayerAnimation::MoveLeft => sprite.flip_x = true,
      PlayerAnimation::MoveRight => sprite.flip_x = false,
      PlayerAnimation::StandStill => {}
    }

    for child in children.iter() {
      if let Ok(mut face) = faces.get_mut(child) {
        face.translation.x = offset;
      }
    }
  }
}
