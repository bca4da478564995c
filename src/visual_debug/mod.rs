mod markers;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
pub use markers::{DebugMarker, DebugMarkers, expire_debug_markers, spawn_debug_marker};

use crate::config::ConfigLoaded;
use crate::player::components::{MoverInput, Player};
use crate::player::controller::MoverState;
use crate::player::wand::{Wand, WandSlot};

/// Resource for frame-by-frame debug mode
#[derive(Resource, Default)]
pub struct FrameStepMode {
  pub enabled: bool,
  advance_requested: bool,
}

pub struct VisualDebugPlugin;

impl Plugin for VisualDebugPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<FrameStepMode>()
      .init_resource::<DebugMarkers>()
      .add_systems(PreUpdate, frame_step_control)
      .add_systems(
        Update,
        (
          sync_markers_on_config_change,
          expire_debug_markers,
          draw_debug_vectors,
        ),
      );
  }
}

/// Controls frame-by-frame stepping mode
/// F5: Toggle frame-step mode
/// F6: Advance one frame (when in frame-step mode)
fn frame_step_control(
  keyboard: Res<ButtonInput<KeyCode>>,
  mut frame_step: ResMut<FrameStepMode>,
  mut time: ResMut<Time<Virtual>>,
) {
  if keyboard.just_pressed(KeyCode::F5) {
    frame_step.enabled = !frame_step.enabled;
    if frame_step.enabled {
      time.pause();
      info!("Frame-step mode ENABLED (press F6 to advance, F5 to disable)");
    } else {
      time.unpause();
      info!("Frame-step mode DISABLED");
    }
  }

  if frame_step.enabled {
    if keyboard.just_pressed(KeyCode::F6) {
      // Request advance - unpause for this frame
      frame_step.advance_requested = true;
      time.unpause();
    } else if frame_step.advance_requested {
      frame_step.advance_requested = false;
      time.pause();
    }
  }
}

/// Config edits overwrite console toggles; that's the hot-reload contract.
fn sync_markers_on_config_change(config: Res<ConfigLoaded>, mut markers: ResMut<DebugMarkers>) {
  if config.is_changed() {
    *markers = DebugMarkers::from_config(&config.debug);
  }
}

/// Draws velocity (yellow), slope axis (cyan, grounded only), input (green)
/// and the wand tether (white).
fn draw_debug_vectors(
  mut gizmos: Gizmos,
  players: Query<(&Transform, &Velocity, &MoverState, &MoverInput, &WandSlot), With<Player>>,
  wands: Query<&Transform, With<Wand>>,
) {
  const VELOCITY_SCALE: f32 = 0.2;
  const AXIS_LENGTH: f32 = 40.0;
  const INPUT_LENGTH: f32 = 50.0;

  for (transform, velocity, mover, input, slot) in &players {
    let player_pos = transform.translation.truncate();

    if velocity.linvel.length_squared() > 0.01 {
      let velocity_end = player_pos + velocity.linvel * VELOCITY_SCALE;
      gizmos.line_2d(player_pos, velocity_end, Color::srgb(1.0, 1.0, 0.0));
    }

    if mover.grounded {
      gizmos.line_2d(
        player_pos - mover.slope_axis * AXIS_LENGTH,
        player_pos + mover.slope_axis * AXIS_LENGTH,
        Color::srgb(0.0, 1.0, 1.0),
      );
    }

    let input_direction = input.axis.normalize_or_zero();
    if input_direction != Vec2::ZERO {
      gizmos.line_2d(
        player_pos,
        player_pos + input_direction * INPUT_LENGTH,
        Color::srgb(0.0, 1.0, 0.0),
      );
    }

    if let Some(wand_transform) = slot.wand.and_then(|w| wands.get(w).ok()) {
      gizmos.line_2d(player_pos, wand_transform.translation.truncate(), Color::WHITE);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn paused_app() -> App {
    let mut app = App::new();
    app
      .add_plugins(MinimalPlugins)
      .init_resource::<ButtonInput<KeyCode>>()
      .insert_resource(FrameStepMode {
        enabled: true,
        advance_requested: false,
      })
      .add_systems(PreUpdate, frame_step_control);
    app.world_mut().resource_mut::<Time<Virtual>>().pause();
    app
  }

  fn press(app: &mut App, key: KeyCode) {
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    input.clear();
    input.press(key);
    app.update();
  }

  #[test]
  fn arrow_keys_do_not_step_frames() {
    let mut app = paused_app();
    press(&mut app, KeyCode::ArrowRight);
    assert!(app.world().resource::<Time<Virtual>>().is_paused());
  }

  #[test]
  fn f6_advances_a_single_frame() {
    let mut app = paused_app();
    press(&mut app, KeyCode::F6);
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());

    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    app.update();
    assert!(app.world().resource::<Time<Virtual>>().is_paused());
  }
}
