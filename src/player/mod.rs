pub mod components;
pub mod controller;
pub mod grounding;
pub mod movement;
pub mod spawn;
pub mod wand;


use bevy::prelude::*;

use crate::config::ConfigLoaded;
use controller::MoverTuning;
use wand::WandTuning;

/// Ordering label for the per-tick controller chain.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerSystems;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, spawn::spawn_player)
      // Rapier steps in FixedPostUpdate, so everything here sees last tick's
      // contacts and feeds this tick's velocities
      .add_systems(
        FixedUpdate,
        (
          movement::gather_mover_input,
          controller_systems(),
        )
          .chain(),
      )
      .add_systems(
        Update,
        (movement::apply_animation, apply_tuning_on_config_change),
      );
  }
}

/// The backend-independent part of the controller, reading [`MoverInput`]
/// and collision messages.
pub fn controller_systems() -> impl IntoScheduleConfigs<bevy::ecs::system::ScheduleSystem, ()> {
  (
    grounding::track_ground_contacts,
    grounding::refresh_grounding,
    movement::drive_mover,
    wand::fire_wand,
    wand::hook_wand,
    wand::limit_tether,
    wand::pull_toward_hook,
  )
    .chain()
    .in_set(ControllerSystems)
}

/// Pushes reloaded tuning values onto live players.
fn apply_tuning_on_config_change(
  config: Res<ConfigLoaded>,
  mut players: Query<(&mut MoverTuning, &mut WandTuning)>,
) {
  if !config.is_changed() || config.is_added() {
    return;
  }
  for (mut mover, mut wand) in &mut players {
    *mover = MoverTuning::from_config(&config.player);
    *wand = WandTuning::from_config(&config.wand);
  }
  info!("Applied reloaded player tuning");
}
