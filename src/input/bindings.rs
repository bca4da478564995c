use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{Fire, Move, MoveVertical, PlayerInput};

pub fn player_input_actions() -> impl Bundle {
  actions!(PlayerInput[
      (
          Action::<Move>::new(),
          Bindings::spawn((
              Bidirectional::ad_keys(),
              Bidirectional::left_right_arrow(),
          )),
      ),
      (
          Action::<MoveVertical>::new(),
          Bindings::spawn((
              Bidirectional::ws_keys(),
              Bidirectional::up_down_arrow(),
              Spawn(Binding::from(KeyCode::Space)),
          )),
      ),
      (
          Action::<Fire>::new(),
          bindings![KeyCode::KeyJ, MouseButton::Left],
      ),
  ])
}
