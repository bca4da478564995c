//! Custom `/` key toggle for the console.
//!
//! Behavior:
//! - `/` always toggles console (open -> close, close -> open)
//! - Escape closes the console (but doesn't open it)
//! - `/` cannot be typed in the console input

use bevy::prelude::*;
use bevy_console::ConsoleOpen;
use bevy_egui::{EguiContexts, egui};

/// System that handles custom `/` key toggle and Escape to close.
pub fn handle_console_toggle(
  keys: Res<ButtonInput<KeyCode>>,
  mut console_open: ResMut<ConsoleOpen>,
  mut contexts: EguiContexts,
) {
  let consumed = if keys.just_pressed(KeyCode::Escape) && console_open.open {
    console_open.open = false;
    egui::Key::Escape
  } else if keys.just_pressed(KeyCode::Slash) {
    console_open.open = !console_open.open;
    egui::Key::Slash
  } else {
    return;
  };

  // Keep the key out of the console input line
  if let Ok(ctx) = contexts.ctx_mut() {
    ctx.input_mut(|i| {
      i.consume_key(egui::Modifiers::NONE, consumed);
    });
  }
}
