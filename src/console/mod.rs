//! Developer console: teleport, live tuning and debug marker toggles.

pub mod commands;
mod toggle;

use bevy::prelude::*;
use bevy_console::{AddConsoleCommand, ConsoleConfiguration, ConsolePlugin};
use commands::{
  MarkersCommand, TeleportCommand, TuneCommand, markers_command, teleport_command, tune_command,
};

pub struct ConsolePlugins;

impl Plugin for ConsolePlugins {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<bevy_egui::EguiPlugin>() {
      app.add_plugins(bevy_egui::EguiPlugin::default());
    }

    app
      .add_plugins(ConsolePlugin)
      .insert_resource(ConsoleConfiguration {
        // Disable default toggle keys, we use custom `/` handling
        keys: vec![],
        ..default()
      })
      .add_console_command::<TeleportCommand, _>(teleport_command)
      .add_console_command::<TuneCommand, _>(tune_command)
      .add_console_command::<MarkersCommand, _>(markers_command)
      .add_systems(Update, toggle::handle_console_toggle);
  }
}
