//! Ground contact marker toggle.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use clap::{Parser, ValueEnum};

use crate::visual_debug::DebugMarkers;

#[derive(Clone, Copy, ValueEnum)]
pub enum Switch {
  On,
  Off,
}

#[derive(Parser, ConsoleCommand)]
#[command(name = "markers")]
pub struct MarkersCommand {
  /// Force on or off; toggles when omitted
  state: Option<Switch>,
}

pub fn markers_command(
  mut log: ConsoleCommand<MarkersCommand>,
  mut markers: Option<ResMut<DebugMarkers>>,
) {
  if let Some(Ok(MarkersCommand { state })) = log.take() {
    let Some(ref mut markers) = markers else {
      reply!(log, "DebugMarkers not available");
      return;
    };

    markers.enabled = match state {
      Some(Switch::On) => true,
      Some(Switch::Off) => false,
      None => !markers.enabled,
    };
    let state = if markers.enabled { "on" } else { "off" };
    reply!(log, "Contact markers: {}", state);
  }
}
