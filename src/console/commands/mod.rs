//! Console commands.

mod markers;
mod teleport;
mod tune;

pub use markers::{MarkersCommand, markers_command};
pub use teleport::{TeleportCommand, teleport_command};
pub use tune::{TuneCommand, TuningParam, apply_tuning, tune_command};
