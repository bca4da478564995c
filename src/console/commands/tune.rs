//! Live tuning of the movement constants.

use bevy::prelude::*;
use bevy_console::{ConsoleCommand, reply};
use clap::{Parser, ValueEnum};

use crate::player::components::Player;
use crate::player::controller::MoverTuning;
use crate::player::wand::WandTuning;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TuningParam {
  MaxRunSpeed,
  SecondsToMaxSpeed,
  GroundedSecondsToStop,
  AirborneSecondsToStop,
  JumpVelocity,
  MaxAirJumps,
  HookSpeed,
}

#[derive(Parser, ConsoleCommand)]
#[command(name = "tune")]
pub struct TuneCommand {
  /// Which constant to change
  param: TuningParam,
  /// New value
  value: f32,
}

/// Writes `value` into the matching field, applying the same limits as the
/// config loader.
pub fn apply_tuning(
  param: TuningParam,
  value: f32,
  mover: &mut MoverTuning,
  wand: &mut WandTuning,
) -> Result<(), String> {
  if !value.is_finite() || value < 0.0 {
    return Err(format!("{:?} must be a non-negative number", param));
  }

  match param {
    TuningParam::MaxRunSpeed => mover.max_run_speed = value,
    TuningParam::SecondsToMaxSpeed => {
      if value == 0.0 {
        return Err("SecondsToMaxSpeed must be positive".into());
      }
      mover.seconds_to_max_speed = value;
    }
    TuningParam::GroundedSecondsToStop => mover.grounded_seconds_to_stop = value,
    TuningParam::AirborneSecondsToStop => mover.airborne_seconds_to_stop = value,
    TuningParam::JumpVelocity => mover.jump_velocity = value,
    TuningParam::MaxAirJumps => {
      if value.fract() != 0.0 {
        return Err("MaxAirJumps must be a whole number".into());
      }
      mover.max_air_jumps = value as u32;
    }
    TuningParam::HookSpeed => wand.hook_speed = value,
  }
  Ok(())
}

pub fn tune_command(
  mut log: ConsoleCommand<TuneCommand>,
  mut players: Query<(&mut MoverTuning, &mut WandTuning), With<Player>>,
) {
  if let Some(Ok(TuneCommand { param, value })) = log.take() {
    let Ok((mut mover, mut wand)) = players.single_mut() else {
      reply!(log, "No player found");
      return;
    };

    match apply_tuning(param, value, &mut mover, &mut wand) {
      Ok(()) => {
        reply!(log, "{:?} = {}", param, value);
      }
      Err(reason) => {
        reply!(log, "{}", reason);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::GameConfig;

  fn tunings() -> (MoverTuning, WandTuning) {
    let config =
      GameConfig::parse(include_str!("../../../assets/config/lantern.config.toml")).unwrap();
    (
      MoverTuning::from_config(&config.player),
      WandTuning::from_config(&config.wand),
    )
  }

  #[test]
  fn sets_mover_and_wand_fields() {
    let (mut mover, mut wand) = tunings();
    apply_tuning(TuningParam::MaxRunSpeed, 400.0, &mut mover, &mut wand).unwrap();
    apply_tuning(TuningParam::MaxAirJumps, 3.0, &mut mover, &mut wand).unwrap();
    apply_tuning(TuningParam::HookSpeed, 10.0, &mut mover, &mut wand).unwrap();
    assert_eq!(mover.max_run_speed, 400.0);
    assert_eq!(mover.max_air_jumps, 3);
    assert_eq!(wand.hook_speed, 10.0);
  }

  #[test]
  fn rejects_values_the_controller_cannot_use() {
    let (mut mover, mut wand) = tunings();
    let before = mover;
    assert!(apply_tuning(TuningParam::SecondsToMaxSpeed, 0.0, &mut mover, &mut wand).is_err());
    assert!(apply_tuning(TuningParam::JumpVelocity, -1.0, &mut mover, &mut wand).is_err());
    assert!(apply_tuning(TuningParam::MaxRunSpeed, f32::NAN, &mut mover, &mut wand).is_err());
    assert!(apply_tuning(TuningParam::MaxAirJumps, 2.5, &mut mover, &mut wand).is_err());
    assert_eq!(mover, before);
  }
}
