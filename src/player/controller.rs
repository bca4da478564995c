//! Per-tick locomotion arithmetic.
//!
//! Nothing in here touches the ECS: the systems in [`super::movement`] copy
//! component data in, call [`MoverState::step`], and write the outcome back.
//! That keeps the run/stop/jump rules testable without a physics world.

use bevy::prelude::*;

use super::components::PlayerAnimation;
use crate::config::PlayerConfig;

/// Horizontal speeds below this are snapped to zero while stopping.
const SPEED_EPSILON: f32 = 0.01;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MoverTuning {
  pub max_run_speed: f32,
  pub seconds_to_max_speed: f32,
  pub grounded_seconds_to_stop: f32,
  pub airborne_seconds_to_stop: f32,
  pub jump_velocity: f32,
  pub max_air_jumps: u32,
}

impl MoverTuning {
  pub fn from_config(player: &PlayerConfig) -> Self {
    Self {
      max_run_speed: player.max_run_speed,
      seconds_to_max_speed: player.seconds_to_max_speed,
      grounded_seconds_to_stop: player.grounded_seconds_to_stop,
      airborne_seconds_to_stop: player.airborne_seconds_to_stop,
      jump_velocity: player.jump_velocity,
      max_air_jumps: player.max_air_jumps,
    }
  }
}

impl Default for MoverTuning {
  fn default() -> Self {
    Self {
      max_run_speed: 250.0,
      seconds_to_max_speed: 0.1,
      grounded_seconds_to_stop: 0.1,
      airborne_seconds_to_stop: 0.5,
      jump_velocity: 750.0,
      max_air_jumps: 1,
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
  #[default]
  Right,
  Left,
}

impl Facing {
  pub fn direction(self) -> Vec2 {
    match self {
      Facing::Right => Vec2::X,
      Facing::Left => Vec2::NEG_X,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
  Ground,
  Air,
}

/// One physics tick worth of input.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
  pub axis: Vec2,
  /// Elapsed game time in seconds.
  pub now: f32,
  pub dt: f32,
  /// A hooked wand is pulling the mover; skips stopping friction.
  pub tethered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
  pub velocity: Vec2,
  pub animation: PlayerAnimation,
  pub jumped: Option<JumpKind>,
}

/// Grounding and input-edge state of one character.
#[derive(Component, Debug, Clone)]
pub struct MoverState {
  pub last_axis: Vec2,
  pub grounded: bool,
  /// Unit tangent of the last platform stood on, pointing "forward" (+X-ish).
  pub slope_axis: Vec2,
  pub air_jumps_used: u32,
  pub run_time_start: f32,
  pub stop_time_start: f32,
  pub facing: Facing,
}

impl Default for MoverState {
  fn default() -> Self {
    Self {
      last_axis: Vec2::ZERO,
      grounded: false,
      slope_axis: Vec2::X,
      air_jumps_used: 0,
      run_time_start: 0.0,
      stop_time_start: 0.0,
      facing: Facing::Right,
    }
  }
}

impl MoverState {
  /// Marks the mover as standing on a surface with the given tangent.
  pub fn land(&mut self, slope_axis: Vec2) {
    if !self.grounded {
      debug!("Landed, slope axis {:?}", slope_axis);
    }
    self.grounded = true;
    self.slope_axis = slope_axis;
    self.air_jumps_used = 0;
  }

  pub fn leave_ground(&mut self) {
    if self.grounded {
      debug!("Left ground");
    }
    self.grounded = false;
  }

  /// Remaining fraction of speed kept while stopping, 1 at the moment input
  /// is released falling linearly to 0 after the stop time.
  pub fn deceleration_multiplier(&self, tuning: &MoverTuning, now: f32) -> f32 {
    let decel_time = if self.grounded {
      tuning.grounded_seconds_to_stop
    } else {
      tuning.airborne_seconds_to_stop
    };
    if decel_time <= 0.0 {
      return 0.0;
    }
    ((self.stop_time_start + decel_time - now) / decel_time).clamp(0.0, 1.0)
  }

  /// Advances the mover one tick and returns the new body velocity.
  pub fn step(&mut self, tuning: &MoverTuning, tick: Tick, velocity: Vec2) -> StepOutcome {
    let Vec2 { x, y } = tick.axis;
    let mut velocity = velocity;

    if x != 0.0 && x != self.last_axis.x {
      self.run_time_start = tick.now;
    }
    if x == 0.0 && x != self.last_axis.x {
      self.stop_time_start = tick.now;
    }

    if x > 0.0 {
      self.facing = Facing::Right;
    } else if x < 0.0 {
      self.facing = Facing::Left;
    }

    if x != 0.0 {
      velocity = self.run(tuning, x, velocity, tick.dt);
    } else if velocity.x != 0.0 && !tick.tethered {
      velocity = self.stop(tuning, velocity, tick.now);
    }

    let jumped = self.jump(tuning, y, &mut velocity);

    let animation = if x > 0.0 {
      PlayerAnimation::MoveRight
    } else if x < 0.0 {
      PlayerAnimation::MoveLeft
    } else {
      PlayerAnimation::StandStill
    };

    self.last_axis = tick.axis;

    StepOutcome {
      velocity,
      animation,
      jumped,
    }
  }

  /// Accelerates along the slope (grounded) or +X (airborne) toward the
  /// run speed for this input strength, never past it.
  fn run(&self, tuning: &MoverTuning, x: f32, velocity: Vec2, dt: f32) -> Vec2 {
    let axis = if self.grounded { self.slope_axis } else { Vec2::X };
    let target = tuning.max_run_speed * x.abs();
    let direction = x.signum();

    let speed = velocity.dot(axis) * direction;
    if speed >= target {
      return velocity;
    }

    let push = x * tuning.max_run_speed * (dt / tuning.seconds_to_max_speed);
    let mut velocity = velocity + axis * push;

    let overshoot = velocity.dot(axis) * direction - target;
    if overshoot > 0.0 {
      velocity -= axis * direction * overshoot;
    }
    velocity
  }

  fn stop(&self, tuning: &MoverTuning, velocity: Vec2, now: f32) -> Vec2 {
    let decel = self.deceleration_multiplier(tuning, now);

    if self.grounded {
      let along = velocity.dot(self.slope_axis) * decel;
      if along.abs() < SPEED_EPSILON {
        Vec2::ZERO
      } else {
        self.slope_axis * along
      }
    } else {
      let x = velocity.x * decel;
      Vec2::new(if x.abs() < SPEED_EPSILON { 0.0 } else { x }, velocity.y)
    }
  }

  fn jump(&mut self, tuning: &MoverTuning, y: f32, velocity: &mut Vec2) -> Option<JumpKind> {
    // Holding the key never re-jumps
    if y <= 0.0 || self.last_axis.y > 0.0 {
      return None;
    }

    if self.grounded {
      velocity.y = tuning.jump_velocity;
      self.grounded = false;
      Some(JumpKind::Ground)
    } else if self.air_jumps_used < tuning.max_air_jumps {
      velocity.y = tuning.jump_velocity;
      self.air_jumps_used += 1;
      Some(JumpKind::Air)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DT: f32 = 1.0 / 60.0;

  struct Sim {
    state: MoverState,
    tuning: MoverTuning,
    velocity: Vec2,
    now: f32,
  }

  impl Sim {
    fn grounded() -> Self {
      let mut state = MoverState::default();
      state.land(Vec2::X);
      Self {
        state,
        tuning: MoverTuning::default(),
        velocity: Vec2::ZERO,
        now: 0.0,
      }
    }

    fn airborne() -> Self {
      let mut sim = Self::grounded();
      sim.state.leave_ground();
      sim
    }

    fn tick(&mut self, axis: Vec2) -> StepOutcome {
      self.now += DT;
      let outcome = self.state.step(
        &self.tuning,
        Tick {
          axis,
          now: self.now,
          dt: DT,
          tethered: false,
        },
        self.velocity,
      );
      self.velocity = outcome.velocity;
      outcome
    }

    fn run_for(&mut self, axis: Vec2, seconds: f32) {
      let ticks = (seconds / DT).ceil() as usize;
      for _ in 0..ticks {
        self.tick(axis);
      }
    }
  }

  #[test]
  fn reaches_max_run_speed_and_holds_it() {
    let mut sim = Sim::grounded();
    sim.run_for(Vec2::X, sim.tuning.seconds_to_max_speed + DT);
    assert!((sim.velocity.x - sim.tuning.max_run_speed).abs() < 1e-3);

    sim.run_for(Vec2::X, 1.0);
    assert!(sim.velocity.x <= sim.tuning.max_run_speed + 1e-3);
    assert_eq!(sim.velocity.y, 0.0);
  }

  #[test]
  fn half_stick_caps_at_half_speed() {
    let mut sim = Sim::grounded();
    sim.run_for(Vec2::new(-0.5, 0.0), 1.0);
    assert!((sim.velocity.x + sim.tuning.max_run_speed * 0.5).abs() < 1e-3);
    assert_eq!(sim.state.facing, Facing::Left);
  }

  #[test]
  fn grounded_stop_finishes_within_stop_time() {
    let mut sim = Sim::grounded();
    sim.run_for(Vec2::X, 0.5);
    sim.run_for(Vec2::ZERO, sim.tuning.grounded_seconds_to_stop + 2.0 * DT);
    assert_eq!(sim.velocity, Vec2::ZERO);
  }

  #[test]
  fn airborne_stop_is_slower_and_keeps_vertical_speed() {
    let mut sim = Sim::airborne();
    sim.velocity = Vec2::new(200.0, -50.0);
    sim.tick(Vec2::X);
    sim.run_for(Vec2::ZERO, sim.tuning.grounded_seconds_to_stop + 2.0 * DT);
    assert!(sim.velocity.x > 0.0, "still drifting after grounded stop time");
    assert_eq!(sim.velocity.y, -50.0);

    sim.run_for(Vec2::ZERO, sim.tuning.airborne_seconds_to_stop);
    assert_eq!(sim.velocity.x, 0.0);
  }

  #[test]
  fn tethered_mover_keeps_momentum() {
    let mut sim = Sim::airborne();
    sim.velocity = Vec2::new(300.0, 0.0);
    let outcome = sim.state.step(
      &sim.tuning,
      Tick {
        axis: Vec2::ZERO,
        now: 10.0,
        dt: DT,
        tethered: true,
      },
      sim.velocity,
    );
    assert_eq!(outcome.velocity.x, 300.0);
  }

  #[test]
  fn runs_along_slope_when_grounded() {
    let mut sim = Sim::grounded();
    let slope = Vec2::new(1.0, 1.0).normalize();
    sim.state.land(slope);
    sim.run_for(Vec2::X, 1.0);

    let speed = sim.velocity.length();
    assert!((speed - sim.tuning.max_run_speed).abs() < 1e-2);
    assert!((sim.velocity.normalize() - slope).length() < 1e-4);
  }

  #[test]
  fn stopping_on_slope_stays_on_slope() {
    let mut sim = Sim::grounded();
    let slope = Vec2::new(2.0, -1.0).normalize();
    sim.state.land(slope);
    sim.run_for(Vec2::X, 0.5);
    sim.tick(Vec2::ZERO);
    sim.tick(Vec2::ZERO);
    assert!(sim.velocity.perp_dot(slope).abs() < 1e-3);
  }

  #[test]
  fn holding_jump_only_jumps_once() {
    let mut sim = Sim::grounded();
    let first = sim.tick(Vec2::Y);
    assert_eq!(first.jumped, Some(JumpKind::Ground));
    assert!(!sim.state.grounded);
    assert_eq!(sim.velocity.y, sim.tuning.jump_velocity);

    for _ in 0..10 {
      assert_eq!(sim.tick(Vec2::Y).jumped, None);
    }
  }

  #[test]
  fn air_jumps_are_limited_and_reset_on_landing() {
    let mut sim = Sim::grounded();
    sim.tuning.max_air_jumps = 2;

    assert_eq!(sim.tick(Vec2::Y).jumped, Some(JumpKind::Ground));
    sim.tick(Vec2::ZERO);
    assert_eq!(sim.tick(Vec2::Y).jumped, Some(JumpKind::Air));
    sim.tick(Vec2::ZERO);
    assert_eq!(sim.tick(Vec2::Y).jumped, Some(JumpKind::Air));
    sim.tick(Vec2::ZERO);
    assert_eq!(sim.tick(Vec2::Y).jumped, None);
    assert_eq!(sim.state.air_jumps_used, 2);

    sim.state.land(Vec2::X);
    assert_eq!(sim.state.air_jumps_used, 0);
    sim.tick(Vec2::ZERO);
    assert_eq!(sim.tick(Vec2::Y).jumped, Some(JumpKind::Ground));
  }

  #[test]
  fn walking_off_a_ledge_leaves_air_jumps() {
    let mut sim = Sim::grounded();
    sim.state.leave_ground();
    assert_eq!(sim.tick(Vec2::Y).jumped, Some(JumpKind::Air));
  }

  #[test]
  fn animation_follows_horizontal_input() {
    let mut sim = Sim::grounded();
    assert_eq!(sim.tick(Vec2::X).animation, PlayerAnimation::MoveRight);
    assert_eq!(sim.tick(Vec2::NEG_X).animation, PlayerAnimation::MoveLeft);
    assert_eq!(sim.tick(Vec2::ZERO).animation, PlayerAnimation::StandStill);
  }

  #[test]
  fn zero_stop_time_stops_immediately() {
    let mut sim = Sim::grounded();
    sim.tuning.grounded_seconds_to_stop = 0.0;
    sim.run_for(Vec2::X, 0.5);
    sim.tick(Vec2::ZERO);
    assert_eq!(sim.velocity, Vec2::ZERO);
  }
}
