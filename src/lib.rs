//! Lantern Lights: a 2D platformer character controller on Bevy and Rapier.
//!
//! The controller runs in `FixedUpdate`: input is copied into
//! [`player::components::MoverInput`], ground contacts are refreshed from the
//! player's trigger sensor, and [`player::controller::MoverState::step`] turns
//! the axes into velocity changes before Rapier steps in `FixedPostUpdate`.

pub mod config;
pub mod console;
pub mod core;
pub mod input;
pub mod player;
pub mod visual_debug;
pub mod world;
