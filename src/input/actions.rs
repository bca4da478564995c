use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

#[derive(Component)]
pub struct PlayerInput;

/// Horizontal axis, -1..1.
#[derive(Debug, InputAction)]
#[action_output(f32)]
pub struct Move;

/// Vertical axis, -1..1. A rising positive edge is a jump.
#[derive(Debug, InputAction)]
#[action_output(f32)]
pub struct MoveVertical;

/// Held to keep the wand out.
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct Fire;
