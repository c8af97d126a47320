use roam_core::{AgentState, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motion performed during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MotionCommand {
    /// Translate along the heading.
    Forward,
    /// Translate against the heading.
    Reverse,
    /// Turn in place.
    Rotate,
}

/// Position delta for moving `speed` units along the current heading.
pub fn advance(state: &AgentState, speed: f32) -> Vec2 {
    Vec2::from_angle_degrees(state.heading) * speed
}

pub fn rotate(state: &mut AgentState, degrees: f32) {
    state.heading += degrees;
}

pub fn apply(state: &mut AgentState, command: MotionCommand, speed: f32, rotation_speed: f32) {
    match command {
        MotionCommand::Forward => state.position += advance(state, speed),
        MotionCommand::Reverse => state.position -= advance(state, speed),
        MotionCommand::Rotate => rotate(state, rotation_speed),
    }
}
