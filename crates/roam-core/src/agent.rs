use crate::math::{normalize_degrees, rotated_bounds};
use crate::{Rect, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Navigation behavior the agent is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NavMode {
    #[default]
    Cruising,
    RecoveringReverse,
    RecoveringTurn,
}

impl NavMode {
    /// Recovery phase label for a counter value.
    pub fn for_recovery_tick(recovery_tick: u32, reverse_ticks: u32) -> Self {
        if recovery_tick < reverse_ticks {
            Self::RecoveringReverse
        } else {
            Self::RecoveringTurn
        }
    }

    pub fn is_recovering(self) -> bool {
        !matches!(self, Self::Cruising)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cruising => "cruising",
            Self::RecoveringReverse => "recovering_reverse",
            Self::RecoveringTurn => "recovering_turn",
        }
    }
}

impl core::fmt::Display for NavMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed footprint of the agent sprite before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentShape {
    pub width: f32,
    pub height: f32,
}

impl Default for AgentShape {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 30.0,
        }
    }
}

/// Position and heading, the part of the state that a rollback restores.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub position: Vec2,
    pub heading: f32,
}

/// Complete per-tick agent state.
///
/// `recovery_tick` only carries meaning while `mode` is a recovering mode and is zero
/// whenever the agent is cruising.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentState {
    pub position: Vec2,
    /// Degrees; unbounded, only consumed through trig functions.
    pub heading: f32,
    pub mode: NavMode,
    pub recovery_tick: u32,
}

impl AgentState {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading,
            mode: NavMode::Cruising,
            recovery_tick: 0,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            heading: self.heading,
        }
    }

    pub fn restore(&mut self, pose: Pose) {
        self.position = pose.position;
        self.heading = pose.heading;
    }

    /// Heading wrapped into `[0, 360)` for display.
    pub fn display_heading(&self) -> f32 {
        normalize_degrees(self.heading)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.heading.is_finite()
    }

    /// Axis-aligned bounds of the rotated footprint at the current pose.
    pub fn bounds(&self, shape: AgentShape) -> Rect {
        rotated_bounds(self.position, shape.width, shape.height, self.heading)
    }
}
