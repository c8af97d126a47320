use thiserror::Error;

use crate::NavMode;

/// A world or tuning setup that the simulation refuses to start from.
///
/// These are only produced while initializing; a running simulation never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("arena must have positive finite size, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },

    #[error("obstacle #{index} must have a finite position and positive finite size")]
    DegenerateObstacle { index: usize },

    #[error("initial agent pose must be finite")]
    NonFiniteAgent,

    #[error("initial agent mode {mode} is inconsistent with recovery tick {recovery_tick}")]
    InconsistentMode { mode: NavMode, recovery_tick: u32 },

    #[error("initial agent bounds leave the arena")]
    AgentOutOfBounds,

    #[error("initial agent bounds overlap obstacle #{index}")]
    AgentOverlapsObstacle { index: usize },

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("recovery turn threshold ({turn_until}) must not precede reverse threshold ({reverse_ticks})")]
    RecoveryThresholds { reverse_ticks: u32, turn_until: u32 },
}
