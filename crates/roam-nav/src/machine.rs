//! Cruising / recovering behavior.
//!
//! The machine never touches geometry. Each tick it is asked two questions:
//! - [`NavigationStateMachine::command`]: which motion the tick performs, from the mode the
//!   tick started in.
//! - [`NavigationStateMachine::decide`]: given the pre-move sensor readings and whether the
//!   move was rejected, what mode, counter, and steering the next tick starts from.

use roam_core::{AgentState, NavMode, RecoveryConfig, SimConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{MotionCommand, SensorReadings};

/// Why cruising ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RecoveryCause {
    /// The post-move footprint hit an obstacle or left the arena.
    Violation,
    /// The front sensor saw an obstacle.
    FrontSensor,
}

/// A change of mode produced by a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Transition {
    EnterRecovery { cause: RecoveryCause },
    /// A violation while already recovering reset the counter.
    RestartRecovery,
    BeginTurn,
    Resume,
}

/// Mode, counter, and steering the next tick starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub mode: NavMode,
    pub recovery_tick: u32,
    /// Degrees added to the heading after this tick's motion.
    pub heading_delta: f32,
    pub transition: Option<Transition>,
}

impl Decision {
    fn hold(state: &AgentState) -> Self {
        Self {
            mode: state.mode,
            recovery_tick: state.recovery_tick,
            heading_delta: 0.0,
            transition: None,
        }
    }

    pub fn apply(&self, state: &mut AgentState) {
        state.mode = self.mode;
        state.recovery_tick = self.recovery_tick;
        state.heading += self.heading_delta;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationStateMachine {
    rotation_speed: f32,
    recovery: RecoveryConfig,
}

impl NavigationStateMachine {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            rotation_speed: config.rotation_speed,
            recovery: config.recovery,
        }
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn recovery(&self) -> RecoveryConfig {
        self.recovery
    }

    /// Motion for a tick that starts in `state`.
    pub fn command(&self, state: &AgentState) -> MotionCommand {
        if !state.mode.is_recovering() {
            MotionCommand::Forward
        } else if state.recovery_tick < self.recovery.reverse_ticks {
            MotionCommand::Reverse
        } else {
            MotionCommand::Rotate
        }
    }

    /// Next mode from the state the tick started in.
    ///
    /// Recovery ignores sensors and violations here; forcing recovery after a rejected
    /// move is the orchestrator's job (see [`NavigationStateMachine::forced_recovery`]).
    pub fn decide(&self, state: &AgentState, readings: SensorReadings, violated: bool) -> Decision {
        if state.mode.is_recovering() {
            return self.advance_recovery(state);
        }

        if violated {
            return self.enter_recovery(RecoveryCause::Violation);
        }
        if readings.front {
            return self.enter_recovery(RecoveryCause::FrontSensor);
        }

        let mut decision = Decision::hold(state);
        // Left wins when both sides see something.
        if readings.left {
            decision.heading_delta = -self.rotation_speed / 2.0;
        } else if readings.right {
            decision.heading_delta = self.rotation_speed / 2.0;
        }
        decision
    }

    /// Recovery state imposed after a rejected move, or `None` when the restart policy
    /// leaves an ongoing recovery alone.
    pub fn forced_recovery(&self, state: &AgentState) -> Option<Decision> {
        if !state.mode.is_recovering() {
            return Some(self.enter_recovery(RecoveryCause::Violation));
        }
        if !self.recovery.restart_on_violation {
            return None;
        }
        Some(Decision {
            transition: Some(Transition::RestartRecovery),
            ..self.enter_recovery(RecoveryCause::Violation)
        })
    }

    fn enter_recovery(&self, cause: RecoveryCause) -> Decision {
        Decision {
            mode: NavMode::for_recovery_tick(0, self.recovery.reverse_ticks),
            recovery_tick: 0,
            heading_delta: 0.0,
            transition: Some(Transition::EnterRecovery { cause }),
        }
    }

    fn advance_recovery(&self, state: &AgentState) -> Decision {
        let next = state.recovery_tick.saturating_add(1);
        if next > self.recovery.turn_until {
            return Decision {
                mode: NavMode::Cruising,
                recovery_tick: 0,
                heading_delta: 0.0,
                transition: Some(Transition::Resume),
            };
        }

        let mode = NavMode::for_recovery_tick(next, self.recovery.reverse_ticks);
        let transition = (mode == NavMode::RecoveringTurn
            && state.mode == NavMode::RecoveringReverse)
            .then_some(Transition::BeginTurn);
        Decision {
            mode,
            recovery_tick: next,
            heading_delta: 0.0,
            transition,
        }
    }
}
