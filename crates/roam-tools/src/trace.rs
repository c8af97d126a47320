#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use roam_core::{AgentState, NavMode, Vec2};

/// Well-known event tags emitted by the tick orchestrator.
pub mod tags {
    /// A post-move footprint hit an obstacle or left the arena and was rolled back.
    pub const VIOLATION: &str = "violation";
    /// Cruising ended and the reverse phase of recovery begins.
    pub const ENTER_RECOVERY: &str = "enter_recovery";
    /// A violation during recovery restarted the recovery counter.
    pub const RESTART_RECOVERY: &str = "restart_recovery";
    /// Reverse phase finished; the agent turns in place.
    pub const BEGIN_TURN: &str = "begin_turn";
    /// Recovery finished; the agent cruises again.
    pub const RESUME: &str = "resume";
    /// A side sensor nudged the heading while cruising.
    pub const STEER: &str = "steer";
}

/// A small trace event describing one notable thing that happened in a tick.
///
/// This is intentionally "dumb data": it carries the published agent state at the time
/// of the event plus a free-form detail string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub mode: NavMode,
    pub position: Vec2,
    pub heading: f32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub detail: Option<Cow<'static, str>>,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            mode: NavMode::Cruising,
            position: Vec2::ZERO,
            heading: 0.0,
            detail: None,
        }
    }

    pub fn with_state(mut self, state: &AgentState) -> Self {
        self.mode = state.mode;
        self.position = state.position;
        self.heading = state.heading;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<Cow<'static, str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Accumulated events, e.g. for dumping after a headless run.
#[derive(Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn count(&self, tag: &str) -> usize {
        self.events.iter().filter(|e| e.tag == tag).count()
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn emit(&mut self, event: TraceEvent) {
        (**self).emit(event);
    }
}
