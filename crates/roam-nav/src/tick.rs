use roam_core::{AgentState, Pose, SimConfig, World};
use roam_tools::{tags, NullTraceSink, TraceEvent, TraceSink};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::machine::{RecoveryCause, Transition};
use crate::{
    kinematics, CollisionDetector, MotionCommand, NavigationStateMachine, SensorArray,
    SensorReadings, Violation,
};

/// What happened during one tick, for rendering and debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickReport {
    /// Readings taken from the pose the tick started in.
    pub readings: SensorReadings,
    pub command: MotionCommand,
    /// Constraints the proposed move broke; any violation means the move was rolled back.
    pub violation: Violation,
    pub transition: Option<Transition>,
    /// Pose the tick started from.
    pub previous: Pose,
}

impl TickReport {
    pub fn rolled_back(&self) -> bool {
        self.violation.any()
    }
}

/// Runs the fixed per-tick pipeline: sense, move, validate, roll back, decide.
#[derive(Debug, Clone, Copy)]
pub struct TickOrchestrator<'a> {
    config: &'a SimConfig,
    sensors: SensorArray<'a>,
    collisions: CollisionDetector<'a>,
    machine: NavigationStateMachine,
}

impl<'a> TickOrchestrator<'a> {
    pub fn new(world: &'a World, config: &'a SimConfig) -> Self {
        Self {
            config,
            sensors: SensorArray::new(world, config.sensors, config.sensor_model),
            collisions: CollisionDetector::new(world),
            machine: NavigationStateMachine::new(config),
        }
    }

    pub fn step(&self, state: AgentState) -> (AgentState, TickReport) {
        self.step_traced(0, state, &mut NullTraceSink)
    }

    /// Advance `state` by one tick, emitting notable events to `sink` tagged with `tick`.
    pub fn step_traced(
        &self,
        tick: u64,
        state: AgentState,
        sink: &mut dyn TraceSink,
    ) -> (AgentState, TickReport) {
        let start = state;
        let previous = start.pose();

        let readings = self.sensors.scan(previous.position, previous.heading);

        let command = self.machine.command(&start);
        let mut next = start;
        kinematics::apply(
            &mut next,
            command,
            self.config.speed,
            self.machine.rotation_speed(),
        );

        let footprint = next.bounds(self.config.agent);
        let violation = self.collisions.check(&footprint);
        let violated = violation.any();
        if violated {
            next.restore(previous);
        }

        let mut decision = self.machine.decide(&start, readings, violated);
        if violated {
            if let Some(forced) = self.machine.forced_recovery(&start) {
                decision = forced;
            }
        }
        decision.apply(&mut next);

        tracing::trace!(
            tick,
            ?command,
            mode = %next.mode,
            recovery_tick = next.recovery_tick,
            x = next.position.x,
            y = next.position.y,
            heading = next.heading,
            "tick"
        );

        if violated {
            tracing::debug!(tick, kind = violation.describe(), "move rolled back");
            sink.emit(
                TraceEvent::new(tick, tags::VIOLATION)
                    .with_state(&next)
                    .with_detail(violation.describe()),
            );
        }

        if let Some(transition) = decision.transition {
            tracing::debug!(tick, ?transition, mode = %next.mode, "navigation transition");
            sink.emit(transition_event(tick, transition, &next));
        } else if decision.heading_delta != 0.0 {
            sink.emit(
                TraceEvent::new(tick, tags::STEER)
                    .with_state(&next)
                    .with_detail(if decision.heading_delta < 0.0 { "left" } else { "right" }),
            );
        }

        let report = TickReport {
            readings,
            command,
            violation,
            transition: decision.transition,
            previous,
        };
        (next, report)
    }
}

fn transition_event(tick: u64, transition: Transition, state: &AgentState) -> TraceEvent {
    let event = match transition {
        Transition::EnterRecovery { cause } => TraceEvent::new(tick, tags::ENTER_RECOVERY)
            .with_detail(match cause {
                RecoveryCause::Violation => "violation",
                RecoveryCause::FrontSensor => "front_sensor",
            }),
        Transition::RestartRecovery => TraceEvent::new(tick, tags::RESTART_RECOVERY),
        Transition::BeginTurn => TraceEvent::new(tick, tags::BEGIN_TURN),
        Transition::Resume => TraceEvent::new(tick, tags::RESUME),
    };
    event.with_state(state)
}

/// Advance one tick without keeping a report.
pub fn tick(world: &World, config: &SimConfig, state: AgentState) -> AgentState {
    TickOrchestrator::new(world, config).step(state).0
}
