use roam_core::{AgentState, NavMode, SimConfig, Vec2};
use roam_nav::{MotionCommand, NavigationStateMachine, RecoveryCause, SensorReadings, Transition};

fn machine() -> NavigationStateMachine {
    NavigationStateMachine::new(&SimConfig::default())
}

fn cruising() -> AgentState {
    AgentState::new(Vec2::new(100.0, 100.0), 0.0)
}

fn recovering(recovery_tick: u32) -> AgentState {
    let mut state = cruising();
    state.recovery_tick = recovery_tick;
    state.mode = NavMode::for_recovery_tick(recovery_tick, 30);
    state
}

const CLEAR: SensorReadings = SensorReadings {
    front: false,
    left: false,
    right: false,
};

#[test]
fn cruising_moves_forward() {
    assert_eq!(machine().command(&cruising()), MotionCommand::Forward);
}

#[test]
fn recovery_reverses_then_rotates() {
    let m = machine();
    assert_eq!(m.command(&recovering(0)), MotionCommand::Reverse);
    assert_eq!(m.command(&recovering(29)), MotionCommand::Reverse);
    assert_eq!(m.command(&recovering(30)), MotionCommand::Rotate);
    assert_eq!(m.command(&recovering(60)), MotionCommand::Rotate);
}

#[test]
fn clear_sensors_keep_course() {
    let decision = machine().decide(&cruising(), CLEAR, false);
    assert_eq!(decision.mode, NavMode::Cruising);
    assert_eq!(decision.heading_delta, 0.0);
    assert_eq!(decision.transition, None);
}

#[test]
fn left_sensor_wins_ties() {
    let readings = SensorReadings {
        front: false,
        left: true,
        right: true,
    };
    let decision = machine().decide(&cruising(), readings, false);
    assert_eq!(decision.mode, NavMode::Cruising);
    assert_eq!(decision.heading_delta, -1.0);
}

#[test]
fn right_sensor_turns_the_other_way() {
    let readings = SensorReadings {
        right: true,
        ..CLEAR
    };
    let decision = machine().decide(&cruising(), readings, false);
    assert_eq!(decision.heading_delta, 1.0);
}

#[test]
fn front_sensor_enters_recovery() {
    let readings = SensorReadings {
        front: true,
        left: true,
        ..CLEAR
    };
    let decision = machine().decide(&cruising(), readings, false);
    assert_eq!(decision.mode, NavMode::RecoveringReverse);
    assert_eq!(decision.recovery_tick, 0);
    assert_eq!(decision.heading_delta, 0.0);
    assert_eq!(
        decision.transition,
        Some(Transition::EnterRecovery {
            cause: RecoveryCause::FrontSensor
        })
    );
}

#[test]
fn violation_and_front_sensor_reach_the_same_state() {
    let m = machine();
    let by_sensor = m.decide(
        &cruising(),
        SensorReadings {
            front: true,
            ..CLEAR
        },
        false,
    );
    let by_violation = m.decide(&cruising(), CLEAR, true);
    let forced = m.forced_recovery(&cruising()).expect("cruising is always forced");

    for decision in [by_violation, forced] {
        assert_eq!(decision.mode, by_sensor.mode);
        assert_eq!(decision.recovery_tick, by_sensor.recovery_tick);
        assert_eq!(decision.heading_delta, by_sensor.heading_delta);
    }
}

#[test]
fn recovery_ignores_sensors() {
    let readings = SensorReadings {
        front: true,
        left: true,
        right: true,
    };
    let decision = machine().decide(&recovering(5), readings, false);
    assert_eq!(decision.mode, NavMode::RecoveringReverse);
    assert_eq!(decision.recovery_tick, 6);
    assert_eq!(decision.heading_delta, 0.0);
}

#[test]
fn counter_crossing_threshold_begins_turn() {
    let decision = machine().decide(&recovering(29), CLEAR, false);
    assert_eq!(decision.mode, NavMode::RecoveringTurn);
    assert_eq!(decision.recovery_tick, 30);
    assert_eq!(decision.transition, Some(Transition::BeginTurn));
}

#[test]
fn counter_past_turn_limit_resumes_cruising() {
    let m = machine();
    let still_turning = m.decide(&recovering(59), CLEAR, false);
    assert_eq!(still_turning.mode, NavMode::RecoveringTurn);
    assert_eq!(still_turning.recovery_tick, 60);

    let resumed = m.decide(&recovering(60), CLEAR, false);
    assert_eq!(resumed.mode, NavMode::Cruising);
    assert_eq!(resumed.recovery_tick, 0);
    assert_eq!(resumed.transition, Some(Transition::Resume));
}

#[test]
fn restart_policy_controls_forced_recovery() {
    let lenient = machine();
    assert!(!lenient.recovery().restart_on_violation);
    assert_eq!(lenient.forced_recovery(&recovering(40)), None);
    assert!(lenient.forced_recovery(&cruising()).is_some());

    let mut config = SimConfig::default();
    config.recovery.restart_on_violation = true;
    let strict = NavigationStateMachine::new(&config);
    let restart = strict.forced_recovery(&recovering(40)).expect("restart");
    assert_eq!(restart.mode, NavMode::RecoveringReverse);
    assert_eq!(restart.recovery_tick, 0);
    assert_eq!(restart.transition, Some(Transition::RestartRecovery));
}

#[test]
fn zero_reverse_ticks_skips_straight_to_turning() {
    let mut config = SimConfig::default();
    config.recovery.reverse_ticks = 0;
    let m = NavigationStateMachine::new(&config);

    let entered = m.decide(&cruising(), CLEAR, true);
    assert_eq!(entered.mode, NavMode::RecoveringTurn);

    let mut state = cruising();
    entered.apply(&mut state);
    assert_eq!(m.command(&state), MotionCommand::Rotate);
}
