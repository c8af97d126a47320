use roam_core::{AgentState, Arena, ConfigError, NavMode, Obstacle, SensorId, SimConfig, Vec2};
use roam_nav::{initialize, Simulation, HEADING_INDICATOR_LENGTH};
use roam_tools::{tags, TraceLog};

fn classic_obstacles() -> Vec<Obstacle> {
    vec![
        Obstacle::new(200.0, 150.0, 100.0, 300.0),
        Obstacle::new(500.0, 100.0, 150.0, 150.0),
        Obstacle::new(350.0, 400.0, 200.0, 50.0),
    ]
}

#[test]
fn initialize_accepts_the_classic_layout() {
    let sim = initialize(
        SimConfig::default(),
        Arena::new(800.0, 600.0),
        classic_obstacles(),
        AgentState::new(Vec2::new(400.0, 300.0), 0.0),
    )
    .expect("classic layout is valid");

    assert_eq!(sim.tick_count(), 0);
    assert_eq!(sim.mode(), NavMode::Cruising);
    assert_eq!(sim.readings(), Default::default());
    assert!(sim.last_report().is_none());
}

#[test]
fn initialize_rejects_agent_inside_obstacle() {
    let err = initialize(
        SimConfig::default(),
        Arena::new(800.0, 600.0),
        classic_obstacles(),
        AgentState::new(Vec2::new(250.0, 300.0), 0.0),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::AgentOverlapsObstacle { index: 0 });
}

#[test]
fn initialize_rejects_zero_size_arena() {
    let err = initialize(
        SimConfig::default(),
        Arena::new(800.0, 0.0),
        Vec::new(),
        AgentState::new(Vec2::new(400.0, 300.0), 0.0),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidArena { .. }));
}

#[test]
fn initialize_rejects_non_finite_pose() {
    let err = initialize(
        SimConfig::default(),
        Arena::new(800.0, 600.0),
        Vec::new(),
        AgentState::new(Vec2::new(400.0, 300.0), f32::NAN),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::NonFiniteAgent);
}

#[test]
fn initialize_rejects_bad_tuning() {
    let config = SimConfig {
        rotation_speed: f32::INFINITY,
        ..SimConfig::default()
    };
    let err = initialize(
        config,
        Arena::new(800.0, 600.0),
        Vec::new(),
        AgentState::new(Vec2::new(400.0, 300.0), 0.0),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidParameter {
            name: "rotation_speed",
            ..
        }
    ));
}

#[test]
fn initialize_rejects_inconsistent_recovery_state() {
    let mut agent = AgentState::new(Vec2::new(400.0, 300.0), 0.0);
    agent.recovery_tick = 5;
    let err = initialize(
        SimConfig::default(),
        Arena::new(800.0, 600.0),
        Vec::new(),
        agent,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::InconsistentMode {
            mode: NavMode::Cruising,
            recovery_tick: 5
        }
    );

    agent.mode = NavMode::RecoveringTurn;
    assert!(initialize(
        SimConfig::default(),
        Arena::new(800.0, 600.0),
        Vec::new(),
        agent,
    )
    .is_err());

    agent.recovery_tick = 45;
    assert!(initialize(
        SimConfig::default(),
        Arena::new(800.0, 600.0),
        Vec::new(),
        agent,
    )
    .is_ok());
}

#[test]
fn identical_simulations_stay_identical() {
    let mut a = Simulation::classic().expect("classic");
    let mut b = Simulation::classic().expect("classic");

    for _ in 0..2000 {
        a.step();
        b.step();
        assert_eq!(a.state(), b.state());
        assert_eq!(a.last_report(), b.last_report());
    }
    assert_eq!(a.tick_count(), 2000);
}

#[test]
fn readings_mirror_the_latest_report() {
    let mut sim = Simulation::classic().expect("classic");
    for _ in 0..400 {
        sim.step();
        let report = sim.last_report().copied().expect("report");
        assert_eq!(sim.readings(), report.readings);
    }
}

#[test]
fn overlay_matches_published_state() {
    let mut sim = Simulation::classic().expect("classic");
    sim.run(50);

    let overlay = sim.overlay();
    let state = *sim.state();
    assert_eq!(overlay.footprint, state.bounds(sim.config().agent));
    assert_eq!(overlay.mode, state.mode);
    assert_eq!(overlay.obstacles.len(), 3);
    assert!(
        (overlay.heading_end.distance(overlay.heading_start) - HEADING_INDICATOR_LENGTH).abs()
            < 1e-3
    );

    let ids: Vec<SensorId> = overlay.sensors.iter().map(|s| s.id).collect();
    assert_eq!(ids, SensorId::ALL.to_vec());
    for sensor in &overlay.sensors {
        assert_eq!(sensor.start, state.position);
        assert_eq!(sensor.hit, sim.readings().get(sensor.id));
        let expected = sim.config().sensors.get(sensor.id).max_length;
        assert!((sensor.end.distance(sensor.start) - expected).abs() < 1e-3);
    }
}

#[test]
fn trace_records_the_recovery_cycle() {
    let world = roam_core::World::new(Arena::new(400.0, 400.0), Vec::new()).expect("world");
    let mut sim = Simulation::new(
        SimConfig::default(),
        world,
        AgentState::new(Vec2::new(26.0, 200.0), 180.0),
    )
    .expect("valid setup");

    let mut log = TraceLog::default();
    for _ in 0..62 {
        sim.step_traced(&mut log);
    }

    let tagged = |tag: &str| -> Vec<u64> {
        log.events
            .iter()
            .filter(|e| e.tag == tag)
            .map(|e| e.tick)
            .collect()
    };

    assert_eq!(tagged(tags::VIOLATION), vec![1]);
    assert_eq!(tagged(tags::ENTER_RECOVERY), vec![1]);
    assert_eq!(tagged(tags::BEGIN_TURN), vec![31]);
    assert_eq!(tagged(tags::RESUME), vec![62]);
    assert_eq!(log.events[0].detail.as_deref(), Some("boundary"));
    assert_eq!(sim.mode(), NavMode::Cruising);
}
