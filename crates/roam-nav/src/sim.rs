use roam_core::{AgentState, Arena, ConfigError, NavMode, Obstacle, SimConfig, Vec2, World};
use roam_tools::{NullTraceSink, TraceSink};

use crate::{Overlay, SensorReadings, TickOrchestrator, TickReport};

/// Validate a setup and build a simulation ready to tick.
///
/// This is the only way to obtain a [`Simulation`], so no tick ever runs on a rejected
/// configuration.
pub fn initialize(
    config: SimConfig,
    arena: Arena,
    obstacles: Vec<Obstacle>,
    agent: AgentState,
) -> Result<Simulation, ConfigError> {
    let world = World::new(arena, obstacles)?;
    Simulation::new(config, world, agent)
}

/// Driver-facing owner of the world, the tuning, and the evolving agent state.
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    config: SimConfig,
    state: AgentState,
    tick: u64,
    last_report: Option<TickReport>,
}

impl Simulation {
    pub fn new(config: SimConfig, world: World, agent: AgentState) -> Result<Self, ConfigError> {
        config.validate()?;

        if !agent.is_finite() {
            return Err(ConfigError::NonFiniteAgent);
        }
        check_mode(&config, &agent)?;
        world.check_placement(agent.bounds(config.agent))?;

        tracing::debug!(
            obstacles = world.obstacles().len(),
            width = world.bounds().width,
            height = world.bounds().height,
            "simulation initialized"
        );

        Ok(Self {
            world,
            config,
            state: agent,
            tick: 0,
            last_report: None,
        })
    }

    /// The classic arena with the agent at its center facing right.
    pub fn classic() -> Result<Self, ConfigError> {
        let world = World::classic();
        let agent = AgentState::new(world.bounds().center(), 0.0);
        Self::new(SimConfig::default(), world, agent)
    }

    pub fn step(&mut self) -> &AgentState {
        self.step_traced(&mut NullTraceSink)
    }

    pub fn step_traced(&mut self, sink: &mut dyn TraceSink) -> &AgentState {
        self.tick += 1;
        let orchestrator = TickOrchestrator::new(&self.world, &self.config);
        let (next, report) = orchestrator.step_traced(self.tick, self.state, sink);
        self.state = next;
        self.last_report = Some(report);
        &self.state
    }

    /// Run `ticks` steps, returning the final state.
    pub fn run(&mut self, ticks: u64) -> &AgentState {
        for _ in 0..ticks {
            self.step();
        }
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn heading(&self) -> f32 {
        self.state.heading
    }

    pub fn mode(&self) -> NavMode {
        self.state.mode
    }

    /// Number of ticks executed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    /// Sensor hits from the most recent tick (all clear before the first tick).
    pub fn readings(&self) -> SensorReadings {
        self.last_report
            .map(|report| report.readings)
            .unwrap_or_default()
    }

    pub fn overlay(&self) -> Overlay {
        Overlay::build(&self.world, &self.config, &self.state, self.readings())
    }
}

fn check_mode(config: &SimConfig, agent: &AgentState) -> Result<(), ConfigError> {
    let consistent = match agent.mode {
        NavMode::Cruising => agent.recovery_tick == 0,
        mode => {
            let expected =
                NavMode::for_recovery_tick(agent.recovery_tick, config.recovery.reverse_ticks);
            agent.recovery_tick <= config.recovery.turn_until && mode == expected
        }
    };
    if consistent {
        Ok(())
    } else {
        Err(ConfigError::InconsistentMode {
            mode: agent.mode,
            recovery_tick: agent.recovery_tick,
        })
    }
}
