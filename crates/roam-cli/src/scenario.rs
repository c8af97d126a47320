//! Scenario files: arena, obstacles, spawn pose, and tuning in one YAML document.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use roam_core::{AgentState, Arena, ConfigError, Obstacle, SimConfig, Vec2, World};
use roam_nav::{initialize, Simulation};

/// Written by `roam init`.
pub const DEFAULT_SCENARIO: &str = r#"# roam scenario

arena:
  width: 800.0
  height: 600.0

obstacles:
  - { x: 200.0, y: 150.0, width: 100.0, height: 300.0 }
  - { x: 500.0, y: 100.0, width: 150.0, height: 150.0 }
  - { x: 350.0, y: 400.0, width: 200.0, height: 50.0 }

# Omit to spawn at the arena center facing right.
agent:
  position: { x: 400.0, y: 300.0 }
  heading: 0.0

# Every field is optional and falls back to these values.
tuning:
  speed: 2.0
  rotation_speed: 2.0
  agent: { width: 50.0, height: 30.0 }
  sensors:
    front: { angle_offset: 0.0, max_length: 80.0 }
    left: { angle_offset: 45.0, max_length: 60.0 }
    right: { angle_offset: -45.0, max_length: 60.0 }
  sensor_model: bounding_box
  recovery:
    reverse_ticks: 30
    turn_until: 60
    restart_on_violation: false
"#;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub position: Vec2,
    #[serde(default)]
    pub heading: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_arena")]
    pub arena: Arena,

    #[serde(default = "default_obstacles")]
    pub obstacles: Vec<Obstacle>,

    /// Spawn pose; defaults to the arena center facing right.
    #[serde(default)]
    pub agent: Option<Spawn>,

    #[serde(default)]
    pub tuning: SimConfig,
}

fn default_arena() -> Arena {
    World::classic().bounds()
}

fn default_obstacles() -> Vec<Obstacle> {
    World::classic().obstacles().to_vec()
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            arena: default_arena(),
            obstacles: default_obstacles(),
            agent: None,
            tuning: SimConfig::default(),
        }
    }
}

impl Scenario {
    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        let scenario: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))?;
        Ok(scenario)
    }

    /// Load from a path when given, otherwise use the classic layout
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn spawn(&self) -> AgentState {
        match self.agent {
            Some(spawn) => AgentState::new(spawn.position, spawn.heading),
            None => AgentState::new(self.arena.center(), 0.0),
        }
    }

    pub fn build(&self) -> Result<Simulation, ConfigError> {
        initialize(self.tuning, self.arena, self.obstacles.clone(), self.spawn())
    }
}
