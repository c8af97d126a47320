//! Deterministic arena geometry, agent state, and tuning for the roam simulation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod error;
pub mod math;
pub mod world;

pub use agent::{AgentShape, AgentState, NavMode, Pose};
pub use config::{RecoveryConfig, SensorId, SensorLayout, SensorModel, SensorSpec, SimConfig};
pub use error::ConfigError;
pub use math::{normalize_degrees, rotated_bounds, Rect, Vec2};
pub use world::{Arena, Obstacle, World};
