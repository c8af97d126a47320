//! Render-facing geometry for debug drawing.
//!
//! Drivers draw the agent footprint, a heading indicator, and the three sensor rays.
//! Everything here is derived from the published state, so the footprint is the exact
//! rectangle collision checks use.

use roam_core::{AgentState, NavMode, Rect, SensorId, SimConfig, Vec2, World};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{SensorArray, SensorReadings};

/// Length of the heading indicator drawn from the agent center.
pub const HEADING_INDICATOR_LENGTH: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorOverlay {
    pub id: SensorId,
    pub start: Vec2,
    pub end: Vec2,
    pub hit: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Overlay {
    pub footprint: Rect,
    pub heading_start: Vec2,
    pub heading_end: Vec2,
    pub sensors: [SensorOverlay; 3],
    pub mode: NavMode,
    pub obstacles: Vec<Rect>,
}

impl Overlay {
    /// Overlay for `state`, flagging rays with the hits from the most recent tick.
    pub fn build(
        world: &World,
        config: &SimConfig,
        state: &AgentState,
        readings: SensorReadings,
    ) -> Self {
        let sensors = SensorArray::new(world, config.sensors, config.sensor_model);
        let ray = |id: SensorId| {
            let ray = sensors.ray(id, state.position, state.heading);
            SensorOverlay {
                id,
                start: ray.start,
                end: ray.end,
                hit: readings.get(id),
            }
        };

        Self {
            footprint: state.bounds(config.agent),
            heading_start: state.position,
            heading_end: state.position
                + Vec2::from_angle_degrees(state.heading) * HEADING_INDICATOR_LENGTH,
            sensors: [
                ray(SensorId::Front),
                ray(SensorId::Left),
                ray(SensorId::Right),
            ],
            mode: state.mode,
            obstacles: world.obstacles().iter().map(|o| o.rect()).collect(),
        }
    }
}
