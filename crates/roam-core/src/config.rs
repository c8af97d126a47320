//! Simulation tuning, defaulting to the classic demo constants.

use crate::{AgentShape, ConfigError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a sensor ray decides whether it sees an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorModel {
    /// The ray's axis-aligned bounding box overlaps an obstacle.
    ///
    /// Coarse: a long diagonal ray can report a hit near a corner it never crosses.
    #[default]
    BoundingBox,
    /// The ray segment itself crosses an obstacle.
    Segment,
}

/// One ray, relative to the agent heading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSpec {
    /// Degrees added to the agent heading.
    pub angle_offset: f32,
    pub max_length: f32,
}

impl SensorSpec {
    pub const fn new(angle_offset: f32, max_length: f32) -> Self {
        Self {
            angle_offset,
            max_length,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorLayout {
    pub front: SensorSpec,
    pub left: SensorSpec,
    pub right: SensorSpec,
}

impl Default for SensorLayout {
    fn default() -> Self {
        Self {
            front: SensorSpec::new(0.0, 80.0),
            left: SensorSpec::new(45.0, 60.0),
            right: SensorSpec::new(-45.0, 60.0),
        }
    }
}

impl SensorLayout {
    pub fn get(&self, id: SensorId) -> SensorSpec {
        match id {
            SensorId::Front => self.front,
            SensorId::Left => self.left,
            SensorId::Right => self.right,
        }
    }
}

/// Which of the three rays a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorId {
    Front,
    Left,
    Right,
}

impl SensorId {
    /// Fixed scan order.
    pub const ALL: [SensorId; 3] = [SensorId::Front, SensorId::Left, SensorId::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecoveryConfig {
    /// Counter values below this reverse; at or above it the agent turns in place.
    pub reverse_ticks: u32,
    /// Last counter value that still turns; recovery ends once the counter passes it.
    pub turn_until: u32,
    /// Whether a violation during recovery restarts recovery from zero.
    ///
    /// Off by default: only the pose is rolled back and the counter keeps advancing, so a
    /// reverse that is blocked on every tick still reaches the turn phase. Restarting can
    /// pin an agent wedged in a corner in reverse indefinitely.
    pub restart_on_violation: bool,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            reverse_ticks: 30,
            turn_until: 60,
            restart_on_violation: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Distance travelled per tick while cruising or reversing.
    pub speed: f32,
    /// Degrees turned per tick while recovering; steering uses half of it.
    pub rotation_speed: f32,
    pub agent: AgentShape,
    pub sensors: SensorLayout,
    pub sensor_model: SensorModel,
    pub recovery: RecoveryConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            rotation_speed: 2.0,
            agent: AgentShape::default(),
            sensors: SensorLayout::default(),
            sensor_model: SensorModel::default(),
            recovery: RecoveryConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("speed", self.speed)?;
        non_negative("rotation_speed", self.rotation_speed)?;
        positive("agent.width", self.agent.width)?;
        positive("agent.height", self.agent.height)?;

        let sensors = [
            ("sensors.front.angle_offset", "sensors.front.max_length", self.sensors.front),
            ("sensors.left.angle_offset", "sensors.left.max_length", self.sensors.left),
            ("sensors.right.angle_offset", "sensors.right.max_length", self.sensors.right),
        ];
        for (angle_name, length_name, spec) in sensors {
            if !spec.angle_offset.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name: angle_name,
                    value: spec.angle_offset,
                });
            }
            positive(length_name, spec.max_length)?;
        }

        if self.recovery.turn_until < self.recovery.reverse_ticks {
            return Err(ConfigError::RecoveryThresholds {
                reverse_ticks: self.recovery.reverse_ticks,
                turn_until: self.recovery.turn_until,
            });
        }

        Ok(())
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
