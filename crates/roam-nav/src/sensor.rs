use roam_core::{Rect, SensorId, SensorLayout, SensorModel, Vec2, World};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hit flags from one scan, recomputed every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorReadings {
    pub front: bool,
    pub left: bool,
    pub right: bool,
}

impl SensorReadings {
    pub fn get(&self, id: SensorId) -> bool {
        match id {
            SensorId::Front => self.front,
            SensorId::Left => self.left,
            SensorId::Right => self.right,
        }
    }

    pub fn any(&self) -> bool {
        self.front || self.left || self.right
    }
}

/// A sensor ray resolved against a concrete pose.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorRay {
    pub id: SensorId,
    pub start: Vec2,
    pub end: Vec2,
}

/// The front/left/right distance sensors mounted on the agent.
#[derive(Debug, Clone, Copy)]
pub struct SensorArray<'w> {
    world: &'w World,
    layout: SensorLayout,
    model: SensorModel,
}

impl<'w> SensorArray<'w> {
    pub fn new(world: &'w World, layout: SensorLayout, model: SensorModel) -> Self {
        Self {
            world,
            layout,
            model,
        }
    }

    pub fn ray(&self, id: SensorId, origin: Vec2, heading: f32) -> SensorRay {
        let spec = self.layout.get(id);
        SensorRay {
            id,
            start: origin,
            end: origin + Vec2::from_angle_degrees(heading + spec.angle_offset) * spec.max_length,
        }
    }

    /// Whether a ray of `max_length` from `origin` along `angle` (degrees) sees an obstacle.
    pub fn cast(&self, origin: Vec2, angle: f32, max_length: f32) -> bool {
        let end = origin + Vec2::from_angle_degrees(angle) * max_length;
        self.world
            .obstacles()
            .iter()
            .any(|obstacle| ray_hits(self.model, origin, end, &obstacle.rect()))
    }

    /// Cast all three sensors from a pose.
    pub fn scan(&self, origin: Vec2, heading: f32) -> SensorReadings {
        let hit = |id: SensorId| {
            let spec = self.layout.get(id);
            self.cast(origin, heading + spec.angle_offset, spec.max_length)
        };
        SensorReadings {
            front: hit(SensorId::Front),
            left: hit(SensorId::Left),
            right: hit(SensorId::Right),
        }
    }
}

fn ray_hits(model: SensorModel, start: Vec2, end: Vec2, rect: &Rect) -> bool {
    match model {
        SensorModel::BoundingBox => Rect::from_corners(start, end).intersects(rect),
        SensorModel::Segment => segment_intersects_rect(start, end, rect),
    }
}

/// Exact segment-vs-rectangle test (Liang-Barsky clipping), edges inclusive.
pub fn segment_intersects_rect(start: Vec2, end: Vec2, rect: &Rect) -> bool {
    let d = end - start;
    let mut t_enter = 0.0f32;
    let mut t_exit = 1.0f32;

    let slabs = [
        (-d.x, start.x - rect.left()),
        (d.x, rect.right() - start.x),
        (-d.y, start.y - rect.top()),
        (d.y, rect.bottom() - start.y),
    ];

    for (p, q) in slabs {
        if p == 0.0 {
            // Parallel to this slab: reject if outside it.
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return false;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return false;
            }
            t_exit = t_exit.min(t);
        }
    }

    true
}
