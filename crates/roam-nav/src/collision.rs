use roam_core::{Rect, World};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which constraints a footprint breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Violation {
    pub obstacle: bool,
    pub boundary: bool,
}

impl Violation {
    pub fn any(&self) -> bool {
        self.obstacle || self.boundary
    }

    pub fn describe(&self) -> &'static str {
        match (self.obstacle, self.boundary) {
            (true, true) => "obstacle+boundary",
            (true, false) => "obstacle",
            (false, true) => "boundary",
            (false, false) => "none",
        }
    }
}

/// Footprint checks against the static world.
#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector<'w> {
    world: &'w World,
}

impl<'w> CollisionDetector<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }

    /// Any overlap with an obstacle, touching edges included.
    pub fn collides_obstacle(&self, rect: &Rect) -> bool {
        self.world
            .obstacles()
            .iter()
            .any(|obstacle| obstacle.rect().intersects(rect))
    }

    pub fn out_of_bounds(&self, rect: &Rect) -> bool {
        let arena = self.world.bounds();
        rect.left() < 0.0
            || rect.right() > arena.width
            || rect.top() < 0.0
            || rect.bottom() > arena.height
    }

    pub fn check(&self, rect: &Rect) -> Violation {
        Violation {
            obstacle: self.collides_obstacle(rect),
            boundary: self.out_of_bounds(rect),
        }
    }
}
