use crate::{ConfigError, Rect, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static axis-aligned obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Arena bounds spanning `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Immutable obstacle layout and arena bounds.
///
/// Only constructible through [`World::new`], so every `World` in circulation has already
/// been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    arena: Arena,
    obstacles: Vec<Obstacle>,
}

impl World {
    pub fn new(arena: Arena, obstacles: Vec<Obstacle>) -> Result<Self, ConfigError> {
        if !(arena.width.is_finite() && arena.height.is_finite())
            || arena.width <= 0.0
            || arena.height <= 0.0
        {
            return Err(ConfigError::InvalidArena {
                width: arena.width,
                height: arena.height,
            });
        }

        for (index, obstacle) in obstacles.iter().enumerate() {
            let rect = obstacle.rect();
            if !rect.is_finite() || rect.width <= 0.0 || rect.height <= 0.0 {
                return Err(ConfigError::DegenerateObstacle { index });
            }
        }

        Ok(Self { arena, obstacles })
    }

    /// The 800x600 arena with three wall blocks used by the demo driver.
    pub fn classic() -> Self {
        Self {
            arena: Arena::new(800.0, 600.0),
            obstacles: vec![
                Obstacle::new(200.0, 150.0, 100.0, 300.0),
                Obstacle::new(500.0, 100.0, 150.0, 150.0),
                Obstacle::new(350.0, 400.0, 200.0, 50.0),
            ],
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn bounds(&self) -> Arena {
        self.arena
    }

    /// Reject an agent footprint that starts outside the arena or inside an obstacle.
    pub fn check_placement(&self, footprint: Rect) -> Result<(), ConfigError> {
        if !footprint.is_finite() {
            return Err(ConfigError::NonFiniteAgent);
        }
        if !self.arena.rect().contains_rect(&footprint) {
            return Err(ConfigError::AgentOutOfBounds);
        }
        if let Some(index) = self
            .obstacles
            .iter()
            .position(|o| o.rect().intersects(&footprint))
        {
            return Err(ConfigError::AgentOverlapsObstacle { index });
        }
        Ok(())
    }
}
