use glam::Vec2;

use crate::components::{Facing, PlayerSlot};
use crate::params::Params;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Fixed arena every match is fought in
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub ground_y: f32,
    pub min_x: f32,
    pub max_x: f32,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            ground_y: Params::GROUND_Y,
            min_x: Params::STAGE_MIN_X,
            max_x: Params::STAGE_MAX_X,
        }
    }
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn position for a slot (feet on the ground)
    pub fn spawn(&self, slot: PlayerSlot) -> Vec2 {
        match slot {
            PlayerSlot::One => Vec2::new(Params::SPAWN_X_ONE, self.ground_y),
            PlayerSlot::Two => Vec2::new(Params::SPAWN_X_TWO, self.ground_y),
        }
    }

    /// Slot one starts on the left looking right.
    pub fn spawn_facing(&self, slot: PlayerSlot) -> Facing {
        match slot {
            PlayerSlot::One => Facing::Right,
            PlayerSlot::Two => Facing::Left,
        }
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.min_x, self.max_x)
    }
}
