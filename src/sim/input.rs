//! Pointer-driven mallet steering

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Zone;
use super::zone::clamp_to_zone;

/// Pointer state for one mallet, already in world coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub x: f32,
    pub y: f32,
    /// Pointer is held down; the mallet only follows while engaged
    pub engaged: bool,
}

impl PointerInput {
    pub fn held(x: f32, y: f32) -> Self {
        Self { x, y, engaged: true }
    }

    pub fn released() -> Self {
        Self::default()
    }

    /// Target position, if the pointer is engaged
    pub fn target(&self) -> Option<Vec2> {
        self.engaged.then(|| Vec2::new(self.x, self.y))
    }
}

/// Next mallet position when following a pointer
///
/// Moves `base_lerp * sensitivity` of the way toward the target, then clamps
/// into the zone. A released pointer leaves the mallet where it is.
pub fn steer_toward_pointer(
    current: Vec2,
    pointer: &PointerInput,
    base_lerp: f32,
    sensitivity: f32,
    zone: &Zone,
) -> Vec2 {
    let Some(target) = pointer.target() else {
        return current;
    };
    let t = (base_lerp * sensitivity).clamp(0.0, 1.0);
    clamp_to_zone(current.lerp(target, t), zone)
}
