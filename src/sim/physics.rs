//! Puck integration: drag, per-axis speed cap, position update
//!
//! Mallets are never integrated here; their positions come from input or AI.

use super::state::Puck;
use crate::clamp_per_axis;

/// Advance the puck by one tick of `dt` seconds
pub fn step_puck(puck: &mut Puck, dt: f32) {
    let body = &mut puck.body;
    body.vel *= 1.0 / (1.0 + puck.drag);
    body.vel = clamp_per_axis(body.vel, puck.max_speed);
    body.pos += body.vel * dt;
}
