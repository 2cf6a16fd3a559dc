//! Zone constraints applied after collisions
//!
//! Mallets are held in their own half; the puck is held on the table, except
//! that it may travel through a goal opening into the goal mouth.

use glam::Vec2;

use super::geometry::{Rect, TableGeometry, Zone};
use super::state::{Mallet, Puck};
use crate::tuning::Tuning;

/// Legal region for the puck centre given its current x
pub fn puck_region(puck: &Puck, table: &TableGeometry, tuning: &Tuning) -> Rect {
    let r = puck.body.radius;
    let m = tuning.puck_margin;
    let b = &table.bounds;
    let mut region = Rect::new(b.min_x + r + m, b.max_x - r - m, b.min_y + r + m, b.max_y - r - m);
    if table.in_goal_span(puck.body.pos.x) {
        region.min_y = table.top_goal.min_y + r;
        region.max_y = table.bottom_goal.max_y - r;
    }
    region
}

/// Clamp the puck onto the table, damping fast pucks that needed correcting
///
/// Returns true if the position was corrected.
pub fn constrain_puck(puck: &mut Puck, table: &TableGeometry, tuning: &Tuning) -> bool {
    let region = puck_region(puck, table, tuning);
    let clamped = region.clamp(puck.body.pos);
    if clamped == puck.body.pos {
        return false;
    }
    puck.body.pos = clamped;
    let vel = puck.body.vel;
    if vel.x.abs() > tuning.jitter_speed || vel.y.abs() > tuning.jitter_speed {
        puck.body.vel = vel * tuning.jitter_damping;
    }
    true
}

/// Clamp a mallet position into its zone
#[inline]
pub fn clamp_to_zone(pos: Vec2, zone: &Zone) -> Vec2 {
    zone.clamp(pos)
}

/// Clamp a mallet into its player's zone
pub fn constrain_mallet(mallet: &mut Mallet, table: &TableGeometry) -> bool {
    let clamped = clamp_to_zone(mallet.body.pos, table.zone(mallet.player));
    if clamped == mallet.body.pos {
        return false;
    }
    mallet.body.pos = clamped;
    true
}

/// Apply every zone constraint
pub fn constrain_all(
    puck: &mut Puck,
    mallets: &mut [Mallet],
    table: &TableGeometry,
    tuning: &Tuning,
) {
    constrain_puck(puck, table, tuning);
    for mallet in mallets.iter_mut() {
        constrain_mallet(mallet, table);
    }
}
