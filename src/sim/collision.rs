//! Collision detection and response for the puck
//!
//! Three checks run each tick in a fixed order: outer walls, mallets, goal
//! mouths. Walls stop at the goal openings and goal mouths sit outside the
//! playable bounds, so a puck that bounced off a wall this tick is never
//! also scored.

use glam::Vec2;

use super::geometry::TableGeometry;
use super::state::{GameEvent, Mallet, Player, Puck};
use crate::tuning::Tuning;

/// Result of a circle contact check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact normal (pointing toward the puck centre)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Everything the resolver raised this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    pub wall_hit: bool,
    pub mallet_hits: Vec<Player>,
    pub goal: Option<Player>,
}

impl Contacts {
    /// Events in resolver order
    pub fn events(&self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.wall_hit {
            events.push(GameEvent::WallHit);
        }
        for &player in &self.mallet_hits {
            events.push(GameEvent::MalletHit { player });
        }
        if let Some(scorer) = self.goal {
            events.push(GameEvent::Goal { scorer });
        }
        events
    }
}

/// Bounce the puck off the side and end walls (not the goal gaps)
///
/// Returns true if any wall was hit.
pub fn resolve_walls(puck: &mut Puck, table: &TableGeometry) -> bool {
    let bounds = &table.bounds;
    let r = puck.body.radius;
    let e = puck.restitution;
    let body = &mut puck.body;
    let mut hit = false;

    if body.pos.x - r < bounds.min_x {
        body.pos.x = bounds.min_x + r;
        body.vel.x = body.vel.x.abs() * e;
        hit = true;
    } else if body.pos.x + r > bounds.max_x {
        body.pos.x = bounds.max_x - r;
        body.vel.x = -body.vel.x.abs() * e;
        hit = true;
    }

    // End walls only exist outside the goal opening
    if !table.in_goal_span(body.pos.x) {
        if body.pos.y - r < bounds.min_y {
            body.pos.y = bounds.min_y + r;
            body.vel.y = body.vel.y.abs() * e;
            hit = true;
        } else if body.pos.y + r > bounds.max_y {
            body.pos.y = bounds.max_y - r;
            body.vel.y = -body.vel.y.abs() * e;
            hit = true;
        }
    }

    hit
}

/// Check contact between the puck and a mallet
pub fn puck_mallet_contact(puck_pos: Vec2, puck_radius: f32, mallet: &Mallet) -> CollisionResult {
    let offset = puck_pos - mallet.body.pos;
    let dist = offset.length();
    let reach = puck_radius + mallet.body.radius;
    if dist > reach {
        return CollisionResult::miss();
    }

    // Coincident centres: push out of the mallet's own half
    let normal = if dist > f32::EPSILON {
        offset / dist
    } else {
        Vec2::new(0.0, -mallet.player.goal_direction())
    };
    CollisionResult {
        hit: true,
        normal,
        penetration: reach - dist,
    }
}

/// Deflection speed for a mallet hit
///
/// Faster incoming puck and deeper contact both push harder, up to
/// `hit_cap_factor * puck_max_speed`.
pub fn deflection_speed(incoming_speed: f32, overlap: f32, tuning: &Tuning) -> f32 {
    let base = tuning
        .min_hit_force
        .max(incoming_speed * tuning.hit_speed_factor);
    let proximity = tuning
        .proximity_floor
        .max(overlap / tuning.proximity_scale);
    let boost = proximity * tuning.proximity_gain;
    let cap = tuning.puck_max_speed * tuning.hit_cap_factor;
    (base * (1.0 + boost)).min(cap)
}

/// Deflect the puck off a mallet if they touch
///
/// The mallet acts as a fixed deflector: its own velocity is ignored. The
/// puck is moved out of the mallet so the same contact does not fire again
/// next tick.
pub fn resolve_mallet(puck: &mut Puck, mallet: &Mallet, tuning: &Tuning) -> bool {
    let contact = puck_mallet_contact(puck.body.pos, puck.body.radius, mallet);
    if !contact.hit {
        return false;
    }
    let speed = deflection_speed(puck.body.vel.length(), contact.penetration, tuning);
    puck.body.vel = contact.normal * speed;
    puck.body.pos += contact.normal * contact.penetration;
    true
}

/// Which player scores if the puck overlaps a goal mouth
pub fn check_goal(puck: &Puck, table: &TableGeometry) -> Option<Player> {
    let (pos, r) = (puck.body.pos, puck.body.radius);
    if table.top_goal.overlaps_circle(pos, r) {
        // Top goal is player 2's
        Some(Player::One)
    } else if table.bottom_goal.overlaps_circle(pos, r) {
        Some(Player::Two)
    } else {
        None
    }
}

/// Run all three checks in order
pub fn resolve(
    puck: &mut Puck,
    mallets: &[Mallet],
    table: &TableGeometry,
    tuning: &Tuning,
) -> Contacts {
    let mut contacts = Contacts {
        wall_hit: resolve_walls(puck, table),
        ..Default::default()
    };

    for mallet in mallets {
        if resolve_mallet(puck, mallet, tuning) {
            contacts.mallet_hits.push(mallet.player);
        }
    }

    if !contacts.wall_hit {
        contacts.goal = check_goal(puck, table);
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tuning, TableGeometry, Puck) {
        let tuning = Tuning::portrait();
        let table = TableGeometry::new(&tuning).unwrap();
        let puck = Puck::new(table.center(), &tuning);
        (tuning, table, puck)
    }

    #[test]
    fn test_side_wall_reflects_and_repositions() {
        let (_, table, mut puck) = setup();
        puck.body.pos = Vec2::new(table.bounds.max_x - 10.0, 100.0);
        puck.body.vel = Vec2::new(500.0, 40.0);
        assert!(resolve_walls(&mut puck, &table));
        assert_eq!(puck.body.pos.x, table.bounds.max_x - puck.body.radius);
        assert_eq!(puck.body.vel, Vec2::new(-500.0, 40.0));
    }

    #[test]
    fn test_restitution_scales_bounce() {
        let (_, table, mut puck) = setup();
        puck.restitution = 0.5;
        puck.body.pos = Vec2::new(table.bounds.min_x + 5.0, 0.0);
        puck.body.vel = Vec2::new(-400.0, 0.0);
        assert!(resolve_walls(&mut puck, &table));
        assert_eq!(puck.body.vel.x, 200.0);
    }

    #[test]
    fn test_end_wall_outside_goal_gap() {
        let (_, table, mut puck) = setup();
        puck.body.pos = Vec2::new(table.bounds.max_x - 80.0, table.bounds.min_y + 5.0);
        puck.body.vel = Vec2::new(0.0, -300.0);
        assert!(resolve_walls(&mut puck, &table));
        assert!(puck.body.vel.y > 0.0);
        assert_eq!(check_goal(&puck, &table), None);
    }

    #[test]
    fn test_goal_gap_has_no_end_wall() {
        let (_, table, mut puck) = setup();
        puck.body.pos = Vec2::new(0.0, table.bounds.min_y + 5.0);
        puck.body.vel = Vec2::new(0.0, -300.0);
        assert!(!resolve_walls(&mut puck, &table));
        assert_eq!(puck.body.vel.y, -300.0);
    }

    #[test]
    fn test_mallet_hit_from_rest_uses_minimum_force() {
        let (tuning, table, mut puck) = setup();
        let r_sum = tuning.puck_radius + tuning.mallet_radius;
        let mallet = Mallet::new(
            Player::One,
            table.center() + Vec2::new(0.0, -r_sum),
            tuning.mallet_radius,
        );
        assert!(resolve_mallet(&mut puck, &mallet, &tuning));
        let speed = puck.body.vel.length();
        assert!(speed >= tuning.min_hit_force, "speed {speed}");
        // Pushed directly away from the mallet
        assert!(puck.body.vel.y > 0.0);
        assert!(puck.body.vel.x.abs() < 1e-3);
    }

    #[test]
    fn test_deeper_contact_pushes_harder() {
        let tuning = Tuning::portrait();
        let shallow = deflection_speed(100.0, 0.0, &tuning);
        let deep = deflection_speed(100.0, 40.0, &tuning);
        assert!(deep > shallow);
    }

    #[test]
    fn test_deflection_is_capped() {
        let tuning = Tuning::portrait();
        let speed = deflection_speed(10_000.0, 80.0, &tuning);
        assert_eq!(speed, tuning.puck_max_speed * tuning.hit_cap_factor);
    }

    #[test]
    fn test_mallet_hit_separates_bodies() {
        let (tuning, table, mut puck) = setup();
        let mallet = Mallet::new(
            Player::Two,
            table.center() + Vec2::new(20.0, 30.0),
            tuning.mallet_radius,
        );
        assert!(resolve_mallet(&mut puck, &mallet, &tuning));
        let gap = puck.body.pos.distance(mallet.body.pos);
        assert!(gap >= tuning.puck_radius + tuning.mallet_radius - 1e-3);
        // Resolved contact leaves the puck moving away from the mallet
        assert!(puck.body.vel.dot(puck.body.pos - mallet.body.pos) > 0.0);
    }

    #[test]
    fn test_coincident_centres_push_away_from_own_goal() {
        let (tuning, table, mut puck) = setup();
        let mallet = Mallet::new(Player::One, table.center(), tuning.mallet_radius);
        assert!(resolve_mallet(&mut puck, &mallet, &tuning));
        // Player 1 defends the bottom, so the puck goes up
        assert!(puck.body.vel.y < 0.0);
    }

    #[test]
    fn test_top_goal_scores_for_player_one() {
        let (tuning, table, mut puck) = setup();
        puck.body.pos = Vec2::new(0.0, table.bounds.min_y + tuning.puck_radius - 5.0);
        let contacts = resolve(&mut puck, &[], &table, &tuning);
        assert_eq!(contacts.goal, Some(Player::One));
        assert!(!contacts.wall_hit);
        assert_eq!(
            contacts.events(),
            vec![GameEvent::Goal {
                scorer: Player::One
            }]
        );
    }

    #[test]
    fn test_bottom_goal_scores_for_player_two() {
        let (tuning, table, mut puck) = setup();
        puck.body.pos = Vec2::new(-40.0, table.bounds.max_y + 5.0);
        let contacts = resolve(&mut puck, &[], &table, &tuning);
        assert_eq!(contacts.goal, Some(Player::Two));
        assert!(!contacts.wall_hit);
    }

    #[test]
    fn test_wall_bounce_and_goal_exclusive() {
        let (tuning, table, mut puck) = setup();
        // Corner of the goal post: centre just outside the opening
        puck.body.pos = Vec2::new(table.top_goal.max_x + 2.0, table.bounds.min_y + 10.0);
        puck.body.vel = Vec2::new(-100.0, -400.0);
        let contacts = resolve(&mut puck, &[], &table, &tuning);
        assert!(contacts.wall_hit);
        assert_eq!(contacts.goal, None);
    }
}
