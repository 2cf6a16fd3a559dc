//! Heuristic opponent controller
//!
//! Pure policy: given where the puck is and where it is going, pick a target
//! for the AI mallet and how quickly to approach it. Priorities, highest
//! first: intercept a puck heading for our goal, press a puck in our half,
//! otherwise fall back to a home spot near our goal.

use glam::Vec2;

use super::geometry::{TableGeometry, Zone};
use super::state::Player;
use super::zone::clamp_to_zone;
use crate::lerp;
use crate::tuning::AiTuning;

/// Which rule produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMode {
    Intercept,
    Press,
    Hold,
}

/// Target position plus per-axis approach rates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    pub mode: AiMode,
    /// Always inside the AI's zone
    pub target: Vec2,
    pub lerp: (f32, f32),
}

/// Inputs the policy looks at
#[derive(Debug, Clone, Copy)]
pub struct AiView<'a> {
    pub side: Player,
    pub puck_pos: Vec2,
    pub puck_vel: Vec2,
    pub zone: &'a Zone,
    pub midline_y: f32,
}

impl<'a> AiView<'a> {
    pub fn new(side: Player, puck_pos: Vec2, puck_vel: Vec2, table: &'a TableGeometry) -> Self {
        Self {
            side,
            puck_pos,
            puck_vel,
            zone: table.zone(side),
            midline_y: table.midline_y,
        }
    }

    /// Puck Y-speed toward our goal (positive when approaching)
    fn closing_speed(&self) -> f32 {
        self.puck_vel.y * self.side.goal_direction()
    }

    fn puck_in_our_half(&self) -> bool {
        (self.puck_pos.y - self.midline_y) * self.side.goal_direction() > 0.0
    }

    /// Home spot: `home_fraction` of the zone depth out from our goal end
    fn home(&self, fraction: f32) -> Vec2 {
        let zone = self.zone;
        let y = match self.side {
            Player::Two => lerp(zone.min_y, zone.max_y, fraction),
            Player::One => lerp(zone.max_y, zone.min_y, fraction),
        };
        Vec2::new(zone.center().x, y)
    }
}

/// Choose the AI target for this tick
pub fn decide(view: &AiView, tuning: &AiTuning) -> AiDecision {
    let zone = view.zone;
    let behind_puck = view.puck_pos.y + tuning.press_offset * view.side.goal_direction();
    let home = view.home(tuning.home_fraction);
    // Keep between puck and goal while it is on our side, else sit at home
    let guard_y = if view.puck_in_our_half() {
        behind_puck
    } else {
        home.y
    };

    let (mode, target, lerp) = if view.closing_speed() > tuning.intercept_speed {
        let predicted_x = view.puck_pos.x + view.puck_vel.x * tuning.lookahead;
        (
            AiMode::Intercept,
            Vec2::new(predicted_x, guard_y),
            tuning.intercept_lerp,
        )
    } else if view.puck_in_our_half() {
        (
            AiMode::Press,
            Vec2::new(view.puck_pos.x, behind_puck),
            tuning.press_lerp,
        )
    } else {
        (AiMode::Hold, home, tuning.hold_lerp)
    };

    AiDecision {
        mode,
        target: clamp_to_zone(target, zone),
        lerp,
    }
}

/// Move the mallet one step toward the decision's target
pub fn apply(current: Vec2, decision: &AiDecision, zone: &Zone) -> Vec2 {
    let next = Vec2::new(
        lerp(current.x, decision.target.x, decision.lerp.0),
        lerp(current.y, decision.target.y, decision.lerp.1),
    );
    clamp_to_zone(next, zone)
}

/// Decide and step in one call
pub fn steer(current: Vec2, view: &AiView, tuning: &AiTuning) -> Vec2 {
    let decision = decide(view, tuning);
    apply(current, &decision, view.zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn table() -> TableGeometry {
        TableGeometry::new(&Tuning::portrait()).unwrap()
    }

    #[test]
    fn test_intercepts_puck_heading_for_goal() {
        let table = table();
        let ai = AiTuning::default();
        let view = AiView::new(
            Player::Two,
            Vec2::new(0.0, 300.0),
            Vec2::new(200.0, -600.0),
            &table,
        );
        let decision = decide(&view, &ai);
        assert_eq!(decision.mode, AiMode::Intercept);
        assert!((decision.target.x - 60.0).abs() < 1e-3);
        assert_eq!(decision.lerp, ai.intercept_lerp);
    }

    #[test]
    fn test_intercept_x_clamped_to_zone() {
        let table = table();
        let view = AiView::new(
            Player::Two,
            Vec2::new(300.0, -100.0),
            Vec2::new(5000.0, -900.0),
            &table,
        );
        let decision = decide(&view, &AiTuning::default());
        assert_eq!(decision.target.x, table.zone(Player::Two).max_x);
    }

    #[test]
    fn test_presses_puck_in_own_half() {
        let table = table();
        let ai = AiTuning::default();
        let view = AiView::new(
            Player::Two,
            Vec2::new(-120.0, -300.0),
            Vec2::new(0.0, 50.0),
            &table,
        );
        let decision = decide(&view, &ai);
        assert_eq!(decision.mode, AiMode::Press);
        assert_eq!(decision.target.x, -120.0);
        // Sits between the puck and the top goal
        assert_eq!(decision.target.y, -300.0 - ai.press_offset);
    }

    #[test]
    fn test_holds_home_when_puck_far_away() {
        let table = table();
        let ai = AiTuning::default();
        let view = AiView::new(
            Player::Two,
            Vec2::new(100.0, 400.0),
            Vec2::new(0.0, 80.0),
            &table,
        );
        let decision = decide(&view, &ai);
        assert_eq!(decision.mode, AiMode::Hold);
        let zone = table.zone(Player::Two);
        let expected = zone.min_y + (zone.max_y - zone.min_y) * ai.home_fraction;
        assert!((decision.target.y - expected).abs() < 1e-3);
        assert_eq!(decision.lerp, ai.hold_lerp);
    }

    #[test]
    fn test_slow_approach_does_not_intercept() {
        let table = table();
        let view = AiView::new(
            Player::Two,
            Vec2::new(0.0, 300.0),
            Vec2::new(0.0, -50.0),
            &table,
        );
        assert_eq!(decide(&view, &AiTuning::default()).mode, AiMode::Hold);
    }

    #[test]
    fn test_policy_mirrors_for_player_one() {
        let table = table();
        let view = AiView::new(
            Player::One,
            Vec2::new(0.0, -300.0),
            Vec2::new(0.0, 600.0),
            &table,
        );
        assert_eq!(decide(&view, &AiTuning::default()).mode, AiMode::Intercept);

        let view = AiView::new(Player::One, Vec2::new(0.0, 300.0), Vec2::ZERO, &table);
        let decision = decide(&view, &AiTuning::default());
        assert_eq!(decision.mode, AiMode::Press);
        assert!(decision.target.y > 300.0);
    }

    #[test]
    fn test_apply_moves_partially_and_stays_in_zone() {
        let table = table();
        let zone = table.zone(Player::Two);
        let decision = AiDecision {
            mode: AiMode::Press,
            target: Vec2::new(100.0, zone.min_y),
            lerp: (0.5, 0.5),
        };
        let start = Vec2::new(0.0, zone.max_y);
        let next = apply(start, &decision, zone);
        assert!((next.x - 50.0).abs() < 1e-3);
        assert!(zone.contains(next));
    }
}
