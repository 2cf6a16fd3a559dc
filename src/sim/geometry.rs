//! Static table geometry: playable bounds, goal mouths and mallet zones
//!
//! World space is screen-style: x grows right, y grows down, and the table is
//! centred on the origin so the midline sits at `y = 0`. Player 1 defends the
//! bottom goal, player 2 the top one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Rect {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Closest point of the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_y, self.max_y),
        )
    }

    /// Strict circle overlap (touching edges do not count)
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        center.distance_squared(self.closest_point(center)) < radius * radius
    }

    /// Clamp a point into the rectangle
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        self.closest_point(p)
    }
}

/// Legal region for one mallet's centre
pub type Zone = Rect;

/// Immutable description of the table for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGeometry {
    /// Playable interior (inside the walls)
    pub bounds: Rect,
    pub wall_thickness: f32,
    /// Goal mouth just outside the top wall (defended by player 2)
    pub top_goal: Rect,
    /// Goal mouth just outside the bottom wall (defended by player 1)
    pub bottom_goal: Rect,
    pub midline_y: f32,
    /// Mallet zones, indexed by `Player::index`
    pub zones: [Zone; 2],
}

impl TableGeometry {
    /// Build the table and both mallet zones, rejecting degenerate layouts
    pub fn new(tuning: &Tuning) -> Result<Self, ConfigError> {
        for (what, value) in [
            ("table width", tuning.table_width),
            ("table height", tuning.table_height),
            ("goal width", tuning.goal_width),
            ("goal depth", tuning.goal_depth),
            ("puck radius", tuning.puck_radius),
            ("mallet radius", tuning.mallet_radius),
            ("puck max speed", tuning.puck_max_speed),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { what, value });
            }
        }
        if tuning.goal_width >= tuning.table_width {
            return Err(ConfigError::GoalTooWide {
                goal: tuning.goal_width,
                table: tuning.table_width,
            });
        }
        if tuning.goals_to_win_round == 0 {
            return Err(ConfigError::NoGoalsToWin);
        }

        let half_w = tuning.table_width / 2.0;
        let half_h = tuning.table_height / 2.0;
        let bounds = Rect::new(-half_w, half_w, -half_h, half_h);
        let midline_y = 0.0;

        let goal_half = tuning.goal_width / 2.0;
        let top_goal = Rect::new(
            -goal_half,
            goal_half,
            bounds.min_y - tuning.goal_depth,
            bounds.min_y,
        );
        let bottom_goal = Rect::new(
            -goal_half,
            goal_half,
            bounds.max_y,
            bounds.max_y + tuning.goal_depth,
        );

        let r = tuning.mallet_radius;
        let min_x = bounds.min_x + r + tuning.mallet_x_buffer;
        let max_x = bounds.max_x - r - tuning.mallet_x_buffer;
        if min_x > max_x {
            return Err(ConfigError::NonPositive {
                what: "mallet x range",
                value: max_x - min_x,
            });
        }
        let midline_gap = r + tuning.midline_buffer;
        let p1 = Zone::new(
            min_x,
            max_x,
            midline_y + midline_gap,
            bounds.max_y - r - tuning.mallet_edge_padding,
        );
        let p2 = Zone::new(
            min_x,
            max_x,
            bounds.min_y + r + tuning.mallet_edge_padding,
            midline_y - midline_gap,
        );
        for (player, zone) in [("player 1", &p1), ("player 2", &p2)] {
            if zone.min_y >= zone.max_y {
                return Err(ConfigError::DegenerateZone {
                    player,
                    min_y: zone.min_y,
                    max_y: zone.max_y,
                });
            }
        }

        Ok(Self {
            bounds,
            wall_thickness: tuning.wall_thickness,
            top_goal,
            bottom_goal,
            midline_y,
            zones: [p1, p2],
        })
    }

    /// Centre spot (puck serve position)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.bounds.center().x, self.midline_y)
    }

    pub fn zone(&self, player: Player) -> &Zone {
        &self.zones[player.index()]
    }

    /// Goal mouth a player defends
    pub fn goal_of(&self, player: Player) -> &Rect {
        match player {
            Player::One => &self.bottom_goal,
            Player::Two => &self.top_goal,
        }
    }

    /// Whether an x coordinate lies inside the goal openings
    pub fn in_goal_span(&self, x: f32) -> bool {
        x >= self.top_goal.min_x && x <= self.top_goal.max_x
    }

    /// Half of the table a point is in
    pub fn half_of(&self, p: Vec2) -> Player {
        if p.y >= self.midline_y {
            Player::One
        } else {
            Player::Two
        }
    }
}
