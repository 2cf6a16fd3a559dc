//! Data-driven game balance
//!
//! Every number that shapes how the table feels lives in [`Tuning`]. The two
//! shipped tables are just presets of the same struct, so a new table is a
//! new value rather than a new code path.

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::error::ConfigError;
use crate::sim::TableGeometry;

/// Opponent controller constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTuning {
    /// Puck speed toward the AI goal (units/s) that triggers interception
    pub intercept_speed: f32,
    /// Seconds of puck travel used to predict the intercept X
    pub lookahead: f32,
    /// Distance the pressing mallet keeps behind the puck (toward its own goal)
    pub press_offset: f32,
    /// Home position as a fraction of the zone depth, measured from the goal end
    pub home_fraction: f32,
    /// Per-axis lerp rates (x, y) for each policy
    pub intercept_lerp: (f32, f32),
    pub press_lerp: (f32, f32),
    pub hold_lerp: (f32, f32),
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            intercept_speed: 100.0,
            lookahead: 0.3,
            press_offset: 30.0,
            home_fraction: 0.3,
            intercept_lerp: (0.08, 0.06),
            press_lerp: (0.05, 0.06),
            hold_lerp: (0.03, 0.04),
        }
    }
}

/// Complete set of tunable constants for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    // === Table ===
    /// Playable interior width (inside the walls)
    pub table_width: f32,
    /// Playable interior height (inside the walls)
    pub table_height: f32,
    pub wall_thickness: f32,
    pub goal_width: f32,
    pub goal_depth: f32,

    // === Puck ===
    pub puck_radius: f32,
    pub puck_mass: f32,
    /// Per-tick damping: velocity *= 1 / (1 + drag)
    pub puck_drag: f32,
    /// Per-axis speed cap (units/s)
    pub puck_max_speed: f32,
    /// Fraction of normal speed kept on a wall bounce
    pub puck_restitution: f32,
    /// Gap kept between the puck and the table edge by the zone clamp
    pub puck_margin: f32,
    /// Axis speed above which a clamped puck is damped
    pub jitter_speed: f32,
    pub jitter_damping: f32,

    // === Mallets ===
    pub mallet_radius: f32,
    /// Side clearance between mallet and side walls
    pub mallet_x_buffer: f32,
    /// Clearance between mallet and the end wall behind it
    pub mallet_edge_padding: f32,
    /// Extra clearance between mallet edge and the midline
    pub midline_buffer: f32,

    // === Mallet hit force curve ===
    pub min_hit_force: f32,
    /// Share of incoming puck speed carried into the deflection
    pub hit_speed_factor: f32,
    /// Lower bound of the proximity multiplier
    pub proximity_floor: f32,
    /// Overlap depth that maps to a proximity multiplier of 1
    pub proximity_scale: f32,
    pub proximity_gain: f32,
    /// Deflection speed cap as a fraction of `puck_max_speed`
    pub hit_cap_factor: f32,

    // === Serve ===
    pub serve_speed: f32,
    /// Total random spread of the serve angle (radians)
    pub serve_spread: f32,
    /// Seconds the puck waits at centre after a goal
    pub goal_serve_delay: f32,
    /// Seconds the puck waits at centre after a round ends
    pub round_serve_delay: f32,

    // === Rules / controls ===
    pub goals_to_win_round: u32,
    /// Pointer lerp factor before sensitivity scaling
    pub input_lerp: f32,
    pub ai: AiTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::portrait()
    }
}

impl Tuning {
    /// Full-size portrait table (1080x1920 screen, first to 3 goals per round)
    pub fn portrait() -> Self {
        Self {
            table_width: 840.0,
            table_height: 1580.0,
            wall_thickness: 30.0,
            goal_width: 280.0,
            goal_depth: 40.0,

            puck_radius: 30.0,
            puck_mass: 0.3,
            puck_drag: 0.001,
            puck_max_speed: 1200.0,
            puck_restitution: 1.0,
            puck_margin: 3.0,
            jitter_speed: 300.0,
            jitter_damping: 0.85,

            mallet_radius: 50.0,
            mallet_x_buffer: 5.0,
            mallet_edge_padding: 10.0,
            midline_buffer: 4.0,

            min_hit_force: 200.0,
            hit_speed_factor: 0.8,
            proximity_floor: 0.5,
            proximity_scale: 30.0,
            proximity_gain: 1.5,
            hit_cap_factor: 0.8,

            serve_speed: 300.0,
            serve_spread: 0.3,
            goal_serve_delay: 1.0,
            round_serve_delay: 1.5,

            goals_to_win_round: 3,
            input_lerp: 0.35,
            ai: AiTuning::default(),
        }
    }

    /// Smaller table with a softer force curve and longer rounds
    pub fn compact() -> Self {
        Self {
            table_width: 600.0,
            table_height: 1000.0,
            wall_thickness: 20.0,
            goal_width: 180.0,
            goal_depth: 30.0,

            puck_radius: 20.0,
            puck_max_speed: 900.0,
            jitter_speed: 240.0,

            mallet_radius: 34.0,

            min_hit_force: 160.0,
            hit_speed_factor: 0.75,
            proximity_scale: 20.0,
            proximity_gain: 1.2,
            hit_cap_factor: 0.85,

            serve_speed: 240.0,
            goals_to_win_round: 5,
            ai: AiTuning {
                intercept_speed: 80.0,
                press_offset: 20.0,
                ..AiTuning::default()
            },
            ..Self::portrait()
        }
    }

    /// Look up a preset by name (case-insensitive)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "portrait" | "classic" => Some(Self::portrait()),
            "compact" => Some(Self::compact()),
            _ => None,
        }
    }

    /// Reject tunings whose table or zones would be degenerate, or whose
    /// physics constants would blow up the tick
    pub fn validate(&self) -> Result<(), ConfigError> {
        TableGeometry::new(self)?;

        for (what, value) in [
            ("puck mass", self.puck_mass),
            ("jitter speed", self.jitter_speed),
            ("min hit force", self.min_hit_force),
            ("proximity scale", self.proximity_scale),
            ("serve speed", self.serve_speed),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::NonPositive { what, value });
            }
        }

        let ai = &self.ai;
        for (what, value, min, max) in [
            ("puck drag", self.puck_drag, 0.0, 1.0),
            ("puck restitution", self.puck_restitution, f32::EPSILON, 1.0),
            ("jitter damping", self.jitter_damping, 0.0, 1.0),
            ("hit speed factor", self.hit_speed_factor, 0.0, 1.0),
            ("hit cap factor", self.hit_cap_factor, 0.0, 1.0),
            ("proximity floor", self.proximity_floor, 0.0, f32::MAX),
            ("proximity gain", self.proximity_gain, 0.0, f32::MAX),
            ("serve spread", self.serve_spread, 0.0, std::f32::consts::PI),
            ("goal serve delay", self.goal_serve_delay, 0.0, MAX_SERVE_DELAY),
            ("round serve delay", self.round_serve_delay, 0.0, MAX_SERVE_DELAY),
            ("input lerp", self.input_lerp, 0.0, 1.0),
            ("ai intercept speed", ai.intercept_speed, 0.0, f32::MAX),
            ("ai lookahead", ai.lookahead, 0.0, f32::MAX),
            ("ai press offset", ai.press_offset, 0.0, f32::MAX),
            ("ai home fraction", ai.home_fraction, 0.0, 1.0),
            ("ai intercept lerp x", ai.intercept_lerp.0, 0.0, 1.0),
            ("ai intercept lerp y", ai.intercept_lerp.1, 0.0, 1.0),
            ("ai press lerp x", ai.press_lerp.0, 0.0, 1.0),
            ("ai press lerp y", ai.press_lerp.1, 0.0, 1.0),
            ("ai hold lerp x", ai.hold_lerp.0, 0.0, 1.0),
            ("ai hold lerp y", ai.hold_lerp.1, 0.0, 1.0),
        ] {
            if !(min..=max).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    what,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }

    /// Serve delay after a plain goal, in ticks of `dt`
    pub fn goal_serve_ticks(&self, dt: f32) -> u32 {
        delay_ticks(self.goal_serve_delay, dt)
    }

    /// Serve delay after a round ends, in ticks of `dt`
    pub fn round_serve_ticks(&self, dt: f32) -> u32 {
        delay_ticks(self.round_serve_delay, dt)
    }
}

/// Longest accepted serve delay, in seconds
pub const MAX_SERVE_DELAY: f32 = 10.0;

/// Seconds to whole ticks; a zero, negative or NaN `dt` counts as `SIM_DT`
fn delay_ticks(seconds: f32, dt: f32) -> u32 {
    let dt = if dt > 0.0 { dt } else { SIM_DT };
    (seconds.max(0.0) / dt).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(Tuning::portrait().validate().is_ok());
        assert!(Tuning::compact().validate().is_ok());
    }

    #[test]
    fn test_presets_differ_where_it_matters() {
        let portrait = Tuning::portrait();
        let compact = Tuning::compact();
        assert!(compact.table_width < portrait.table_width);
        assert_ne!(compact.goals_to_win_round, portrait.goals_to_win_round);
        assert_ne!(compact.min_hit_force, portrait.min_hit_force);
        // Untouched fields come from the portrait preset
        assert_eq!(compact.puck_drag, portrait.puck_drag);
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(Tuning::preset("Compact"), Some(Tuning::compact()));
        assert_eq!(Tuning::preset("classic"), Some(Tuning::portrait()));
        assert_eq!(Tuning::preset("huge"), None);
    }

    #[test]
    fn test_goal_wider_than_table_rejected() {
        let tuning = Tuning {
            goal_width: 900.0,
            ..Tuning::portrait()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::GoalTooWide { .. })
        ));
    }

    #[test]
    fn test_oversized_mallet_rejected() {
        let tuning = Tuning {
            mallet_radius: 400.0,
            ..Tuning::portrait()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::DegenerateZone { .. })
        ));
    }

    #[test]
    fn test_serve_delays_in_ticks() {
        let tuning = Tuning::portrait();
        assert_eq!(tuning.goal_serve_ticks(SIM_DT), 60);
        assert_eq!(tuning.round_serve_ticks(SIM_DT), 90);
    }

    #[test]
    fn test_serve_delay_with_zero_dt_uses_fixed_step() {
        let tuning = Tuning::portrait();
        assert_eq!(tuning.goal_serve_ticks(0.0), 60);
        assert_eq!(tuning.round_serve_ticks(f32::NAN), 90);
    }

    #[test]
    fn test_runaway_drag_rejected() {
        let tuning = Tuning {
            puck_drag: -1.0,
            ..Tuning::portrait()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::OutOfRange {
                what: "puck drag",
                ..
            })
        ));
    }

    #[test]
    fn test_restitution_must_be_a_fraction() {
        for restitution in [5.0, 0.0, -0.5, f32::NAN] {
            let tuning = Tuning {
                puck_restitution: restitution,
                ..Tuning::portrait()
            };
            assert!(
                matches!(
                    tuning.validate(),
                    Err(ConfigError::OutOfRange {
                        what: "puck restitution",
                        ..
                    })
                ),
                "restitution {restitution} accepted"
            );
        }
    }

    #[test]
    fn test_physics_ranges_rejected() {
        let bad = [
            Tuning {
                jitter_damping: 1.5,
                ..Tuning::portrait()
            },
            Tuning {
                input_lerp: -0.1,
                ..Tuning::portrait()
            },
            Tuning {
                goal_serve_delay: -1.0,
                ..Tuning::portrait()
            },
            Tuning {
                ai: AiTuning {
                    press_lerp: (0.05, 2.0),
                    ..AiTuning::default()
                },
                ..Tuning::portrait()
            },
        ];
        for tuning in bad {
            assert!(matches!(
                tuning.validate(),
                Err(ConfigError::OutOfRange { .. })
            ));
        }

        for tuning in [
            Tuning {
                serve_speed: -300.0,
                ..Tuning::portrait()
            },
            Tuning {
                proximity_scale: 0.0,
                ..Tuning::portrait()
            },
        ] {
            assert!(matches!(
                tuning.validate(),
                Err(ConfigError::NonPositive { .. })
            ));
        }
    }

    #[test]
    fn test_tuning_json_round_trip_keeps_preset() {
        let json = serde_json::to_string(&Tuning::compact()).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Tuning::compact());
    }
}
