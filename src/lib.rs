//! Air Hockey - two-mallet, one-puck table simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, zones, AI, match scoring)
//! - `tuning`: Data-driven game balance (table size, force curves, presets)
//! - `settings`: Player preferences consumed at match construction
//! - `persistence`: Injected settings storage with default fallback
//! - `error`: Configuration and storage errors

pub mod error;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, StoreError};
pub use settings::{BestOf, MatchConfig, Mode, Settings};
pub use sim::{GameEvent, Simulation, TickInput};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta accepted by the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Pointer sensitivity range accepted from settings
    pub const MIN_SENSITIVITY: f32 = 0.5;
    pub const MAX_SENSITIVITY: f32 = 2.0;
    pub const DEFAULT_SENSITIVITY: f32 = 1.0;
}

/// Linear interpolation from `a` toward `b` by factor `t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise clamp of a vector into `[-limit, limit]` on each axis
#[inline]
pub fn clamp_per_axis(v: Vec2, limit: f32) -> Vec2 {
    Vec2::new(v.x.clamp(-limit, limit), v.y.clamp(-limit, limit))
}
