//! Error types for match construction and settings storage
//!
//! The simulation itself never fails: everything here is raised at the
//! boundary, before a `Simulation` exists.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("best-of must be 3, 5 or 7 (got {0})")]
    InvalidBestOf(u8),

    #[error("pointer sensitivity {0} outside [0.5, 2.0]")]
    SensitivityOutOfRange(f32),

    #[error("goal width {goal} must be smaller than table width {table}")]
    GoalTooWide { goal: f32, table: f32 },

    #[error("{what} must be positive (got {value})")]
    NonPositive { what: &'static str, value: f32 },

    #[error("{what} must be within [{min}, {max}] (got {value})")]
    OutOfRange {
        what: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{player} zone is empty: min_y {min_y} >= max_y {max_y}")]
    DegenerateZone {
        player: &'static str,
        min_y: f32,
        max_y: f32,
    },

    #[error("goals to win a round must be at least 1")]
    NoGoalsToWin,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
