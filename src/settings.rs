//! Match settings and player preferences
//!
//! `Settings` is what a persistence collaborator stores; `MatchConfig` is the
//! validated value a `Simulation` is built from.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SENSITIVITY, MAX_SENSITIVITY, MIN_SENSITIVITY};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Match length in rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BestOf {
    #[default]
    Three,
    Five,
    Seven,
}

impl BestOf {
    pub fn rounds(self) -> u8 {
        match self {
            BestOf::Three => 3,
            BestOf::Five => 5,
            BestOf::Seven => 7,
        }
    }

    /// Rounds needed to take the match: floor(n / 2) + 1
    pub fn rounds_to_win(self) -> u32 {
        u32::from(self.rounds()) / 2 + 1
    }
}

impl TryFrom<u8> for BestOf {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(BestOf::Three),
            5 => Ok(BestOf::Five),
            7 => Ok(BestOf::Seven),
            other => Err(ConfigError::InvalidBestOf(other)),
        }
    }
}

impl From<BestOf> for u8 {
    fn from(value: BestOf) -> Self {
        value.rounds()
    }
}

/// Who controls player 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Player 2 is the AI
    #[default]
    SinglePlayer,
    /// Player 2 follows a second pointer
    TwoPlayer,
}

/// A selectable mallet or puck skin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinOption {
    pub id: &'static str,
    pub color: u32,
    pub label: &'static str,
}

pub const MALLET_SKINS: &[SkinOption] = &[
    SkinOption { id: "teal", color: 0x17c2b8, label: "Teal" },
    SkinOption { id: "blue", color: 0x2c7bff, label: "Blue" },
    SkinOption { id: "red", color: 0xff3a3a, label: "Red" },
    SkinOption { id: "orange", color: 0xff9f1c, label: "Orange" },
    SkinOption { id: "purple", color: 0x8a5cff, label: "Purple" },
    SkinOption { id: "lime", color: 0x00e676, label: "Lime" },
];

pub const PUCK_SKINS: &[SkinOption] = &[
    SkinOption { id: "navy", color: 0x1a2a6c, label: "Navy" },
    SkinOption { id: "cyan", color: 0x00e5ff, label: "Cyan" },
    SkinOption { id: "magenta", color: 0xff2bd4, label: "Magenta" },
    SkinOption { id: "white", color: 0xf0f0f0, label: "White" },
];

fn skin_color(options: &[SkinOption], id: &str, fallback: u32) -> u32 {
    options
        .iter()
        .find(|o| o.id == id)
        .map(|o| o.color)
        .unwrap_or(fallback)
}

/// Stored player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    pub sfx: bool,
    pub music: bool,

    // === Match ===
    /// Pointer follow multiplier (0.5 - 2.0)
    pub pointer_sensitivity: f32,
    pub best_of: BestOf,

    // === Cosmetics ===
    pub player_mallet: String,
    pub opponent_mallet: String,
    pub puck: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx: true,
            music: true,
            pointer_sensitivity: DEFAULT_SENSITIVITY,
            best_of: BestOf::Three,
            player_mallet: "teal".to_string(),
            opponent_mallet: "red".to_string(),
            puck: "navy".to_string(),
        }
    }
}

impl Settings {
    /// Reject values the simulation cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = self.pointer_sensitivity;
        if !(MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&s) {
            return Err(ConfigError::SensitivityOutOfRange(s));
        }
        Ok(())
    }

    pub fn player_mallet_color(&self) -> u32 {
        skin_color(MALLET_SKINS, &self.player_mallet, 0x17c2b8)
    }

    pub fn opponent_mallet_color(&self) -> u32 {
        skin_color(MALLET_SKINS, &self.opponent_mallet, 0xff3a3a)
    }

    pub fn puck_color(&self) -> u32 {
        skin_color(PUCK_SKINS, &self.puck, 0x1a2a6c)
    }
}

/// Validated configuration for one match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub tuning: Tuning,
    pub best_of: BestOf,
    pub sensitivity: f32,
    pub mode: Mode,
}

impl MatchConfig {
    pub fn new(tuning: Tuning, settings: &Settings, mode: Mode) -> Result<Self, ConfigError> {
        settings.validate()?;
        tuning.validate()?;
        Ok(Self {
            tuning,
            best_of: settings.best_of,
            sensitivity: settings.pointer_sensitivity,
            mode,
        })
    }

    /// Override the stored match length (e.g. chosen on the menu)
    pub fn with_best_of(mut self, best_of: BestOf) -> Self {
        self.best_of = best_of;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            best_of: BestOf::default(),
            sensitivity: DEFAULT_SENSITIVITY,
            mode: Mode::default(),
        }
    }
}
