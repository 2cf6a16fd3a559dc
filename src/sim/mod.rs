//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or storage dependencies

pub mod ai;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod match_state;
pub mod physics;
pub mod state;
pub mod tick;
pub mod zone;

pub use ai::{AiDecision, AiMode, AiView};
pub use collision::{CollisionResult, Contacts};
pub use geometry::{Rect, TableGeometry, Zone};
pub use input::PointerInput;
pub use match_state::{GoalOutcome, MatchPhase, MatchScore, MatchState};
pub use state::{
    Body, EventSink, GameEvent, GamePhase, Mallet, Player, Puck, Snapshot, dispatch_all,
};
pub use tick::{Simulation, TickInput};
