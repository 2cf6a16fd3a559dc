//! Kinematic bodies, players, events and snapshots
//!
//! Everything the tick driver owns for one match, plus the value types it
//! hands to collaborators.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// One of the two sides of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Defends the bottom goal
    One,
    /// Defends the top goal (AI in single-player)
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn defends_top(self) -> bool {
        self == Player::Two
    }

    /// Y direction pointing at this player's own goal
    pub fn goal_direction(self) -> f32 {
        match self {
            Player::One => 1.0,
            Player::Two => -1.0,
        }
    }

    /// Human-facing number (1 or 2)
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Position, velocity and size of a circle on the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }
}

/// The puck: the only dynamically integrated body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puck {
    pub body: Body,
    pub mass: f32,
    pub drag: f32,
    pub max_speed: f32,
    pub restitution: f32,
}

impl Puck {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            body: Body::new(pos, tuning.puck_radius),
            mass: tuning.puck_mass,
            drag: tuning.puck_drag,
            max_speed: tuning.puck_max_speed,
            restitution: tuning.puck_restitution,
        }
    }

    /// Park the puck at `pos` with no velocity
    pub fn park(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
    }
}

/// A mallet: kinematic, driven directly by input or AI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mallet {
    pub player: Player,
    pub body: Body,
}

impl Mallet {
    pub fn new(player: Player, pos: Vec2, radius: f32) -> Self {
        Self {
            player,
            body: Body::new(pos, radius),
        }
    }

    /// Move to `pos`, recording the displacement as velocity over `dt`
    pub fn move_to(&mut self, pos: Vec2, dt: f32) {
        if dt > 0.0 {
            self.body.vel = (pos - self.body.pos) / dt;
        }
        self.body.pos = pos;
    }
}

/// Events raised by a tick, consumed by audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    MalletHit { player: Player },
    Goal { scorer: Player },
    ScoreChanged { p1_goals: u32, p2_goals: u32 },
    RoundEnded {
        p1_rounds: u32,
        p2_rounds: u32,
        winner: Player,
    },
    MatchEnded { winner: Player },
}

impl GameEvent {
    /// Forward this event to the matching sink callback
    pub fn dispatch<S: EventSink + ?Sized>(&self, sink: &mut S) {
        match *self {
            GameEvent::WallHit => sink.on_wall_hit(),
            GameEvent::MalletHit { player } => sink.on_mallet_hit(player),
            GameEvent::Goal { scorer } => sink.on_goal(scorer),
            GameEvent::ScoreChanged { p1_goals, p2_goals } => {
                sink.on_score_changed(p1_goals, p2_goals)
            }
            GameEvent::RoundEnded {
                p1_rounds,
                p2_rounds,
                winner,
            } => sink.on_round_ended(p1_rounds, p2_rounds, winner),
            GameEvent::MatchEnded { winner } => sink.on_match_ended(winner),
        }
    }
}

/// Fire-and-forget receiver for simulation events
///
/// All methods default to no-ops so a collaborator only implements what it
/// cares about (audio wants hits, the HUD wants scores).
pub trait EventSink {
    fn on_wall_hit(&mut self) {}
    fn on_mallet_hit(&mut self, _player: Player) {}
    fn on_goal(&mut self, _scorer: Player) {}
    fn on_round_ended(&mut self, _p1_rounds: u32, _p2_rounds: u32, _winner: Player) {}
    fn on_match_ended(&mut self, _winner: Player) {}
    fn on_score_changed(&mut self, _p1_goals: u32, _p2_goals: u32) {}
}

/// Dispatch a batch of events in order
pub fn dispatch_all<S: EventSink + ?Sized>(events: &[GameEvent], sink: &mut S) {
    for event in events {
        event.dispatch(sink);
    }
}

/// Current phase of the tick driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Puck is live
    Playing,
    /// Puck parked at centre, launched toward `toward` when the timer runs out
    Serving { ticks_remaining: u32, toward: Player },
    /// Game is paused
    Paused,
    /// Match decided, nothing moves
    MatchOver { winner: Player },
}

/// Read-only copy of the simulation for rendering and HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub puck: Body,
    pub mallets: [Body; 2],
    pub p1_goals: u32,
    pub p2_goals: u32,
    pub p1_rounds: u32,
    pub p2_rounds: u32,
    pub rounds_to_win: u32,
}
