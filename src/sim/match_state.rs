//! Round and match scoring
//!
//! A round is first to `goals_to_win_round` goals; the match is best-of-N
//! rounds. Round end is reported through [`GoalOutcome`] and the machine moves
//! straight on to the next round unless the match is decided.

use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::settings::BestOf;

/// Goals and rounds for both players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub rounds_won: [u32; 2],
    pub goals_this_round: [u32; 2],
    pub rounds_to_win: u32,
    pub goals_to_win_round: u32,
}

impl MatchScore {
    pub fn new(best_of: BestOf, goals_to_win_round: u32) -> Self {
        Self {
            rounds_won: [0; 2],
            goals_this_round: [0; 2],
            rounds_to_win: best_of.rounds_to_win(),
            goals_to_win_round,
        }
    }

    pub fn goals(&self, player: Player) -> u32 {
        self.goals_this_round[player.index()]
    }

    pub fn rounds(&self, player: Player) -> u32 {
        self.rounds_won[player.index()]
    }

    /// Rounds played so far
    pub fn rounds_played(&self) -> u32 {
        self.rounds_won.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    RoundInProgress,
    /// Terminal
    MatchEnded { winner: Player },
}

/// What a goal did to the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// Match already over; nothing changed
    Ignored,
    /// Goal counted, round continues; serve toward the conceding player
    Counted { serve_toward: Player },
    /// Goal won the round; the next round has started
    RoundEnded {
        winner: Player,
        serve_toward: Player,
    },
    /// Goal won the deciding round
    MatchEnded { winner: Player },
}

/// Best-of-N match state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    score: MatchScore,
    phase: MatchPhase,
}

impl MatchState {
    pub fn new(best_of: BestOf, goals_to_win_round: u32) -> Self {
        Self {
            score: MatchScore::new(best_of, goals_to_win_round),
            phase: MatchPhase::RoundInProgress,
        }
    }

    pub fn score(&self) -> &MatchScore {
        &self.score
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::MatchEnded { .. })
    }

    /// Match winner, once the match has ended
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            MatchPhase::MatchEnded { winner } => Some(winner),
            MatchPhase::RoundInProgress => None,
        }
    }

    /// Credit a goal to `player`
    ///
    /// No-op once the match has ended.
    pub fn award_goal(&mut self, player: Player) -> GoalOutcome {
        if self.is_over() {
            return GoalOutcome::Ignored;
        }

        let idx = player.index();
        self.score.goals_this_round[idx] += 1;
        if self.score.goals_this_round[idx] < self.score.goals_to_win_round {
            return GoalOutcome::Counted {
                serve_toward: player.opponent(),
            };
        }

        self.score.rounds_won[idx] += 1;
        self.score.goals_this_round = [0; 2];
        if self.score.rounds_won[idx] >= self.score.rounds_to_win {
            self.phase = MatchPhase::MatchEnded { winner: player };
            log::info!(
                "Player {} wins the match ({}-{})",
                player.number(),
                self.score.rounds_won[0],
                self.score.rounds_won[1]
            );
            return GoalOutcome::MatchEnded { winner: player };
        }

        log::info!(
            "Round {} to player {} ({}-{})",
            self.score.rounds_played(),
            player.number(),
            self.score.rounds_won[0],
            self.score.rounds_won[1]
        );
        GoalOutcome::RoundEnded {
            winner: player,
            serve_toward: player.opponent(),
        }
    }
}
