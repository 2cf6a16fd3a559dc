//! Fixed timestep simulation tick
//!
//! Core game loop that advances one match deterministically. Within a live
//! tick the order is fixed: integrate, collide, constrain, steer, score.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{self, AiView};
use super::collision;
use super::geometry::TableGeometry;
use super::input::{PointerInput, steer_toward_pointer};
use super::match_state::{GoalOutcome, MatchState};
use super::physics::step_puck;
use super::state::{GameEvent, GamePhase, Mallet, Player, Puck, Snapshot};
use super::zone;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigError;
use crate::settings::{MatchConfig, Mode};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Player 1 pointer
    pub p1: PointerInput,
    /// Player 2 pointer (ignored in single-player)
    pub p2: PointerInput,
    /// Pause toggle
    pub pause: bool,
}

/// One match: owns the table, bodies and score
#[derive(Debug, Clone)]
pub struct Simulation {
    config: MatchConfig,
    seed: u64,
    table: TableGeometry,
    puck: Puck,
    mallets: [Mallet; 2],
    match_state: MatchState,
    phase: GamePhase,
    /// Phase to return to when unpausing
    resume_phase: GamePhase,
    rng: Pcg32,
    time_ticks: u64,
    accumulator: f32,
}

impl Simulation {
    /// Start a match with the given seed (seed only affects serve angles)
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, ConfigError> {
        config.tuning.validate()?;
        let table = TableGeometry::new(&config.tuning)?;
        log::info!(
            "Match start: best of {}, first to {} rounds, {:?}",
            config.best_of.rounds(),
            config.best_of.rounds_to_win(),
            config.mode
        );
        Ok(Self::fresh(config, table, seed))
    }

    fn fresh(config: MatchConfig, table: TableGeometry, seed: u64) -> Self {
        let tuning = &config.tuning;
        let puck = Puck::new(table.center(), tuning);
        let mallets = Player::BOTH.map(|player| {
            let zone = table.zone(player);
            Mallet::new(player, zone.center(), tuning.mallet_radius)
        });
        let match_state = MatchState::new(config.best_of, tuning.goals_to_win_round);
        Self {
            puck,
            mallets,
            match_state,
            phase: GamePhase::Playing,
            resume_phase: GamePhase::Playing,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            accumulator: 0.0,
            seed,
            table,
            config,
        }
    }

    /// Throw away the current match and start over with the same config
    ///
    /// Table geometry is a pure function of the tuning, so the zones rebuilt
    /// here are identical to a fresh construction.
    pub fn restart(&mut self) {
        log::info!("Match restarted after {} ticks", self.time_ticks);
        let table = self.table.clone();
        *self = Self::fresh(self.config.clone(), table, self.seed);
    }

    /// Advance by one fixed step of `dt` seconds and return the events raised
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();

        // Handle pause toggle
        if input.pause {
            match self.phase {
                GamePhase::Playing | GamePhase::Serving { .. } => {
                    self.resume_phase = self.phase;
                    self.phase = GamePhase::Paused;
                    return events;
                }
                GamePhase::Paused => self.phase = self.resume_phase,
                GamePhase::MatchOver { .. } => {}
            }
        }

        // Don't tick if paused or match over
        match self.phase {
            GamePhase::Paused | GamePhase::MatchOver { .. } => return events,
            _ => {}
        }

        self.time_ticks += 1;

        match self.phase {
            GamePhase::Playing => {
                let tuning = &self.config.tuning;
                step_puck(&mut self.puck, dt);
                let contacts =
                    collision::resolve(&mut self.puck, &self.mallets, &self.table, tuning);
                zone::constrain_all(&mut self.puck, &mut self.mallets, &self.table, tuning);
                self.steer_mallets(input, dt);

                events.extend(contacts.events());
                if let Some(scorer) = contacts.goal {
                    self.score_goal(scorer, dt, &mut events);
                }
            }
            GamePhase::Serving {
                ticks_remaining,
                toward,
            } => {
                self.steer_mallets(input, dt);
                if ticks_remaining <= 1 {
                    self.serve(toward);
                    self.phase = GamePhase::Playing;
                } else {
                    self.phase = GamePhase::Serving {
                        ticks_remaining: ticks_remaining - 1,
                        toward,
                    };
                }
            }
            GamePhase::Paused | GamePhase::MatchOver { .. } => {}
        }

        events
    }

    /// Feed a variable frame time through the fixed-step accumulator
    ///
    /// The pause toggle is applied on the first substep only. A non-finite
    /// frame time counts as zero.
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        if frame_dt.is_finite() {
            self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        }

        let mut events = Vec::new();
        let mut step_input = *input;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.tick(&step_input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            step_input.pause = false;
        }
        events
    }

    /// Move both mallets: player 1 follows its pointer, player 2 follows a
    /// pointer or the AI depending on mode
    fn steer_mallets(&mut self, input: &TickInput, dt: f32) {
        let tuning = &self.config.tuning;
        let sensitivity = self.config.sensitivity;

        let p1 = &self.mallets[Player::One.index()];
        let p1_next = steer_toward_pointer(
            p1.body.pos,
            &input.p1,
            tuning.input_lerp,
            sensitivity,
            self.table.zone(Player::One),
        );

        let p2 = &self.mallets[Player::Two.index()];
        let p2_next = match self.config.mode {
            Mode::SinglePlayer => {
                let puck = &self.puck.body;
                let view = AiView::new(Player::Two, puck.pos, puck.vel, &self.table);
                ai::steer(p2.body.pos, &view, &tuning.ai)
            }
            Mode::TwoPlayer => steer_toward_pointer(
                p2.body.pos,
                &input.p2,
                tuning.input_lerp,
                sensitivity,
                self.table.zone(Player::Two),
            ),
        };

        self.mallets[Player::One.index()].move_to(p1_next, dt);
        self.mallets[Player::Two.index()].move_to(p2_next, dt);
    }

    fn score_goal(&mut self, scorer: Player, dt: f32, events: &mut Vec<GameEvent>) {
        // Goals are zeroed when a round ends, so keep the winning score for the HUD
        let score = self.match_state.score();
        let mut goals = Player::BOTH.map(|p| score.goals(p));
        goals[scorer.index()] += 1;
        let final_score = GameEvent::ScoreChanged {
            p1_goals: goals[0],
            p2_goals: goals[1],
        };

        let outcome = self.match_state.award_goal(scorer);
        log::debug!("Goal for player {}: {:?}", scorer.number(), outcome);

        let tuning = &self.config.tuning;
        let (serve_toward, delay) = match outcome {
            GoalOutcome::Ignored => return,
            GoalOutcome::Counted { serve_toward } => {
                events.push(self.score_changed());
                (serve_toward, tuning.goal_serve_ticks(dt))
            }
            GoalOutcome::RoundEnded {
                winner,
                serve_toward,
            } => {
                events.push(final_score);
                events.push(self.round_ended(winner));
                events.push(self.score_changed());
                (serve_toward, tuning.round_serve_ticks(dt))
            }
            GoalOutcome::MatchEnded { winner } => {
                events.push(final_score);
                events.push(self.round_ended(winner));
                events.push(self.score_changed());
                events.push(GameEvent::MatchEnded { winner });
                self.puck.park(self.table.center());
                self.phase = GamePhase::MatchOver { winner };
                return;
            }
        };

        self.puck.park(self.table.center());
        self.phase = GamePhase::Serving {
            ticks_remaining: delay.max(1),
            toward: serve_toward,
        };
    }

    /// Launch the parked puck toward `toward`'s goal with a small random spread
    fn serve(&mut self, toward: Player) {
        let tuning = &self.config.tuning;
        let half_spread = tuning.serve_spread / 2.0;
        let angle = if half_spread > 0.0 {
            self.rng.random_range(-half_spread..half_spread)
        } else {
            0.0
        };
        let dir = toward.goal_direction();
        self.puck.body.vel = Vec2::new(angle.sin(), dir * angle.cos()) * tuning.serve_speed;
        log::debug!("Serve toward player {} at {:.3} rad", toward.number(), angle);
    }

    fn score_changed(&self) -> GameEvent {
        let score = self.match_state.score();
        GameEvent::ScoreChanged {
            p1_goals: score.goals(Player::One),
            p2_goals: score.goals(Player::Two),
        }
    }

    fn round_ended(&self, winner: Player) -> GameEvent {
        let score = self.match_state.score();
        GameEvent::RoundEnded {
            p1_rounds: score.rounds(Player::One),
            p2_rounds: score.rounds(Player::Two),
            winner,
        }
    }

    /// Place the puck (scenario setup); the next tick resolves any overlap
    pub fn place_puck(&mut self, pos: Vec2, vel: Vec2) {
        self.puck.body.pos = pos;
        self.puck.body.vel = vel;
        if !matches!(self.phase, GamePhase::MatchOver { .. }) {
            self.phase = GamePhase::Playing;
        }
    }

    /// Place a mallet, clamped into its zone
    pub fn place_mallet(&mut self, player: Player, pos: Vec2) {
        let zone = self.table.zone(player);
        let mallet = &mut self.mallets[player.index()];
        mallet.body.pos = zone::clamp_to_zone(pos, zone);
        mallet.body.vel = Vec2::ZERO;
    }

    /// Read-only copy for rendering and HUD
    pub fn snapshot(&self) -> Snapshot {
        let score = self.match_state.score();
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            puck: self.puck.body,
            mallets: [self.mallets[0].body, self.mallets[1].body],
            p1_goals: score.goals(Player::One),
            p2_goals: score.goals(Player::Two),
            p1_rounds: score.rounds(Player::One),
            p2_rounds: score.rounds(Player::Two),
            rounds_to_win: score.rounds_to_win,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn table(&self) -> &TableGeometry {
        &self.table
    }

    pub fn puck(&self) -> &Puck {
        &self.puck
    }

    pub fn mallet(&self, player: Player) -> &Mallet {
        &self.mallets[player.index()]
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn winner(&self) -> Option<Player> {
        self.match_state.winner()
    }
}
