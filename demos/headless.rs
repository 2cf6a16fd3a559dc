//! Headless match: a scripted pointer plays the AI until someone wins
//!
//! Run with `RUST_LOG=info cargo run --example headless [portrait|compact]`.

use air_hockey::consts::SIM_DT;
use air_hockey::persistence::{MemoryStore, load_or_default};
use air_hockey::sim::{EventSink, Player, PointerInput};
use air_hockey::{MatchConfig, Mode, Simulation, TickInput, Tuning};

/// Stand-in for the audio/HUD collaborators
#[derive(Default)]
struct ConsoleSink {
    wall_hits: u32,
    mallet_hits: u32,
}

impl EventSink for ConsoleSink {
    fn on_wall_hit(&mut self) {
        self.wall_hits += 1;
    }

    fn on_mallet_hit(&mut self, _player: Player) {
        self.mallet_hits += 1;
    }

    fn on_goal(&mut self, scorer: Player) {
        log::info!("Goal! Player {}", scorer.number());
    }

    fn on_score_changed(&mut self, p1_goals: u32, p2_goals: u32) {
        log::info!("Score {:03} - {:03}", p1_goals, p2_goals);
    }

    fn on_round_ended(&mut self, p1_rounds: u32, p2_rounds: u32, winner: Player) {
        log::info!(
            "Round {} to Player {}! ({}-{})",
            p1_rounds + p2_rounds,
            winner.number(),
            p1_rounds,
            p2_rounds
        );
    }

    fn on_match_ended(&mut self, winner: Player) {
        log::info!("Player {} wins the match!", winner.number());
    }
}

fn main() {
    env_logger::init();

    let preset = std::env::args().nth(1).unwrap_or_else(|| "portrait".into());
    let Some(tuning) = Tuning::preset(&preset) else {
        log::error!("Unknown preset '{preset}' (try portrait or compact)");
        std::process::exit(2);
    };

    // No real storage here: an empty store yields the defaults
    let settings = load_or_default(&MemoryStore::new());
    let config = match MatchConfig::new(tuning, &settings, Mode::SinglePlayer) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    let mut sim = match Simulation::new(config, 0xC0FFEE) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Invalid table: {e}");
            std::process::exit(2);
        }
    };

    let mut sink = ConsoleSink::default();
    let max_ticks = 60 * 60 * 20;
    for _ in 0..max_ticks {
        // Chase the puck, staying a little behind it
        let puck = sim.puck().body.pos;
        let input = TickInput {
            p1: PointerInput::held(puck.x, puck.y + 40.0),
            ..Default::default()
        };
        for event in sim.tick(&input, SIM_DT) {
            event.dispatch(&mut sink);
        }
        if sim.winner().is_some() {
            break;
        }
    }

    let snapshot = sim.snapshot();
    log::info!(
        "Finished after {} ticks: rounds {}-{}, {} wall hits, {} mallet hits",
        snapshot.tick,
        snapshot.p1_rounds,
        snapshot.p2_rounds,
        sink.wall_hits,
        sink.mallet_hits
    );
}
