//! Dino Run entry point
//!
//! Headless frontend: drives the simulation with a fixed-timestep loop,
//! standing in for the windowed renderer. Useful for watching the autopilot
//! and checking tuning files.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use thiserror::Error;

use dino_run::consts::{MAX_SUBSTEPS, SIM_DT};
use dino_run::sim::{GameEvent, GameState, InputEvent, TickInput, tick};
use dino_run::{Tuning, TuningError};

#[derive(Debug, Parser)]
#[command(name = "dino-run", version, about = "Run a headless Dino Run session")]
struct Cli {
    /// Seed for obstacle spawning
    #[arg(long, default_value_t = 0x00D1_2026)]
    seed: u64,
    /// Simulation ticks to run (60 per second)
    #[arg(long, default_value_t = 60 * 60)]
    ticks: u64,
    /// Leave the autopilot off (the actor then never jumps)
    #[arg(long)]
    no_autopilot: bool,
    /// JSON tuning overrides
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Print a JSON snapshot every N ticks
    #[arg(long, value_name = "TICKS")]
    snapshot_every: Option<u64>,
    /// Restart automatically after game over, up to this many times
    #[arg(long, default_value_t = 0)]
    restarts: u32,
    /// Pace the loop to wall-clock time instead of running flat out
    #[arg(long)]
    realtime: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Tuning(#[from] TuningError),
    #[error("failed to encode snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Longest frame the accumulator will try to catch up on
const MAX_FRAME_TIME: f32 = 0.25;

/// Session plus the fixed-timestep accumulator
struct Game {
    state: GameState,
    accumulator: f32,
    pending: Vec<InputEvent>,
    total_ticks: u64,
    best_score: u64,
    jumps: u32,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            accumulator: 0.0,
            pending: Vec::new(),
            total_ticks: 0,
            best_score: 0,
            jumps: 0,
        }
    }

    /// Run exactly one tick, feeding it the pending one-shot inputs
    fn step(&mut self) {
        let input = TickInput::from_events(&self.pending);
        self.pending.clear();

        tick(&mut self.state, &input);
        self.total_ticks += 1;

        for event in self.state.drain_events() {
            match event {
                GameEvent::Jumped { .. } => self.jumps += 1,
                GameEvent::Collided => self.best_score = self.best_score.max(self.state.score()),
                other => log::debug!("{other:?}"),
            }
        }
    }

    /// Run as many ticks as `dt` seconds of wall-clock time cover
    fn update(&mut self, dt: f32) {
        self.accumulator += dt.min(MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // One-shot inputs go to the first substep only
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path).inspect_err(|e| log::error!("{e}"))?,
        None => Tuning::default(),
    };

    log::info!("Dino Run (headless) starting, seed {:#x}", cli.seed);
    let mut game = Game::new(cli.seed, tuning);
    if !cli.no_autopilot {
        game.pending.push(InputEvent::ToggleAutopilot);
    }

    let frame = Duration::from_secs_f32(SIM_DT);
    let mut restarts_left = cli.restarts;
    let mut last_snapshot = 0;
    let mut last_frame = Instant::now();

    while game.total_ticks < cli.ticks {
        if cli.realtime {
            let now = Instant::now();
            game.update(now.duration_since(last_frame).as_secs_f32());
            last_frame = now;
        } else {
            game.step();
        }

        if let Some(every) = cli.snapshot_every.filter(|&n| n > 0) {
            if game.total_ticks - last_snapshot >= every {
                last_snapshot = game.total_ticks;
                println!("{}", serde_json::to_string(&game.state.snapshot())?);
            }
        }

        if game.state.quit_requested {
            break;
        }
        if game.state.is_game_over() {
            if restarts_left == 0 {
                break;
            }
            if !game.pending.contains(&InputEvent::Restart) {
                restarts_left -= 1;
                game.pending.push(InputEvent::Restart);
            }
        }

        if cli.realtime {
            if let Some(wait) = frame.checked_sub(last_frame.elapsed()) {
                thread::sleep(wait);
            }
        }
    }

    let best = game.best_score.max(game.state.score());
    log::info!(
        "Finished after {} ticks: {} run(s), {} jumps, best {} m, last run {} m{}",
        game.total_ticks,
        game.state.runs + 1,
        game.jumps,
        best,
        game.state.score(),
        if game.state.is_game_over() { " (crashed)" } else { "" }
    );
    println!("distance: {} m", game.state.score());
    Ok(())
}
