//! GravTank headless runner
//!
//! Drives the simulation without a window: the autopilot (or an idle
//! controller) plays for a fixed number of frames and every game event is
//! logged. Useful for soak-testing levels and tuning.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use grav_tank::Settings;
use grav_tank::consts::SIM_DT;
use grav_tank::sim::{Difficulty, GameEvent, GamePhase, GameState, LevelPack, TickInput, tick};

/// A rotating-gravity tank arcade game (headless)
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings JSON file (missing fields use defaults)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Level pack JSON file replacing the built-in campaign
    #[arg(short, long)]
    levels: Option<PathBuf>,

    /// Level to start on (1-based)
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Difficulty: easy, normal or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    frames: u64,

    /// Seed for the autopilot
    #[arg(long)]
    seed: Option<u64>,

    /// Let the autopilot play instead of an idle controller
    #[arg(short, long)]
    autopilot: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let mut state = match &args.levels {
        Some(path) => {
            let pack = LevelPack::from_file(path)
                .with_context(|| format!("loading level pack from {}", path.display()))?;
            GameState::with_levels(settings, pack)?
        }
        None => GameState::new(settings),
    };
    state
        .levels
        .grid(args.level)
        .with_context(|| format!("choosing start level {}", args.level))?;
    state.level = args.level;

    log::info!(
        "GravTank headless: level {} on {}, {} frames{}",
        state.level,
        state.difficulty.as_str(),
        args.frames,
        if args.autopilot { ", autopilot" } else { "" }
    );

    let mut stats = RunStats::default();
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    let input = TickInput {
        idle_mode: args.autopilot,
        ..Default::default()
    };

    for frame in 0..args.frames {
        // Without the autopilot nobody presses start, so do it here
        let frame_input = if !args.autopilot && state.phase == GamePhase::Menu {
            &start
        } else {
            &input
        };
        tick(&mut state, frame_input, SIM_DT);

        for event in state.drain_events() {
            stats.record(&event);
            match event {
                GameEvent::Moving(_) | GameEvent::ShotFired { .. } => {
                    log::debug!("frame {frame}: {event:?}")
                }
                _ => log::info!("frame {frame}: {event:?}"),
            }
        }
    }

    log::info!(
        "Finished after {} ticks: level {}, health {}, {} enemies left",
        state.time_ticks,
        state.level,
        state.player_health(),
        state.enemies_alive()
    );
    log::info!(
        "Shots {}, hits taken {}, enemies destroyed {}, deaths {}, levels cleared {}",
        stats.shots,
        stats.hits_taken,
        stats.kills,
        stats.deaths,
        stats.levels_cleared
    );
    Ok(())
}

/// Totals for the end-of-run summary
#[derive(Debug, Default)]
struct RunStats {
    shots: u32,
    hits_taken: u32,
    kills: u32,
    deaths: u32,
    levels_cleared: u32,
}

impl RunStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShotFired { by: grav_tank::sim::Shooter::Player } => self.shots += 1,
            GameEvent::PlayerHit { .. } => self.hits_taken += 1,
            GameEvent::EnemyDestroyed { .. } => self.kills += 1,
            GameEvent::PlayerDied => self.deaths += 1,
            GameEvent::LevelCleared { .. } | GameEvent::CampaignComplete => {
                self.levels_cleared += 1
            }
            _ => {}
        }
    }
}
