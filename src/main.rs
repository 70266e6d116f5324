//! Sidescroll Demo Host
//!
//! Headless host for the platformer core. Plays a scripted session,
//! logs what happens, then replays the recording to check determinism.
//!
//! Usage: `sidescroll [levels.json] [config.json]`

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sidescroll::{
    TICK_RATE, VERSION,
    GameConfig, LevelCatalog, Game, GameState, InputFrame, InputRecording, Key,
    game::{
        events::GameEventData,
        tick::replay_session,
    },
};

/// Give up on sessions that neither win nor lose.
const MAX_TICKS: u32 = 20_000;

/// Ticks between scripted jumps.
const JUMP_INTERVAL: u32 = 150;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Sidescroll v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let mut args = std::env::args().skip(1);
    let catalog = match args.next() {
        Some(path) => LevelCatalog::load(&path)
            .with_context(|| format!("failed to load levels from {}", path))?,
        None => {
            info!("No level file given, using built-in levels");
            LevelCatalog::builtin()
        }
    };
    let config = match args.next() {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => GameConfig::default(),
    };

    demo_session(config, catalog)
}

/// Input script: hold right, tap jump at a fixed interval.
fn scripted_input(tick: u32) -> InputFrame {
    let mut frame = InputFrame::with_keys(&[Key::Right]);
    frame.set(Key::Up, tick % JUMP_INTERVAL == 0);
    frame
}

fn demo_session(config: GameConfig, catalog: LevelCatalog) -> Result<()> {
    info!("=== Starting Demo Session ===");

    let mut game = Game::new(config.clone(), catalog.clone()).context("failed to start game")?;
    let mut recording = InputRecording::new();
    let mut state = GameState::Ongoing;

    for t in 0..MAX_TICKS {
        let frame = scripted_input(t);
        recording.record(t, frame);

        state = game
            .update(&frame)
            .with_context(|| format!("update failed at tick {}", game.tick()))?;

        for event in game.take_events() {
            match event.data {
                GameEventData::LifeLost { lives_left } => {
                    info!("Tick {}: fell off the level, {} lives left", event.tick, lives_left);
                }
                GameEventData::LevelAdvanced { level } => {
                    info!("Tick {}: reached level {}", event.tick, level);
                }
                GameEventData::GameWon { levels_completed } => {
                    info!("Tick {}: all {} levels completed", event.tick, levels_completed);
                }
                GameEventData::GameOver => {
                    info!("Tick {}: out of lives", event.tick);
                }
                GameEventData::JumpStarted | GameEventData::JumpFinished => {}
            }
        }

        if state.is_finished() {
            break;
        }
    }

    if !state.is_finished() {
        warn!("Session still running after {} ticks", MAX_TICKS);
    }

    info!("=== Session Results ===");
    if let Some(banner) = state.banner() {
        info!("{}", banner);
    }
    let snapshot = serde_json::to_string(&game.snapshot()).context("failed to encode snapshot")?;
    info!("Final frame: {}", snapshot);

    let hash = game.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));
    info!(
        "Recorded {} input changes over {} ticks",
        recording.delta_count(),
        recording.end_tick + 1
    );

    info!("=== Verifying Determinism ===");
    let replayed = replay_session(config, catalog, &recording).context("replay failed")?;
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }

    Ok(())
}
