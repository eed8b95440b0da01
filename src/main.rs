//! Retro Paddle entry point
//!
//! Headless driver: plays one scripted match and prints the final field.

use anyhow::Context;

use retro_paddle::Settings;
use retro_paddle::audio::{AudioManager, LogSink};
use retro_paddle::platform::input::Sweep;
use retro_paddle::platform::{FixedClock, FrameClock, ScriptedInput};
use retro_paddle::sim::{GameState, TickInput, tick};

const SEED_ENV: &str = "RETRO_PADDLE_SEED";
const DEFAULT_SEED: u64 = 0x5EED_1972;
/// Seconds of attract mode before the start button is pressed
const ATTRACT_SECS: f32 = 2.0;
/// Give up after this many simulated seconds
const MAX_MATCH_SECS: f32 = 600.0;

fn seed_from_env() -> anyhow::Result<u64> {
    match std::env::var(SEED_ENV) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got {raw:?}")),
        Err(_) => Ok(DEFAULT_SEED),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Retro Paddle (headless) starting...");

    let settings = Settings::load();
    let seed = seed_from_env()?;
    let input_range = settings.input_range;
    let attract_ticks = (ATTRACT_SECS * settings.frame_rate).round() as u64;
    let max_ticks = (MAX_MATCH_SECS * settings.frame_rate).round() as u64;

    let mut clock = FixedClock::from_rate(settings.frame_rate);
    let mut audio = AudioManager::new(LogSink);
    audio.set_muted(settings.silent);

    let mut state = GameState::new(settings, seed).context("invalid settings")?;
    log::info!("Game initialized with seed: {seed}");

    // Two players that sweep at different rates so rallies vary
    let mut input = ScriptedInput::new(
        Sweep::new(input_range, 1.7, 0.0),
        Sweep::new(input_range, 2.3, 1.1),
    );

    let mut winner = None;
    for frame in 0..attract_ticks + max_ticks {
        if frame == attract_ticks {
            input.press_start();
        }
        let dt = clock.tick();
        input.advance(dt);
        let sampled = TickInput::sample(&mut input, input_range);
        let events = tick(&mut state, &sampled, dt);
        audio.dispatch(&events);

        if events.winner.is_some() {
            winner = events.winner;
            break;
        }
    }

    match winner {
        Some(side) => log::info!("{side:?} won after {} ticks", state.time_ticks),
        None => log::warn!("Tick cap reached without a winner"),
    }

    let view = serde_json::to_string_pretty(&state.view())?;
    println!("{view}");
    Ok(())
}
