//! Brick Breaker headless driver
//!
//! Runs a session under an autopilot at a fixed timestep and prints the
//! final snapshot as JSON.
//!
//! Usage: `brick-breaker [seed] [settings.json|-] [progress.json] [start_level]`
//!
//! `start_level` is 1-based and must be unlocked in the progress file,
//! which is written back when the run ends.

use brick_breaker::consts::*;
use brick_breaker::sim::{
    GamePhase, GameState, LEVEL_COUNT, PaddleIntent, Services, TickInput, tick,
};
use brick_breaker::{AudioManager, ConfigError, HighScores, LevelProgress, Settings};

/// Simulated display refresh
const FRAME_DT: f64 = 1.0 / 60.0;
/// Give up after ten minutes of play
const MAX_FRAMES: u64 = 60 * 60 * 10;
/// Paddle stops when this close to its target
const DEADZONE: f64 = 4.0;

fn main() -> Result<(), ConfigError> {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
            log::warn!("Invalid seed {raw:?}, using 0");
            0
        }),
        None => 0,
    };
    let settings = match args.next() {
        Some(path) if path != "-" => Settings::from_json(&read_file(&path)?)?,
        _ => Settings::default(),
    };
    settings.validate()?;
    let progress_path = args.next();
    let levels = match &progress_path {
        Some(path) if std::path::Path::new(path).exists() => {
            LevelProgress::from_json(&read_file(path)?)?
        }
        _ => LevelProgress::new(),
    };
    let start_index = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .and_then(|level| level.checked_sub(1))
            .ok_or_else(|| ConfigError::Invalid(format!("bad start level {raw:?}")))?,
        None => 0,
    };

    let mut audio = AudioManager::from_settings(&settings);
    let mut progress = (HighScores::new(), levels);
    progress.1.check_unlocked(start_index)?;
    let mut state = GameState::with_settings(seed, settings);
    state.start_at_level(start_index)?;

    let mut accumulator = 0.0;
    let mut frames = 0;
    while frames < MAX_FRAMES && !finished(&state) {
        frames += 1;
        accumulator += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = autopilot(&state);
            tick(&mut state, &input, SIM_DT);
            Services::new(&mut audio, &mut progress).dispatch(&state.events);
            accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    log::info!(
        "Finished after {} frames: {:?}, level {}, score {}, {} sounds played",
        frames,
        state.phase,
        state.level_index + 1,
        state.score,
        audio.played()
    );
    let (scores, levels) = &progress;
    if let Some(top) = scores.top_score() {
        log::info!("Best score this run: {top}");
    }
    log::info!(
        "{}/{} levels unlocked",
        levels.unlocked_levels(),
        LEVEL_COUNT
    );

    if let Some(path) = &progress_path {
        std::fs::write(path, levels.to_json()?)
            .map_err(|e| ConfigError::Invalid(format!("{path}: {e}")))?;
        log::info!("Progress saved to {path}");
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn read_file(path: &str) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Invalid(format!("{path}: {e}")))
}

fn finished(state: &GameState) -> bool {
    matches!(state.phase, GamePhase::GameOver | GamePhase::Victory)
}

/// Chase the lowest descending ball; with none in danger, go for a power-up
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    if state.balls.iter().any(|b| b.on_paddle) {
        input.launch = true;
    }

    let threat = state
        .balls
        .iter()
        .filter(|b| b.active && b.vel().y > 0.0)
        .max_by(|a, b| a.pos().y.total_cmp(&b.pos().y));
    let pickup = state
        .power_ups
        .iter()
        .max_by(|a, b| a.position.y.total_cmp(&b.position.y));

    let target = if let Some(ball) = threat {
        // Oscillating offset so the ball doesn't settle into a vertical loop
        ball.pos().x + 20.0 * (state.time_ticks as f64 * 0.01).sin()
    } else if let Some(power_up) = pickup {
        power_up.rect().center().x
    } else {
        SCREEN_WIDTH / 2.0
    };

    let offset = target - state.paddle.x();
    input.paddle = Some(if offset > DEADZONE {
        PaddleIntent::Right
    } else if offset < -DEADZONE {
        PaddleIntent::Left
    } else {
        PaddleIntent::Stop
    });
    input
}
