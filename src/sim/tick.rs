//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::collision;
use super::events::GameEvent;
use super::level;
use super::paddle::PaddleIntent;
use super::powerup::{self, EffectTarget, PowerFactory};
use super::state::{GamePhase, GameState};
use super::vector::Vector2;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle movement; `None` keeps the current velocity
    pub paddle: Option<PaddleIntent>,
    /// Launch the ball waiting on the paddle
    pub launch: bool,
    /// Debug: flip pierce on the first ball
    pub toggle_pierce_debug: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    state.events.clear();

    if !dt.is_finite() || dt <= 0.0 {
        log::warn!("Ignoring tick with invalid dt {dt}");
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Playing => {}
        GamePhase::LevelComplete => {
            advance_transition(state, dt);
            return;
        }
        GamePhase::Paused | GamePhase::Victory | GamePhase::GameOver => return,
    }

    state.time_ticks += 1;

    state.effects.update(dt, &mut state.paddle, &mut state.balls);

    // Paddle
    if let Some(intent) = input.paddle {
        state.paddle.apply_intent(intent, state.settings.paddle_speed);
    }
    state.paddle.update(dt);

    if input.launch {
        let speed = state.settings.ball_speed;
        if let Some(ball) = state.balls.first_mut() {
            if ball.on_paddle {
                ball.launch(speed);
                log::debug!("Ball {} launched", ball.id);
                state.events.push(GameEvent::BallLaunched { ball_id: ball.id });
            }
        }
    }

    if input.toggle_pierce_debug {
        if let Some(ball) = state.balls.first_mut() {
            ball.set_pierce(!ball.pierce);
            log::debug!("Pierce debug: ball {} pierce={}", ball.id, ball.pierce);
        }
    }

    // Balls ride the paddle or fly
    for ball in state.balls.iter_mut() {
        if ball.on_paddle {
            ball.follow_paddle(&state.paddle);
        } else {
            ball.update(dt);
        }
    }

    for power_up in &mut state.power_ups {
        power_up.update(dt);
    }

    collide_balls(state);
    collect_power_ups(state);

    state.power_ups.retain(|p| !p.collected);
    state.bricks.retain(|b| !b.is_to_be_removed());

    if state.bricks.is_empty() {
        complete_level(state);
    }

    // Clearing the final layout on the last life still counts as a win
    if state.lives == 0 && state.phase != GamePhase::Victory {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at level {} with score {}",
            state.level_index + 1,
            state.score
        );
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level_index: state.level_index,
        });
    }
}

/// Paddle, then at most one brick, then walls, for every flying ball
fn collide_balls(state: &mut GameState) {
    let base_speed = state.settings.ball_speed;
    let mut lost: Vec<u32> = Vec::new();
    let mut destroyed_at: Vec<Vector2> = Vec::new();

    for ball in state.balls.iter_mut() {
        if !ball.active {
            continue;
        }

        if collision::ball_paddle_collision(ball, &state.paddle, base_speed) {
            state.events.push(GameEvent::PaddleHit { ball_id: ball.id });
        }

        if let Some(index) = collision::first_brick_hit(ball, &state.bricks) {
            collision::resolve_brick_bounce(ball, &state.bricks[index]);
            let brick = &mut state.bricks[index];
            let destroyed = brick.on_hit();
            state.score += u64::from(brick.score_value);
            state.events.push(GameEvent::BrickHit {
                brick_id: brick.id,
                score_delta: brick.score_value,
                destroyed,
            });
            if destroyed {
                destroyed_at.push(brick.position);
            }
        }

        if collision::ball_wall_collision(ball).any() {
            state.events.push(GameEvent::WallHit { ball_id: ball.id });
        }

        if collision::ball_lost(ball) {
            lost.push(ball.id);
        }
    }

    // Deferred so the id counter and rng are free to borrow
    let factory = PowerFactory::from_settings(&state.settings);
    for position in destroyed_at {
        let id = state.next_entity_id();
        if let Some(power_up) = factory.roll(&mut state.rng, id, position) {
            log::debug!("Spawned {} power-up {}", power_up.kind.name(), id);
            state.events.push(GameEvent::PowerUpSpawned {
                id,
                kind: power_up.kind,
            });
            state.power_ups.push(power_up);
        }
    }

    if lost.is_empty() {
        return;
    }
    state.balls.remove_all(&lost);
    if state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        log::info!("Life lost, {} remaining", state.lives);
        state.events.push(GameEvent::LifeLost {
            lives_left: state.lives,
        });
        if state.lives > 0 {
            state.balls.spawn_attached(&state.paddle);
        }
    }
}

fn collect_power_ups(state: &mut GameState) {
    let paddle_rect = state.paddle.rect();
    let mut collected = Vec::new();
    for power_up in &mut state.power_ups {
        if !power_up.collected && power_up.rect().overlaps(&paddle_rect) {
            power_up.collected = true;
            collected.push((power_up.id, power_up.kind));
        }
    }

    for (id, kind) in collected {
        let target = EffectTarget {
            paddle: &mut state.paddle,
            balls: &mut state.balls,
            lives: &mut state.lives,
            effects: &mut state.effects,
        };
        let outcome = powerup::apply_effect(kind, target, &state.settings, &mut state.rng);
        log::debug!("Collected {} power-up {}: {:?}", kind.name(), id, outcome);
        state.events.push(GameEvent::PowerUpCollected { id, kind });
    }
}

fn complete_level(state: &mut GameState) {
    let completed = state.level_index;
    log::info!(
        "Level {} complete! Score: {}",
        completed + 1,
        state.score
    );
    state.events.push(GameEvent::LevelCompleted {
        level_index: completed,
        score: state.score,
    });
    state.reset_play_field();

    if level::has_next_level(completed) {
        state.phase = GamePhase::LevelComplete;
        state.transition_timer = state.settings.level_transition_secs;
    } else {
        state.phase = GamePhase::Victory;
        log::info!("All levels cleared with score {}", state.score);
        state.events.push(GameEvent::AllLevelsCompleted {
            score: state.score,
            level_index: completed,
        });
    }
}

/// Count down the breather, then bring in the next layout
fn advance_transition(state: &mut GameState, dt: f64) {
    state.transition_timer -= dt;
    if state.transition_timer > 0.0 {
        return;
    }
    let next = state.level_index + 1;
    match state.load_level(next) {
        Ok(()) => log::info!("Level {} started", next + 1),
        Err(e) => {
            log::error!("Could not load level {}: {e}", next + 1);
            state.phase = GamePhase::Victory;
        }
    }
}
