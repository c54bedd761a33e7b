//! Power-ups: falling pickups, the factory that drops them, and the
//! effects they apply.
//!
//! Timed effects count down in simulation time inside the tick, so they
//! freeze while paused and replay identically for the same inputs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ball::BallSet;
use super::paddle::Paddle;
use super::vector::{Rect, Vector2, rotate};
use crate::consts::*;
use crate::settings::{PowerUpWeights, Settings};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExpandPaddle,
    FastBall,
    PierceBall,
    MultiBall,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::ExpandPaddle,
        PowerUpKind::FastBall,
        PowerUpKind::PierceBall,
        PowerUpKind::MultiBall,
        PowerUpKind::ExtraLife,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::ExpandPaddle => "ExpandPaddle",
            PowerUpKind::FastBall => "FastBall",
            PowerUpKind::PierceBall => "PierceBall",
            PowerUpKind::MultiBall => "MultiBall",
            PowerUpKind::ExtraLife => "ExtraLife",
        }
    }

    fn weight(self, weights: &PowerUpWeights) -> u32 {
        match self {
            PowerUpKind::ExpandPaddle => weights.expand_paddle,
            PowerUpKind::FastBall => weights.fast_ball,
            PowerUpKind::PierceBall => weights.pierce_ball,
            PowerUpKind::MultiBall => weights.multi_ball,
            PowerUpKind::ExtraLife => weights.extra_life,
        }
    }
}

/// A falling pickup. `position` is the top-left of its box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub position: Vector2,
    pub fall_speed: f64,
    /// Set when picked up or when it falls off screen
    pub collected: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, position: Vector2, fall_speed: f64) -> Self {
        Self {
            id,
            kind,
            position,
            fall_speed,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, POWERUP_SIZE, POWERUP_SIZE)
    }

    /// Fall; expire once below the screen
    pub fn update(&mut self, dt: f64) {
        if self.collected {
            return;
        }
        self.position.y += self.fall_speed * dt;
        if self.position.y > SCREEN_HEIGHT {
            self.collected = true;
            log::debug!("{} power-up {} fell off screen", self.kind.name(), self.id);
        }
    }
}

/// Chooses whether and which power-up a destroyed brick drops
#[derive(Debug, Clone)]
pub struct PowerFactory {
    pub spawn_chance: f64,
    pub weights: PowerUpWeights,
    pub fall_speed: f64,
}

impl PowerFactory {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            spawn_chance: settings.powerup_spawn_chance,
            weights: settings.powerup_weights,
            fall_speed: settings.powerup_fall_speed,
        }
    }

    /// Weighted pick among the kinds; `None` if every weight is zero
    pub fn choose_kind<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PowerUpKind> {
        let total = self.weights.total().filter(|&t| t > 0)?;
        let mut roll = rng.random_range(0..total);
        for kind in PowerUpKind::ALL {
            let weight = kind.weight(&self.weights);
            if roll < weight {
                return Some(kind);
            }
            roll -= weight;
        }
        None
    }

    /// Spawn check followed by a weighted pick
    pub fn roll<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        id: u32,
        position: Vector2,
    ) -> Option<PowerUp> {
        if rng.random::<f64>() >= self.spawn_chance {
            return None;
        }
        let kind = self.choose_kind(rng)?;
        Some(PowerUp::new(id, kind, position, self.fall_speed))
    }
}

/// An effect that reverts when its timer runs out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimedEffect {
    ExpandPaddle,
    /// Multiplier applied to a specific ball, divided back out on expiry
    FastBall { ball_id: u32, multiplier: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub effect: TimedEffect,
    /// Seconds of simulation time left
    pub remaining: f64,
}

/// Running timed effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub active: Vec<ActiveEffect>,
}

impl ActiveEffects {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Start an effect; a running paddle expansion has its timer refreshed
    pub fn start(&mut self, effect: TimedEffect, duration: f64) {
        if effect == TimedEffect::ExpandPaddle {
            if let Some(existing) = self
                .active
                .iter_mut()
                .find(|e| e.effect == TimedEffect::ExpandPaddle)
            {
                existing.remaining = duration;
                return;
            }
        }
        self.active.push(ActiveEffect {
            effect,
            remaining: duration,
        });
    }

    /// Count timers down and revert the ones that expire
    pub fn update(&mut self, dt: f64, paddle: &mut Paddle, balls: &mut BallSet) {
        let mut expired = Vec::new();
        self.active.retain_mut(|e| {
            e.remaining -= dt;
            if e.remaining <= 0.0 {
                expired.push(e.effect);
                false
            } else {
                true
            }
        });

        for effect in expired {
            revert(effect, paddle, balls);
        }
    }

    /// Drop all effects without reverting (the entities they touched are reset)
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

fn revert(effect: TimedEffect, paddle: &mut Paddle, balls: &mut BallSet) {
    match effect {
        TimedEffect::ExpandPaddle => {
            paddle.reset_width();
            paddle.clamp_to_walls();
            log::debug!("Expand paddle expired");
        }
        TimedEffect::FastBall {
            ball_id,
            multiplier,
        } => {
            if let Some(ball) = balls.get_mut(ball_id) {
                ball.body.velocity /= multiplier;
                log::debug!("Fast ball expired for ball {ball_id}");
            }
        }
    }
}

/// Everything an effect may touch
pub struct EffectTarget<'a> {
    pub paddle: &'a mut Paddle,
    pub balls: &'a mut BallSet,
    pub lives: &'a mut u32,
    pub effects: &'a mut ActiveEffects,
}

/// What happened when an effect was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    Applied,
    /// No ball to act on; effect discarded
    NoBall,
    /// Multi-ball would exceed the ball cap; effect dropped
    BallCapReached,
}

/// Apply a collected power-up, using the first ball as the effect's ball
pub fn apply_effect<R: Rng + ?Sized>(
    kind: PowerUpKind,
    target: EffectTarget<'_>,
    settings: &Settings,
    rng: &mut R,
) -> EffectOutcome {
    let Some(first) = target.balls.first() else {
        log::warn!("{} collected with no ball in play; effect discarded", kind.name());
        return EffectOutcome::NoBall;
    };
    let first_id = first.id;

    match kind {
        PowerUpKind::ExpandPaddle => {
            target.paddle.expand(settings.expand_factor);
            target.paddle.clamp_to_walls();
            target
                .effects
                .start(TimedEffect::ExpandPaddle, settings.expand_duration_secs);
        }
        PowerUpKind::FastBall => {
            let multiplier = settings.fast_ball_factor;
            if let Some(ball) = target.balls.get_mut(first_id) {
                ball.body.velocity *= multiplier;
            }
            target.effects.start(
                TimedEffect::FastBall {
                    ball_id: first_id,
                    multiplier,
                },
                settings.fast_ball_duration_secs,
            );
        }
        PowerUpKind::PierceBall => {
            if let Some(ball) = target.balls.get_mut(first_id) {
                ball.set_pierce(true);
            }
        }
        PowerUpKind::MultiBall => {
            return spawn_multi_ball(
                target.balls,
                settings.multi_ball_cap,
                settings.multi_ball_jitter,
                rng,
            );
        }
        PowerUpKind::ExtraLife => {
            *target.lives += 1;
        }
    }
    log::debug!("{} applied", kind.name());
    EffectOutcome::Applied
}

/// Clone every free ball with a jittered heading, unless that breaks the cap
fn spawn_multi_ball<R: Rng + ?Sized>(
    balls: &mut BallSet,
    cap: usize,
    jitter: f64,
    rng: &mut R,
) -> EffectOutcome {
    let clones: Vec<(Vector2, Vector2)> = balls
        .iter()
        .filter(|b| b.active)
        .map(|b| {
            let offset = if jitter > 0.0 {
                rng.random_range(-jitter..=jitter)
            } else {
                0.0
            };
            (b.pos(), rotate(b.vel(), offset))
        })
        .collect();

    if balls.len() + clones.len() > cap {
        log::debug!(
            "Multi-ball dropped: {} + {} would exceed cap {}",
            balls.len(),
            clones.len(),
            cap
        );
        return EffectOutcome::BallCapReached;
    }

    for (pos, vel) in clones {
        balls.spawn_free(pos, vel);
    }
    EffectOutcome::Applied
}
