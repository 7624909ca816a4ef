//! Buff pickups and timed player effects
//!
//! Two separate lifetimes: a pickup floats in the world until consumed or
//! expired; consuming one arms an `ActiveEffect` slot on the player for a
//! fixed duration. The three kinds mutate disjoint player attributes, so
//! expiring one never clobbers another.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::consts::*;

/// Buff kinds dropped by a despawning boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    /// Bullets shatter on the player instead of killing them
    Shield,
    /// Elevated movement speed
    Speed,
    /// Reduced hitbox
    Size,
}

impl BuffKind {
    pub fn color(self) -> u32 {
        match self {
            BuffKind::Shield => COLOR_SHIELD,
            BuffKind::Speed => COLOR_SPEED,
            BuffKind::Size => COLOR_SIZE,
        }
    }

    /// Uniform random kind for the boss drop.
    pub fn random(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..3) {
            0 => BuffKind::Shield,
            1 => BuffKind::Speed,
            _ => BuffKind::Size,
        }
    }
}

/// An unconsumed buff floating in the world
#[derive(Debug, Clone)]
pub struct BuffPickup {
    pub pos: Vec2,
    pub kind: BuffKind,
    pub radius: f32,
    /// Elapsed-ms timestamp at spawn
    spawned_at_ms: f64,
    /// Decorative bob/pulse phases, advanced per tick for the renderer
    pub pulse_phase: f32,
    pub float_phase: f32,
}

impl BuffPickup {
    pub fn new(pos: Vec2, kind: BuffKind, elapsed_ms: f64) -> Self {
        Self {
            pos,
            kind,
            radius: PICKUP_RADIUS,
            spawned_at_ms: elapsed_ms,
            pulse_phase: 0.0,
            float_phase: 0.0,
        }
    }

    /// Advance decorative phases; returns false once the pickup has sat
    /// unconsumed past its lifetime.
    pub fn update(&mut self, elapsed_ms: f64) -> bool {
        if elapsed_ms - self.spawned_at_ms > PICKUP_LIFETIME_MS {
            return false;
        }
        self.pulse_phase += 0.15;
        self.float_phase += 0.08;
        self.pos.y += self.float_phase.sin() * 0.5;
        true
    }
}

/// One timed effect slot
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectSlot {
    pub active: bool,
    pub ends_at_ms: f64,
}

/// The per-kind effect table applied to the player
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    pub shield: EffectSlot,
    pub speed: EffectSlot,
    pub size: EffectSlot,
}

impl ActiveEffects {
    /// Arm a kind for the fixed effect duration and apply its immediate
    /// player mutation. Shield has none - it is resolved at collision time.
    pub fn activate(&mut self, kind: BuffKind, elapsed_ms: f64, player: &mut Player) {
        let slot = EffectSlot {
            active: true,
            ends_at_ms: elapsed_ms + EFFECT_DURATION_MS,
        };
        match kind {
            BuffKind::Shield => self.shield = slot,
            BuffKind::Speed => {
                self.speed = slot;
                player.speed = BUFFED_SPEED;
            }
            BuffKind::Size => {
                self.size = slot;
                player.radius = BUFFED_RADIUS;
            }
        }
    }

    /// Expire slots whose timer has run out, restoring only the expired
    /// kind's baseline attribute.
    pub fn update(&mut self, elapsed_ms: f64, player: &mut Player) {
        if self.shield.active && elapsed_ms > self.shield.ends_at_ms {
            self.shield.active = false;
        }
        if self.speed.active && elapsed_ms > self.speed.ends_at_ms {
            self.speed.active = false;
            player.speed = PLAYER_SPEED;
        }
        if self.size.active && elapsed_ms > self.size.ends_at_ms {
            self.size.active = false;
            player.radius = PLAYER_RADIUS;
        }
    }
}
