//! Game state and core entity types
//!
//! One `GameState` per process, reset in place on every restart. All
//! mutation happens inside the tick handler; the renderer only ever sees
//! snapshots taken between ticks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::buffs::{ActiveEffects, BuffKind, BuffPickup};
use super::clock::GameClock;
use super::difficulty::{Difficulty, Tuning};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the start command
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting on restart
    GameOver,
}

/// One-shot notifications drained by the shell after each tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Fatal collision ended the run. `new_best` is set at most once per run.
    GameOver { score: u64, new_best: bool },
    BossSpawned,
    BossDespawned,
    BuffPickedUp(BuffKind),
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Mutated by the size buff, restored to `PLAYER_RADIUS` on expiry
    pub radius: f32,
    /// Mutated by the speed buff, restored to `PLAYER_SPEED` on expiry
    pub speed: f32,
    /// RGB, user-picked
    pub color: u32,
}

impl Player {
    pub fn new(pos: Vec2, color: u32) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            color,
        }
    }

    /// Keep the whole body inside the arena.
    pub fn clamp_to(&mut self, arena: Vec2) {
        self.pos.x = self.pos.x.clamp(self.radius, arena.x - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, arena.y - self.radius);
    }
}

/// Kind-specific bullet payload
#[derive(Debug, Clone)]
pub enum BulletKind {
    Standard,
    Asteroid {
        /// Polygon outline relative to the bullet center
        vertices: Vec<Vec2>,
        rotation: f32,
        rotation_speed: f32,
    },
}

/// A projectile. Velocity is derived once at spawn and never steered.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: BulletKind,
    /// HSL hue for rendering
    pub hue: f32,
    /// Recent positions, oldest first
    pub trail: Vec<Vec2>,
}

impl Bullet {
    /// Spawn a standard bullet aimed at `target`, moving `speed` units/tick.
    pub fn standard(pos: Vec2, target: Vec2, speed: f32, rng: &mut Pcg32) -> Self {
        Self::new(
            pos,
            target,
            speed,
            BULLET_RADIUS,
            BulletKind::Standard,
            rng.random_range(300.0..360.0),
        )
    }

    /// Spawn an asteroid: bigger, slower, with a jagged rotating outline.
    pub fn asteroid(pos: Vec2, target: Vec2, speed: f32, rng: &mut Pcg32) -> Self {
        let vertex_count = rng.random_range(8..12);
        let vertices = (0..vertex_count)
            .map(|i| {
                let angle = i as f32 / vertex_count as f32 * std::f32::consts::TAU;
                let r = ASTEROID_RADIUS * rng.random_range(0.7..1.3);
                Vec2::new(angle.cos() * r, angle.sin() * r)
            })
            .collect();
        let kind = BulletKind::Asteroid {
            vertices,
            rotation: 0.0,
            rotation_speed: rng.random_range(-0.05..0.05),
        };
        let hue = rng.random_range(15.0..45.0);
        Self::new(
            pos,
            target,
            speed * ASTEROID_SPEED_FACTOR,
            ASTEROID_RADIUS,
            kind,
            hue,
        )
    }

    fn new(pos: Vec2, target: Vec2, speed: f32, radius: f32, kind: BulletKind, hue: f32) -> Self {
        // Zero-length direction (target == source) degrades to a stationary
        // bullet instead of NaN components; off-screen eviction still applies
        // once the arena shrinks or the bullet is consumed.
        let vel = (target - pos).normalize_or_zero() * speed;
        Self {
            pos,
            vel,
            radius,
            kind,
            hue,
            trail: Vec::with_capacity(TRAIL_LEN_STANDARD),
        }
    }

    fn trail_capacity(&self) -> usize {
        match self.kind {
            BulletKind::Standard => TRAIL_LEN_STANDARD,
            BulletKind::Asteroid { .. } => TRAIL_LEN_ASTEROID,
        }
    }

    /// Advance one tick: record trail, integrate position, spin asteroids.
    pub fn update(&mut self) {
        self.trail.push(self.pos);
        if self.trail.len() > self.trail_capacity() {
            self.trail.remove(0);
        }

        self.pos += self.vel;

        if let BulletKind::Asteroid {
            ref mut rotation,
            rotation_speed,
            ..
        } = self.kind
        {
            *rotation += rotation_speed;
        }
    }

    /// Past the arena edge by the despawn margin on any side.
    pub fn is_off_screen(&self, arena: Vec2) -> bool {
        self.pos.x < -OFFSCREEN_MARGIN
            || self.pos.x > arena.x + OFFSCREEN_MARGIN
            || self.pos.y < -OFFSCREEN_MARGIN
            || self.pos.y > arena.y + OFFSCREEN_MARGIN
    }
}

/// A cosmetic particle (trail puffs, explosions, pickup flashes)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decremented by `decay` each tick
    pub life: f32,
    decay: f32,
    pub color: u32,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, color: u32, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)),
            life: 1.0,
            decay: rng.random_range(0.01..0.03),
            color,
            size: rng.random_range(1.0..4.0),
        }
    }

    /// Integrate, damp velocity exponentially, burn life down.
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel *= 0.98;
        self.life -= self.decay;
    }
}

/// Complete session state. Created once, reset on every restart.
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Arena size in simulation units (tracks the canvas)
    pub arena: Vec2,
    pub clock: GameClock,
    pub tuning: Tuning,
    pub difficulty: Difficulty,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub pickups: Vec<BuffPickup>,
    pub boss: Option<Boss>,
    pub effects: ActiveEffects,
    pub score: u64,
    pub best_score: u64,
    /// Survival seconds at which the previous boss spawned
    pub last_boss_secs: f32,
    pub boss_warning: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, best_score: u64, player_color: u32) -> Self {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let tuning = Tuning::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            arena,
            clock: GameClock::default(),
            difficulty: Difficulty::base(&tuning),
            tuning,
            player: Player::new(arena / 2.0, player_color),
            bullets: Vec::new(),
            particles: Vec::new(),
            pickups: Vec::new(),
            boss: None,
            effects: ActiveEffects::default(),
            score: 0,
            best_score,
            last_boss_secs: 0.0,
            boss_warning: false,
            events: Vec::new(),
        }
    }

    /// Start (or restart) a run: clear every transient pool, reset the
    /// difficulty curve, buffs and player attributes, restart the clock.
    pub fn start_run(&mut self, now_ms: f64) {
        self.phase = GamePhase::Playing;
        self.clock.start(now_ms);
        self.score = 0;

        self.bullets.clear();
        self.particles.clear();
        self.pickups.clear();
        self.boss = None;
        self.last_boss_secs = 0.0;
        self.boss_warning = false;

        self.effects = ActiveEffects::default();
        self.difficulty = Difficulty::base(&self.tuning);

        self.player.radius = PLAYER_RADIUS;
        self.player.speed = PLAYER_SPEED;
        self.player.pos = self.arena / 2.0;

        log::info!("run started (seed {})", self.seed);
    }

    /// Track the canvas size; the player recenters like on first load.
    pub fn set_arena_size(&mut self, width: f32, height: f32) {
        self.arena = Vec2::new(width, height);
        self.player.pos = self.arena / 2.0;
    }

    /// Pause the clock (visibility lost). Only meaningful mid-run.
    pub fn pause(&mut self, now_ms: f64) {
        if self.phase == GamePhase::Playing {
            self.clock.pause(now_ms);
        }
    }

    /// Resume after a pause. Idempotent like `pause`.
    pub fn resume(&mut self, now_ms: f64) {
        if self.phase == GamePhase::Playing {
            self.clock.resume(now_ms);
        }
    }

    /// Emit `count` particles of one color at `pos`.
    pub fn spawn_burst(&mut self, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            let p = Particle::new(pos, color, &mut self.rng);
            self.particles.push(p);
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain pending events (called by the shell once per frame).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
