//! Bullet Dodger - a bullet-hell survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, difficulty, game state)
//! - `snapshot`: Read-only presentation state for the render collaborator
//! - `best_score`: Personal best persistence (LocalStorage on web)
//! - `settings`: Player preferences (color picker)
//! - `render`: Canvas 2D drawing of snapshots (wasm only)

pub mod best_score;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use best_score::BestScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// One simulation tick in milliseconds (~60 Hz, one tick per display refresh)
    pub const TICK_MS: f64 = 1000.0 / 60.0;

    /// Arena dimensions before the shell reports a canvas size
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults (restored on restart and on buff expiry)
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Player color when no preference is saved (green)
    pub const PLAYER_DEFAULT_COLOR: u32 = 0x00ff88;

    /// Bullet radii by kind
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const ASTEROID_RADIUS: f32 = 12.0;
    /// Asteroids move slower than standard bullets
    pub const ASTEROID_SPEED_FACTOR: f32 = 0.7;
    /// Trail ring capacity by kind (oldest point evicted)
    pub const TRAIL_LEN_STANDARD: usize = 8;
    pub const TRAIL_LEN_ASTEROID: usize = 6;
    /// Bullets spawn this far outside the arena edge
    pub const BULLET_SPAWN_MARGIN: f32 = 20.0;
    /// Bullets despawn once past the arena edge by this margin
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Boss parameters
    pub const BOSS_RADIUS: f32 = 40.0;
    pub const BOSS_SPEED: f32 = 1.5;
    pub const BOSS_MOVE_INTERVAL_MS: f64 = 2000.0;
    pub const BOSS_SHOOT_INTERVAL_MS: f64 = 800.0;
    /// Upper bound for the re-randomized shoot interval
    pub const BOSS_SHOOT_INTERVAL_MAX_MS: f64 = 2000.0;
    pub const BOSS_MAX_BURSTS: u32 = 5;
    pub const BOSS_DURATION_MS: f64 = 10_000.0;
    /// Boss spawns at every minute of survival
    pub const BOSS_PERIOD_SECS: f32 = 60.0;
    /// Warning shown this long into the period, until the spawn
    pub const BOSS_WARNING_SECS: f32 = 55.0;
    pub const BOSS_RADIAL_BULLETS: u32 = 8;
    pub const BOSS_AIMED_BULLETS: u32 = 3;
    pub const BOSS_RADIAL_SPEED_FACTOR: f32 = 1.3;
    pub const BOSS_AIMED_SPEED_FACTOR: f32 = 1.1;
    /// Ambient bullet spawn rate is cut to this fraction while a boss is up
    pub const BOSS_SPAWN_RATE_FACTOR: f32 = 0.3;

    /// Buff pickup parameters
    pub const PICKUP_RADIUS: f32 = 20.0;
    /// Unconsumed pickups disappear after this long
    pub const PICKUP_LIFETIME_MS: f64 = 15_000.0;
    /// Activated buff effects last this long
    pub const EFFECT_DURATION_MS: f64 = 30_000.0;
    /// Player attribute values while the matching buff is active
    pub const BUFFED_SPEED: f32 = 7.0;
    pub const BUFFED_RADIUS: f32 = 12.0;

    /// Chance per tick of emitting a cosmetic player trail particle
    pub const TRAIL_PARTICLE_CHANCE: f32 = 0.3;

    /// Effect colors (RGB)
    pub const COLOR_SHIELD: u32 = 0x00aaff;
    pub const COLOR_SPEED: u32 = 0xffaa00;
    pub const COLOR_SIZE: u32 = 0xaa00ff;
    pub const COLOR_BOSS: u32 = 0xff0066;
    pub const COLOR_CELEBRATION: u32 = 0xffff00;
    pub const COLOR_EXPLOSION: u32 = 0xff4444;
}
