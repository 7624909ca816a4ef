//! Simulation core
//!
//! All gameplay logic lives here and is deterministic given a seed and a
//! sequence of wall-clock reads:
//! - One tick per display refresh, driven by the shell
//! - Seeded RNG, stored in the state
//! - No rendering or platform dependencies

pub mod boss;
pub mod buffs;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod state;
pub mod tick;

pub use boss::Boss;
pub use buffs::{ActiveEffects, BuffKind, BuffPickup, EffectSlot};
pub use clock::GameClock;
pub use collision::circles_overlap;
pub use difficulty::{Difficulty, Tuning, score_at};
pub use state::{Bullet, BulletKind, GameEvent, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, tick};
