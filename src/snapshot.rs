//! Read-only render snapshot
//!
//! Built from `&GameState` between ticks. The renderer and HUD consume
//! only this, never the live state, so the draw path cannot mutate the
//! simulation. Serializable for replay capture and debugging dumps.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::EFFECT_DURATION_MS;
use crate::sim::{BuffKind, BulletKind, GamePhase, GameState};

/// Player as drawn: position, body, shield ring flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub shield_active: bool,
}

/// Shape payload for one bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BulletShape {
    Circle,
    Polygon { vertices: Vec<Vec2>, rotation: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
    /// HSL hue, full saturation assumed by the renderer
    pub hue: f32,
    pub trail: Vec<Vec2>,
    pub shape: BulletShape,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    /// 0-1, doubles as the alpha channel
    pub life: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: BuffKind,
    pub color: u32,
    pub pulse_phase: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TentacleView {
    pub angle: f32,
    pub length: f32,
    pub phase: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub pos: Vec2,
    pub radius: f32,
    pub pulse_phase: f32,
    pub tentacles: Vec<TentacleView>,
}

/// Remaining duration per effect slot, for the HUD timers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct EffectTimers {
    pub shield_secs: Option<f32>,
    pub speed_secs: Option<f32>,
    pub size_secs: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub survival_secs: f32,
    pub boss_warning: bool,
    pub paused: bool,
    pub effects: EffectTimers,
}

/// Everything the draw path needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub arena: Vec2,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    pub pickups: Vec<PickupView>,
    pub boss: Option<BossView>,
    pub hud: Hud,
}

impl RenderSnapshot {
    /// Capture the drawable state at wall-clock `now_ms`.
    pub fn capture(state: &GameState, now_ms: f64) -> Self {
        let elapsed_ms = state.clock.elapsed_ms(now_ms);
        let remaining = |slot: &crate::sim::EffectSlot| -> Option<f32> {
            if !slot.active {
                return None;
            }
            let left = (slot.ends_at_ms - elapsed_ms).clamp(0.0, EFFECT_DURATION_MS);
            Some((left / 1000.0) as f32)
        };

        Self {
            arena: state.arena,
            player: PlayerView {
                pos: state.player.pos,
                radius: state.player.radius,
                color: state.player.color,
                shield_active: state.effects.shield.active,
            },
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    radius: b.radius,
                    hue: b.hue,
                    trail: b.trail.clone(),
                    shape: match &b.kind {
                        BulletKind::Standard => BulletShape::Circle,
                        BulletKind::Asteroid {
                            vertices, rotation, ..
                        } => BulletShape::Polygon {
                            vertices: vertices.clone(),
                            rotation: *rotation,
                        },
                    },
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    life: p.life.max(0.0),
                })
                .collect(),
            pickups: state
                .pickups
                .iter()
                .map(|p| PickupView {
                    pos: p.pos,
                    radius: p.radius,
                    kind: p.kind,
                    color: p.kind.color(),
                    pulse_phase: p.pulse_phase,
                })
                .collect(),
            boss: state.boss.as_ref().map(|b| BossView {
                pos: b.pos,
                radius: b.radius,
                pulse_phase: b.pulse_phase,
                tentacles: b
                    .tentacles
                    .iter()
                    .map(|t| TentacleView {
                        angle: t.angle,
                        length: t.length,
                        phase: t.phase,
                    })
                    .collect(),
            }),
            hud: Hud {
                phase: state.phase,
                score: state.score,
                best_score: state.best_score,
                survival_secs: state.clock.elapsed_secs(now_ms),
                boss_warning: state.boss_warning,
                paused: state.clock.is_paused(),
                effects: EffectTimers {
                    shield_secs: remaining(&state.effects.shield),
                    speed_secs: remaining(&state.effects.speed),
                    size_secs: remaining(&state.effects.size),
                },
            },
        }
    }
}
