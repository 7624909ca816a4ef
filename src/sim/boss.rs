//! The periodic boss
//!
//! Spawns every minute of survival, wanders between random targets, fires
//! burst patterns, and despawns on a fixed timer - dropping the run's only
//! source of buff pickups where it stood.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Bullet;
use crate::consts::*;

/// Decorative appendage state, consumed by the renderer only
#[derive(Debug, Clone)]
pub struct Tentacle {
    pub angle: f32,
    pub length: f32,
    pub phase: f32,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub radius: f32,
    target: Vec2,
    move_timer_ms: f64,
    shoot_timer_ms: f64,
    shoot_interval_ms: f64,
    burst_count: u32,
    /// Elapsed-ms timestamp at spawn; despawn is `BOSS_DURATION_MS` later
    spawned_at_ms: f64,
    pub pulse_phase: f32,
    pub tentacles: Vec<Tentacle>,
}

impl Boss {
    /// Spawn at a random in-bounds position.
    pub fn new(arena: Vec2, elapsed_ms: f64, rng: &mut Pcg32) -> Self {
        let pos = Vec2::new(
            rng.random_range(BOSS_RADIUS..arena.x - BOSS_RADIUS),
            rng.random_range(BOSS_RADIUS..arena.y - BOSS_RADIUS),
        );
        let tentacles = (0..8)
            .map(|i| Tentacle {
                angle: i as f32 / 8.0 * std::f32::consts::TAU,
                length: BOSS_RADIUS * 0.8,
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();
        Self {
            pos,
            radius: BOSS_RADIUS,
            target: pos,
            move_timer_ms: 0.0,
            shoot_timer_ms: 0.0,
            shoot_interval_ms: BOSS_SHOOT_INTERVAL_MS,
            burst_count: 0,
            spawned_at_ms: elapsed_ms,
            pulse_phase: 0.0,
            tentacles,
        }
    }

    /// True once the fixed lifetime has run out. The caller must clear the
    /// boss (and drop its pickup) before anything else in the tick reads it.
    pub fn expired(&self, elapsed_ms: f64) -> bool {
        elapsed_ms - self.spawned_at_ms > BOSS_DURATION_MS
    }

    /// Advance one tick: steer, fire, animate.
    pub fn update(
        &mut self,
        arena: Vec2,
        player_pos: Vec2,
        bullet_speed: f32,
        bullets: &mut Vec<Bullet>,
        rng: &mut Pcg32,
    ) {
        self.update_movement(arena, rng);
        self.update_shooting(player_pos, bullet_speed, bullets, rng);

        self.pulse_phase += 0.1;
        for tentacle in &mut self.tentacles {
            tentacle.phase += 0.05;
        }
    }

    fn update_movement(&mut self, arena: Vec2, rng: &mut Pcg32) {
        self.move_timer_ms += TICK_MS;
        if self.move_timer_ms >= BOSS_MOVE_INTERVAL_MS {
            self.target = Vec2::new(
                rng.random_range(self.radius..arena.x - self.radius),
                rng.random_range(self.radius..arena.y - self.radius),
            );
            self.move_timer_ms = 0.0;
        }

        // Linear steer toward the target, no pathing beyond normalization
        let to_target = self.target - self.pos;
        if to_target.length() > 5.0 {
            self.pos += to_target.normalize_or_zero() * BOSS_SPEED;
        }

        // Clamp to bounds every tick regardless of steering
        self.pos.x = self.pos.x.clamp(self.radius, arena.x - self.radius);
        self.pos.y = self.pos.y.clamp(self.radius, arena.y - self.radius);
    }

    fn update_shooting(
        &mut self,
        player_pos: Vec2,
        bullet_speed: f32,
        bullets: &mut Vec<Bullet>,
        rng: &mut Pcg32,
    ) {
        self.shoot_timer_ms += TICK_MS;
        if self.shoot_timer_ms < self.shoot_interval_ms {
            return;
        }

        self.fire_burst(player_pos, bullet_speed, bullets, rng);
        self.shoot_timer_ms = 0.0;
        self.burst_count += 1;

        // Re-randomize the cadence after each run of bursts so the pattern
        // never becomes fully predictable
        if self.burst_count >= BOSS_MAX_BURSTS {
            self.burst_count = 0;
            self.shoot_interval_ms = rng
                .random_range(BOSS_SHOOT_INTERVAL_MS..BOSS_SHOOT_INTERVAL_MAX_MS);
        }
    }

    /// One burst: a ring of radial bullets from the rim, plus a few aimed
    /// at the player with a little spread.
    fn fire_burst(
        &self,
        player_pos: Vec2,
        bullet_speed: f32,
        bullets: &mut Vec<Bullet>,
        rng: &mut Pcg32,
    ) {
        let radial_speed = bullet_speed * BOSS_RADIAL_SPEED_FACTOR;
        for i in 0..BOSS_RADIAL_BULLETS {
            let angle = i as f32 / BOSS_RADIAL_BULLETS as f32 * std::f32::consts::TAU;
            let dir = Vec2::new(angle.cos(), angle.sin());
            let origin = self.pos + dir * self.radius;
            let target = self.pos + dir * 1000.0;
            bullets.push(Bullet::standard(origin, target, radial_speed, rng));
        }

        let aimed_speed = bullet_speed * BOSS_AIMED_SPEED_FACTOR;
        for _ in 0..BOSS_AIMED_BULLETS {
            let spread = rng.random_range(-0.25..0.25);
            let target = player_pos + Vec2::splat(spread * 100.0);
            bullets.push(Bullet::standard(self.pos, target, aimed_speed, rng));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(99)
    }

    const ARENA: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn spawns_in_bounds() {
        let mut rng = rng();
        for _ in 0..50 {
            let boss = Boss::new(ARENA, 0.0, &mut rng);
            assert!(boss.pos.x >= BOSS_RADIUS && boss.pos.x <= ARENA.x - BOSS_RADIUS);
            assert!(boss.pos.y >= BOSS_RADIUS && boss.pos.y <= ARENA.y - BOSS_RADIUS);
        }
    }

    #[test]
    fn expires_after_duration() {
        let mut rng = rng();
        let boss = Boss::new(ARENA, 5000.0, &mut rng);
        assert!(!boss.expired(5000.0 + BOSS_DURATION_MS));
        assert!(boss.expired(5000.0 + BOSS_DURATION_MS + 1.0));
    }

    #[test]
    fn burst_fires_ring_plus_aimed() {
        let mut rng = rng();
        let boss = Boss::new(ARENA, 0.0, &mut rng);
        let mut bullets = Vec::new();
        boss.fire_burst(Vec2::new(400.0, 300.0), 2.0, &mut bullets, &mut rng);
        assert_eq!(
            bullets.len(),
            (BOSS_RADIAL_BULLETS + BOSS_AIMED_BULLETS) as usize
        );

        // Ring bullets travel at 1.3x, aimed ones at 1.1x
        for b in &bullets[..BOSS_RADIAL_BULLETS as usize] {
            assert!((b.vel.length() - 2.0 * BOSS_RADIAL_SPEED_FACTOR).abs() < 1e-3);
        }
        for b in &bullets[BOSS_RADIAL_BULLETS as usize..] {
            assert!((b.vel.length() - 2.0 * BOSS_AIMED_SPEED_FACTOR).abs() < 1e-3);
        }
    }

    #[test]
    fn shoots_on_interval_and_rerandomizes_after_max_bursts() {
        let mut rng = rng();
        let mut boss = Boss::new(ARENA, 0.0, &mut rng);
        let mut bullets = Vec::new();

        let ticks_per_interval = (BOSS_SHOOT_INTERVAL_MS / TICK_MS).ceil() as u32;
        let mut bursts = 0;
        let mut last_len = 0;
        for _ in 0..ticks_per_interval * BOSS_MAX_BURSTS + 5 {
            boss.update(ARENA, Vec2::new(400.0, 300.0), 2.0, &mut bullets, &mut rng);
            if bullets.len() > last_len {
                bursts += 1;
                last_len = bullets.len();
            }
        }
        assert_eq!(bursts, BOSS_MAX_BURSTS);
        assert_eq!(boss.burst_count, 0);
        assert!(boss.shoot_interval_ms >= BOSS_SHOOT_INTERVAL_MS);
    }

    #[test]
    fn stays_in_bounds_while_wandering() {
        let mut rng = rng();
        let mut boss = Boss::new(ARENA, 0.0, &mut rng);
        let mut bullets = Vec::new();
        for _ in 0..2000 {
            boss.update(ARENA, Vec2::new(10.0, 10.0), 2.0, &mut bullets, &mut rng);
            assert!(boss.pos.x >= BOSS_RADIUS && boss.pos.x <= ARENA.x - BOSS_RADIUS);
            assert!(boss.pos.y >= BOSS_RADIUS && boss.pos.y <= ARENA.y - BOSS_RADIUS);
        }
    }
}
