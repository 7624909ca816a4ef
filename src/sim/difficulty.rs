//! Difficulty scaling as pure functions of survival time
//!
//! Every curve is recomputed from elapsed seconds each tick; nothing here
//! carries hidden state. The constants are tuning data, not behavior - the
//! formulas stay the same shape however they are configured.

use serde::{Deserialize, Serialize};

/// Difficulty curve constants.
///
/// Defaults reproduce the live game's pacing: spawn rate ramps every 8
/// seconds, bullet speed every 15, the bullet cap every 20, and the
/// asteroid share over the first minute, each up to a hard cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub spawn_rate_base: f32,
    pub spawn_rate_cap: f32,
    pub spawn_rate_interval_secs: f32,
    pub spawn_rate_step: f32,

    pub bullet_speed_base: f32,
    pub bullet_speed_cap: f32,
    pub bullet_speed_interval_secs: f32,
    pub bullet_speed_step: f32,

    pub max_bullets_base: u32,
    pub max_bullets_cap: u32,
    pub max_bullets_interval_secs: f32,
    pub max_bullets_step: u32,

    pub asteroid_chance_base: f32,
    pub asteroid_chance_cap: f32,
    pub asteroid_chance_interval_secs: f32,
    pub asteroid_chance_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_rate_base: 0.02,
            spawn_rate_cap: 0.06,
            spawn_rate_interval_secs: 8.0,
            spawn_rate_step: 0.008,

            bullet_speed_base: 2.0,
            bullet_speed_cap: 3.5,
            bullet_speed_interval_secs: 15.0,
            bullet_speed_step: 0.4,

            max_bullets_base: 50,
            max_bullets_cap: 80,
            max_bullets_interval_secs: 20.0,
            max_bullets_step: 8,

            asteroid_chance_base: 0.15,
            asteroid_chance_cap: 0.25,
            asteroid_chance_interval_secs: 60.0,
            asteroid_chance_step: 0.1,
        }
    }
}

impl Tuning {
    /// Probability per tick of spawning an ambient bullet.
    pub fn spawn_rate(&self, t: f32) -> f32 {
        (self.spawn_rate_base + (t / self.spawn_rate_interval_secs) * self.spawn_rate_step)
            .min(self.spawn_rate_cap)
    }

    /// Speed (units per tick) assigned to newly spawned bullets.
    pub fn bullet_speed(&self, t: f32) -> f32 {
        (self.bullet_speed_base + (t / self.bullet_speed_interval_secs) * self.bullet_speed_step)
            .min(self.bullet_speed_cap)
    }

    /// Upper bound on the live bullet pool.
    pub fn max_bullets(&self, t: f32) -> u32 {
        (self.max_bullets_base
            + (t / self.max_bullets_interval_secs).floor() as u32 * self.max_bullets_step)
            .min(self.max_bullets_cap)
    }

    /// Share of ambient spawns that come out as asteroids.
    pub fn asteroid_chance(&self, t: f32) -> f32 {
        (self.asteroid_chance_base
            + (t / self.asteroid_chance_interval_secs) * self.asteroid_chance_step)
            .min(self.asteroid_chance_cap)
    }
}

/// Score from survival seconds: quadratic growth rewards longer runs.
pub fn score_at(t: f32) -> u64 {
    (t * 10.0 + t * t / 10.0).floor() as u64
}

/// Difficulty parameters in effect for one tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Difficulty {
    pub spawn_rate: f32,
    pub bullet_speed: f32,
    pub max_bullets: u32,
    pub asteroid_chance: f32,
}

impl Difficulty {
    /// Parameters at session start.
    pub fn base(tuning: &Tuning) -> Self {
        Self::at(tuning, 0.0)
    }

    /// Parameters after `t` seconds of survival.
    pub fn at(tuning: &Tuning, t: f32) -> Self {
        Self {
            spawn_rate: tuning.spawn_rate(t),
            bullet_speed: tuning.bullet_speed(t),
            max_bullets: tuning.max_bullets(t),
            asteroid_chance: tuning.asteroid_chance(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn base_values_match_session_start() {
        let tuning = Tuning::default();
        let d = Difficulty::base(&tuning);
        assert_eq!(d.spawn_rate, 0.02);
        assert_eq!(d.bullet_speed, 2.0);
        assert_eq!(d.max_bullets, 50);
    }

    #[test]
    fn score_at_ten_seconds() {
        // floor(10*10 + 100/10) = 110
        assert_eq!(score_at(10.0), 110);
    }

    #[test]
    fn max_bullets_steps_in_whole_increments() {
        let tuning = Tuning::default();
        assert_eq!(tuning.max_bullets(19.9), 50);
        assert_eq!(tuning.max_bullets(20.0), 58);
        assert_eq!(tuning.max_bullets(39.9), 58);
        assert_eq!(tuning.max_bullets(1000.0), 80);
    }

    proptest! {
        #[test]
        fn curves_non_decreasing_and_capped(t in 0.0f32..7200.0, dt in 0.0f32..600.0) {
            let tuning = Tuning::default();
            prop_assert!(tuning.spawn_rate(t) <= tuning.spawn_rate(t + dt));
            prop_assert!(tuning.bullet_speed(t) <= tuning.bullet_speed(t + dt));
            prop_assert!(tuning.max_bullets(t) <= tuning.max_bullets(t + dt));
            prop_assert!(tuning.asteroid_chance(t) <= tuning.asteroid_chance(t + dt));

            prop_assert!(tuning.spawn_rate(t) <= tuning.spawn_rate_cap);
            prop_assert!(tuning.bullet_speed(t) <= tuning.bullet_speed_cap);
            prop_assert!(tuning.max_bullets(t) <= tuning.max_bullets_cap);
            prop_assert!(tuning.asteroid_chance(t) <= tuning.asteroid_chance_cap);
        }

        #[test]
        fn score_strictly_increasing(t in 0.1f32..3600.0, dt in 1.0f32..600.0) {
            prop_assert!(score_at(t + dt) > score_at(t));
        }
    }
}
