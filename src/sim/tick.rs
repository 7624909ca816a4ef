//! Per-tick simulation advance
//!
//! One call per display refresh. While the run is live and unpaused the
//! tick applies, in order: player input, bullets, boss, particles,
//! difficulty, buffs, and finally the random spawns. Paused or
//! non-playing states tick to a no-op so the shell can keep rendering.

use glam::Vec2;
use rand::Rng;

use super::boss::Boss;
use super::buffs::{BuffKind, BuffPickup};
use super::collision::circles_overlap;
use super::difficulty::{Difficulty, score_at};
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Held-direction input for a single tick. The shell keeps each flag true
/// from keydown to the matching keyup, with WASD and arrows merged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the game by one tick at wall-clock `now_ms`.
pub fn tick(state: &mut GameState, input: TickInput, now_ms: f64) {
    if state.phase != GamePhase::Playing || state.clock.is_paused() {
        return;
    }

    let elapsed_ms = state.clock.elapsed_ms(now_ms);
    let elapsed_secs = state.clock.elapsed_secs(now_ms);

    update_player(state, input);
    if update_bullets(state) {
        return;
    }
    if update_boss(state, elapsed_ms, elapsed_secs) {
        return;
    }
    update_particles(state);

    state.difficulty = Difficulty::at(&state.tuning, elapsed_secs);
    state.score = score_at(elapsed_secs);

    update_buffs(state, elapsed_ms);
    spawn_ambient_bullet(state);
    spawn_trail_particle(state);
}

/// Move the player from held input, diagonal normalized, clamped in bounds.
fn update_player(state: &mut GameState, input: TickInput) {
    let mut dir = Vec2::ZERO;
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if dir.x != 0.0 && dir.y != 0.0 {
        dir *= std::f32::consts::FRAC_1_SQRT_2;
    }

    state.player.pos += dir * state.player.speed;
    let arena = state.arena;
    state.player.clamp_to(arena);
}

/// Advance bullets, evict off-screen ones, resolve player collisions.
/// Returns true if the run ended this tick.
///
/// Reverse index iteration keeps removal safe: no element is skipped or
/// processed twice.
fn update_bullets(state: &mut GameState) -> bool {
    for i in (0..state.bullets.len()).rev() {
        state.bullets[i].update();

        if state.bullets[i].is_off_screen(state.arena) {
            state.bullets.remove(i);
            continue;
        }

        let (pos, radius) = (state.bullets[i].pos, state.bullets[i].radius);
        if circles_overlap(pos, radius, state.player.pos, state.player.radius) {
            if state.effects.shield.active {
                // Shield intercepts: the bullet shatters, the run goes on
                state.bullets.remove(i);
                state.spawn_burst(pos, COLOR_SHIELD, 8);
                continue;
            }
            game_over(state);
            return true;
        }
    }
    false
}

/// Boss lifecycle: warning window, periodic spawn, update, despawn drop,
/// body collision. Returns true if the run ended this tick.
fn update_boss(state: &mut GameState, elapsed_ms: f64, elapsed_secs: f32) -> bool {
    let since_last = elapsed_secs - state.last_boss_secs;
    state.boss_warning = state.boss.is_none()
        && since_last >= BOSS_WARNING_SECS
        && since_last < BOSS_PERIOD_SECS;

    if state.boss.is_none() && since_last >= BOSS_PERIOD_SECS {
        let boss = Boss::new(state.arena, elapsed_ms, &mut state.rng);
        state.boss = Some(boss);
        state.last_boss_secs = elapsed_secs;
        state.boss_warning = false;
        state.push_event(GameEvent::BossSpawned);
        log::info!("boss spawned at t={:.1}s", elapsed_secs);

        // Arena-wide warning flourish
        for _ in 0..50 {
            let pos = Vec2::new(
                state.rng.random_range(0.0..state.arena.x),
                state.rng.random_range(0.0..state.arena.y),
            );
            state.spawn_burst(pos, COLOR_BOSS, 1);
        }
    }

    // Despawn drops the only pickup source in the game. The boss slot is
    // fully cleared before anything later in this tick can read it.
    if state.boss.as_ref().is_some_and(|b| b.expired(elapsed_ms)) {
        if let Some(boss) = state.boss.take() {
            let kind = BuffKind::random(&mut state.rng);
            state
                .pickups
                .push(BuffPickup::new(boss.pos, kind, elapsed_ms));
            state.spawn_burst(boss.pos, COLOR_CELEBRATION, 30);
            state.push_event(GameEvent::BossDespawned);
            log::info!("boss despawned, dropped {:?}", kind);
        }
        return false;
    }

    if let Some(mut boss) = state.boss.take() {
        boss.update(
            state.arena,
            state.player.pos,
            state.difficulty.bullet_speed,
            &mut state.bullets,
            &mut state.rng,
        );
        // Touching the boss body is unconditionally fatal
        let hit = circles_overlap(
            boss.pos,
            boss.radius,
            state.player.pos,
            state.player.radius,
        );
        state.boss = Some(boss);
        if hit {
            game_over(state);
            return true;
        }
    }
    false
}

fn update_particles(state: &mut GameState) {
    for i in (0..state.particles.len()).rev() {
        state.particles[i].update();
        if state.particles[i].life <= 0.0 {
            state.particles.remove(i);
        }
    }
}

/// Expire active effects, then advance pickups: lifetime eviction and
/// player pickup (never fatal).
fn update_buffs(state: &mut GameState, elapsed_ms: f64) {
    state.effects.update(elapsed_ms, &mut state.player);

    for i in (0..state.pickups.len()).rev() {
        if !state.pickups[i].update(elapsed_ms) {
            state.pickups.remove(i);
            continue;
        }

        let (pos, radius, kind) = {
            let p = &state.pickups[i];
            (p.pos, p.radius, p.kind)
        };
        if circles_overlap(pos, radius, state.player.pos, state.player.radius) {
            state.pickups.remove(i);
            state.effects.activate(kind, elapsed_ms, &mut state.player);
            state.spawn_burst(pos, kind.color(), 15);
            state.push_event(GameEvent::BuffPickedUp(kind));
            log::info!("picked up {:?} buff", kind);
        }
    }
}

/// Bernoulli trial for an ambient bullet aimed at the player, spawned just
/// outside a random arena side. Rate drops while the boss holds the stage.
fn spawn_ambient_bullet(state: &mut GameState) {
    let mut rate = state.difficulty.spawn_rate;
    if state.boss.is_some() {
        rate *= BOSS_SPAWN_RATE_FACTOR;
    }
    if state.rng.random::<f32>() >= rate {
        return;
    }
    if state.bullets.len() >= state.difficulty.max_bullets as usize {
        return;
    }

    let arena = state.arena;
    let pos = match state.rng.random_range(0..4u8) {
        0 => Vec2::new(state.rng.random_range(0.0..arena.x), -BULLET_SPAWN_MARGIN),
        1 => Vec2::new(
            arena.x + BULLET_SPAWN_MARGIN,
            state.rng.random_range(0.0..arena.y),
        ),
        2 => Vec2::new(
            state.rng.random_range(0.0..arena.x),
            arena.y + BULLET_SPAWN_MARGIN,
        ),
        _ => Vec2::new(-BULLET_SPAWN_MARGIN, state.rng.random_range(0.0..arena.y)),
    };

    let target = state.player.pos;
    let speed = state.difficulty.bullet_speed;
    let is_asteroid = state.rng.random::<f32>() < state.difficulty.asteroid_chance;
    let bullet = if is_asteroid {
        Bullet::asteroid(pos, target, speed, &mut state.rng)
    } else {
        Bullet::standard(pos, target, speed, &mut state.rng)
    };
    state.bullets.push(bullet);
}

/// Cosmetic trail puff jittered inside the player's body.
fn spawn_trail_particle(state: &mut GameState) {
    if state.rng.random::<f32>() < TRAIL_PARTICLE_CHANCE {
        let jitter = Vec2::new(
            state.rng.random_range(-0.5..0.5) * state.player.radius,
            state.rng.random_range(-0.5..0.5) * state.player.radius,
        );
        let pos = state.player.pos + jitter;
        let color = state.player.color;
        state.spawn_burst(pos, color, 1);
    }
}

/// Fatal collision: explosion burst, best-score check (exactly once per
/// transition), and the game-over event for the shell.
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.boss_warning = false;

    let player_pos = state.player.pos;
    state.spawn_burst(player_pos, COLOR_EXPLOSION, 20);

    let new_best = state.score > state.best_score;
    if new_best {
        state.best_score = state.score;
    }
    state.push_event(GameEvent::GameOver {
        score: state.score,
        new_best,
    });
    log::info!(
        "game over: score {} (best {})",
        state.score,
        state.best_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f64 = TICK_MS;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, 0, PLAYER_DEFAULT_COLOR);
        state.start_run(0.0);
        state
    }

    /// A state with ambient spawning disabled, for scenarios that need the
    /// player to survive on their own terms.
    fn calm_state() -> GameState {
        let mut state = GameState::new(42, 0, PLAYER_DEFAULT_COLOR);
        state.tuning.spawn_rate_base = 0.0;
        state.tuning.spawn_rate_cap = 0.0;
        state.start_run(0.0);
        state
    }

    /// Run `secs` of simulated time in whole ticks, returning the final clock.
    fn run_for(state: &mut GameState, from_ms: f64, secs: f64) -> f64 {
        let ticks = (secs * 1000.0 / TICK).ceil() as u64;
        let mut now = from_ms;
        for _ in 0..ticks {
            now += TICK;
            tick(state, TickInput::default(), now);
        }
        now
    }

    #[test]
    fn tick_is_noop_in_menu_and_game_over() {
        let mut state = GameState::new(1, 0, PLAYER_DEFAULT_COLOR);
        let before = state.player.pos;
        tick(
            &mut state,
            TickInput {
                right: true,
                ..Default::default()
            },
            1000.0,
        );
        assert_eq!(state.player.pos, before);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn tick_is_noop_while_paused() {
        let mut state = playing_state();
        state.pause(1000.0);
        let before = state.player.pos;
        tick(
            &mut state,
            TickInput {
                down: true,
                ..Default::default()
            },
            2000.0,
        );
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn held_input_moves_player_each_tick() {
        let mut state = calm_state();
        let start = state.player.pos;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, input, TICK);
        tick(&mut state, input, TICK * 2.0);
        assert_eq!(state.player.pos.x, start.x + 2.0 * PLAYER_SPEED);
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut state = calm_state();
        let start = state.player.pos;
        let input = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, input, TICK);
        let moved = state.player.pos - start;
        assert!((moved.length() - PLAYER_SPEED).abs() < 1e-3);
    }

    #[test]
    fn bullet_collision_ends_run_with_explosion_and_event() {
        let mut state = calm_state();
        // Bullet closing in from the right, one tick from contact
        let player = state.player.pos;
        let bullet = Bullet::standard(
            player + Vec2::new(PLAYER_RADIUS + BULLET_RADIUS + 1.0, 0.0),
            player,
            2.0,
            &mut state.rng,
        );
        state.bullets.push(bullet);

        // Not yet overlapping: distance invariant holds before the hit tick
        let dist = state.bullets[0].pos.distance(state.player.pos);
        assert!(dist >= PLAYER_RADIUS + BULLET_RADIUS);

        tick(&mut state, TickInput::default(), TICK);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.particles.len(), 20);
        let events = state.take_events();
        assert!(matches!(
            events[..],
            [GameEvent::GameOver {
                score: 0,
                new_best: false
            }]
        ));
    }

    #[test]
    fn shield_intercepts_bullet_without_ending_run() {
        let mut state = calm_state();
        state.effects.activate(BuffKind::Shield, 0.0, &mut state.player);

        let player = state.player.pos;
        let bullet = Bullet::standard(player + Vec2::new(5.0, 0.0), player, 2.0, &mut state.rng);
        state.bullets.push(bullet);

        tick(&mut state, TickInput::default(), TICK);

        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.bullets.is_empty());
        let shield_particles = state
            .particles
            .iter()
            .filter(|p| p.color == COLOR_SHIELD)
            .count();
        assert_eq!(shield_particles, 8);
    }

    #[test]
    fn new_best_reported_once_per_game_over() {
        let mut state = calm_state();
        let now = run_for(&mut state, 0.0, 12.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.score >= 110);

        // Force a hit
        let player = state.player.pos;
        state
            .bullets
            .push(Bullet::standard(player, player, 2.0, &mut state.rng));
        tick(&mut state, TickInput::default(), now + TICK);

        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.take_events();
        let game_over_events: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_over_events.len(), 1);
        match game_over_events[0] {
            GameEvent::GameOver { score, new_best } => {
                assert!(*score >= 110);
                assert!(new_best);
                assert_eq!(state.best_score, *score);
            }
            _ => unreachable!(),
        }

        // Ticking further in GameOver changes nothing
        tick(&mut state, TickInput::default(), now + TICK * 2.0);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn score_matches_quadratic_curve_at_ten_seconds() {
        let mut state = calm_state();
        run_for(&mut state, 0.0, 10.0);
        assert_eq!(state.phase, GamePhase::Playing);
        // floor(10*10 + 100/10) = 110, plus at most one tick of slack
        assert!((110..=112).contains(&state.score), "score {}", state.score);
    }

    /// Drive a survival scenario: big arena, player parked in a corner,
    /// bullets deleted every tick so none can reach the player.
    fn survive(state: &mut GameState, secs: f64) -> (Vec<GameEvent>, Vec<f32>) {
        let mut now = 0.0;
        let mut events = Vec::new();
        let mut warning_times = Vec::new();
        let ticks = (secs * 1000.0 / TICK).ceil() as u64;
        let input = TickInput {
            up: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..ticks {
            now += TICK;
            state.bullets.clear();
            tick(state, input, now);
            events.extend(state.take_events());
            if state.boss_warning {
                warning_times.push(state.clock.elapsed_secs(now));
            }
        }
        (events, warning_times)
    }

    fn survival_state() -> GameState {
        let mut state = GameState::new(42, 0, PLAYER_DEFAULT_COLOR);
        state.set_arena_size(4000.0, 4000.0);
        state.start_run(0.0);
        state
    }

    #[test]
    fn boss_spawns_once_around_sixty_seconds_with_warning_window() {
        let mut state = survival_state();
        let (events, warning_times) = survive(&mut state, 65.0);

        assert_eq!(state.phase, GamePhase::Playing);
        let spawns = events
            .iter()
            .filter(|e| **e == GameEvent::BossSpawned)
            .count();
        assert_eq!(spawns, 1);
        assert!(state.boss.is_some());

        // Warning flag covers [55, 60) and nothing outside it
        assert!(!warning_times.is_empty());
        assert!(warning_times.iter().all(|&t| (55.0..60.0).contains(&t)));
        assert!(warning_times[0] < 55.1);
        assert!(!state.boss_warning);
    }

    #[test]
    fn boss_despawn_drops_exactly_one_pickup() {
        let mut state = survival_state();
        let secs = (60_000.0 + BOSS_DURATION_MS + 2000.0) / 1000.0;
        let (events, _) = survive(&mut state, secs);

        assert_eq!(state.phase, GamePhase::Playing);
        let despawns = events
            .iter()
            .filter(|e| **e == GameEvent::BossDespawned)
            .count();
        assert_eq!(despawns, 1);
        assert!(state.boss.is_none());

        let picked_up = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BuffPickedUp(_)))
            .count();
        assert_eq!(state.pickups.len() + picked_up, 1);
    }

    #[test]
    fn degenerate_bullet_stays_finite_and_gets_evicted() {
        let mut state = calm_state();
        // Target == source: zero velocity, never NaN
        let inside = Vec2::new(100.0, 100.0);
        state
            .bullets
            .push(Bullet::standard(inside, inside, 3.0, &mut state.rng));
        // Same degenerate spawn past the despawn margin is evicted
        let outside = Vec2::new(-60.0, -60.0);
        state
            .bullets
            .push(Bullet::standard(outside, outside, 3.0, &mut state.rng));

        run_for(&mut state, 0.0, 1.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bullets.len(), 1);
        let b = &state.bullets[0];
        assert!(b.pos.x.is_finite() && b.pos.y.is_finite());
        assert_eq!(b.pos, inside);
    }

    #[test]
    fn pause_resume_preserves_elapsed_and_score() {
        let mut state = calm_state();
        let now = run_for(&mut state, 0.0, 5.0);
        let elapsed_before = state.clock.elapsed_ms(now);
        let score_before = state.score;

        state.pause(now);
        // A minute passes while hidden; ticks during the pause are no-ops
        tick(&mut state, TickInput::default(), now + 60_000.0);
        state.resume(now + 60_000.0);

        let elapsed_after = state.clock.elapsed_ms(now + 60_000.0);
        assert!((elapsed_after - elapsed_before).abs() < TICK + 1e-6);
        assert_eq!(state.score, score_before);
    }

    #[test]
    fn ambient_spawns_respect_bullet_cap() {
        let mut state = playing_state();
        state.tuning.spawn_rate_base = 1.0;
        state.tuning.spawn_rate_cap = 1.0;

        // Bullets come from the arena edge at ~2 units/tick; 120 ticks is
        // not enough for the first one to cross 300 units to the player
        let mut now = 0.0;
        for _ in 0..120 {
            now += TICK;
            tick(&mut state, TickInput::default(), now);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bullets.len(), state.difficulty.max_bullets as usize);
    }
}
