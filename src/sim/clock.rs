//! Survival-time clock with pause accounting
//!
//! Wall-clock reads come in from the shell; everything downstream of the
//! simulation (difficulty, boss timers, buff expiry) works in pause-adjusted
//! elapsed milliseconds. Pausing shifts the recorded start time forward on
//! resume, so a pause is invisible to every timer in the game.

/// Converts wall-clock reads into pause-adjusted elapsed time.
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    start_ms: f64,
    paused: bool,
    paused_at_ms: f64,
}

impl GameClock {
    /// Restart the clock at `now_ms` (unpauses).
    pub fn start(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
        self.paused = false;
        self.paused_at_ms = 0.0;
    }

    /// Elapsed survival time in milliseconds, pause intervals excluded.
    ///
    /// While paused this reports the time as of the pause, so readouts
    /// freeze instead of creeping forward.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        if self.paused {
            self.paused_at_ms - self.start_ms
        } else {
            now_ms - self.start_ms
        }
    }

    /// Elapsed survival time in seconds.
    pub fn elapsed_secs(&self, now_ms: f64) -> f32 {
        (self.elapsed_ms(now_ms) / 1000.0) as f32
    }

    /// Begin a pause interval. Idempotent: a second trigger (tab hidden
    /// plus window blur) must not double count, so this is a flag, not a
    /// counter.
    pub fn pause(&mut self, now_ms: f64) {
        if !self.paused {
            self.paused = true;
            self.paused_at_ms = now_ms;
        }
    }

    /// End a pause interval, shifting the start time forward by the pause
    /// duration. Idempotent.
    pub fn resume(&mut self, now_ms: f64) {
        if self.paused {
            self.start_ms += now_ms - self.paused_at_ms;
            self.paused = false;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_counts_from_start() {
        let mut clock = GameClock::default();
        clock.start(1000.0);
        assert_eq!(clock.elapsed_ms(1000.0), 0.0);
        assert_eq!(clock.elapsed_ms(3500.0), 2500.0);
    }

    #[test]
    fn pause_resume_is_noop_on_elapsed() {
        let mut clock = GameClock::default();
        clock.start(0.0);

        let before = clock.elapsed_ms(10_000.0);
        clock.pause(10_000.0);
        // A long interval passes while paused
        clock.resume(70_000.0);
        let after = clock.elapsed_ms(70_000.0);

        assert_eq!(before, after);
    }

    #[test]
    fn elapsed_frozen_while_paused() {
        let mut clock = GameClock::default();
        clock.start(0.0);
        clock.pause(5000.0);
        assert_eq!(clock.elapsed_ms(9000.0), 5000.0);
    }

    #[test]
    fn overlapping_pause_triggers_do_not_double_count() {
        let mut clock = GameClock::default();
        clock.start(0.0);

        // Tab hidden, then window blur fires too
        clock.pause(2000.0);
        clock.pause(4000.0);
        // Focus and visibility both fire on the way back
        clock.resume(6000.0);
        clock.resume(8000.0);

        // Only the 2000..6000 interval is absorbed
        assert_eq!(clock.elapsed_ms(10_000.0), 6000.0);
    }
}
