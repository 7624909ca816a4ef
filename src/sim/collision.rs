//! Circle-circle collision tests
//!
//! Every collision in the game is a pairwise circle test: player against
//! bullets, boss body, and buff pickups. Resolution (shield interception,
//! game over, pickup) lives in the tick loop; this module only answers
//! "do these overlap".

use glam::Vec2;

/// Collision iff the center distance is strictly less than the radius sum.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance_squared(b) < (radius_a + radius_b) * (radius_a + radius_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_circles_collide() {
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(15.0, 0.0),
            10.0
        ));
    }

    #[test]
    fn touching_circles_do_not_collide() {
        // distance == radius sum is a miss (strict inequality)
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            10.0,
            Vec2::new(20.0, 0.0),
            10.0
        ));
    }

    #[test]
    fn distant_circles_miss() {
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            4.0,
            Vec2::new(100.0, 100.0),
            15.0
        ));
    }
}
