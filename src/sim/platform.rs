//! Kinematic (ping-pong) platform motion

use super::state::KinematicPlatform;

impl KinematicPlatform {
    /// Advance by `velocity * scale` and reflect at the bounds.
    ///
    /// The position is clamped into `[start_x, end_x]` and the velocity is
    /// pointed back inward whenever a bound is touched, so the platform can
    /// never leave its track no matter how large the step is.
    pub fn advance(&mut self, scale: f32) {
        let x = (self.rect.x + self.velocity * scale).clamp(self.start_x, self.end_x);
        self.rect.x = x;

        if x <= self.start_x {
            self.velocity = self.velocity.abs();
        } else if x >= self.end_x {
            self.velocity = -self.velocity.abs();
        }
    }
}

/// Advance every platform in list order
pub fn advance_platforms(platforms: &mut [KinematicPlatform], scale: f32) {
    for platform in platforms {
        platform.advance(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use proptest::prelude::*;

    fn mover(x: f32, velocity: f32) -> KinematicPlatform {
        KinematicPlatform::new(Rect::new(x, 200.0, 80.0, 40.0), 350.0, 550.0, velocity)
    }

    #[test]
    fn test_moves_by_scaled_velocity() {
        let mut p = mover(380.0, 2.0);
        p.advance(1.0);
        assert_eq!(p.rect.x, 382.0);
        p.advance(0.5);
        assert_eq!(p.rect.x, 383.0);
    }

    #[test]
    fn test_reflects_at_end() {
        let mut p = mover(549.0, 2.0);
        p.advance(1.0);
        assert_eq!(p.rect.x, 550.0);
        assert_eq!(p.velocity, -2.0);
        p.advance(1.0);
        assert_eq!(p.rect.x, 548.0);
        assert_eq!(p.velocity, -2.0);
    }

    #[test]
    fn test_reflects_at_start() {
        let mut p = mover(351.0, -3.0);
        p.advance(1.0);
        assert_eq!(p.rect.x, 350.0);
        assert_eq!(p.velocity, 3.0);
    }

    #[test]
    fn test_degenerate_track_stays_put() {
        let mut p = KinematicPlatform::new(Rect::new(10.0, 0.0, 5.0, 5.0), 10.0, 10.0, 4.0);
        for _ in 0..10 {
            p.advance(1.0);
            assert_eq!(p.rect.x, 10.0);
        }
    }

    proptest! {
        #[test]
        fn prop_stays_within_track(
            velocity in -8.0f32..8.0,
            scales in proptest::collection::vec(0.0f32..6.0, 1..2000),
        ) {
            let mut p = mover(450.0, velocity);
            for scale in scales {
                p.advance(scale);
                prop_assert!(p.rect.x >= p.start_x && p.rect.x <= p.end_x);
            }
        }
    }
}
