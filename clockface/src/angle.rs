//! Angle math for the clock face
//!
//! Degrees throughout. Angles handed to the renderer are left unbounded so a
//! hand can keep turning in one direction without unwinding at 0/360.

use std::time::{Duration, Instant};

/// Degrees in a full turn
pub const FULL_TURN: f64 = 360.0;

/// Degrees in a half turn
pub const HALF_TURN: f64 = 180.0;

/// Reduce an angle to `[0, 360)`
pub fn normalize(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if reduced >= FULL_TURN {
        0.0
    } else {
        reduced
    }
}

/// Signed rotation from `from` to the nearest angle congruent to `to`
///
/// The result lies in `(-180, 180]`; a half turn resolves clockwise (+180).
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from + HALF_TURN).rem_euclid(FULL_TURN) - HALF_TURN;
    if delta <= -HALF_TURN {
        HALF_TURN
    } else {
        delta
    }
}

/// The angle a hand at `from` should move to in order to show `to`
///
/// The returned value is congruent to `to` modulo 360 and never more than a
/// half turn away from `from`, so interpolating `from -> result` always takes
/// the shorter way round.
///
/// ```
/// use clockface::angle::shortest_path;
///
/// assert_eq!(shortest_path(-60.0, 240.0), -120.0);
/// assert_eq!(shortest_path(210.0, 240.0), 240.0);
/// ```
pub fn shortest_path(from: f64, to: f64) -> f64 {
    from + signed_delta(from, to)
}

/// Smoothstep easing on `[0, 1]`
fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// A caller-driven rotation of the displayed hand between two angles
///
/// Nothing runs in the background: the render loop samples the transition with
/// the current instant on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleTransition {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl AngleTransition {
    pub fn new(from: f64, to: f64, started: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased angle at `now`
    pub fn sample(&self, now: Instant) -> f64 {
        let eased = smoothstep(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(-90.0), 270.0);
        assert_eq!(normalize(725.0), 5.0);
        assert_eq!(normalize(-1e-15), 0.0);
    }

    #[test]
    fn test_shortest_path_reference_values() {
        assert_eq!(shortest_path(0.0, 90.0), 90.0);
        assert_eq!(shortest_path(20.0, 90.0), 90.0);
        assert_eq!(shortest_path(210.0, 240.0), 240.0);
        assert_eq!(shortest_path(-60.0, 240.0), -120.0);
        assert_eq!(shortest_path(-60.0, 150.0), -210.0);
        assert_eq!(shortest_path(42.0, 42.0), 42.0);
    }

    #[test]
    fn test_shortest_path_half_turn_goes_clockwise() {
        assert_eq!(shortest_path(0.0, 180.0), 180.0);
        assert_eq!(shortest_path(180.0, 0.0), 360.0);
        assert_eq!(shortest_path(-90.0, 90.0), 90.0);
    }

    #[test]
    fn test_shortest_path_never_exceeds_half_turn() {
        let mut from = -725.0;
        while from < 725.0 {
            for to in [-300.0, -90.0, 0.0, 45.0, 179.0, 181.0, 359.0, 540.0] {
                let result = shortest_path(from, to);
                let delta = result - from;
                assert!(delta > -HALF_TURN && delta <= HALF_TURN, "{from} -> {to}");
                assert!((normalize(result) - normalize(to)).abs() < 1e-9);
            }
            from += 37.5;
        }
    }

    #[test]
    fn test_transition_eases_between_endpoints() {
        let start = Instant::now();
        let transition = AngleTransition::new(0.0, 90.0, start, Duration::from_millis(200));

        assert_eq!(transition.sample(start), 0.0);
        let mid = transition.sample(start + Duration::from_millis(100));
        assert!((mid - 45.0).abs() < 1e-9);
        assert_eq!(transition.sample(start + Duration::from_millis(400)), 90.0);
        assert!(transition.is_finished(start + Duration::from_millis(200)));
        assert!(!transition.is_finished(start + Duration::from_millis(50)));
    }

    #[test]
    fn test_zero_length_transition_is_finished_immediately() {
        let start = Instant::now();
        let transition = AngleTransition::new(-90.0, 0.0, start, Duration::ZERO);
        assert!(transition.is_finished(start));
        assert_eq!(transition.sample(start), 0.0);
    }
}
