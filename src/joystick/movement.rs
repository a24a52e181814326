//! Movement computation for a single drag step
//!
//! The handle may only travel while its centre stays strictly inside
//! `base_radius - 1.2 * stick_radius`. The margin keeps the whole knob,
//! including its outline, inside the base. A step that would leave that
//! circle is dropped as a whole; the handle never slides along one axis.

use super::{Delta, Point};
use tracing::trace;

/// Fraction of the stick radius subtracted from the base radius
pub const CLAMP_MARGIN: f64 = 1.2;

/// Outcome of one movement computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Candidate is inside the travel circle and becomes the new position
    Accepted(Point),
    /// Candidate left the travel circle, carries the unchanged position
    Rejected(Point),
}

impl Movement {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Movement::Accepted(_))
    }

    /// Position after the step, whatever the outcome
    pub fn position(&self) -> Point {
        match self {
            Movement::Accepted(p) | Movement::Rejected(p) => *p,
        }
    }
}

/// Pure geometry check for the handle of one joystick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementEngine {
    base_radius: u16,
    stick_radius: u16,
}

impl MovementEngine {
    pub fn new(base_radius: u16, stick_radius: u16) -> Self {
        Self {
            base_radius,
            stick_radius,
        }
    }

    /// Exclusive upper bound for the handle's distance from centre
    ///
    /// Zero or negative when the stick is too large for its base, in which
    /// case no move is ever admissible.
    pub fn travel_limit(&self) -> f64 {
        f64::from(self.base_radius) - f64::from(self.stick_radius) * CLAMP_MARGIN
    }

    /// Applies `delta` to `current` if the result stays inside the travel circle
    pub fn compute(&self, current: Point, delta: Delta) -> Movement {
        let x = i32::from(current.x) + i32::from(delta.x);
        let y = i32::from(current.y) + i32::from(delta.y);

        let (xf, yf) = (f64::from(x), f64::from(y));
        let distance = (xf * xf + yf * yf).sqrt();
        let limit = self.travel_limit();

        if distance >= limit {
            trace!(
                "Rejecting move to ({}, {}): distance {:.2} >= limit {:.2}",
                x,
                y,
                distance,
                limit
            );
            return Movement::Rejected(current);
        }

        match (i16::try_from(x), i16::try_from(y)) {
            (Ok(x), Ok(y)) => Movement::Accepted(Point::new(x, y)),
            _ => Movement::Rejected(current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MovementEngine {
        MovementEngine::new(50, 10)
    }

    #[test]
    fn small_step_from_center_is_accepted() {
        let movement = engine().compute(Point::ORIGIN, Delta::new(5, 0));
        assert_eq!(movement, Movement::Accepted(Point::new(5, 0)));
    }

    #[test]
    fn step_beyond_limit_is_rejected_without_moving() {
        let movement = engine().compute(Point::ORIGIN, Delta::new(100, 0));
        assert_eq!(movement, Movement::Rejected(Point::ORIGIN));

        // (30, 30) is about 42.4 away from the centre
        let from = Point::new(20, 20);
        let movement = engine().compute(from, Delta::new(10, 10));
        assert!(!movement.is_accepted());
        assert_eq!(movement.position(), from);
    }

    #[test]
    fn limit_itself_is_not_admissible() {
        // 50 - 1.2 * 10 = 38
        assert!((engine().travel_limit() - 38.0).abs() < 1e-9);
        assert!(engine().compute(Point::ORIGIN, Delta::new(37, 0)).is_accepted());
        assert!(!engine().compute(Point::ORIGIN, Delta::new(38, 0)).is_accepted());
        assert!(!engine().compute(Point::ORIGIN, Delta::new(0, -38)).is_accepted());
    }

    #[test]
    fn steps_are_relative_to_current_position() {
        let movement = engine().compute(Point::new(-10, 4), Delta::new(3, -2));
        assert_eq!(movement, Movement::Accepted(Point::new(-7, 2)));
    }

    #[test]
    fn diagonal_rejection_does_not_slide_along_an_axis() {
        // x alone would be fine, x and y together are not
        let from = Point::new(0, 30);
        let movement = engine().compute(from, Delta::new(25, 0));
        assert_eq!(movement, Movement::Rejected(from));
    }

    #[test]
    fn accepted_positions_always_stay_inside_limit() {
        let engine = MovementEngine::new(40, 12);
        let limit = engine.travel_limit();
        let mut position = Point::ORIGIN;
        let steps = [(7, 3), (9, 9), (-4, 11), (15, -2), (3, 3), (-30, -30), (6, 1)];

        for (dx, dy) in steps {
            let before = position;
            match engine.compute(position, Delta::new(dx, dy)) {
                Movement::Accepted(p) => {
                    assert!(p.distance_from_center() < limit);
                    position = p;
                }
                Movement::Rejected(p) => {
                    assert_eq!(p, before);
                }
            }
        }
    }

    #[test]
    fn oversized_stick_never_moves() {
        let engine = MovementEngine::new(20, 18);
        assert!(engine.travel_limit() <= 0.0);
        assert!(!engine.compute(Point::ORIGIN, Delta::ZERO).is_accepted());
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        let engine = MovementEngine::new(i16::MAX as u16, 1);
        let from = Point::new(i16::MAX - 1, 0);
        let movement = engine.compute(from, Delta::new(i16::MAX, i16::MAX));
        assert_eq!(movement, Movement::Rejected(from));
    }
}
