//! Leader-line endpoint calculation.
//!
//! A leader runs from a balloon to the feature it marks. The endpoint is
//! offset from the balloon center into one of the four quadrants, with a
//! guaranteed minimum distance so the line is always drawable.

use crate::geometry::{euclidean_distance, Point};

/// Horizontal side of the leader quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalHint {
    /// Offset to the left of the balloon
    Left,
    /// Offset to the right of the balloon (default)
    #[default]
    Right,
}

/// Vertical side of the leader quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalHint {
    /// Offset upward (toward smaller y)
    Up,
    /// Offset downward, toward larger y (default)
    #[default]
    Down,
}

/// Quadrant hint for the leader offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeaderDirection {
    /// Horizontal side
    pub horizontal: HorizontalHint,
    /// Vertical side
    pub vertical: VerticalHint,
}

impl LeaderDirection {
    /// Direction pointing from `from` toward `to`.
    pub fn toward(from: &Point, to: &Point) -> Self {
        Self {
            horizontal: if to.x >= from.x {
                HorizontalHint::Right
            } else {
                HorizontalHint::Left
            },
            vertical: if to.y >= from.y {
                VerticalHint::Down
            } else {
                VerticalHint::Up
            },
        }
    }
}

/// Minimum Euclidean distance between a balloon center and its leader
/// endpoint.
pub const MIN_LEADER_DISTANCE: f64 = 5.0;

/// Initial horizontal leader offset.
const INITIAL_OFFSET_X: f64 = 30.0;
/// Initial vertical leader offset.
const INITIAL_OFFSET_Y: f64 = 15.0;
/// Horizontal growth step when the minimum distance is not met.
const GROW_X: f64 = 10.0;
/// Vertical growth step when the minimum distance is not met.
const GROW_Y: f64 = 5.0;

/// Leader-endpoint calculator.
pub struct LeaderCalculator;

impl LeaderCalculator {
    /// Compute a leader endpoint offset from `(x, y)`.
    ///
    /// The quadrant comes from the optional direction hint (default
    /// right/down with the page's top-left origin). Offsets start at
    /// (30, 15) and grow by (10, 5) until the endpoint is at least
    /// [`MIN_LEADER_DISTANCE`] from the input; the initial offsets already
    /// satisfy the minimum, so the loop is a safety net.
    ///
    /// # Examples
    ///
    /// ```
    /// use balloon_oxide::leader::LeaderCalculator;
    ///
    /// let endpoint = LeaderCalculator::leader_offset(100.0, 100.0, None);
    /// assert_eq!(endpoint.x, 130.0);
    /// assert_eq!(endpoint.y, 115.0);
    /// ```
    pub fn leader_offset(x: f64, y: f64, direction: Option<LeaderDirection>) -> Point {
        let direction = direction.unwrap_or_default();
        let sign_x = match direction.horizontal {
            HorizontalHint::Right => 1.0,
            HorizontalHint::Left => -1.0,
        };
        let sign_y = match direction.vertical {
            VerticalHint::Down => 1.0,
            VerticalHint::Up => -1.0,
        };

        let origin = Point::new(x, y);
        let mut offset_x = INITIAL_OFFSET_X;
        let mut offset_y = INITIAL_OFFSET_Y;
        loop {
            let endpoint = Point::new(x + sign_x * offset_x, y + sign_y * offset_y);
            if euclidean_distance(&origin, &endpoint) >= MIN_LEADER_DISTANCE {
                return endpoint;
            }
            offset_x += GROW_X;
            offset_y += GROW_Y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn all_directions() -> [LeaderDirection; 4] {
        [
            LeaderDirection {
                horizontal: HorizontalHint::Right,
                vertical: VerticalHint::Down,
            },
            LeaderDirection {
                horizontal: HorizontalHint::Right,
                vertical: VerticalHint::Up,
            },
            LeaderDirection {
                horizontal: HorizontalHint::Left,
                vertical: VerticalHint::Down,
            },
            LeaderDirection {
                horizontal: HorizontalHint::Left,
                vertical: VerticalHint::Up,
            },
        ]
    }

    #[test]
    fn test_default_quadrant_is_right_down() {
        let p = LeaderCalculator::leader_offset(100.0, 100.0, None);
        assert_eq!(p.x, 130.0);
        assert_eq!(p.y, 115.0);
    }

    #[test]
    fn test_each_quadrant_signs() {
        let x = 50.0;
        let y = 50.0;
        for direction in all_directions() {
            let p = LeaderCalculator::leader_offset(x, y, Some(direction));
            match direction.horizontal {
                HorizontalHint::Right => assert!(p.x > x),
                HorizontalHint::Left => assert!(p.x < x),
            }
            match direction.vertical {
                VerticalHint::Down => assert!(p.y > y),
                VerticalHint::Up => assert!(p.y < y),
            }
        }
    }

    #[test]
    fn test_toward_picks_quadrant_of_target() {
        let balloon = Point::new(100.0, 100.0);
        let target = Point::new(40.0, 160.0);
        let direction = LeaderDirection::toward(&balloon, &target);
        assert_eq!(direction.horizontal, HorizontalHint::Left);
        assert_eq!(direction.vertical, VerticalHint::Down);
    }

    proptest! {
        #[test]
        fn prop_minimum_distance_holds_everywhere(
            x in -10_000.0f64..10_000.0,
            y in -10_000.0f64..10_000.0,
            quadrant in 0usize..4,
        ) {
            let direction = all_directions()[quadrant];
            let p = LeaderCalculator::leader_offset(x, y, Some(direction));
            let d = euclidean_distance(&Point::new(x, y), &p);
            prop_assert!(d >= MIN_LEADER_DISTANCE);
        }
    }
}
