use crate::prelude::FormatError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear space as used in IONEX grid definitions.
/// Linear space starting from `start` ranging to `end` (included).
/// A null spacing describes a single point space, located at `start`.
#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Linspace {
    /// start coordinates or value
    pub start: f64,
    /// end coordinates or value
    pub end: f64,
    /// spacing (increment value)
    pub spacing: f64,
}

impl Linspace {
    /// Builds a new Linear space.
    /// Spacing must lead from `start` to `end`, for example
    /// latitude grids usually are decreasing (87.5, -87.5, -2.5).
    pub fn new(start: f64, end: f64, spacing: f64) -> Result<Self, FormatError> {
        let faulty = FormatError::AxisDefinition {
            start,
            stop: end,
            step: spacing,
        };
        if !start.is_finite() || !end.is_finite() || !spacing.is_finite() {
            return Err(faulty);
        }
        if spacing == 0.0 {
            return Ok(Self::single_point(start));
        }
        let steps = (end - start) / spacing;
        if !steps.is_finite() || steps < -Self::TOLERANCE || steps >= Self::MAX_POINTS as f64 {
            return Err(faulty);
        }
        Ok(Self {
            start,
            end,
            spacing,
        })
    }

    /// Builds a single point space
    pub fn single_point(value: f64) -> Self {
        Self {
            start: value,
            end: value,
            spacing: 0.0,
        }
    }

    // tolerance on the number of steps, absorbs rounding of decimal coordinates
    const TOLERANCE: f64 = 1.0E-6;

    /// Maximal number of points of one axis
    pub const MAX_POINTS: usize = 1_000_000;

    /// Returns grid length, in terms of data points
    pub fn length(&self) -> usize {
        if self.spacing == 0.0 {
            return 1;
        }
        let steps = (self.end - self.start) / self.spacing;
        if !steps.is_finite() || steps < 0.0 {
            return 1;
        }
        let steps = (steps + Self::TOLERANCE).floor() as usize;
        steps.saturating_add(1).min(Self::MAX_POINTS)
    }

    /// Returns true if self is a single point space
    pub fn is_single_point(&self) -> bool {
        self.length() == 1
    }

    /// Iterates over all coordinates, from `start` to `end` (included)
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.length()).map(move |i| self.start + i as f64 * self.spacing)
    }
}

impl TryFrom<(f64, f64, f64)> for Linspace {
    type Error = FormatError;
    fn try_from(tuple: (f64, f64, f64)) -> Result<Self, Self::Error> {
        Self::new(tuple.0, tuple.1, tuple.2)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn increasing_space() {
        let space = Linspace::new(-180.0, 180.0, 5.0).unwrap();
        assert_eq!(space.length(), 73);
        assert!(!space.is_single_point());
        let values: Vec<f64> = space.values().collect();
        assert_eq!(values[0], -180.0);
        assert_eq!(values[1], -175.0);
        assert_eq!(values[72], 180.0);
    }
    #[test]
    fn decreasing_space() {
        let space = Linspace::new(87.5, -87.5, -2.5).unwrap();
        assert_eq!(space.length(), 71);
        let values: Vec<f64> = space.values().collect();
        assert_eq!(values.first(), Some(&87.5));
        assert_eq!(values.last(), Some(&-87.5));
    }
    #[test]
    fn single_point() {
        let space = Linspace::new(450.0, 450.0, 0.0).unwrap();
        assert!(space.is_single_point());
        assert_eq!(space.values().collect::<Vec<_>>(), vec![450.0]);
        assert_eq!(Linspace::default().length(), 1);
    }
    #[test]
    fn faulty_spaces() {
        assert!(Linspace::new(87.5, -87.5, 2.5).is_err());
        assert!(Linspace::try_from((0.0, 10.0, -1.0)).is_err());
        assert!(Linspace::new(0.0, f64::NAN, 1.0).is_err());
    }
    #[test]
    fn oversized_spaces() {
        assert_eq!(
            Linspace::new(-180.0, 180.0, 1.0E-300),
            Err(FormatError::AxisDefinition {
                start: -180.0,
                stop: 180.0,
                step: 1.0E-300
            })
        );
        assert!(Linspace::new(-180.0, 180.0, 1.0E-4).is_err());
        assert!(Linspace::new(0.0, 99_999.0, 0.1).is_ok());

        // fields are public: length remains bounded
        let space = Linspace {
            start: -180.0,
            end: 180.0,
            spacing: 1.0E-300,
        };
        assert_eq!(space.length(), Linspace::MAX_POINTS);
        let space = Linspace {
            start: 0.0,
            end: f64::INFINITY,
            spacing: 1.0,
        };
        assert_eq!(space.length(), 1);
    }
}
