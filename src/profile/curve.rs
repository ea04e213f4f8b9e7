use crate::math::{Point2, TOLERANCE};

/// A profile-space layout primitive; `x` is station and `y` is elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileCurve {
    /// A straight grade between two fixed points.
    FixedTangent { start: Point2, end: Point2 },
    /// A vertical curve fitted through three fixed points.
    FixedSymmetricParabola {
        start: Point2,
        mid: Point2,
        end: Point2,
    },
}

impl ProfileCurve {
    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::FixedTangent { start, .. } | Self::FixedSymmetricParabola { start, .. } => *start,
        }
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::FixedTangent { end, .. } | Self::FixedSymmetricParabola { end, .. } => *end,
        }
    }

    /// Returns the station of the start point.
    #[must_use]
    pub fn start_station(&self) -> f64 {
        self.start().x
    }

    /// Returns the station of the end point.
    #[must_use]
    pub fn end_station(&self) -> f64 {
        self.end().x
    }

    /// Horizontal length in stations.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end_station() - self.start_station()).abs()
    }

    /// Grade (rise over run) entering the curve at its start.
    ///
    /// Returns `None` when two defining points share a station.
    #[must_use]
    pub fn grade_in(&self) -> Option<f64> {
        match self {
            Self::FixedTangent { start, end } => grade(*start, *end),
            Self::FixedSymmetricParabola { start, .. } => self.slope_at(start.x),
        }
    }

    /// Grade leaving the curve at its end.
    ///
    /// Returns `None` when two defining points share a station.
    #[must_use]
    pub fn grade_out(&self) -> Option<f64> {
        match self {
            Self::FixedTangent { start, end } => grade(*start, *end),
            Self::FixedSymmetricParabola { end, .. } => self.slope_at(end.x),
        }
    }

    /// Elevation at `station`, or `None` outside the curve's station range.
    #[must_use]
    pub fn elevation_at(&self, station: f64) -> Option<f64> {
        let (lo, hi) = if self.start_station() <= self.end_station() {
            (self.start_station(), self.end_station())
        } else {
            (self.end_station(), self.start_station())
        };
        if station < lo - TOLERANCE || station > hi + TOLERANCE {
            return None;
        }
        match self {
            Self::FixedTangent { start, end } => {
                let g = grade(*start, *end)?;
                Some(start.y + g * (station - start.x))
            }
            Self::FixedSymmetricParabola { start, mid, end } => {
                Quadratic::through(*start, *mid, *end).map(|q| q.value(station))
            }
        }
    }

    fn slope_at(&self, station: f64) -> Option<f64> {
        match self {
            Self::FixedTangent { start, end } => grade(*start, *end),
            Self::FixedSymmetricParabola { start, mid, end } => {
                Quadratic::through(*start, *mid, *end).map(|q| q.slope(station))
            }
        }
    }
}

/// Returns whether start stations never decrease along `curves` and every
/// curve runs forward in station.
#[must_use]
pub fn is_station_ordered(curves: &[ProfileCurve]) -> bool {
    curves
        .iter()
        .all(|c| c.start_station() <= c.end_station() + TOLERANCE)
        && curves
            .windows(2)
            .all(|w| w[0].start_station() <= w[1].start_station() + TOLERANCE)
}

fn grade(a: Point2, b: Point2) -> Option<f64> {
    let run = b.x - a.x;
    if run.abs() < TOLERANCE {
        return None;
    }
    Some((b.y - a.y) / run)
}

/// Newton form `y = y0 + d01 (x - x0) + a (x - x0)(x - x1)`.
struct Quadratic {
    x0: f64,
    x1: f64,
    y0: f64,
    d01: f64,
    a: f64,
}

impl Quadratic {
    fn through(p0: Point2, p1: Point2, p2: Point2) -> Option<Self> {
        let d01 = grade(p0, p1)?;
        let d12 = grade(p1, p2)?;
        let span = p2.x - p0.x;
        if span.abs() < TOLERANCE {
            return None;
        }
        Some(Self {
            x0: p0.x,
            x1: p1.x,
            y0: p0.y,
            d01,
            a: (d12 - d01) / span,
        })
    }

    fn value(&self, x: f64) -> f64 {
        self.y0 + self.d01 * (x - self.x0) + self.a * (x - self.x0) * (x - self.x1)
    }

    fn slope(&self, x: f64) -> f64 {
        self.d01 + self.a * ((x - self.x0) + (x - self.x1))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn crest() -> ProfileCurve {
        // y = 10 + 0.02x - 0.0001x², stations 0..200
        ProfileCurve::FixedSymmetricParabola {
            start: Point2::new(0.0, 10.0),
            mid: Point2::new(100.0, 11.0),
            end: Point2::new(200.0, 10.0),
        }
    }

    #[test]
    fn tangent_grade_and_elevation() {
        let t = ProfileCurve::FixedTangent {
            start: Point2::new(5.0, 12.0),
            end: Point2::new(25.0, 14.0),
        };
        assert_relative_eq!(t.length(), 20.0);
        assert_relative_eq!(t.grade_in().unwrap(), 0.1);
        assert_relative_eq!(t.grade_out().unwrap(), 0.1);
        assert_relative_eq!(t.elevation_at(15.0).unwrap(), 13.0);
        assert!(t.elevation_at(30.0).is_none());
    }

    #[test]
    fn parabola_passes_through_its_points() {
        let c = crest();
        assert_relative_eq!(c.elevation_at(0.0).unwrap(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(c.elevation_at(100.0).unwrap(), 11.0, epsilon = 1e-12);
        assert_relative_eq!(c.elevation_at(200.0).unwrap(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(c.elevation_at(50.0).unwrap(), 10.75, epsilon = 1e-12);
    }

    #[test]
    fn parabola_grades() {
        let c = crest();
        assert_relative_eq!(c.grade_in().unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(c.grade_out().unwrap(), -0.02, epsilon = 1e-12);
    }

    #[test]
    fn vertical_tangent_has_no_grade() {
        let t = ProfileCurve::FixedTangent {
            start: Point2::new(5.0, 1.0),
            end: Point2::new(5.0, 4.0),
        };
        assert!(t.grade_in().is_none());
        assert!(t.elevation_at(5.0).is_none());
    }

    #[test]
    fn station_ordering() {
        let a = ProfileCurve::FixedTangent {
            start: Point2::new(0.0, 0.0),
            end: Point2::new(10.0, 1.0),
        };
        let b = ProfileCurve::FixedTangent {
            start: Point2::new(10.0, 1.0),
            end: Point2::new(20.0, 0.0),
        };
        assert!(is_station_ordered(&[a, b]));
        assert!(!is_station_ordered(&[b, a]));
        assert!(is_station_ordered(&[]));
    }
}
