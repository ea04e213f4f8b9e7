use crate::math::{Point2, Vector2};

/// Chords shorter than this carry no arc.
const MIN_CHORD: f64 = 1e-12;

/// A circular arc in the drawing plane.
///
/// Parameterised over `t` in `[0, 1]`: the point at `t` lies at angle
/// `start_angle + sweep * t` around `center`. A positive sweep runs
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc2 {
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl CircularArc2 {
    /// Builds the arc that a bulge-encoded polyline segment describes.
    ///
    /// `bulge = tan(sweep / 4)`. Returns `None` for a zero-length chord or
    /// a zero bulge (the segment is straight).
    #[must_use]
    pub fn from_bulge(start: Point2, end: Point2, bulge: f64) -> Option<Self> {
        let chord = end - start;
        let chord_len = chord.norm();
        if chord_len < MIN_CHORD || bulge.abs() < MIN_CHORD {
            return None;
        }

        // Signed distance from the chord midpoint to the center, along the left normal.
        let apothem = (1.0 - bulge * bulge) / (2.0 * bulge) * (chord_len * 0.5);
        let left_normal = Vector2::new(-chord.y, chord.x) / chord_len;
        let center = nalgebra::center(&start, &end) + left_normal * apothem;

        // r = d(1 + b²) / (4|b|)
        let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let sweep = 4.0 * bulge.atan();

        Some(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Returns the center of the arc circle.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the signed sweep angle in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Evaluates the arc at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let angle = self.start_angle + self.sweep * t;
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    /// Samples `count` points at evenly spaced parameters, both endpoints included.
    ///
    /// A `count` below 2 is raised to 2. With an odd count the middle sample
    /// is the exact geometric midpoint of the arc.
    #[must_use]
    pub fn sample_points(&self, count: usize) -> Vec<Point2> {
        let count = count.max(2);
        #[allow(clippy::cast_precision_loss)]
        let last = (count - 1) as f64;
        (0..count)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / last;
                self.point_at(t)
            })
            .collect()
    }
}
