use crate::math::Point2;

use super::arc::CircularArc2;

/// Number of evenly spaced samples taken along an arc to locate its midpoint.
pub const ARC_SAMPLE_COUNT: usize = 11;

/// Index of the sample used as the arc midpoint (the 6th of 11).
pub const ARC_MID_SAMPLE: usize = ARC_SAMPLE_COUNT / 2;

/// A single polyline edge in drawing space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// A straight edge.
    Line { start: Point2, end: Point2 },
    /// A circular-arc edge together with its sampled midpoint.
    Arc {
        start: Point2,
        end: Point2,
        mid: Point2,
    },
    /// A coincident, point or empty edge; it carries no geometry.
    Degenerate,
}

impl Segment {
    /// Creates a straight segment.
    #[must_use]
    pub fn line(start: Point2, end: Point2) -> Self {
        Self::Line { start, end }
    }

    /// Creates an arc segment whose midpoint is sample [`ARC_MID_SAMPLE`] of
    /// [`ARC_SAMPLE_COUNT`] evenly spaced samples.
    ///
    /// `start` and `end` are kept exactly as given; only the midpoint is sampled.
    #[must_use]
    pub fn from_arc(start: Point2, end: Point2, arc: &CircularArc2) -> Self {
        // sample_points returns exactly ARC_SAMPLE_COUNT points, so the index is in bounds.
        let mid = arc.sample_points(ARC_SAMPLE_COUNT)[ARC_MID_SAMPLE];
        Self::Arc { start, end, mid }
    }

    /// Returns the start point, or `None` for a degenerate segment.
    #[must_use]
    pub fn start(&self) -> Option<Point2> {
        match self {
            Self::Line { start, .. } | Self::Arc { start, .. } => Some(*start),
            Self::Degenerate => None,
        }
    }

    /// Returns the end point, or `None` for a degenerate segment.
    #[must_use]
    pub fn end(&self) -> Option<Point2> {
        match self {
            Self::Line { end, .. } | Self::Arc { end, .. } => Some(*end),
            Self::Degenerate => None,
        }
    }

    /// Returns whether this segment is skipped during projection.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate)
    }
}
