use std::borrow::Cow;

use crate::math::{Point2, TOLERANCE};

use super::arc::CircularArc2;
use super::segment::Segment;

/// Bulges smaller than this are treated as straight segments.
const STRAIGHT_BULGE: f64 = 1e-12;

/// Bulge-encoded polyline vertex for mixed line/arc segments.
///
/// `bulge = tan(sweep_angle / 4)`:
/// - `0` = straight line to next vertex
/// - `> 0` = counter-clockwise arc to next vertex
/// - `< 0` = clockwise arc to next vertex
/// - `|bulge| = 1` = semicircle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl PlineVertex {
    /// Creates a new vertex with the given coordinates and bulge.
    #[must_use]
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }

    /// Creates a line vertex (bulge = 0).
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self { x, y, bulge: 0.0 }
    }

    /// Returns the vertex position.
    #[must_use]
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// How a polyline edge is shaped, as a drawing host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Line,
    Arc,
    /// Both ends of the edge coincide.
    Coincident,
    /// The polyline has a single vertex.
    Point,
    /// The polyline has no vertices, or the index is past its last edge.
    Empty,
}

/// A drawing-space polyline with mixed straight-line and circular-arc segments.
///
/// Segment `i` runs from vertex `i` to vertex `i + 1`; a closed polyline
/// also runs from its last vertex back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
    pub closed: bool,
}

impl Pline {
    /// Creates a polyline from vertices.
    #[must_use]
    pub fn new(vertices: Vec<PlineVertex>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// Creates an open, line-only polyline through `points`.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let vertices = points
            .iter()
            .map(|p| PlineVertex::line(p.x, p.y))
            .collect();
        Self {
            vertices,
            closed: false,
        }
    }

    /// Returns the first vertex position.
    #[must_use]
    pub fn start_point(&self) -> Option<Point2> {
        self.vertices.first().map(PlineVertex::point)
    }

    /// Returns the last vertex position.
    #[must_use]
    pub fn end_point(&self) -> Option<Point2> {
        self.vertices.last().map(PlineVertex::point)
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Classifies segment `i`.
    #[must_use]
    pub fn segment_kind(&self, i: usize) -> SegmentKind {
        match self.vertices.len() {
            0 => return SegmentKind::Empty,
            1 => return SegmentKind::Point,
            _ => {}
        }
        let Some((v0, v1)) = self.segment_vertices(i) else {
            return SegmentKind::Empty;
        };
        if (v1.point() - v0.point()).norm() < TOLERANCE {
            SegmentKind::Coincident
        } else if v0.bulge.abs() < STRAIGHT_BULGE {
            SegmentKind::Line
        } else {
            SegmentKind::Arc
        }
    }

    /// Converts segment `i` to a drawing-space [`Segment`].
    ///
    /// Arc midpoints are sampled as described on [`Segment::from_arc`].
    #[must_use]
    pub fn segment_at(&self, i: usize) -> Segment {
        let Some((v0, v1)) = self.segment_vertices(i) else {
            return Segment::Degenerate;
        };
        let (start, end) = (v0.point(), v1.point());
        match self.segment_kind(i) {
            SegmentKind::Line => Segment::line(start, end),
            SegmentKind::Arc => CircularArc2::from_bulge(start, end, v0.bulge)
                .map_or(Segment::Degenerate, |arc| Segment::from_arc(start, end, &arc)),
            SegmentKind::Coincident | SegmentKind::Point | SegmentKind::Empty => {
                Segment::Degenerate
            }
        }
    }

    /// Returns the segments of the open vertex chain, in order.
    ///
    /// The closing segment of a closed polyline is not part of a profile and
    /// is left out.
    #[must_use]
    pub fn profile_segments(&self) -> Vec<Segment> {
        (0..self.vertices.len().saturating_sub(1))
            .map(|i| self.segment_at(i))
            .collect()
    }

    /// Returns a new polyline with vertices in reverse order and negated bulges.
    ///
    /// For a segment `v[i] → v[i+1]` with bulge `b`, the reversed segment
    /// `v[i+1] → v[i]` has bulge `-b`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let m = self.vertices.len();
        let vertices = (0..m)
            .map(|j| {
                let src = &self.vertices[m - 1 - j];
                let bulge = if j + 1 < m {
                    -self.vertices[m - 2 - j].bulge
                } else if self.closed {
                    // Closing edge: new last vertex back to new first.
                    -self.vertices[m - 1].bulge
                } else {
                    0.0
                };
                PlineVertex::new(src.x, src.y, bulge)
            })
            .collect();
        Self {
            vertices,
            closed: self.closed,
        }
    }

    /// Returns this polyline oriented so its start X is not greater than its end X.
    ///
    /// Borrows `self` when it is already left-to-right, otherwise returns a
    /// reversed copy. The original geometry is never touched.
    #[must_use]
    pub fn normalized_left_to_right(&self) -> Cow<'_, Self> {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) if start.x > end.x => Cow::Owned(self.reversed()),
            _ => Cow::Borrowed(self),
        }
    }

    fn segment_vertices(&self, i: usize) -> Option<(&PlineVertex, &PlineVertex)> {
        let n = self.vertices.len();
        if i >= self.segment_count() {
            return None;
        }
        Some((&self.vertices[i], &self.vertices[(i + 1) % n]))
    }
}
