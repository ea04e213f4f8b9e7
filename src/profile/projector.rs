use tracing::trace;

use crate::geometry::Segment;

use super::curve::ProfileCurve;
use super::frame::ReferenceFrame;

/// Projects drawing-space polyline segments onto a profile view's
/// (station, elevation) space.
///
/// Lines become fixed tangents and arcs become fixed symmetric parabolas
/// through the arc's start, sampled midpoint and end. Degenerate segments
/// produce nothing. Output order follows input order.
#[derive(Debug)]
pub struct ProfileProjector<'a> {
    segments: &'a [Segment],
    frame: ReferenceFrame,
}

impl<'a> ProfileProjector<'a> {
    /// Creates a new projection over `segments`.
    ///
    /// The segments are expected to run left to right in drawing space
    /// (see [`Pline::normalized_left_to_right`](crate::geometry::Pline::normalized_left_to_right));
    /// otherwise the output is produced anyway, with decreasing stations.
    #[must_use]
    pub fn new(segments: &'a [Segment], frame: ReferenceFrame) -> Self {
        Self { segments, frame }
    }

    /// Executes the projection.
    #[must_use]
    pub fn execute(&self) -> Vec<ProfileCurve> {
        let curves: Vec<ProfileCurve> = self
            .segments
            .iter()
            .filter_map(|segment| self.project_segment(segment))
            .collect();
        trace!(
            segments = self.segments.len(),
            curves = curves.len(),
            "projected polyline segments"
        );
        curves
    }

    /// Projects a single segment; `None` for a degenerate one.
    #[must_use]
    pub fn project_segment(&self, segment: &Segment) -> Option<ProfileCurve> {
        let f = &self.frame;
        match *segment {
            Segment::Line { start, end } => Some(ProfileCurve::FixedTangent {
                start: f.to_profile(start),
                end: f.to_profile(end),
            }),
            Segment::Arc { start, end, mid } => Some(ProfileCurve::FixedSymmetricParabola {
                start: f.to_profile(start),
                mid: f.to_profile(mid),
                end: f.to_profile(end),
            }),
            Segment::Degenerate => None,
        }
    }
}

/// Shorthand for `ProfileProjector::new(segments, frame).execute()`.
#[must_use]
pub fn project(segments: &[Segment], frame: ReferenceFrame) -> Vec<ProfileCurve> {
    ProfileProjector::new(segments, frame).execute()
}
