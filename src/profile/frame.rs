use crate::error::FrameError;
use crate::math::Point2;

/// Maps drawing-space points of a profile view into (station, elevation).
///
/// Only constructible through [`ReferenceFrame::new`], so the vertical
/// exaggeration is always finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    origin_x: f64,
    origin_y: f64,
    vertical_exaggeration: f64,
    elevation_min: f64,
    horizontal_padding: f64,
}

impl ReferenceFrame {
    /// Creates a reference frame.
    ///
    /// * `origin_x`, `origin_y` - Drawing point of the view's start station and minimum elevation
    /// * `vertical_exaggeration` - Display scale of elevations (must be > 0)
    /// * `elevation_min` - Elevation at the bottom of the view
    /// * `horizontal_padding` - Drawing-space X offset of the plotted grid
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::NonFinite`] if any value is NaN or infinite, and
    /// [`FrameError::NonPositiveExaggeration`] if the exaggeration is not positive.
    pub fn new(
        origin_x: f64,
        origin_y: f64,
        vertical_exaggeration: f64,
        elevation_min: f64,
        horizontal_padding: f64,
    ) -> Result<Self, FrameError> {
        for (field, value) in [
            ("origin x", origin_x),
            ("origin y", origin_y),
            ("vertical exaggeration", vertical_exaggeration),
            ("minimum elevation", elevation_min),
            ("horizontal padding", horizontal_padding),
        ] {
            if !value.is_finite() {
                return Err(FrameError::NonFinite { field });
            }
        }
        if vertical_exaggeration <= 0.0 {
            return Err(FrameError::NonPositiveExaggeration(vertical_exaggeration));
        }
        Ok(Self {
            origin_x,
            origin_y,
            vertical_exaggeration,
            elevation_min,
            horizontal_padding,
        })
    }

    /// Returns the drawing point of the start station and minimum elevation.
    #[must_use]
    pub fn origin(&self) -> Point2 {
        Point2::new(self.origin_x, self.origin_y)
    }

    /// Returns the vertical exaggeration.
    #[must_use]
    pub fn vertical_exaggeration(&self) -> f64 {
        self.vertical_exaggeration
    }

    /// Returns the elevation at the bottom of the view.
    #[must_use]
    pub fn elevation_min(&self) -> f64 {
        self.elevation_min
    }

    /// Returns the drawing-space X padding of the grid.
    #[must_use]
    pub fn horizontal_padding(&self) -> f64 {
        self.horizontal_padding
    }

    /// Transforms a drawing-space point into profile space.
    ///
    /// ```text
    /// station   = (x - horizontal_padding) - origin_x
    /// elevation = (y - origin_y) / vertical_exaggeration + elevation_min
    /// ```
    #[must_use]
    pub fn to_profile(&self, p: Point2) -> Point2 {
        let station = (p.x - self.horizontal_padding) - self.origin_x;
        let elevation = (p.y - self.origin_y) / self.vertical_exaggeration + self.elevation_min;
        Point2::new(station, elevation)
    }
}

/// Raw profile-view and style values a host reads to build a [`ReferenceFrame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSource {
    /// Drawing point of (start station, minimum elevation).
    pub origin: Point2,
    pub vertical_exaggeration: f64,
    pub elevation_min: f64,
    /// Grid left padding, in major ticks.
    pub grid_padding_left: f64,
    /// Major tick interval of the bottom axis.
    pub major_tick_interval: f64,
}

impl FrameSource {
    /// Drawing-space X padding: grid left padding times the major tick interval.
    #[must_use]
    pub fn horizontal_padding(&self) -> f64 {
        self.grid_padding_left * self.major_tick_interval
    }

    /// Validates the values and builds the reference frame.
    ///
    /// # Errors
    ///
    /// See [`ReferenceFrame::new`].
    pub fn resolve(&self) -> Result<ReferenceFrame, FrameError> {
        ReferenceFrame::new(
            self.origin.x,
            self.origin.y,
            self.vertical_exaggeration,
            self.elevation_min,
            self.horizontal_padding(),
        )
    }
}
