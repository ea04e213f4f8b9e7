pub mod memory;

pub use memory::MemoryDocument;

use std::fmt::Debug;

use crate::error::{HostError, SelectionError};
use crate::geometry::Pline;
use crate::math::Point2;
use crate::profile::{FrameSource, ProfileCurve};

/// Text shown when asking the user to pick an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityPrompt {
    pub message: String,
    /// Shown when the user picks an entity of the wrong type.
    pub reject_message: String,
}

impl EntityPrompt {
    /// Creates a prompt with its message and wrong-type reply.
    #[must_use]
    pub fn new(message: impl Into<String>, reject_message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            reject_message: reject_message.into(),
        }
    }
}

/// Identifier types of a host document.
pub trait Document {
    type PolylineId: Copy + Debug;
    type ViewId: Copy + Debug;
    type ProfileId: Copy + Debug;
}

/// Interactive prompts and the command line.
pub trait Editor: Document {
    /// Asks the user to pick one polyline.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] if the user cancels or picks another entity type.
    fn pick_polyline(&mut self, prompt: &EntityPrompt) -> Result<Self::PolylineId, SelectionError>;

    /// Asks the user to pick one profile view.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] if the user cancels or picks another entity type.
    fn pick_profile_view(&mut self, prompt: &EntityPrompt) -> Result<Self::ViewId, SelectionError>;

    /// Writes a line to the command line.
    fn write_message(&mut self, message: &str);
}

/// Read access to polylines and profile-view metadata.
pub trait ProfileViewSource: Document {
    /// Returns a copy of a polyline's geometry.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the polyline cannot be read.
    fn polyline(&self, id: Self::PolylineId) -> Result<Pline, HostError>;

    /// Reads the values that place `view`'s profile space in the drawing.
    ///
    /// A view with an automatic elevation range is switched to a
    /// user-specified range first, so its minimum elevation stays put while
    /// the new profile is drawn.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the view or its style cannot be read.
    fn frame_source(&mut self, view: Self::ViewId) -> Result<FrameSource, HostError>;
}

/// Creates profiles and their layout entities.
pub trait ProfileSink: Document {
    /// Creates an empty layout profile on the alignment of `view`, using the
    /// alignment's layer and the document's default profile and label-set styles.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the profile cannot be created.
    fn create_profile_by_layout(
        &mut self,
        name: &str,
        view: Self::ViewId,
    ) -> Result<Self::ProfileId, HostError>;

    /// Appends a fixed tangent to `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the entity cannot be added.
    fn add_fixed_tangent(
        &mut self,
        profile: Self::ProfileId,
        start: Point2,
        end: Point2,
    ) -> Result<(), HostError>;

    /// Appends a symmetric parabola through three points to `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the entity cannot be added.
    fn add_fixed_symmetric_parabola(
        &mut self,
        profile: Self::ProfileId,
        start: Point2,
        mid: Point2,
        end: Point2,
    ) -> Result<(), HostError>;

    /// Appends any [`ProfileCurve`] to `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the entity cannot be added.
    fn add_curve(&mut self, profile: Self::ProfileId, curve: &ProfileCurve) -> Result<(), HostError> {
        match *curve {
            ProfileCurve::FixedTangent { start, end } => self.add_fixed_tangent(profile, start, end),
            ProfileCurve::FixedSymmetricParabola { start, mid, end } => {
                self.add_fixed_symmetric_parabola(profile, start, mid, end)
            }
        }
    }
}

/// All-or-nothing document changes.
pub trait Transactional {
    /// Opens a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::TransactionActive`] if a transaction is already open.
    fn begin_transaction(&mut self) -> Result<(), HostError>;

    /// Makes every change since [`Transactional::begin_transaction`] permanent.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if there is nothing to commit or the commit fails.
    fn commit_transaction(&mut self) -> Result<(), HostError>;

    /// Discards every change made since [`Transactional::begin_transaction`].
    fn abort_transaction(&mut self);
}

/// Everything the profile command needs from a host.
pub trait Host: Editor + ProfileViewSource + ProfileSink + Transactional {}

impl<T> Host for T where T: Editor + ProfileViewSource + ProfileSink + Transactional {}
