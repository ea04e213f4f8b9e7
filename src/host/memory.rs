use std::collections::VecDeque;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{HostError, SelectionError};
use crate::geometry::Pline;
use crate::math::Point2;
use crate::profile::{FrameSource, ProfileCurve};

use super::{Document, Editor, EntityPrompt, ProfileSink, ProfileViewSource, Transactional};

slotmap::new_key_type! {
    /// Identifier of a polyline in a [`MemoryDocument`].
    pub struct PolylineKey;
    /// Identifier of an alignment in a [`MemoryDocument`].
    pub struct AlignmentKey;
    /// Identifier of a profile view style in a [`MemoryDocument`].
    pub struct ViewStyleKey;
    /// Identifier of a profile view in a [`MemoryDocument`].
    pub struct ProfileViewKey;
    /// Identifier of a profile in a [`MemoryDocument`].
    pub struct ProfileKey;
}

/// A horizontal alignment; profiles are created along it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub name: String,
    pub layer: String,
}

/// Display settings of a profile view.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileViewStyle {
    pub name: String,
    pub vertical_exaggeration: f64,
    /// Grid padding to the left of the start station, in major ticks.
    pub grid_padding_left: f64,
    /// Major tick interval of the bottom (station) axis.
    pub major_tick_interval: f64,
}

/// How a profile view chooses its elevation range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationRange {
    Automatic,
    UserSpecified,
}

/// A station/elevation graph placed in the drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub alignment: AlignmentKey,
    pub style: ViewStyleKey,
    /// Drawing point of the lower-left graph corner.
    pub insertion: Point2,
    pub station_start: f64,
    pub elevation_min: f64,
    pub elevation_range: ElevationRange,
}

/// A layout profile and its entities, in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub alignment: AlignmentKey,
    pub layer: String,
    pub style: String,
    pub label_set: String,
    pub entities: Vec<ProfileCurve>,
}

/// What the user does at the next prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Polyline(PolylineKey),
    ProfileView(ProfileViewKey),
    Cancel,
}

#[derive(Debug, Clone)]
struct Snapshot {
    views: SlotMap<ProfileViewKey, ProfileView>,
    profiles: SlotMap<ProfileKey, Profile>,
}

/// In-memory drawing host.
///
/// Entities live in generational arenas; prompts are answered from a queue
/// of scripted [`Pick`]s (an empty queue behaves like the user pressing
/// Escape). Transactions snapshot the mutable parts of the document and
/// restore them on abort.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    polylines: SlotMap<PolylineKey, Pline>,
    alignments: SlotMap<AlignmentKey, Alignment>,
    view_styles: SlotMap<ViewStyleKey, ProfileViewStyle>,
    views: SlotMap<ProfileViewKey, ProfileView>,
    profiles: SlotMap<ProfileKey, Profile>,
    profile_styles: Vec<String>,
    label_set_styles: Vec<String>,
    picks: VecDeque<Pick>,
    messages: Vec<String>,
    transaction: Option<Snapshot>,
    entity_budget: Option<usize>,
    fail_commit: bool,
}

impl MemoryDocument {
    /// Creates a new, empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Content ---

    /// Inserts a polyline and returns its ID.
    pub fn add_polyline(&mut self, pline: Pline) -> PolylineKey {
        self.polylines.insert(pline)
    }

    /// Inserts an alignment and returns its ID.
    pub fn add_alignment(&mut self, alignment: Alignment) -> AlignmentKey {
        self.alignments.insert(alignment)
    }

    /// Inserts a profile view style and returns its ID.
    pub fn add_view_style(&mut self, style: ProfileViewStyle) -> ViewStyleKey {
        self.view_styles.insert(style)
    }

    /// Inserts a profile view and returns its ID.
    pub fn add_profile_view(&mut self, view: ProfileView) -> ProfileViewKey {
        self.views.insert(view)
    }

    /// Registers a profile style; the first one registered is the default.
    pub fn add_profile_style(&mut self, name: impl Into<String>) {
        self.profile_styles.push(name.into());
    }

    /// Registers a profile label-set style; the first one registered is the default.
    pub fn add_label_set_style(&mut self, name: impl Into<String>) {
        self.label_set_styles.push(name.into());
    }

    /// Queues the answer to the next prompt.
    pub fn queue_pick(&mut self, pick: Pick) {
        self.picks.push_back(pick);
    }

    /// Makes the document fail after accepting `count` more profile entities.
    pub fn fail_after_entities(&mut self, count: usize) {
        self.entity_budget = Some(count);
    }

    /// Makes the next commit fail, leaving its transaction open.
    pub fn fail_next_commit(&mut self) {
        self.fail_commit = true;
    }

    // --- Queries ---

    /// Returns the stored polyline, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn polyline_ref(&self, id: PolylineKey) -> Result<&Pline, HostError> {
        self.polylines
            .get(id)
            .ok_or(HostError::EntityNotFound("polyline"))
    }

    /// Returns the profile view, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn profile_view(&self, id: ProfileViewKey) -> Result<&ProfileView, HostError> {
        self.views
            .get(id)
            .ok_or(HostError::EntityNotFound("profile view"))
    }

    /// Returns the profile, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the document.
    pub fn profile(&self, id: ProfileKey) -> Result<&Profile, HostError> {
        self.profiles
            .get(id)
            .ok_or(HostError::EntityNotFound("profile"))
    }

    /// Returns the number of profiles in the document.
    #[must_use]
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    /// Returns every message written to the command line.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns whether a transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Finds the drawing point of `(station, elevation)` in a profile view.
    ///
    /// # Errors
    ///
    /// Returns an error if the view or its style is not found.
    pub fn find_xy_at_station_and_elevation(
        &self,
        view: ProfileViewKey,
        station: f64,
        elevation: f64,
    ) -> Result<Point2, HostError> {
        let view = self.profile_view(view)?;
        let style = self.view_style(view.style)?;
        Ok(Point2::new(
            view.insertion.x + (station - view.station_start),
            view.insertion.y + (elevation - view.elevation_min) * style.vertical_exaggeration,
        ))
    }

    fn view_style(&self, id: ViewStyleKey) -> Result<&ProfileViewStyle, HostError> {
        self.view_styles
            .get(id)
            .ok_or(HostError::EntityNotFound("profile view style"))
    }

    fn require_transaction(&self) -> Result<(), HostError> {
        if self.transaction.is_some() {
            Ok(())
        } else {
            Err(HostError::NoTransaction)
        }
    }

    fn push_entity(&mut self, profile: ProfileKey, curve: ProfileCurve) -> Result<(), HostError> {
        self.require_transaction()?;
        if let Some(budget) = self.entity_budget.as_mut() {
            if *budget == 0 {
                return Err(HostError::Failed("profile entity rejected".into()));
            }
            *budget -= 1;
        }
        self.profiles
            .get_mut(profile)
            .ok_or(HostError::EntityNotFound("profile"))?
            .entities
            .push(curve);
        Ok(())
    }

    fn next_pick(&mut self) -> Pick {
        self.picks.pop_front().unwrap_or(Pick::Cancel)
    }
}

impl Document for MemoryDocument {
    type PolylineId = PolylineKey;
    type ViewId = ProfileViewKey;
    type ProfileId = ProfileKey;
}

impl Editor for MemoryDocument {
    fn pick_polyline(&mut self, prompt: &EntityPrompt) -> Result<PolylineKey, SelectionError> {
        self.messages.push(prompt.message.clone());
        match self.next_pick() {
            Pick::Polyline(id) if self.polylines.contains_key(id) => Ok(id),
            Pick::Cancel => Err(SelectionError::Cancelled),
            Pick::Polyline(_) | Pick::ProfileView(_) => {
                self.messages.push(prompt.reject_message.clone());
                Err(SelectionError::Rejected {
                    expected: "polyline",
                })
            }
        }
    }

    fn pick_profile_view(&mut self, prompt: &EntityPrompt) -> Result<ProfileViewKey, SelectionError> {
        self.messages.push(prompt.message.clone());
        match self.next_pick() {
            Pick::ProfileView(id) if self.views.contains_key(id) => Ok(id),
            Pick::Cancel => Err(SelectionError::Cancelled),
            Pick::Polyline(_) | Pick::ProfileView(_) => {
                self.messages.push(prompt.reject_message.clone());
                Err(SelectionError::Rejected {
                    expected: "profile view",
                })
            }
        }
    }

    fn write_message(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }
}

impl ProfileViewSource for MemoryDocument {
    fn polyline(&self, id: PolylineKey) -> Result<Pline, HostError> {
        self.polyline_ref(id).cloned()
    }

    fn frame_source(&mut self, view: ProfileViewKey) -> Result<FrameSource, HostError> {
        let data = self
            .views
            .get_mut(view)
            .ok_or(HostError::EntityNotFound("profile view"))?;
        if data.elevation_range == ElevationRange::Automatic {
            debug!(?view, "switching profile view to a user-specified elevation range");
            data.elevation_range = ElevationRange::UserSpecified;
        }
        let (station_start, elevation_min, style_id) =
            (data.station_start, data.elevation_min, data.style);

        let origin = self.find_xy_at_station_and_elevation(view, station_start, elevation_min)?;
        let style = self.view_style(style_id)?;
        Ok(FrameSource {
            origin,
            vertical_exaggeration: style.vertical_exaggeration,
            elevation_min,
            grid_padding_left: style.grid_padding_left,
            major_tick_interval: style.major_tick_interval,
        })
    }
}

impl ProfileSink for MemoryDocument {
    fn create_profile_by_layout(
        &mut self,
        name: &str,
        view: ProfileViewKey,
    ) -> Result<ProfileKey, HostError> {
        self.require_transaction()?;
        let alignment_id = self.profile_view(view)?.alignment;
        let layer = self
            .alignments
            .get(alignment_id)
            .ok_or(HostError::EntityNotFound("alignment"))?
            .layer
            .clone();
        let style = self
            .profile_styles
            .first()
            .cloned()
            .ok_or(HostError::StyleMissing("profile"))?;
        let label_set = self
            .label_set_styles
            .first()
            .cloned()
            .ok_or(HostError::StyleMissing("profile label set"))?;

        Ok(self.profiles.insert(Profile {
            name: name.to_owned(),
            alignment: alignment_id,
            layer,
            style,
            label_set,
            entities: Vec::new(),
        }))
    }

    fn add_fixed_tangent(
        &mut self,
        profile: ProfileKey,
        start: Point2,
        end: Point2,
    ) -> Result<(), HostError> {
        self.push_entity(profile, ProfileCurve::FixedTangent { start, end })
    }

    fn add_fixed_symmetric_parabola(
        &mut self,
        profile: ProfileKey,
        start: Point2,
        mid: Point2,
        end: Point2,
    ) -> Result<(), HostError> {
        self.push_entity(profile, ProfileCurve::FixedSymmetricParabola { start, mid, end })
    }
}

impl Transactional for MemoryDocument {
    fn begin_transaction(&mut self) -> Result<(), HostError> {
        if self.transaction.is_some() {
            return Err(HostError::TransactionActive);
        }
        self.transaction = Some(Snapshot {
            views: self.views.clone(),
            profiles: self.profiles.clone(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<(), HostError> {
        if self.transaction.is_some() && std::mem::take(&mut self.fail_commit) {
            return Err(HostError::Failed("commit rejected".into()));
        }
        self.transaction
            .take()
            .map(|_| ())
            .ok_or(HostError::NoTransaction)
    }

    fn abort_transaction(&mut self) {
        if let Some(snapshot) = self.transaction.take() {
            self.views = snapshot.views;
            self.profiles = snapshot.profiles;
        }
    }
}
