use std::borrow::Cow;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::host::{EntityPrompt, Host};
use crate::profile::{is_station_ordered, project};

/// Name under which the command is registered with the host.
pub const COMMAND_NAME: &str = "CREATE_PROFILE_FROM_POLYLINE";

/// Settings of [`CreateProfileFromPolyline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProfileOptions {
    /// Name given to the created profile.
    pub profile_name: String,
    pub polyline_prompt: EntityPrompt,
    pub view_prompt: EntityPrompt,
}

impl Default for CreateProfileOptions {
    fn default() -> Self {
        Self {
            profile_name: "New Profile".to_owned(),
            polyline_prompt: EntityPrompt::new("\nSelect a Polyline: ", "\nPolyline not selected"),
            view_prompt: EntityPrompt::new(
                "\nSelect a profile view: ",
                "\nProfile view not selected",
            ),
        }
    }
}

/// Builds a layout profile from a polyline drawn inside a profile view.
///
/// The user picks a polyline and a profile view. Each straight polyline
/// segment becomes a fixed tangent and each arc a fixed symmetric parabola,
/// placed by the view's station/elevation frame. All document changes are
/// made in one transaction: either the whole profile is created or nothing is.
#[derive(Debug, Clone, Default)]
pub struct CreateProfileFromPolyline {
    options: CreateProfileOptions,
}

impl CreateProfileFromPolyline {
    /// Creates the command with the given options.
    #[must_use]
    pub fn new(options: CreateProfileOptions) -> Self {
        Self { options }
    }

    /// Returns the command options.
    #[must_use]
    pub fn options(&self) -> &CreateProfileOptions {
        &self.options
    }

    /// Runs the command and reports any failure on the host's command line.
    ///
    /// Returns the created profile, or `None` if the user aborted or
    /// something failed. Nothing is created in that case. A cancelled or
    /// rejected pick ends the command silently; the prompt has already
    /// told the user.
    pub fn run<H: Host>(&self, host: &mut H) -> Option<H::ProfileId> {
        match self.execute(host) {
            Ok(profile) => Some(profile),
            Err(err) if err.is_aborted() => {
                debug!(command = COMMAND_NAME, %err, "command aborted");
                None
            }
            Err(err) => {
                warn!(command = COMMAND_NAME, %err, "command failed");
                host.write_message(&format!("\n{err}"));
                None
            }
        }
    }

    /// Executes the command.
    ///
    /// # Errors
    ///
    /// - [`SelectionError`](crate::error::SelectionError) if the user cancels a prompt or picks the wrong entity
    /// - [`FrameError`](crate::error::FrameError) if the view's style cannot place points (e.g. zero exaggeration)
    /// - [`HostError`](crate::error::HostError) if the document fails; the transaction is rolled back
    pub fn execute<H: Host>(&self, host: &mut H) -> Result<H::ProfileId> {
        let polyline = host.pick_polyline(&self.options.polyline_prompt)?;
        let view = host.pick_profile_view(&self.options.view_prompt)?;
        debug!(?polyline, ?view, "entities selected");

        host.begin_transaction()?;
        let profile = match self.build(host, polyline, view) {
            Ok(profile) => profile,
            Err(err) => {
                warn!(%err, "rolling back profile creation");
                host.abort_transaction();
                return Err(err);
            }
        };
        if let Err(err) = host.commit_transaction() {
            warn!(%err, "commit failed; rolling back profile creation");
            host.abort_transaction();
            return Err(err.into());
        }
        Ok(profile)
    }

    fn build<H: Host>(
        &self,
        host: &mut H,
        polyline: H::PolylineId,
        view: H::ViewId,
    ) -> Result<H::ProfileId> {
        let frame = host.frame_source(view)?.resolve()?;
        debug!(?frame, "resolved reference frame");

        let pline = host.polyline(polyline)?;
        let pline = pline.normalized_left_to_right();
        if matches!(pline, Cow::Owned(_)) {
            debug!("polyline runs right to left; projecting a reversed copy");
        }

        let segments = pline.profile_segments();
        let curves = project(&segments, frame);
        if !is_station_ordered(&curves) {
            warn!("projected profile stations are not increasing");
        }

        let profile = host.create_profile_by_layout(&self.options.profile_name, view)?;
        for curve in &curves {
            host.add_curve(profile, curve)?;
        }
        info!(
            command = COMMAND_NAME,
            segments = segments.len(),
            curves = curves.len(),
            "created profile {:?}",
            self.options.profile_name
        );
        Ok(profile)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{FrameError, HostError, PolyprofileError, SelectionError};
    use crate::geometry::{Pline, PlineVertex};
    use crate::host::memory::{
        Alignment, ElevationRange, Pick, PolylineKey, ProfileView, ProfileViewKey,
        ProfileViewStyle,
    };
    use crate::host::MemoryDocument;
    use crate::math::Point2;
    use crate::profile::ProfileCurve;

    struct Fixture {
        doc: MemoryDocument,
        view: ProfileViewKey,
    }

    /// A view whose frame is origin (100, 50), exaggeration 2, minimum
    /// elevation 10 and padding 5.
    fn fixture(vertical_exaggeration: f64) -> Fixture {
        let mut doc = MemoryDocument::new();
        let alignment = doc.add_alignment(Alignment {
            name: "Centerline".into(),
            layer: "C-ROAD-CNTR".into(),
        });
        let style = doc.add_view_style(ProfileViewStyle {
            name: "Grid".into(),
            vertical_exaggeration,
            grid_padding_left: 0.5,
            major_tick_interval: 10.0,
        });
        let view = doc.add_profile_view(ProfileView {
            alignment,
            style,
            insertion: Point2::new(100.0, 50.0),
            station_start: 0.0,
            elevation_min: 10.0,
            elevation_range: ElevationRange::Automatic,
        });
        doc.add_profile_style("Design");
        doc.add_label_set_style("Labels");
        Fixture { doc, view }
    }

    fn road() -> Pline {
        Pline::new(
            vec![
                PlineVertex::line(110.0, 54.0),
                PlineVertex::new(130.0, 58.0, -0.2),
                PlineVertex::line(150.0, 58.0),
                PlineVertex::line(150.0, 58.0),
                PlineVertex::line(170.0, 54.0),
            ],
            false,
        )
    }

    fn select(f: &mut Fixture, pline: Pline) -> PolylineKey {
        let id = f.doc.add_polyline(pline);
        f.doc.queue_pick(Pick::Polyline(id));
        f.doc.queue_pick(Pick::ProfileView(f.view));
        id
    }

    #[test]
    fn creates_tangents_and_parabolas() {
        let mut f = fixture(2.0);
        select(&mut f, road());
        let id = CreateProfileFromPolyline::default().execute(&mut f.doc).unwrap();

        let profile = f.doc.profile(id).unwrap();
        assert_eq!(profile.name, "New Profile");
        assert_eq!(profile.layer, "C-ROAD-CNTR");
        assert_eq!(profile.entities.len(), 3);
        assert_eq!(
            profile.entities[0],
            ProfileCurve::FixedTangent {
                start: Point2::new(5.0, 12.0),
                end: Point2::new(25.0, 14.0),
            }
        );
        let ProfileCurve::FixedSymmetricParabola { start, mid, end } = profile.entities[1] else {
            panic!("expected parabola, got {:?}", profile.entities[1]);
        };
        assert_eq!(start, Point2::new(25.0, 14.0));
        assert_eq!(end, Point2::new(45.0, 14.0));
        assert!((mid.x - 35.0).abs() < 1e-9);
        assert!(mid.y > 14.0);
        assert!(matches!(profile.entities[2], ProfileCurve::FixedTangent { .. }));
        assert!(is_station_ordered(&profile.entities));
        assert!(!f.doc.in_transaction());
    }

    #[test]
    fn view_range_becomes_user_specified() {
        let mut f = fixture(2.0);
        select(&mut f, road());
        CreateProfileFromPolyline::default().execute(&mut f.doc).unwrap();
        assert_eq!(
            f.doc.profile_view(f.view).unwrap().elevation_range,
            ElevationRange::UserSpecified
        );
    }

    #[test]
    fn right_to_left_polyline_is_projected_reversed() {
        let mut f = fixture(2.0);
        let reversed = road().reversed();
        let pline_id = select(&mut f, reversed.clone());
        let id = CreateProfileFromPolyline::default().execute(&mut f.doc).unwrap();

        let profile = f.doc.profile(id).unwrap();
        assert_eq!(profile.entities.len(), 3);
        assert_eq!(profile.entities[0].start(), Point2::new(5.0, 12.0));
        assert!(is_station_ordered(&profile.entities));
        // The document's polyline keeps its direction.
        assert_eq!(f.doc.polyline_ref(pline_id).unwrap(), &reversed);
    }

    #[test]
    fn cancelled_selection_creates_nothing() {
        let mut f = fixture(2.0);
        f.doc.queue_pick(Pick::Cancel);
        let err = CreateProfileFromPolyline::default()
            .execute(&mut f.doc)
            .unwrap_err();
        assert!(matches!(
            err,
            PolyprofileError::Selection(SelectionError::Cancelled)
        ));
        assert!(err.is_aborted());
        assert_eq!(f.doc.profile_count(), 0);
        assert!(!f.doc.in_transaction());
    }

    #[test]
    fn wrong_view_pick_is_rejected() {
        let mut f = fixture(2.0);
        let id = f.doc.add_polyline(road());
        f.doc.queue_pick(Pick::Polyline(id));
        f.doc.queue_pick(Pick::Polyline(id));
        let err = CreateProfileFromPolyline::default()
            .execute(&mut f.doc)
            .unwrap_err();
        assert!(matches!(
            err,
            PolyprofileError::Selection(SelectionError::Rejected {
                expected: "profile view"
            })
        ));
        assert_eq!(f.doc.profile_count(), 0);
    }

    #[test]
    fn zero_exaggeration_is_rejected_and_rolled_back() {
        let mut f = fixture(0.0);
        select(&mut f, road());
        let err = CreateProfileFromPolyline::default()
            .execute(&mut f.doc)
            .unwrap_err();
        assert!(matches!(
            err,
            PolyprofileError::Frame(FrameError::NonPositiveExaggeration(_))
        ));
        assert_eq!(f.doc.profile_count(), 0);
        assert_eq!(
            f.doc.profile_view(f.view).unwrap().elevation_range,
            ElevationRange::Automatic
        );
    }

    #[test]
    fn sink_failure_leaves_no_partial_profile() {
        let mut f = fixture(2.0);
        select(&mut f, road());
        f.doc.fail_after_entities(2);
        let err = CreateProfileFromPolyline::default()
            .execute(&mut f.doc)
            .unwrap_err();
        assert!(matches!(err, PolyprofileError::Host(HostError::Failed(_))));
        assert_eq!(f.doc.profile_count(), 0);
        assert!(!f.doc.in_transaction());
    }

    #[test]
    fn cancelled_pick_is_silent() {
        let mut doc = MemoryDocument::new();
        doc.queue_pick(Pick::Cancel);
        let command = CreateProfileFromPolyline::default();
        assert!(command.run(&mut doc).is_none());
        assert_eq!(doc.messages(), [command.options().polyline_prompt.message.clone()]);
    }

    #[test]
    fn rejected_pick_writes_only_the_prompts() {
        let mut f = fixture(2.0);
        let id = f.doc.add_polyline(road());
        f.doc.queue_pick(Pick::Polyline(id));
        f.doc.queue_pick(Pick::Polyline(id));
        let command = CreateProfileFromPolyline::default();
        assert!(command.run(&mut f.doc).is_none());

        let options = command.options();
        assert_eq!(
            f.doc.messages(),
            [
                options.polyline_prompt.message.clone(),
                options.view_prompt.message.clone(),
                options.view_prompt.reject_message.clone(),
            ]
        );
        assert_eq!(f.doc.profile_count(), 0);
    }

    #[test]
    fn failed_commit_is_rolled_back() {
        let mut f = fixture(2.0);
        select(&mut f, road());
        f.doc.fail_next_commit();
        let err = CreateProfileFromPolyline::default()
            .execute(&mut f.doc)
            .unwrap_err();
        assert!(matches!(err, PolyprofileError::Host(HostError::Failed(_))));
        assert_eq!(f.doc.profile_count(), 0);
        assert!(!f.doc.in_transaction());
        assert_eq!(
            f.doc.profile_view(f.view).unwrap().elevation_range,
            ElevationRange::Automatic
        );
    }

    #[test]
    fn run_reports_failures_as_messages() {
        // A document without profile styles.
        let mut bare = MemoryDocument::new();
        let alignment = bare.add_alignment(Alignment {
            name: "A".into(),
            layer: "0".into(),
        });
        let style = bare.add_view_style(ProfileViewStyle {
            name: "S".into(),
            vertical_exaggeration: 1.0,
            grid_padding_left: 0.0,
            major_tick_interval: 10.0,
        });
        let view = bare.add_profile_view(ProfileView {
            alignment,
            style,
            insertion: Point2::origin(),
            station_start: 0.0,
            elevation_min: 0.0,
            elevation_range: ElevationRange::UserSpecified,
        });
        let pline = bare.add_polyline(road());
        bare.queue_pick(Pick::Polyline(pline));
        bare.queue_pick(Pick::ProfileView(view));

        assert!(CreateProfileFromPolyline::default().run(&mut bare).is_none());
        assert_eq!(bare.profile_count(), 0);
        assert_eq!(
            bare.messages().last().map(String::as_str),
            Some("\nno profile style is defined in the document")
        );
    }

    #[test]
    fn custom_profile_name() {
        let mut f = fixture(2.0);
        select(&mut f, road());
        let command = CreateProfileFromPolyline::new(CreateProfileOptions {
            profile_name: "Existing Ground".into(),
            ..CreateProfileOptions::default()
        });
        let id = command.run(&mut f.doc).unwrap();
        assert_eq!(f.doc.profile(id).unwrap().name, "Existing Ground");
        assert_eq!(f.doc.messages()[0], command.options().polyline_prompt.message);
    }
}
