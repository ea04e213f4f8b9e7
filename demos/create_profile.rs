//! Runs `CREATE_PROFILE_FROM_POLYLINE` against an in-memory drawing.
//!
//! ```text
//! cargo run --example create_profile
//! RUST_LOG=polyprofile=debug cargo run --example create_profile
//! ```

use polyprofile::geometry::{Pline, PlineVertex};
use polyprofile::host::memory::{Alignment, ElevationRange, Pick, ProfileView, ProfileViewStyle};
use polyprofile::host::MemoryDocument;
use polyprofile::math::Point2;
use polyprofile::profile::ProfileCurve;
use polyprofile::{CreateProfileFromPolyline, COMMAND_NAME};

fn main() {
    // Default: WARN for everything, INFO for polyprofile.
    // Override with RUST_LOG env var (e.g. RUST_LOG=polyprofile=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("polyprofile=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut doc = MemoryDocument::new();
    let alignment = doc.add_alignment(Alignment {
        name: "Centerline - (1)".into(),
        layer: "C-ROAD-CNTR".into(),
    });
    let style = doc.add_view_style(ProfileViewStyle {
        name: "Major Grids".into(),
        vertical_exaggeration: 10.0,
        grid_padding_left: 1.0,
        major_tick_interval: 50.0,
    });
    let view = doc.add_profile_view(ProfileView {
        alignment,
        style,
        insertion: Point2::new(2000.0, 1000.0),
        station_start: 0.0,
        elevation_min: 240.0,
        elevation_range: ElevationRange::Automatic,
    });
    doc.add_profile_style("Design Profile");
    doc.add_label_set_style("Complete Label Set");

    // Sketched right to left, with a crest curve in the middle.
    let pline = doc.add_polyline(Pline::new(
        vec![
            PlineVertex::line(2450.0, 1060.0),
            PlineVertex::new(2300.0, 1110.0, 0.15),
            PlineVertex::line(2200.0, 1110.0),
            PlineVertex::line(2060.0, 1040.0),
        ],
        false,
    ));
    doc.queue_pick(Pick::Polyline(pline));
    doc.queue_pick(Pick::ProfileView(view));

    println!("Command: {COMMAND_NAME}");
    let Some(id) = CreateProfileFromPolyline::default().run(&mut doc) else {
        for message in doc.messages() {
            print!("{message}");
        }
        println!();
        return;
    };

    let Ok(profile) = doc.profile(id) else {
        return;
    };
    println!("{} ({} entities)", profile.name, profile.entities.len());
    for curve in &profile.entities {
        match curve {
            ProfileCurve::FixedTangent { start, end } => println!(
                "  tangent   {:>8.2} @ {:>7.2}  ->  {:>8.2} @ {:>7.2}",
                start.x, start.y, end.x, end.y
            ),
            ProfileCurve::FixedSymmetricParabola { start, mid, end } => println!(
                "  parabola  {:>8.2} @ {:>7.2}  ->  {:>8.2} @ {:>7.2}  (via {:.2} @ {:.2})",
                start.x, start.y, end.x, end.y, mid.x, mid.y
            ),
        }
    }
}
