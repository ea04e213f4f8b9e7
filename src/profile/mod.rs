pub mod curve;
pub mod frame;
pub mod projector;

pub use curve::{is_station_ordered, ProfileCurve};
pub use frame::{FrameSource, ReferenceFrame};
pub use projector::{project, ProfileProjector};
