pub mod arc;
pub mod pline;
pub mod segment;

pub use arc::CircularArc2;
pub use pline::{Pline, PlineVertex, SegmentKind};
pub use segment::{Segment, ARC_MID_SAMPLE, ARC_SAMPLE_COUNT};
