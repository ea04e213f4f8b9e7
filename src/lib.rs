pub mod command;
pub mod error;
pub mod geometry;
pub mod host;
pub mod math;
pub mod profile;

pub use command::{CreateProfileFromPolyline, CreateProfileOptions, COMMAND_NAME};
pub use error::{PolyprofileError, Result};
