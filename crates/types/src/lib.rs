pub mod geometry;
pub mod icon;

pub use geometry::{DEFAULT_ADVANCE_WIDTH, Geometry, PIXEL, Padding};
pub use icon::IconEntry;
