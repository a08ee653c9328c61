//! Rasterizer implementations for the iconfont-export pipeline.
//!
//! ## Available Rasterizers
//!
//! - [`RsvgConvertRasterizer`]: Pipes SVG text into the `rsvg-convert` binary
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory rasterizer from iconfont-traits:
//! - [`RecordingRasterizer`]: Records requests and writes the SVG text as output

mod rsvg;

pub use rsvg::{DEFAULT_PROGRAM, RsvgConvertRasterizer};

pub use iconfont_traits::RecordingRasterizer;
