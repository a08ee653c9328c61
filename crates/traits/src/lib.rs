pub mod raster;

pub use raster::{RasterError, RasterRequest, Rasterizer, RecordedRaster, RecordingRasterizer};
