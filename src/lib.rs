//! # iconfont-export
//!
//! Exports every glyph of an icon font as a standalone SVG, as PNGs at a set
//! of pixel sizes, and as fragments of one SVG sprite sheet.
//!
//! The building blocks live in the workspace crates:
//! - [`engine`]: glyph catalog, templating, optimization, sprite fragments
//! - [`traits`]: the [`Rasterizer`](traits::Rasterizer) seam
//! - [`raster`]: the `rsvg-convert` rasterizer
//!
//! This crate schedules the work with Tokio and owns the output tree.

pub mod error;
pub mod pipeline;

pub use iconfont_core as engine;
pub use iconfont_raster as raster;
pub use iconfont_traits as traits;

pub use error::PipelineError;
pub use pipeline::{ExportPipeline, PipelineBuilder, RenderOptions, RunSummary};
