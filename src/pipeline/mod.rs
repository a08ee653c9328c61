//! Icon export pipeline orchestration.
//!
//! - [`PipelineBuilder`]: Fluent builder for constructing export pipelines
//! - [`ExportPipeline`]: Runs the export
//! - [`RenderOptions`]: Everything a run can be configured with
//!
//! # Architecture
//!
//! ```text
//! Producer -> Channel -> Icon workers (N) -> Channel -> Aggregator
//!                              |
//!                              +-> rasterizer (one blocking task per size)
//!                              +-> Channel -> Sprite sheet consumer
//! ```
//!
//! # Example
//!
//! ```ignore
//! use iconfont_export::PipelineBuilder;
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_color("white")
//!     .with_sprites(true)
//!     .build()?;
//!
//! pipeline.run_blocking()?;
//! ```

mod builder;
pub mod config;
pub mod context;
pub(crate) mod converter;
mod orchestrator;
pub(crate) mod sprite;

// Core public API
pub use builder::PipelineBuilder;
pub use config::{DEFAULT_CONCURRENCY, DEFAULT_SIZES, INTERMEDIATE_SVG_ENV, RenderOptions};
pub use orchestrator::{ExportPipeline, RunSummary};
