//! # iconfont-core
//!
//! Platform-agnostic building blocks of the icon export pipeline:
//! - **catalog**: joins the icon name table with the font's glyph table
//! - **template**: renders one glyph into a standalone SVG document
//! - **optimize**: flattens a rendered document into a minimal SVG
//! - **sprite**: extracts sprite sheet fragments and writes the sheet
//! - **error**: error types for the above
//!
//! ## Design Principle
//!
//! This crate spawns no processes and runs no async code. Rasterization and
//! scheduling live in the integration crate; sprite sheets are written through
//! the `Write` trait.

// Re-export foundation crates
pub use iconfont_types as types;

pub mod catalog;
pub mod error;
pub mod optimize;
pub mod sprite;
pub mod template;

pub use catalog::GlyphCatalog;
pub use error::CoreError;
pub use optimize::optimize;
pub use sprite::{SpriteSheetWriter, count_paths, sprite_fragment};
pub use template::{SvgTemplate, TemplateParams};
pub use types::{Geometry, IconEntry, Padding};
