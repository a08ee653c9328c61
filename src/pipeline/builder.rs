// src/pipeline/builder.rs
use super::config::RenderOptions;
use super::context::PipelineContext;
use super::orchestrator::ExportPipeline;
use crate::error::PipelineError;
use iconfont_core::SvgTemplate;
use iconfont_raster::RsvgConvertRasterizer;
use iconfont_traits::Rasterizer;
use std::path::Path;
use std::sync::Arc;

/// A builder for creating an `ExportPipeline`.
#[derive(Default)]
pub struct PipelineBuilder {
    options: RenderOptions,
    rasterizer: Option<Arc<dyn Rasterizer>>,
    template_source: Option<String>,
}

impl PipelineBuilder {
    /// Creates a new `PipelineBuilder` with default options.
    pub fn new() -> Self { Default::default() }

    /// Replaces all options at once, e.g. with options loaded from a file.
    pub fn with_options(mut self, options: RenderOptions) -> Self { self.options = options; self }

    /// Enables SVG and PNG output into `{path}/{color}`, filled with `color`.
    pub fn with_color(mut self, color: impl Into<String>) -> Self { self.options.color = Some(color.into()); self }

    /// Enables the sprite sheet.
    pub fn with_sprites(mut self, sprites: bool) -> Self { self.options.sprites = sprites; self }

    pub fn with_sizes(mut self, sizes: impl Into<Vec<u32>>) -> Self { self.options.sizes = sizes.into(); self }

    /// Disables pixel-perfect padding of small rasters.
    pub fn with_nopadding(mut self, nopadding: bool) -> Self { self.options.nopadding = nopadding; self }

    pub fn with_output_path<P: AsRef<Path>>(mut self, path: P) -> Self { self.options.path = path.as_ref().to_path_buf(); self }

    /// The YAML icon name table.
    pub fn with_name_table<P: AsRef<Path>>(mut self, path: P) -> Self { self.options.icons_path = path.as_ref().to_path_buf(); self }

    /// The SVG font holding the glyph outlines.
    pub fn with_glyph_table<P: AsRef<Path>>(mut self, path: P) -> Self { self.options.font_path = path.as_ref().to_path_buf(); self }

    pub fn with_sprite_file<P: AsRef<Path>>(mut self, path: P) -> Self { self.options.sprite_path = path.as_ref().to_path_buf(); self }

    /// Number of icons converted at the same time.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self { self.options.concurrency = concurrency; self }

    /// Also writes the SVG handed to the rasterizer next to each PNG.
    pub fn with_intermediate_svg(mut self, enabled: bool) -> Self { self.options.intermediate_svg = enabled; self }

    /// Uses a custom rasterizer instead of spawning `options.rasterizer`.
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn Rasterizer>) -> Self { self.rasterizer = Some(rasterizer); self }

    /// Replaces the built-in glyph template.
    pub fn with_template_source(mut self, source: impl Into<String>) -> Self { self.template_source = Some(source.into()); self }

    /// Consumes the builder and creates the `ExportPipeline`.
    pub fn build(self) -> Result<ExportPipeline, PipelineError> {
        self.options.validate()?;

        let template = match &self.template_source {
            Some(source) => SvgTemplate::from_source(source)?,
            None => SvgTemplate::glyph()?,
        };
        let rasterizer = self.rasterizer.unwrap_or_else(|| {
            log::debug!("Using `{}` as rasterizer.", self.options.rasterizer);
            Arc::new(RsvgConvertRasterizer::new(self.options.rasterizer.clone()))
        });

        let context = Arc::new(PipelineContext {
            options: self.options,
            template,
            rasterizer,
        });
        Ok(ExportPipeline::new(context))
    }
}
