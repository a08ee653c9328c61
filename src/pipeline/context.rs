use crate::error::PipelineError;
use crate::pipeline::config::RenderOptions;
use iconfont_core::{Geometry, IconEntry, Padding, SvgTemplate, TemplateParams};
use iconfont_traits::Rasterizer;
use std::sync::Arc;

/// A container for all shared, read-only resources needed during a pipeline run.
/// This will be created once by the `PipelineBuilder` and shared by every
/// worker through an `Arc`.
///
/// Nothing in here changes while a run is in progress; per-size geometry is
/// computed on demand by [`PipelineContext::render`].
#[derive(Debug)]
pub struct PipelineContext {
    pub options: RenderOptions,
    pub template: SvgTemplate,
    pub rasterizer: Arc<dyn Rasterizer>,
}

impl PipelineContext {
    /// Renders the glyph document for `entry` with the given padding.
    pub fn render(&self, entry: &IconEntry, padding: Padding) -> Result<String, PipelineError> {
        let geometry = Geometry::new(entry.advance_width(), padding);
        let params = TemplateParams::new(entry.path_data(), self.options.fill_color(), &geometry);
        Ok(self.template.render(&params)?)
    }

    /// Padding for a raster of `size` pixels under the configured policy.
    pub fn padding_for(&self, size: u32) -> Padding {
        Padding::for_size(size, self.options.nopadding)
    }
}
