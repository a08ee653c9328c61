//! SVG document template for a single glyph.
//!
//! The outer group moves the glyph into its padded cell; the inner group flips
//! the Y axis and drops the 1280-unit em box so that font coordinates (Y up,
//! origin on the baseline) become SVG coordinates (Y down, origin top-left).

use crate::error::CoreError;
use handlebars::{Handlebars, no_escape};
use iconfont_types::Geometry;
use serde::Serialize;

/// The glyph document. Every placeholder must be supplied by [`TemplateParams`].
pub const GLYPH_TEMPLATE: &str = concat!(
    r#"<svg width="{{width}}" height="{{height}}" viewBox="0 0 {{width}} {{height}}" xmlns="http://www.w3.org/2000/svg">"#,
    r#"<g transform="translate({{shiftX}} {{shiftY}})">"#,
    r#"<g transform="scale(1 -1) translate(0 -1280)">"#,
    r#"<path d="{{path}}" fill="{{color}}" />"#,
    "</g></g>",
    "</svg>",
);

const TEMPLATE_NAME: &str = "glyph";

/// Values substituted into the template. Numbers are pre-formatted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParams<'a> {
    pub path: &'a str,
    pub color: &'a str,
    pub width: String,
    pub height: String,
    pub shift_x: String,
    pub shift_y: String,
}

impl<'a> TemplateParams<'a> {
    pub fn new(path: &'a str, color: &'a str, geometry: &Geometry) -> Self {
        Self {
            path,
            color,
            width: format_number(geometry.width),
            height: format_number(geometry.height),
            shift_x: format_number(geometry.shift_x),
            shift_y: format_number(geometry.shift_y),
        }
    }
}

/// A compiled SVG template.
///
/// Rendering runs in strict mode: a placeholder without a value is an error
/// ([`CoreError::MissingTemplateParameter`]) rather than being left in the
/// output. Escaping is disabled since path data and colors are inserted
/// verbatim.
#[derive(Debug, Clone)]
pub struct SvgTemplate {
    registry: Handlebars<'static>,
}

impl SvgTemplate {
    /// The built-in glyph template.
    pub fn glyph() -> Result<Self, CoreError> {
        Self::from_source(GLYPH_TEMPLATE)
    }

    pub fn from_source(source: &str) -> Result<Self, CoreError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_template_string(TEMPLATE_NAME, source)?;
        Ok(Self { registry })
    }

    pub fn render(&self, params: &TemplateParams<'_>) -> Result<String, CoreError> {
        Ok(self.registry.render(TEMPLATE_NAME, params)?)
    }
}

/// Formats a geometry value the way it should appear in SVG attributes:
/// whole numbers without a fractional part, everything else in its shortest
/// round-trip form.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iconfont_types::{Geometry, Padding};

    #[test]
    fn renders_full_bleed_glyph() {
        let template = SvgTemplate::glyph().unwrap();
        let geometry = Geometry::full_bleed(1536);
        let svg = template
            .render(&TemplateParams::new("M1 2", "white", &geometry))
            .unwrap();

        assert_eq!(
            svg,
            concat!(
                r#"<svg width="1792" height="1792" viewBox="0 0 1792 1792" xmlns="http://www.w3.org/2000/svg">"#,
                r#"<g transform="translate(128 256)">"#,
                r#"<g transform="scale(1 -1) translate(0 -1280)">"#,
                r#"<path d="M1 2" fill="white" />"#,
                "</g></g></svg>"
            )
        );
    }

    #[test]
    fn padding_is_reflected_in_canvas_and_shift() {
        let template = SvgTemplate::glyph().unwrap();
        let geometry = Geometry::new(1536, Padding::uniform(128.0));
        let svg = template
            .render(&TemplateParams::new("M0 0", "black", &geometry))
            .unwrap();
        assert!(svg.starts_with(r#"<svg width="2048" height="2048" viewBox="0 0 2048 2048""#));
        assert!(svg.contains(r#"translate(256 384)"#));
    }

    #[test]
    fn values_are_not_html_escaped() {
        let template = SvgTemplate::glyph().unwrap();
        let geometry = Geometry::full_bleed(1536);
        let svg = template
            .render(&TemplateParams::new("M0 0", "#ff0000", &geometry))
            .unwrap();
        assert!(svg.contains(r##"fill="#ff0000""##));
    }

    #[test]
    fn unknown_placeholder_fails_loudly() {
        let template =
            SvgTemplate::from_source(r#"<svg width="{{width}}" data-x="{{paddingTop}}"/>"#).unwrap();
        let geometry = Geometry::full_bleed(1536);
        let err = template
            .render(&TemplateParams::new("M0 0", "black", &geometry))
            .unwrap_err();
        assert!(matches!(err, CoreError::MissingTemplateParameter(_)));
    }

    #[test]
    fn malformed_template_is_rejected() {
        let result = SvgTemplate::from_source("<svg width=\"{{width\"/>");
        assert!(matches!(result, Err(CoreError::Template(_))));
    }

    #[test]
    fn numbers_are_formatted_like_svg_attributes() {
        assert_eq!(format_number(1792.0), "1792");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(127.5), "127.5");
        assert_eq!(format_number(-64.0), "-64");
    }
}
