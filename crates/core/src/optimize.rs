//! SVG normalisation for the standalone and sprite outputs.
//!
//! The rendered glyph document nests two transformed groups around a single
//! path. `usvg` parses it and resolves every transform; the result is written
//! back out as a flat document with the transforms baked into the path data,
//! coordinates rounded to three decimals and no whitespace between elements.
//! Fills are copied from the source document as written.
//!
//! `usvg` drops outlines it cannot bound, such as a lone move-to. When that
//! happens every source path is emitted with its original `d` and the
//! accumulated transform as a `matrix(...)` instead, so no outline is lost.
//! The output is a pure function of the input, so repeated runs produce
//! identical files.

use crate::error::CoreError;
use crate::template::format_number;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use usvg::tiny_skia_path::{PathSegment, Point, Transform};

/// Decimal places kept for path coordinates.
const PRECISION: f64 = 1000.0;

/// Elements whose paths are never drawn directly.
const NON_RENDERED: [&str; 6] = ["defs", "clipPath", "mask", "pattern", "marker", "symbol"];

static TRANSFORM_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(matrix|translate|scale|rotate|skewX|skewY)\s*\(([^)]*)\)")
        .expect("transform item pattern is valid")
});

/// A `<path>` as written in the source document.
#[derive(Debug)]
struct SourcePath {
    d: String,
    fill: Option<String>,
    transform: Transform,
}

/// Parses `svg` and serialises it as a minimal document.
///
/// The root keeps the document's width and height and gets a `viewBox`
/// computed from them.
pub fn optimize(svg: &str) -> Result<String, CoreError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;
    let sources = source_paths(svg)?;
    let mut baked = Vec::new();
    collect_paths(tree.root(), &mut baked);

    let size = tree.size();
    let width = format_coordinate(size.width());
    let height = format_coordinate(size.height());

    let mut out = String::with_capacity(svg.len());
    write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )
    .map_err(fmt_error)?;
    if baked.len() == sources.len() {
        for (path, source) in baked.iter().zip(&sources) {
            write_baked_path(path, source.fill.as_deref(), &mut out)?;
        }
    } else {
        debug!(
            "usvg kept {} of {} paths; writing source path data as is.",
            baked.len(),
            sources.len()
        );
        for source in &sources {
            write_source_path(source, &mut out)?;
        }
    }
    out.push_str("</svg>");
    Ok(out)
}

fn collect_paths<'a>(group: &'a usvg::Group, out: &mut Vec<&'a usvg::Path>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(child) => collect_paths(child, out),
            usvg::Node::Path(path) => out.push(path),
            // Glyph documents never contain images or text.
            _ => {}
        }
    }
}

/// Every rendered `<path>` of the document in order, with its absolute
/// transform.
fn source_paths(svg: &str) -> Result<Vec<SourcePath>, CoreError> {
    let document = roxmltree::Document::parse(svg).map_err(|e| CoreError::Optimize(e.to_string()))?;
    let mut paths = Vec::new();
    walk_source(document.root_element(), Transform::identity(), &mut paths)?;
    Ok(paths)
}

fn walk_source(
    node: roxmltree::Node<'_, '_>,
    parent: Transform,
    out: &mut Vec<SourcePath>,
) -> Result<(), CoreError> {
    let name = node.tag_name().name();
    if NON_RENDERED.contains(&name) {
        return Ok(());
    }
    let transform = match node.attribute("transform") {
        Some(list) => parent.pre_concat(parse_transform(list)?),
        None => parent,
    };
    if name == "path" {
        if let Some(d) = node.attribute("d").filter(|d| !d.trim().is_empty()) {
            out.push(SourcePath {
                d: d.trim().to_string(),
                fill: node.attribute("fill").map(str::to_string),
                transform,
            });
        }
        return Ok(());
    }
    for child in node.children().filter(|n| n.is_element()) {
        walk_source(child, transform, out)?;
    }
    Ok(())
}

/// Parses an SVG transform list such as `scale(1 -1) translate(0 -1280)`.
fn parse_transform(list: &str) -> Result<Transform, CoreError> {
    let mut transform = Transform::identity();
    for caps in TRANSFORM_ITEM.captures_iter(list) {
        let args = caps[2]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::parse::<f32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::Optimize(format!("invalid transform '{}': {}", list, e)))?;
        let item = match (&caps[1], args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Transform::from_row(a, b, c, d, e, f),
            ("translate", &[tx]) => Transform::from_translate(tx, 0.0),
            ("translate", &[tx, ty]) => Transform::from_translate(tx, ty),
            ("scale", &[s]) => Transform::from_scale(s, s),
            ("scale", &[sx, sy]) => Transform::from_scale(sx, sy),
            ("rotate", &[angle]) => Transform::from_rotate(angle),
            ("rotate", &[angle, cx, cy]) => Transform::from_rotate_at(angle, cx, cy),
            ("skewX", &[angle]) => Transform::from_skew(angle.to_radians().tan(), 0.0),
            ("skewY", &[angle]) => Transform::from_skew(0.0, angle.to_radians().tan()),
            (kind, _) => {
                return Err(CoreError::Optimize(format!(
                    "invalid {} arguments in transform '{}'",
                    kind, list
                )));
            }
        };
        transform = transform.pre_concat(item);
    }
    Ok(transform)
}

fn write_baked_path(
    path: &usvg::Path,
    source_fill: Option<&str>,
    out: &mut String,
) -> Result<(), CoreError> {
    let data = path
        .data()
        .clone()
        .transform(path.abs_transform())
        .ok_or_else(|| CoreError::Optimize("path collapses under its transform".to_string()))?;

    out.push_str(r#"<path d=""#);
    write_path_data(&data, out)?;
    out.push('"');
    match source_fill {
        Some(fill) => write_attribute(out, "fill", fill),
        None => {
            if let Some(fill) = path.fill()
                && let usvg::Paint::Color(color) = fill.paint()
            {
                write!(
                    out,
                    r##" fill="#{:02x}{:02x}{:02x}""##,
                    color.red, color.green, color.blue
                )
                .map_err(fmt_error)?;
            }
        }
    }
    out.push_str("/>");
    Ok(())
}

fn write_source_path(source: &SourcePath, out: &mut String) -> Result<(), CoreError> {
    out.push_str("<path");
    write_attribute(out, "d", &source.d);
    if !source.transform.is_identity() {
        let t = source.transform;
        let matrix = [t.sx, t.ky, t.kx, t.sy, t.tx, t.ty]
            .iter()
            .map(|v| format_coordinate(*v))
            .collect::<Vec<_>>()
            .join(" ");
        write!(out, r#" transform="matrix({})""#, matrix).map_err(fmt_error)?;
    }
    if let Some(fill) = &source.fill {
        write_attribute(out, "fill", fill);
    }
    out.push_str("/>");
    Ok(())
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn write_path_data(data: &usvg::tiny_skia_path::Path, out: &mut String) -> Result<(), CoreError> {
    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => write_command(out, 'M', &[p])?,
            PathSegment::LineTo(p) => write_command(out, 'L', &[p])?,
            PathSegment::QuadTo(p1, p) => write_command(out, 'Q', &[p1, p])?,
            PathSegment::CubicTo(p1, p2, p) => write_command(out, 'C', &[p1, p2, p])?,
            PathSegment::Close => out.push('Z'),
        }
    }
    Ok(())
}

fn write_command(out: &mut String, command: char, points: &[Point]) -> Result<(), CoreError> {
    out.push(command);
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(
            out,
            "{} {}",
            format_coordinate(point.x),
            format_coordinate(point.y)
        )
        .map_err(fmt_error)?;
    }
    Ok(())
}

fn format_coordinate(value: f32) -> String {
    format_number((f64::from(value) * PRECISION).round() / PRECISION)
}

fn fmt_error(e: std::fmt::Error) -> CoreError {
    CoreError::Optimize(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{SvgTemplate, TemplateParams};
    use iconfont_types::Geometry;

    fn rendered(path: &str, color: &str) -> String {
        let template = SvgTemplate::glyph().unwrap();
        template
            .render(&TemplateParams::new(path, color, &Geometry::full_bleed(1536)))
            .unwrap()
    }

    #[test]
    fn flattens_transforms_into_path_data() {
        // A 100-unit square on the baseline, flipped and shifted into the cell.
        let svg = optimize(&rendered("M0 0L100 0L100 100L0 100Z", "white")).unwrap();
        assert_eq!(
            svg,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="1792" height="1792" viewBox="0 0 1792 1792">"#,
                r#"<path d="M128 1536L228 1536L228 1436L128 1436Z" fill="white"/>"#,
                "</svg>"
            )
        );
    }

    #[test]
    fn output_is_deterministic() {
        let input = rendered("M10 10Q50 90 90 10C120 40 140 40 170 10Z", "black");
        assert_eq!(optimize(&input).unwrap(), optimize(&input).unwrap());
    }

    #[test]
    fn output_has_a_single_path() {
        let svg = optimize(&rendered("M0 0L10 0L10 10Z", "black")).unwrap();
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(!svg.contains("<g"));
    }

    #[test]
    fn invalid_svg_is_an_error() {
        assert!(matches!(optimize("<svg"), Err(CoreError::Optimize(_))));
    }

    #[test]
    fn coordinates_are_rounded() {
        assert_eq!(format_coordinate(1.23456), "1.235");
        assert_eq!(format_coordinate(-0.0001), "0");
        assert_eq!(format_coordinate(128.0), "128");
    }

    #[test]
    fn lone_move_to_keeps_its_outline() {
        let svg = optimize(&rendered("M1 2", "white")).unwrap();
        assert_eq!(
            svg,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="1792" height="1792" viewBox="0 0 1792 1792">"#,
                r#"<path d="M1 2" transform="matrix(1 0 0 -1 128 1536)" fill="white"/>"#,
                "</svg>"
            )
        );
    }

    #[test]
    fn fill_is_copied_as_written() {
        let translucent = optimize(&rendered("M0 0L10 0L10 10Z", "rgba(255,0,0,0.5)")).unwrap();
        assert!(translucent.contains(r#"fill="rgba(255,0,0,0.5)""#));

        let named = optimize(&rendered("M0 0L10 0L10 10Z", "icons")).unwrap();
        assert!(named.contains(r#"fill="icons""#));
        assert!(!named.contains("#000000"));
    }

    #[test]
    fn transform_lists_compose_left_to_right() {
        let t = parse_transform("translate(128 256) scale(1 -1) translate(0 -1280)").unwrap();
        assert_eq!((t.sx, t.ky, t.kx, t.sy, t.tx, t.ty), (1.0, 0.0, 0.0, -1.0, 128.0, 1536.0));

        let t = parse_transform("matrix(1,0,0,1,5,6)").unwrap();
        assert_eq!((t.tx, t.ty), (5.0, 6.0));
        assert!(parse_transform("translate(1 2 3)").is_err());
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut out = String::new();
        write_attribute(&mut out, "fill", r#"a"b&c"#);
        assert_eq!(out, r#" fill="a&quot;b&amp;c""#);
    }
}
