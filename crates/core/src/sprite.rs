//! Sprite sheet assembly.
//!
//! A sprite sheet is one hidden `<svg>` holding a `<path id="fa-{name}">` per
//! icon. Paths carry no `fill`, so pages can color them through CSS.

use crate::error::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, Write};

pub const SPRITE_SHEET_HEADER: &str =
    "<svg height=\"0\" width=\"0\" style=\"position:absolute;margin-left: -100%;\">\n";
pub const SPRITE_SHEET_FOOTER: &str = "</svg>\n";

/// Prefix of every sprite id.
pub const SPRITE_ID_PREFIX: &str = "fa-";

static PATH_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<path\b[^>]*/>").expect("path element pattern is valid"));
static FILL_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s*fill="[^"]+""#).expect("fill attribute pattern is valid"));

/// Turns an optimized glyph document into one sprite sheet line.
///
/// The document must contain exactly one self-closing `<path>`; anything else
/// means the glyph template changed shape and is reported as
/// [`CoreError::SpriteFragment`].
pub fn sprite_fragment(name: &str, optimized_svg: &str) -> Result<String, CoreError> {
    let mut paths = PATH_ELEMENT.find_iter(optimized_svg);
    let element = paths
        .next()
        .ok_or_else(|| CoreError::SpriteFragment(format!("no <path> in '{}'", name)))?
        .as_str();
    if paths.next().is_some() {
        return Err(CoreError::SpriteFragment(format!(
            "more than one <path> in '{}'",
            name
        )));
    }

    let with_id = element.replacen(
        "<path",
        &format!(r#"<path id="{}{}""#, SPRITE_ID_PREFIX, name),
        1,
    );
    Ok(FILL_ATTRIBUTE.replace_all(&with_id, "").into_owned())
}

/// Number of self-closing `<path>` elements in a document.
pub fn count_paths(svg: &str) -> usize {
    PATH_ELEMENT.find_iter(svg).count()
}

/// Writes a sprite sheet: header on creation, one fragment per line, footer
/// on [`finish`](SpriteSheetWriter::finish).
pub struct SpriteSheetWriter<W: Write> {
    writer: W,
    lines: usize,
}

impl<W: Write> SpriteSheetWriter<W> {
    pub fn begin(mut writer: W) -> io::Result<Self> {
        writer.write_all(SPRITE_SHEET_HEADER.as_bytes())?;
        Ok(Self { writer, lines: 0 })
    }

    /// Appends one fragment as a complete line.
    pub fn append(&mut self, fragment: &str) -> io::Result<()> {
        let mut line = String::with_capacity(fragment.len() + 1);
        line.push_str(fragment.trim_end());
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Writes the closing tag, flushes, and hands back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.write_all(SPRITE_SHEET_FOOTER.as_bytes())?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}
