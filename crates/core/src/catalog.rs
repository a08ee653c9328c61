//! Glyph catalog: joins the icon name table with the font's glyph table.
//!
//! The name table is YAML with an `icons` list whose records carry an `id`
//! (the icon name) and a `unicode` (hex codepoint). The glyph table is an SVG
//! font with one `<glyph>` element per line. Only glyph lines that match the
//! expected shape and whose codepoint has a name become [`IconEntry`] values;
//! everything else in the font is ignored.

use crate::error::CoreError;
use iconfont_types::IconEntry;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

static GLYPH_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^<glyph unicode="&#x([^"]+);"\s*(?:horiz-adv-x="(\d+)")?\s*d="([^"]+)""#)
        .expect("glyph line pattern is valid")
});

#[derive(Debug, Deserialize)]
struct NameTable {
    icons: Vec<IconRecord>,
}

#[derive(Debug, Deserialize)]
struct IconRecord {
    id: String,
    unicode: Codepoint,
}

/// YAML reads an all-digit codepoint such as `1234` as a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Codepoint {
    Text(String),
    Number(u64),
}

impl Codepoint {
    fn normalized(&self) -> String {
        match self {
            Codepoint::Text(s) => s.trim().to_ascii_lowercase(),
            Codepoint::Number(n) => n.to_string(),
        }
    }
}

/// All icons that can be exported, in glyph-table order.
#[derive(Debug, Clone, Default)]
pub struct GlyphCatalog {
    entries: Vec<IconEntry>,
}

impl GlyphCatalog {
    /// Reads and joins both resources. Either one failing to load fails the
    /// whole catalog.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        name_table: P,
        glyph_table: Q,
    ) -> Result<Self, CoreError> {
        let names = read_resource(name_table.as_ref())?;
        let glyphs = read_resource(glyph_table.as_ref())?;
        Self::parse(&names, &glyphs)
    }

    /// Joins an in-memory name table with an in-memory glyph table.
    pub fn parse(name_table: &str, glyph_table: &str) -> Result<Self, CoreError> {
        let names = parse_name_table(name_table)?;
        let mut matched = 0usize;
        let mut entries = Vec::new();

        for line in glyph_table.lines() {
            let Some(caps) = GLYPH_LINE.captures(line) else {
                continue;
            };
            matched += 1;
            let codepoint = caps[1].to_ascii_lowercase();
            let Some(name) = names.get(&codepoint) else {
                continue;
            };
            // `\d+` only fails to parse on overflow; treat that as undeclared.
            let advance_width = caps.get(2).and_then(|m| m.as_str().parse().ok());
            entries.push(IconEntry::new(
                name.clone(),
                codepoint,
                &caps[3],
                advance_width,
            ));
        }

        debug!(
            "Glyph catalog: {} named icons, {} glyph lines matched, {} joined.",
            names.len(),
            matched,
            entries.len()
        );
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[IconEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<IconEntry> {
        self.entries
    }

    pub fn get(&self, name: &str) -> Option<&IconEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses the name table into a `codepoint → name` map.
///
/// Codepoints are lowercased so that `F015` and `f015` refer to the same glyph.
pub fn parse_name_table(source: &str) -> Result<HashMap<String, String>, CoreError> {
    let table: NameTable = serde_yaml::from_str(source)?;
    Ok(table
        .icons
        .into_iter()
        .map(|icon| (icon.unicode.normalized(), icon.id))
        .collect())
}

fn read_resource(path: &Path) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|e| CoreError::ResourceRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
