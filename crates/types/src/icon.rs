use crate::geometry::DEFAULT_ADVANCE_WIDTH;
use serde::Serialize;

/// One named icon joined with its glyph outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconEntry {
    name: String,
    codepoint: String,
    path_data: String,
    advance_width: u32,
}

impl IconEntry {
    /// Creates an entry. A missing advance width falls back to
    /// [`DEFAULT_ADVANCE_WIDTH`].
    pub fn new(
        name: impl Into<String>,
        codepoint: impl Into<String>,
        path_data: impl Into<String>,
        advance_width: Option<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            codepoint: codepoint.into(),
            path_data: path_data.into(),
            advance_width: advance_width.unwrap_or(DEFAULT_ADVANCE_WIDTH),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase hex codepoint without the `&#x` prefix.
    pub fn codepoint(&self) -> &str {
        &self.codepoint
    }

    pub fn path_data(&self) -> &str {
        &self.path_data
    }

    pub fn advance_width(&self) -> u32 {
        self.advance_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_advance_width_uses_default() {
        let entry = IconEntry::new("home", "f015", "M0 0", None);
        assert_eq!(entry.advance_width(), 1536);
    }

    #[test]
    fn declared_advance_width_is_kept() {
        let entry = IconEntry::new("glass", "f000", "M0 0", Some(1792));
        assert_eq!(entry.name(), "glass");
        assert_eq!(entry.codepoint(), "f000");
        assert_eq!(entry.advance_width(), 1792);
    }
}
