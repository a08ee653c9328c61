/// A name table with three icons. `unused` has no glyph in [`GLYPH_TABLE`].
pub const NAME_TABLE: &str = r#"
icons:
  - name: Home
    id: home
    unicode: f015
    categories:
      - Web Application Icons
  - name: Glass
    id: glass
    unicode: f000
  - name: Star
    id: star
    unicode: F005
  - name: Unused
    id: unused
    unicode: f999
"#;

/// A trimmed-down SVG font. `&#xf0ff;` has no name and must be skipped.
pub const GLYPH_TABLE: &str = r#"<?xml version="1.0" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd" >
<svg xmlns="http://www.w3.org/2000/svg">
<defs>
<font id="fontawesomeregular" horiz-adv-x="1536" >
<font-face units-per-em="1792" ascent="1536" descent="-256" />
<missing-glyph horiz-adv-x="896" d="M224 112h448v1312h-448v-1312z" />
<glyph unicode=" "  horiz-adv-x="448" />
<glyph unicode="&#xf000;" horiz-adv-x="1792" d="M0 0L1792 0L1792 1536L0 1536Z" />
<glyph unicode="&#xf005;" horiz-adv-x="1664" d="M832 1536L1664 0L0 0Z" />
<glyph unicode="&#xf015;" d="M128 128L1408 128L1408 1408L128 1408Z" />
<glyph unicode="&#xf0ff;" d="M0 0L10 0L10 10Z" />
</font>
</defs></svg>"#;

/// Icon names exported from the fixtures, in glyph-table order.
pub const EXPORTED_ICONS: [&str; 3] = ["glass", "star", "home"];
