//! Glyph-grid geometry.
//!
//! The source font draws every glyph on a grid of [`PIXEL`] units per pixel of
//! a 14px icon: the cell is 14 pixels wide, the baseline sits 2 pixels above
//! the bottom edge and the full em box is 10 pixels tall above the baseline.
//! Everything here is expressed in those font units.

use serde::Serialize;

/// Font units per pixel of the native 14px glyph.
pub const PIXEL: f64 = 128.0;

/// Width and height of the notional glyph cell.
pub const GLYPH_CELL: f64 = 14.0 * PIXEL;

/// Height of the descender region below the baseline.
pub const DESCENDER: f64 = 2.0 * PIXEL;

/// Advance width used when a glyph does not declare `horiz-adv-x`.
pub const DEFAULT_ADVANCE_WIDTH: u32 = 1536;

const SCALE_FACTORS: [u32; 5] = [1, 2, 4, 8, 16];

/// Padding around the glyph cell, in font units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    pub const ZERO: Padding = Padding {
        top: 0.0,
        bottom: 0.0,
        left: 0.0,
        right: 0.0,
    };

    /// Same padding on all four sides.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    /// Padding that makes a rasterization at `size` pixels land on whole pixels.
    ///
    /// Icons are drawn 14px wide inside a 16px box, so for every scale factor
    /// `n` a size in `(14n, 16n]` gets `(size - 14n) / 2` pixels on each side.
    /// The first matching factor wins. Sizes that match no factor, and
    /// paddings that would fall on a fractional pixel, get no padding at all.
    pub fn for_size(size: u32, nopadding: bool) -> Self {
        if nopadding {
            return Self::ZERO;
        }
        for n in SCALE_FACTORS {
            let lower = 14 * n;
            let upper = 16 * n;
            if size <= lower || size > upper {
                continue;
            }
            let padding = f64::from(size - lower) / 2.0 * PIXEL;
            if padding.fract() != 0.0 {
                return Self::ZERO;
            }
            return Self::uniform(padding);
        }
        Self::ZERO
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Placement of one glyph inside its SVG document.
///
/// A `Geometry` is derived from an advance width and a padding and never
/// changed afterwards; every (icon, size) pair gets its own value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    pub padding: Padding,
    pub shift_x: f64,
    pub shift_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(advance_width: u32, padding: Padding) -> Self {
        let advance = f64::from(advance_width);
        Self {
            padding,
            shift_x: -(-(GLYPH_CELL - advance) / 2.0 - padding.left),
            shift_y: -(-DESCENDER - padding.top),
            width: GLYPH_CELL + padding.left + padding.right,
            height: GLYPH_CELL + padding.bottom + padding.top,
        }
    }

    /// Geometry for a full-bleed glyph with no padding.
    pub fn full_bleed(advance_width: u32) -> Self {
        Self::new(advance_width, Padding::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_matches_the_pixel_grid_for_default_sizes() {
        let expected = [
            (16, 128.0),
            (22, 0.0),
            (24, 0.0),
            (32, 256.0),
            (48, 0.0),
            (64, 512.0),
            (128, 1024.0),
            (256, 2048.0),
        ];
        for (size, padding) in expected {
            assert_eq!(
                Padding::for_size(size, false),
                Padding::uniform(padding),
                "size {}",
                size
            );
        }
    }

    #[test]
    fn first_matching_scale_factor_wins() {
        // 15 matches n=1 only; 30 matches n=2 only.
        assert_eq!(Padding::for_size(15, false), Padding::uniform(64.0));
        assert_eq!(Padding::for_size(30, false), Padding::uniform(128.0));
    }

    #[test]
    fn sizes_outside_every_range_get_no_padding() {
        for size in [0, 1, 14, 17, 28, 100, 224, 257, 1024] {
            assert!(Padding::for_size(size, false).is_zero(), "size {}", size);
        }
    }

    #[test]
    fn nopadding_disables_the_policy() {
        assert!(Padding::for_size(16, true).is_zero());
        assert!(Padding::for_size(256, true).is_zero());
    }

    #[test]
    fn full_bleed_geometry_centres_the_default_advance() {
        let geometry = Geometry::full_bleed(DEFAULT_ADVANCE_WIDTH);
        assert_eq!(geometry.width, 1792.0);
        assert_eq!(geometry.height, 1792.0);
        assert_eq!(geometry.shift_x, 128.0);
        assert_eq!(geometry.shift_y, 256.0);
    }

    #[test]
    fn padding_grows_the_canvas_and_shifts_the_glyph() {
        let geometry = Geometry::new(1792, Padding::uniform(128.0));
        assert_eq!(geometry.width, 2048.0);
        assert_eq!(geometry.height, 2048.0);
        assert_eq!(geometry.shift_x, 128.0);
        assert_eq!(geometry.shift_y, 384.0);
    }

    #[test]
    fn odd_advance_widths_produce_half_unit_shifts() {
        let geometry = Geometry::full_bleed(1537);
        assert_eq!(geometry.shift_x, 127.5);
    }
}
