//! Minimal glyph source used when no font file can be loaded.
//!
//! Every non-whitespace character is drawn as a hollow box on a fixed-pitch
//! grid. The output is legible only as a placeholder, but the metrics are exact
//! integers, so layouts rendered with it are fully predictable.

use super::{GlyphSource, TextExtent};

/// Display name reported in warnings.
pub const BUILTIN_GLYPHS_NAME: &str = "built-in placeholder glyphs";

/// Fixed-pitch placeholder glyphs.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinGlyphs;

impl BuiltinGlyphs {
    /// Horizontal distance between consecutive characters.
    pub fn advance(size: u32) -> i32 {
        (size as i32 * 3 / 5).max(2)
    }

    fn cell(index: usize, size: u32) -> TextExtent {
        let size = size.max(1) as i32;
        let advance = Self::advance(size as u32);
        let pad = advance / 8;
        let left = index as i32 * advance;
        TextExtent {
            min_x: left + pad,
            min_y: size / 5,
            max_x: left + advance - pad,
            max_y: size,
        }
    }

    fn inked_cells(text: &str, size: u32) -> impl Iterator<Item = TextExtent> + '_ {
        text.chars()
            .enumerate()
            .filter(|(_, ch)| !ch.is_whitespace())
            .map(move |(index, _)| Self::cell(index, size))
    }
}

impl GlyphSource for BuiltinGlyphs {
    fn name(&self) -> &str {
        BUILTIN_GLYPHS_NAME
    }

    fn measure(&self, text: &str, size: u32) -> TextExtent {
        Self::inked_cells(text, size)
            .reduce(|acc, cell| acc.union(&cell))
            .unwrap_or_default()
    }

    fn rasterize(
        &self,
        text: &str,
        size: u32,
        origin: (i32, i32),
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        let stroke = (size as i32 / 16).max(1);
        let (ox, oy) = origin;

        for cell in Self::inked_cells(text, size) {
            for y in cell.min_y..cell.max_y {
                for x in cell.min_x..cell.max_x {
                    let on_edge = x < cell.min_x + stroke
                        || x >= cell.max_x - stroke
                        || y < cell.min_y + stroke
                        || y >= cell.max_y - stroke;
                    if on_edge {
                        plot(ox + x, oy + y, 1.0);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_has_advance_but_no_ink() {
        let glyphs = BuiltinGlyphs;
        assert_eq!(glyphs.measure("   ", 45), TextExtent::default());

        let one = glyphs.measure("a", 45);
        let spaced = glyphs.measure(" a", 45);
        assert_eq!(spaced.min_x - one.min_x, BuiltinGlyphs::advance(45));
        assert_eq!(spaced.width(), one.width());
    }

    #[test]
    fn width_grows_by_one_advance_per_character() {
        let glyphs = BuiltinGlyphs;
        let three = glyphs.measure("अबक", 45).width();
        let four = glyphs.measure("अबकड", 45).width();
        assert_eq!(four - three, BuiltinGlyphs::advance(45));
    }

    #[test]
    fn rasterized_pixels_stay_within_measured_extent() {
        let glyphs = BuiltinGlyphs;
        let extent = glyphs.measure("सही", 56);
        let mut plotted = Vec::new();
        glyphs.rasterize("सही", 56, (100, 200), &mut |x, y, _| plotted.push((x, y)));

        assert!(!plotted.is_empty());
        for (x, y) in plotted {
            assert!(x >= 100 + extent.min_x && x < 100 + extent.max_x);
            assert!(y >= 200 + extent.min_y && y < 200 + extent.max_y);
        }
    }
}
