//! TrueType glyph source: `rustybuzz` shapes each line, `rusttype` draws it.

use std::fs;
use std::path::Path;

use rustybuzz::UnicodeBuffer;
use rusttype::{point, Font, GlyphId, PositionedGlyph, Scale};

use super::{GlyphSource, TextExtent};
use crate::error::{Error, Result};

/// A parsed TrueType/OpenType font.
///
/// Every line is shaped with the font's OpenType tables before it is measured
/// or drawn, so reordered vowel signs, conjuncts and mark positioning follow
/// the font rather than the code point order.
pub struct TrueTypeGlyphs {
    font: Font<'static>,
    data: Vec<u8>,
    name: String,
}

impl TrueTypeGlyphs {
    /// Parses font data already held in memory.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Option<Self> {
        rustybuzz::Face::from_slice(&data, 0)?;
        let font = Font::try_from_vec(data.clone())?;
        Some(Self {
            font,
            data,
            name: name.into(),
        })
    }

    /// Reads and parses the font file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, data).ok_or_else(|| Error::InvalidFont {
            path: path.to_path_buf(),
        })
    }

    /// Shapes `text` and places the resulting glyphs with the top of the line
    /// box at `y` and the pen starting at `x`.
    fn positioned(&self, text: &str, size: u32, x: f32, y: f32) -> Vec<PositionedGlyph<'_>> {
        let scale = Scale::uniform(size as f32);
        let baseline = y + self.font.v_metrics(scale).ascent;
        let Some(face) = rustybuzz::Face::from_slice(&self.data, 0) else {
            return self.font.layout(text, scale, point(x, baseline)).collect();
        };

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let shaped = rustybuzz::shape(&face, &[], buffer);

        // Shaper positions are in font units; rusttype sizes by ascent - descent.
        let units = self.font.scale_for_pixel_height(size as f32);
        let mut pen = x;
        shaped
            .glyph_infos()
            .iter()
            .zip(shaped.glyph_positions())
            .map(|(info, position)| {
                let id = GlyphId(u16::try_from(info.glyph_id).unwrap_or_default());
                let origin = point(
                    pen + position.x_offset as f32 * units,
                    baseline - position.y_offset as f32 * units,
                );
                pen += position.x_advance as f32 * units;
                self.font.glyph(id).scaled(scale).positioned(origin)
            })
            .collect()
    }
}

impl GlyphSource for TrueTypeGlyphs {
    fn name(&self) -> &str {
        &self.name
    }

    fn measure(&self, text: &str, size: u32) -> TextExtent {
        self.positioned(text, size, 0.0, 0.0)
            .iter()
            .filter_map(PositionedGlyph::pixel_bounding_box)
            .map(|bb| TextExtent {
                min_x: bb.min.x,
                min_y: bb.min.y,
                max_x: bb.max.x,
                max_y: bb.max.y,
            })
            .reduce(|acc, extent| acc.union(&extent))
            .unwrap_or_default()
    }

    fn rasterize(
        &self,
        text: &str,
        size: u32,
        origin: (i32, i32),
        plot: &mut dyn FnMut(i32, i32, f32),
    ) {
        let (ox, oy) = origin;
        for glyph in self.positioned(text, size, ox as f32, oy as f32) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    plot(bb.min.x + gx as i32, bb.min.y + gy as i32, coverage);
                });
            }
        }
    }
}
