//! Fixed-size RGB page canvas.

use image::{Rgb, RgbImage};

use crate::fonts::GlyphSource;
use crate::layout::PageLayout;

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// A white page that text is drawn onto in black.
///
/// Drawing outside the page bounds is clipped silently.
pub struct PageCanvas {
    image: RgbImage,
}

impl PageCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, PAPER),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Blends ink over the pixel at (`x`, `y`) with the given coverage.
    pub fn blend(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let background = pixel[channel] as f32;
            let ink = INK[channel] as f32;
            pixel[channel] = (ink * coverage + background * (1.0 - coverage)).round() as u8;
        }
    }

    /// Draws every line of `layout` with `glyphs`.
    pub fn draw_layout(&mut self, layout: &PageLayout, glyphs: &dyn GlyphSource) {
        for line in &layout.lines {
            glyphs.rasterize(&line.text, line.size, (line.x, line.y), &mut |x, y, coverage| {
                self.blend(x, y, coverage)
            });
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
