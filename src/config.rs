//! Layout constants for the form page.
//!
//! Every distance is in device pixels of the page canvas. The defaults reproduce
//! the classic form layout: an A4 portrait page at 300 DPI with generous line
//! spacing so the printed sheet leaves room for handwritten entries.

/// Pixel dimensions and resolution of the page canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Canvas width in pixels.
    pub width_px: u32,
    /// Canvas height in pixels.
    pub height_px: u32,
    /// Resolution used to map pixels onto the PDF page box.
    pub dpi: f64,
}

/// A4 portrait at 300 DPI.
pub const A4_PORTRAIT_300DPI: PageGeometry = PageGeometry {
    width_px: 2480,
    height_px: 3508,
    dpi: 300.0,
};

impl Default for PageGeometry {
    fn default() -> Self {
        A4_PORTRAIT_300DPI
    }
}

/// Strategy used to break paragraphs into lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    /// Break at a maximum number of characters per line.
    ///
    /// Devanagari glyphs vary in width, so lines of equal character count can
    /// differ visibly in length.
    #[default]
    CharacterCount,
    /// Break at a maximum measured ink width in pixels.
    MeasuredWidth,
}

/// All tunable parameters of the page layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub page: PageGeometry,
    /// Vertical position of the first line.
    pub top_offset: i32,
    /// Glyph size of the title line.
    pub header_size: u32,
    /// Space added below the title's ink height.
    pub title_spacing: i32,
    /// Glyph size of body lines.
    pub body_size: u32,
    /// Extra space added to `body_size` to form the body line height.
    pub body_line_padding: i32,
    /// Space added after every non-blank paragraph.
    pub paragraph_spacing: i32,
    /// Glyph size of footer lines.
    pub footer_size: u32,
    /// Extra space added to `footer_size` to form the footer line height.
    pub footer_line_padding: i32,
    /// Gap between the end of the body and the first footer row.
    pub footer_offset: i32,
    /// Inset of the left column's left edge and the right column's right edge.
    pub footer_side_margin: i32,
    /// Minimum run of whitespace that splits a footer into two columns.
    pub footer_separator_run: usize,
    pub wrap_mode: WrapMode,
    /// Line limit for body paragraphs and single footers in character mode.
    pub max_line_chars: usize,
    /// Line limit for each footer column in character mode.
    pub footer_column_chars: usize,
    /// Line limit for body paragraphs and single footers in measured mode.
    pub max_line_width_px: u32,
    /// Line limit for each footer column in measured mode.
    pub footer_column_width_px: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: A4_PORTRAIT_300DPI,
            top_offset: 260,
            header_size: 56,
            title_spacing: 120,
            body_size: 45,
            body_line_padding: 20,
            paragraph_spacing: 10,
            footer_size: 45,
            footer_line_padding: 8,
            footer_offset: 200,
            footer_side_margin: 260,
            footer_separator_run: 4,
            wrap_mode: WrapMode::CharacterCount,
            max_line_chars: 60,
            footer_column_chars: 30,
            max_line_width_px: 1960,
            footer_column_width_px: 900,
        }
    }
}

impl LayoutConfig {
    /// Returns the configuration with the given wrap mode.
    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    /// Returns the configuration with a different page geometry.
    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.page = page;
        self
    }

    /// Distance between consecutive body lines.
    pub fn body_line_height(&self) -> i32 {
        self.body_size as i32 + self.body_line_padding
    }

    /// Distance between consecutive footer rows.
    pub fn footer_line_height(&self) -> i32 {
        self.footer_size as i32 + self.footer_line_padding
    }
}
