//! Placement of title, body and footer lines on the page.
//!
//! Layout is separated from painting: [`layout_document`] only measures text
//! and decides where each line goes, producing a [`PageLayout`] that the
//! canvas later draws. All coordinates are canvas pixels with the origin at
//! the top-left corner.

use log::debug;

use crate::config::{LayoutConfig, WrapMode};
use crate::fonts::{GlyphSource, TextExtent};
use crate::wrap::{wrap_chars, wrap_measured};

/// The three strings that make up one form document.
///
/// `body` paragraphs are separated by `\n`; blank paragraphs become vertical
/// space. A run of whitespace in `footer` (four characters by default) splits
/// it into a left and a right column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentRequest {
    title: String,
    body: String,
    footer: String,
}

impl DocumentRequest {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        footer: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            footer: footer.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn footer(&self) -> &str {
        &self.footer
    }
}

/// Which part of the document a line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRole {
    Title,
    Body,
    /// A centered footer line.
    Footer,
    FooterLeft,
    FooterRight,
}

/// How the footer was arranged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FooterMode {
    Centered,
    TwoColumn,
}

/// A measured line of text with its drawing origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedLine {
    pub role: LineRole,
    pub text: String,
    /// Glyph size in pixels.
    pub size: u32,
    /// Pen start of the line box.
    pub x: i32,
    /// Top of the line box.
    pub y: i32,
    /// Ink extent relative to (`x`, `y`).
    pub extent: TextExtent,
}

impl PlacedLine {
    pub fn ink_left(&self) -> i32 {
        self.x + self.extent.min_x
    }

    pub fn ink_right(&self) -> i32 {
        self.x + self.extent.max_x
    }

    pub fn ink_top(&self) -> i32 {
        self.y + self.extent.min_y
    }

    pub fn ink_bottom(&self) -> i32 {
        self.y + self.extent.max_y
    }
}

/// Result of laying out one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<PlacedLine>,
    /// `None` when the footer was empty.
    pub footer_mode: Option<FooterMode>,
    /// Lowest ink row of any line; may exceed `height`.
    pub content_bottom: i32,
}

impl PageLayout {
    pub fn lines_with_role(&self, role: LineRole) -> impl Iterator<Item = &PlacedLine> + '_ {
        self.lines.iter().filter(move |line| line.role == role)
    }

    /// True when some ink falls below the bottom edge of the page.
    pub fn overflows(&self) -> bool {
        self.content_bottom > self.height as i32
    }
}

/// Splits `footer` at its first run of at least `min_run` whitespace characters.
///
/// The whole run is consumed, so neither side carries separator whitespace.
pub fn split_footer(footer: &str, min_run: usize) -> Option<(&str, &str)> {
    let min_run = min_run.max(1);
    let mut run_start = None;
    let mut run_len = 0;

    for (offset, ch) in footer.char_indices() {
        if ch.is_whitespace() {
            if run_start.is_none() {
                run_start = Some(offset);
            }
            run_len += 1;
        } else {
            if let Some(start) = run_start.filter(|_| run_len >= min_run) {
                return Some((&footer[..start], &footer[offset..]));
            }
            run_start = None;
            run_len = 0;
        }
    }

    run_start
        .filter(|_| run_len >= min_run)
        .map(|start| (&footer[..start], ""))
}

struct Layouter<'a> {
    config: &'a LayoutConfig,
    glyphs: &'a dyn GlyphSource,
    lines: Vec<PlacedLine>,
    cursor: i32,
}

impl<'a> Layouter<'a> {
    fn new(config: &'a LayoutConfig, glyphs: &'a dyn GlyphSource) -> Self {
        Self {
            config,
            glyphs,
            lines: Vec::new(),
            cursor: config.top_offset,
        }
    }

    fn page_width(&self) -> i32 {
        self.config.page.width_px as i32
    }

    fn wrap(&self, text: &str, max_chars: usize, max_width_px: u32, size: u32) -> Vec<String> {
        match self.config.wrap_mode {
            WrapMode::CharacterCount => wrap_chars(text, max_chars),
            WrapMode::MeasuredWidth => wrap_measured(text, max_width_px as usize, |line| {
                self.glyphs.measure(line, size).width().max(0) as usize
            }),
        }
    }

    fn place(
        &mut self,
        role: LineRole,
        text: &str,
        size: u32,
        x: impl Fn(&TextExtent) -> i32,
        y: i32,
    ) {
        if text.is_empty() {
            return;
        }
        let extent = self.glyphs.measure(text, size);
        self.lines.push(PlacedLine {
            role,
            text: text.to_owned(),
            size,
            x: x(&extent),
            y,
            extent,
        });
    }

    fn place_centered(&mut self, role: LineRole, text: &str, size: u32, y: i32) {
        let page_width = self.page_width();
        self.place(
            role,
            text,
            size,
            |extent| (page_width - extent.width()).div_euclid(2) - extent.min_x,
            y,
        );
    }

    fn title(&mut self, title: &str) {
        if title.is_empty() {
            return;
        }
        let title = title.replace(['\r', '\n', '\t'], " ");
        let size = self.config.header_size;
        let height = self.glyphs.measure(&title, size).height();
        self.place_centered(LineRole::Title, &title, size, self.cursor);
        self.cursor += height + self.config.title_spacing;
    }

    fn body(&mut self, body: &str) {
        let size = self.config.body_size;
        let line_height = self.config.body_line_height();

        for paragraph in body.split('\n').map(|p| p.trim_end_matches('\r')) {
            if paragraph.trim().is_empty() {
                self.cursor += line_height;
                continue;
            }
            let lines = self.wrap(
                paragraph,
                self.config.max_line_chars,
                self.config.max_line_width_px,
                size,
            );
            for line in &lines {
                self.place_centered(LineRole::Body, line, size, self.cursor);
                self.cursor += line_height;
            }
            self.cursor += self.config.paragraph_spacing;
        }
    }

    fn footer(&mut self, footer: &str) -> Option<FooterMode> {
        if footer.is_empty() {
            return None;
        }
        let size = self.config.footer_size;
        let line_height = self.config.footer_line_height();
        let top = self.cursor + self.config.footer_offset;

        match split_footer(footer, self.config.footer_separator_run) {
            Some((left, right)) => {
                let left_lines = self.footer_column(left, size);
                let right_lines = self.footer_column(right, size);
                let rows = left_lines.len().max(right_lines.len());
                let margin = self.config.footer_side_margin;
                let right_edge = self.page_width() - margin;

                for row in 0..rows {
                    let y = top + row as i32 * line_height;
                    if let Some(line) = left_lines.get(row) {
                        self.place(LineRole::FooterLeft, line, size, |e| margin - e.min_x, y);
                    }
                    if let Some(line) = right_lines.get(row) {
                        self.place(LineRole::FooterRight, line, size, |e| right_edge - e.max_x, y);
                    }
                }
                self.cursor = top + rows as i32 * line_height;
                Some(FooterMode::TwoColumn)
            }
            None => {
                let mut lines = self.wrap(
                    footer,
                    self.config.max_line_chars,
                    self.config.max_line_width_px,
                    size,
                );
                if lines.is_empty() {
                    lines.push(String::new());
                }
                let mut y = top;
                for line in &lines {
                    self.place_centered(LineRole::Footer, line, size, y);
                    y += line_height;
                }
                self.cursor = y;
                Some(FooterMode::Centered)
            }
        }
    }

    fn footer_column(&self, text: &str, size: u32) -> Vec<String> {
        let mut lines = self.wrap(
            text,
            self.config.footer_column_chars,
            self.config.footer_column_width_px,
            size,
        );
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    fn finish(self, footer_mode: Option<FooterMode>) -> PageLayout {
        let content_bottom = self
            .lines
            .iter()
            .map(PlacedLine::ink_bottom)
            .max()
            .unwrap_or(0);
        debug!(
            "Laid out {} lines; content ends at row {} (cursor {})",
            self.lines.len(),
            content_bottom,
            self.cursor
        );
        PageLayout {
            width: self.config.page.width_px,
            height: self.config.page.height_px,
            lines: self.lines,
            footer_mode,
            content_bottom,
        }
    }
}

/// Measures and positions every line of `request` on a page described by `config`.
pub fn layout_document(
    request: &DocumentRequest,
    config: &LayoutConfig,
    glyphs: &dyn GlyphSource,
) -> PageLayout {
    let mut layouter = Layouter::new(config, glyphs);
    layouter.title(request.title());
    layouter.body(request.body());
    let footer_mode = layouter.footer(request.footer());
    layouter.finish(footer_mode)
}
