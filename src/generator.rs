//! Render-and-encode pipeline for form documents.

use image::RgbImage;
use log::{debug, warn};

use crate::canvas::PageCanvas;
use crate::config::LayoutConfig;
use crate::encode::encode_page;
use crate::error::Result;
use crate::fonts::{resolve_font, FontSelection, ResolvedFont};
use crate::layout::{layout_document, DocumentRequest, PageLayout};
use crate::warning::RenderWarning;

/// Builder for [`DocumentGenerator`] instances.
#[derive(Default)]
pub struct GeneratorBuilder {
    config: Option<LayoutConfig>,
    font: FontSelection,
}

impl GeneratorBuilder {
    /// Creates a builder with the default layout and font search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the layout configuration.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Chooses the glyph source.
    pub fn with_font(mut self, font: FontSelection) -> Self {
        self.font = font;
        self
    }

    /// Resolves the font and returns a ready generator.
    ///
    /// This cannot fail: a missing font degrades to the built-in glyphs and is
    /// reported through [`DocumentGenerator::font`] and every generated document.
    pub fn build(self) -> DocumentGenerator {
        let font = resolve_font(&self.font);
        debug!("Generator using glyph source {:?}", font);
        DocumentGenerator {
            config: self.config.unwrap_or_default(),
            font,
        }
    }
}

/// Page pixels and layout before encoding.
pub struct RenderedPage {
    pub image: RgbImage,
    pub layout: PageLayout,
    pub warnings: Vec<RenderWarning>,
}

/// An encoded single-page PDF.
#[derive(Clone, Debug)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub warnings: Vec<RenderWarning>,
}

/// Turns [`DocumentRequest`]s into PDF bytes.
///
/// The loaded glyph source is read-only, so a generator can be shared between
/// threads and used for concurrent requests.
pub struct DocumentGenerator {
    config: LayoutConfig,
    font: ResolvedFont,
}

impl Default for DocumentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentGenerator {
    /// Generator with the default layout and font search.
    pub fn new() -> Self {
        GeneratorBuilder::new().build()
    }

    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn font(&self) -> &ResolvedFont {
        &self.font
    }

    /// Lays out and paints `request` without encoding it.
    pub fn render_page(&self, request: &DocumentRequest) -> RenderedPage {
        let glyphs = self.font.glyphs();
        let layout = layout_document(request, &self.config, glyphs);

        let mut warnings: Vec<RenderWarning> = self.font.warning().cloned().into_iter().collect();
        if layout.overflows() {
            warn!(
                "Content reaches row {} on a {} px page; clipping at the page edge.",
                layout.content_bottom, layout.height
            );
            warnings.push(RenderWarning::ContentOverflow {
                content_bottom: layout.content_bottom,
                page_height: layout.height,
            });
        }

        let mut canvas = PageCanvas::new(self.config.page.width_px, self.config.page.height_px);
        canvas.draw_layout(&layout, glyphs);

        RenderedPage {
            image: canvas.into_image(),
            layout,
            warnings,
        }
    }

    /// Renders `request` and encodes it as a single-page PDF.
    pub fn generate(&self, request: &DocumentRequest) -> Result<GeneratedDocument> {
        let page = self.render_page(request);
        let bytes = encode_page(&page.image, self.config.page.dpi)?;
        debug!("Encoded {} byte PDF", bytes.len());
        Ok(GeneratedDocument {
            bytes,
            warnings: page.warnings,
        })
    }
}

/// Renders one document with the default layout and font search.
///
/// The font is resolved on every call; reuse a [`DocumentGenerator`] to load
/// it once.
pub fn generate_document(title: &str, body: &str, footer: &str) -> Result<GeneratedDocument> {
    DocumentGenerator::new().generate(&DocumentRequest::new(title, body, footer))
}
