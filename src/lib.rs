//! Core entry point for the sahayak_pdf crate.
//!
//! Renders a titled, multi-paragraph form letter with a signature footer onto
//! an A4 page image and encodes it as a single-page PDF:
//!
//! ```no_run
//! let document = sahayak_pdf::generate_document(
//!     "हमीपत्र",
//!     "मी, ______________ (नाव)\n\nवरील माहिती खरी आहे.",
//!     "दिनांक: ________    सही: ________",
//! )?;
//! for warning in &document.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! std::fs::write("hamipatra.pdf", &document.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod canvas;
pub mod config;
pub mod encode;
pub mod error;
pub mod fonts;
pub mod generator;
pub mod layout;
pub mod templates;
pub mod warning;
pub mod wrap;

pub use config::{LayoutConfig, PageGeometry, WrapMode};
pub use error::{Error, Result};
pub use fonts::FontSelection;
pub use generator::{
    generate_document, DocumentGenerator, GeneratedDocument, GeneratorBuilder, RenderedPage,
};
pub use layout::DocumentRequest;
pub use templates::FormTemplate;
pub use warning::RenderWarning;
