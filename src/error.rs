//! Error types for document generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sahayak_pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a document request.
///
/// Missing fonts are only reported through this type by the strict loading
/// functions in [`crate::fonts`]; the generator turns them into a
/// [`crate::RenderWarning`] and renders with the built-in glyph source.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable font file was found at the searched locations.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// A font file was read but could not be parsed as TrueType/OpenType.
    #[error("font file {} could not be parsed", path.display())]
    InvalidFont {
        /// Location of the rejected file.
        path: PathBuf,
    },

    /// The page image could not be compressed for embedding.
    #[error("failed to compress page image: {0}")]
    Compression(#[source] io::Error),

    /// The PDF object graph could not be serialized.
    #[error("failed to serialize PDF document: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The page geometry cannot be encoded.
    #[error("invalid page geometry: {0}")]
    InvalidPage(String),

    /// I/O error when reading fonts or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
