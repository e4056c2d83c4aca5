//! Non-fatal conditions reported alongside a rendered document.

use std::fmt;

/// A problem that degraded the output without failing the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderWarning {
    /// The requested glyph source could not be used and a fallback was substituted.
    FontFallback {
        /// The font that was asked for.
        requested: String,
        /// The glyph source used instead.
        fallback: String,
        /// Why the requested font was rejected.
        reason: String,
    },
    /// Laid-out content extends below the page and was clipped.
    ContentOverflow {
        /// Lowest pixel row the content would occupy.
        content_bottom: i32,
        /// Height of the page canvas.
        page_height: u32,
    },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontFallback {
                requested,
                fallback,
                reason,
            } => write!(
                f,
                "{requested} unavailable ({reason}); rendering with {fallback} instead"
            ),
            Self::ContentOverflow {
                content_bottom,
                page_height,
            } => write!(
                f,
                "content reaches row {content_bottom} but the page is {page_height} px tall; \
                 lines below the page edge were clipped"
            ),
        }
    }
}
