//! Glyph sources and font resolution.
//!
//! The renderer draws through the [`GlyphSource`] trait. A TrueType font named
//! [`DEFAULT_FONT_FILE`] is looked up in a fixed list of directories; when it is
//! missing, a Devanagari-capable system font is tried, and as a last resort the
//! [`BuiltinGlyphs`] placeholder source is used. Every fallback is reported as a
//! [`RenderWarning`] instead of an error.

mod builtin;
mod truetype;

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::warning::RenderWarning;

pub use builtin::{BuiltinGlyphs, BUILTIN_GLYPHS_NAME};
pub use truetype::TrueTypeGlyphs;

/// File name of the font the forms are designed for.
pub const DEFAULT_FONT_FILE: &str = "MarathiFont.ttf";

/// Environment variable naming an extra directory that holds [`DEFAULT_FONT_FILE`].
pub const FONTS_DIR_ENV: &str = "SAHAYAK_FONTS_DIR";

/// Environment variable overriding the directory scanned for system fallback fonts.
pub const SYSTEM_FONTS_DIR_ENV: &str = "SAHAYAK_SYSTEM_FONTS_DIR";

const SYSTEM_FONT_FILES: &[&str] = &[
    "NotoSansDevanagari-Regular.ttf",
    "Lohit-Marathi.ttf",
    "Lohit-Devanagari.ttf",
    "Nirmala.ttf",
    "mangal.ttf",
];

#[cfg(not(windows))]
const UNIX_SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/noto",
    "/usr/share/fonts/noto",
    "/usr/share/fonts/truetype/lohit-devanagari",
    "/usr/share/fonts/truetype/lohit-marathi",
    "/usr/share/fonts/google-noto",
    "/Library/Fonts",
];

/// Pixel extent of rendered ink relative to the text origin.
///
/// The origin is the top-left corner of the line box: `x` at the pen start and
/// `y` at the ascender line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextExtent {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TextExtent {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Smallest extent covering both `self` and `other`.
    pub fn union(&self, other: &TextExtent) -> TextExtent {
        TextExtent {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Something that can measure and draw a single line of text.
///
/// Implementations are immutable once constructed so one instance can serve
/// concurrent renders.
pub trait GlyphSource: Send + Sync {
    /// Human readable name used in logs and warnings.
    fn name(&self) -> &str;

    /// Ink extent of `text` drawn at glyph size `size`, relative to the origin.
    fn measure(&self, text: &str, size: u32) -> TextExtent;

    /// Calls `plot(x, y, coverage)` for every covered pixel of `text` drawn with
    /// its line-box origin at `origin`. Coverage is in `0.0..=1.0`.
    fn rasterize(
        &self,
        text: &str,
        size: u32,
        origin: (i32, i32),
        plot: &mut dyn FnMut(i32, i32, f32),
    );
}

/// Which glyph source a generator should use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSelection {
    /// Search for [`DEFAULT_FONT_FILE`], then system fonts, then the built-in source.
    #[default]
    Search,
    /// Load exactly this font file, falling back to the built-in source.
    File(PathBuf),
    /// Use the built-in placeholder source without looking for fonts.
    Builtin,
}

/// Where the glyph source in use came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontOrigin {
    /// The requested font file.
    Requested(PathBuf),
    /// A system font substituted for the requested one.
    System(PathBuf),
    /// The built-in placeholder glyphs.
    Builtin,
}

/// A glyph source together with how it was obtained.
pub struct ResolvedFont {
    glyphs: Box<dyn GlyphSource>,
    origin: FontOrigin,
    warning: Option<RenderWarning>,
}

impl ResolvedFont {
    fn new(glyphs: Box<dyn GlyphSource>, origin: FontOrigin) -> Self {
        Self {
            glyphs,
            origin,
            warning: None,
        }
    }

    fn with_warning(mut self, warning: RenderWarning) -> Self {
        self.warning = Some(warning);
        self
    }

    /// The glyph source to draw with.
    pub fn glyphs(&self) -> &dyn GlyphSource {
        self.glyphs.as_ref()
    }

    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// The fallback warning, if the requested font could not be used.
    pub fn warning(&self) -> Option<&RenderWarning> {
        self.warning.as_ref()
    }
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("glyphs", &self.glyphs.name())
            .field("origin", &self.origin)
            .field("warning", &self.warning)
            .finish()
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

/// Directories searched for [`DEFAULT_FONT_FILE`], in priority order.
pub fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        push_unique(&mut candidates, path);
    }

    if let Ok(current_dir) = env::current_dir() {
        push_unique(&mut candidates, current_dir);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    candidates
}

fn resolve_named_font_path() -> Result<PathBuf> {
    let mut attempts = Vec::new();

    for directory in font_directory_candidates() {
        let candidate = directory.join(DEFAULT_FONT_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
        attempts.push(directory.display().to_string());
    }

    Err(Error::FontUnavailable(format!(
        "{} not found in [{}]; see assets/fonts/README.md or set {}",
        DEFAULT_FONT_FILE,
        attempts.join(", "),
        FONTS_DIR_ENV
    )))
}

/// Loads [`DEFAULT_FONT_FILE`] from the first search directory that has it.
pub fn load_named_font() -> Result<(PathBuf, TrueTypeGlyphs)> {
    let path = resolve_named_font_path()?;
    let glyphs = TrueTypeGlyphs::load(&path)?;
    Ok((path, glyphs))
}

/// Indicates whether [`DEFAULT_FONT_FILE`] is present in any search directory.
pub fn named_font_available() -> bool {
    resolve_named_font_path().is_ok()
}

fn system_font_directories() -> Vec<PathBuf> {
    if let Some(path) = env_path(SYSTEM_FONTS_DIR_ENV) {
        return vec![path];
    }

    #[cfg(windows)]
    {
        let mut directories = Vec::new();
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                push_unique(&mut directories, root.join("Fonts"));
            }
        }
        directories
    }

    #[cfg(not(windows))]
    {
        UNIX_SYSTEM_FONT_DIRS.iter().map(PathBuf::from).collect()
    }
}

fn load_system_font() -> Result<(PathBuf, TrueTypeGlyphs)> {
    for directory in system_font_directories() {
        for file in SYSTEM_FONT_FILES {
            let path = directory.join(file);
            if !path.is_file() {
                continue;
            }
            match TrueTypeGlyphs::load(&path) {
                Ok(glyphs) => return Ok((path, glyphs)),
                Err(err) => debug!("Skipping system font {}: {}", path.display(), err),
            }
        }
    }

    Err(Error::Io(io::Error::new(
        io::ErrorKind::NotFound,
        "no Devanagari-capable system font found",
    )))
}

fn builtin_fallback(requested: &str, reason: String) -> ResolvedFont {
    warn!(
        "{} unavailable ({}); falling back to {}.",
        requested, reason, BUILTIN_GLYPHS_NAME
    );
    ResolvedFont::new(Box::new(BuiltinGlyphs), FontOrigin::Builtin).with_warning(
        RenderWarning::FontFallback {
            requested: requested.to_owned(),
            fallback: BUILTIN_GLYPHS_NAME.to_owned(),
            reason,
        },
    )
}

fn search_font() -> ResolvedFont {
    let err = match load_named_font() {
        Ok((path, glyphs)) => {
            debug!("Using font {}", path.display());
            return ResolvedFont::new(Box::new(glyphs), FontOrigin::Requested(path));
        }
        Err(err) => err,
    };

    match load_system_font() {
        Ok((path, glyphs)) => {
            warn!(
                "{} unavailable ({}); falling back to system font {}.",
                DEFAULT_FONT_FILE,
                err,
                path.display()
            );
            let warning = RenderWarning::FontFallback {
                requested: DEFAULT_FONT_FILE.to_owned(),
                fallback: path.display().to_string(),
                reason: err.to_string(),
            };
            ResolvedFont::new(Box::new(glyphs), FontOrigin::System(path)).with_warning(warning)
        }
        Err(fallback_err) => {
            debug!("System font fallback failed: {}", fallback_err);
            builtin_fallback(DEFAULT_FONT_FILE, err.to_string())
        }
    }
}

fn file_font(path: &Path) -> ResolvedFont {
    match TrueTypeGlyphs::load(path) {
        Ok(glyphs) => {
            debug!("Using font {}", path.display());
            ResolvedFont::new(Box::new(glyphs), FontOrigin::Requested(path.to_path_buf()))
        }
        Err(err) => builtin_fallback(&path.display().to_string(), err.to_string()),
    }
}

/// Resolves `selection` to a usable glyph source. Never fails.
pub fn resolve_font(selection: &FontSelection) -> ResolvedFont {
    match selection {
        FontSelection::Search => search_font(),
        FontSelection::File(path) => file_font(path),
        FontSelection::Builtin => ResolvedFont::new(Box::new(BuiltinGlyphs), FontOrigin::Builtin),
    }
}
