use image::RgbImage;
use lopdf::{Document, Object};
use sahayak_pdf::fonts::{self, FontOrigin, FONTS_DIR_ENV, SYSTEM_FONTS_DIR_ENV};
use sahayak_pdf::layout::LineRole;
use sahayak_pdf::{
    DocumentGenerator, DocumentRequest, FontSelection, FormTemplate, RenderWarning,
};
use sha2::{Digest, Sha256};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

static FONT_ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the font search at directories that do not exist for the guard's lifetime.
struct FontSearchGuard {
    original_env: Option<OsString>,
    original_system_env: Option<OsString>,
    _lock: MutexGuard<'static, ()>,
}

impl FontSearchGuard {
    fn isolate() -> Self {
        let lock = FONT_ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let original_env = env::var_os(FONTS_DIR_ENV);
        env::set_var(FONTS_DIR_ENV, "/__sahayak_missing_fonts__");
        let original_system_env = env::var_os(SYSTEM_FONTS_DIR_ENV);
        env::set_var(SYSTEM_FONTS_DIR_ENV, "/__sahayak_missing_system_fonts__");

        Self {
            original_env,
            original_system_env,
            _lock: lock,
        }
    }
}

impl Drop for FontSearchGuard {
    fn drop(&mut self) {
        match self.original_env.take() {
            Some(value) => env::set_var(FONTS_DIR_ENV, value),
            None => env::remove_var(FONTS_DIR_ENV),
        }
        match self.original_system_env.take() {
            Some(value) => env::set_var(SYSTEM_FONTS_DIR_ENV, value),
            None => env::remove_var(SYSTEM_FONTS_DIR_ENV),
        }
    }
}

const PAGE_WIDTH: u32 = 2480;
const PAGE_HEIGHT: u32 = 3508;

fn builtin_generator() -> DocumentGenerator {
    DocumentGenerator::builder()
        .with_font(FontSelection::Builtin)
        .build()
}

fn missing_font_generator() -> DocumentGenerator {
    DocumentGenerator::builder()
        .with_font(FontSelection::File(PathBuf::from(
            "/__sahayak_missing_fonts__/MarathiFont.ttf",
        )))
        .build()
}

/// Overrides the TrueType font used by the real-font tests.
const TEST_FONT_ENV: &str = "SAHAYAK_TEST_FONT";

const TRUETYPE_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoSansDevanagari-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansDevanagari-Regular.ttf",
    "/usr/share/fonts/truetype/lohit-devanagari/Lohit-Devanagari.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "C:\\Windows\\Fonts\\Nirmala.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A generator drawing with an installed TrueType font, if the machine has one.
fn truetype_generator() -> Option<DocumentGenerator> {
    let path = env::var_os(TEST_FONT_ENV)
        .map(PathBuf::from)
        .into_iter()
        .chain(TRUETYPE_CANDIDATES.iter().map(PathBuf::from))
        .find(|path| path.is_file())?;

    let generator = DocumentGenerator::builder()
        .with_font(FontSelection::File(path))
        .build();
    matches!(generator.font().origin(), FontOrigin::Requested(_)).then_some(generator)
}

fn is_ink(image: &RgbImage, x: u32, y: u32) -> bool {
    image.get_pixel(x, y).0 != [255, 255, 255]
}

/// Leftmost and rightmost inked columns within rows `top..bottom`.
fn ink_columns(image: &RgbImage, top: i32, bottom: i32) -> Option<(u32, u32)> {
    let top = top.max(0) as u32;
    let bottom = (bottom.max(0) as u32).min(image.height());
    let mut columns: Option<(u32, u32)> = None;
    for y in top..bottom {
        for x in 0..image.width() {
            if is_ink(image, x, y) {
                columns = Some(match columns {
                    Some((min, max)) => (min.min(x), max.max(x)),
                    None => (x, x),
                });
            }
        }
    }
    columns
}

/// Maximal runs of consecutive rows that contain ink, as `start..end` pairs.
fn ink_row_bands(image: &RgbImage) -> Vec<(u32, u32)> {
    let mut bands = Vec::new();
    let mut start = None;
    for y in 0..image.height() {
        let inked = (0..image.width()).any(|x| is_ink(image, x, y));
        match (inked, start) {
            (true, None) => start = Some(y),
            (false, Some(begin)) => {
                bands.push((begin, y));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(begin) = start {
        bands.push((begin, image.height()));
    }
    bands
}

fn number(object: &Object) -> f64 {
    match object {
        Object::Integer(value) => *value as f64,
        Object::Real(value) => *value as f64,
        other => panic!("expected a number, got {other:?}"),
    }
}

/// Returns the page box size in points and the embedded image size in pixels.
fn inspect_pdf(bytes: &[u8]) -> ((f64, f64), (f64, f64)) {
    let document = Document::load_mem(bytes).expect("output parses as PDF");
    let pages = document.get_pages();
    assert_eq!(pages.len(), 1, "exactly one page expected");

    let page_id = *pages.values().next().expect("page");
    let media_box = document
        .get_object(page_id)
        .and_then(Object::as_dict)
        .and_then(|page| page.get(b"MediaBox"))
        .and_then(Object::as_array)
        .expect("media box");

    let image = document
        .objects
        .values()
        .find_map(|object| match object {
            Object::Stream(stream) => match stream.dict.get(b"Subtype").and_then(Object::as_name) {
                Ok(name) if name == b"Image" => Some(&stream.dict),
                _ => None,
            },
            _ => None,
        })
        .expect("page image");

    (
        (number(&media_box[2]), number(&media_box[3])),
        (
            number(image.get(b"Width").expect("width")),
            number(image.get(b"Height").expect("height")),
        ),
    )
}

#[test]
fn renders_non_empty_output() {
    let document = builtin_generator()
        .generate(&DocumentRequest::new("शीर्षक", "मजकूर", "सही"))
        .expect("generate");
    assert!(document.bytes.starts_with(b"%PDF"));
    assert!(document.warnings.is_empty());
}

#[test]
fn rendering_is_deterministic() {
    let request = FormTemplate::SelfDeclaration.request();
    let first = builtin_generator().generate(&request).expect("first");
    let second = builtin_generator().generate(&request).expect("second");

    assert_eq!(first.bytes.len(), second.bytes.len(), "PDF sizes should match");
    assert_eq!(
        Sha256::digest(&first.bytes),
        Sha256::digest(&second.bytes),
        "PDF renders must be byte-identical"
    );
}

#[test]
fn page_dimensions_do_not_depend_on_input() {
    let generator = builtin_generator();
    let long_body = vec!["खूप मोठा परिच्छेद ".repeat(20); 40].join("\n");

    for request in [
        DocumentRequest::new("", "", ""),
        DocumentRequest::new("शीर्षक", long_body, "सही    नाव"),
    ] {
        let page = generator.render_page(&request);
        assert_eq!(page.image.dimensions(), (PAGE_WIDTH, PAGE_HEIGHT));

        let document = generator.generate(&request).expect("generate");
        let ((width_pt, height_pt), (width_px, height_px)) = inspect_pdf(&document.bytes);
        assert!((width_pt - 595.2).abs() < 0.05, "page width {width_pt}");
        assert!((height_pt - 841.92).abs() < 0.05, "page height {height_pt}");
        assert_eq!((width_px, height_px), (PAGE_WIDTH as f64, PAGE_HEIGHT as f64));
    }
}

#[test]
fn empty_request_yields_a_blank_page() {
    let page = builtin_generator().render_page(&DocumentRequest::default());
    assert!(page.layout.lines.is_empty());
    assert!(page.image.pixels().all(|pixel| pixel.0 == [255, 255, 255]));
}

#[test]
fn single_line_title_is_centered() {
    let page = builtin_generator().render_page(&DocumentRequest::new("हमीपत्र", "", ""));
    let title = page
        .layout
        .lines_with_role(LineRole::Title)
        .next()
        .expect("title line");

    let (left, right) = ink_columns(&page.image, title.y, title.y + 56).expect("title ink");
    let midpoint = (left + right) as f64 / 2.0;
    assert!(
        (midpoint - PAGE_WIDTH as f64 / 2.0).abs() <= 1.0,
        "title midpoint {midpoint}"
    );
}

#[test]
fn single_paragraph_body_is_centered() {
    let page = builtin_generator().render_page(&DocumentRequest::new("", "साधा मजकूर", ""));
    let (left, right) = ink_columns(&page.image, 0, PAGE_HEIGHT as i32).expect("body ink");
    let midpoint = (left + right) as f64 / 2.0;
    assert!((midpoint - PAGE_WIDTH as f64 / 2.0).abs() <= 1.0);
}

#[test]
fn two_part_footer_hugs_the_side_margins() {
    let page = builtin_generator().render_page(&DocumentRequest::new(
        "",
        "मजकूर",
        "दिनांक: ___    सही: ____",
    ));
    let left = page
        .layout
        .lines_with_role(LineRole::FooterLeft)
        .next()
        .expect("left column");
    let right = page
        .layout
        .lines_with_role(LineRole::FooterRight)
        .next()
        .expect("right column");
    assert_eq!(left.text, "दिनांक: ___");
    assert_eq!(right.text, "सही: ____");

    let (min_x, max_x) = ink_columns(&page.image, left.y, left.y + 45).expect("footer ink");
    assert!(min_x.abs_diff(260) <= 1, "left edge {min_x}");
    assert!((max_x + 1).abs_diff(PAGE_WIDTH - 260) <= 1, "right edge {max_x}");
}

#[test]
fn plain_footer_is_a_centered_block() {
    let page = builtin_generator().render_page(&DocumentRequest::new("", "", "साधा मजकूर"));
    assert_eq!(page.layout.lines_with_role(LineRole::FooterLeft).count(), 0);
    assert_eq!(page.layout.lines_with_role(LineRole::FooterRight).count(), 0);

    let footer = page
        .layout
        .lines_with_role(LineRole::Footer)
        .next()
        .expect("footer line");
    let (left, right) = ink_columns(&page.image, footer.y, footer.y + 45).expect("footer ink");
    let midpoint = (left + right) as f64 / 2.0;
    assert!((midpoint - PAGE_WIDTH as f64 / 2.0).abs() <= 1.0);
}

#[test]
fn blank_paragraph_separates_blocks() {
    let page = builtin_generator().render_page(&DocumentRequest::new("", "Line A\n\nLine B", ""));
    let bands = ink_row_bands(&page.image);
    assert_eq!(bands.len(), 2, "expected two separate text blocks: {bands:?}");

    let gap = bands[1].0 - bands[0].1;
    assert!(gap >= 65, "blocks only {gap} px apart");
}

#[test]
fn wrapped_body_lines_respect_the_character_limit() {
    let paragraph = "वास्तविक पाहता, माझ्या घरी कोणीही सरकारी नोकरीत नाही. तरी कृपया माझ्या अर्जात \
                     योग्य ती दुरुस्ती करून माझा अर्ज मंजूर करण्यात यावा. सोबत आधार कार्ड जोडले आहे.";
    let page = builtin_generator().render_page(&DocumentRequest::new("", paragraph, ""));
    let lines: Vec<_> = page.layout.lines_with_role(LineRole::Body).collect();
    assert!(lines.len() > 1);

    for line in &lines {
        assert!(line.text.chars().count() <= 60, "{} is too long", line.text);
    }
    let joined = lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(joined, paragraph);
}

#[test]
fn missing_font_degrades_gracefully() {
    let generator = missing_font_generator();
    assert_eq!(generator.font().origin(), &FontOrigin::Builtin);

    let document = generator
        .generate(&FormTemplate::BankSeeding.request())
        .expect("missing font must not fail the request");
    assert!(!document.bytes.is_empty());
    assert!(matches!(
        document.warnings.as_slice(),
        [RenderWarning::FontFallback { .. }]
    ));

    let (_, (width_px, height_px)) = inspect_pdf(&document.bytes);
    assert_eq!((width_px, height_px), (PAGE_WIDTH as f64, PAGE_HEIGHT as f64));
}

#[test]
fn search_without_fonts_falls_back_to_builtin() {
    let _guard = FontSearchGuard::isolate();
    if fonts::named_font_available() {
        eprintln!("Skipping fallback assertions: MarathiFont.ttf is installed");
        return;
    }

    let generator = DocumentGenerator::new();
    assert_eq!(generator.font().origin(), &FontOrigin::Builtin);
    assert!(matches!(
        generator.font().warning(),
        Some(RenderWarning::FontFallback { .. })
    ));

    let document = generator
        .generate(&DocumentRequest::new("शीर्षक", "मजकूर", ""))
        .expect("generate");
    assert!(!document.bytes.is_empty());
}

#[test]
fn shared_generator_is_safe_across_threads() {
    let generator = builtin_generator();
    let request = FormTemplate::ApplicationCorrection.request();
    let expected = generator.generate(&request).expect("generate").bytes;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| generator.generate(&request).expect("generate").bytes))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), expected);
        }
    });
}

#[test]
fn bundled_forms_fit_on_one_page() {
    let generator = builtin_generator();
    for form in FormTemplate::ALL {
        let page = generator.render_page(&form.request());
        assert!(
            !page.layout.overflows(),
            "{form} runs past the page bottom at row {}",
            page.layout.content_bottom
        );
        assert!(page.warnings.is_empty());
    }
}

#[test]
fn truetype_title_and_body_are_centered() {
    let Some(generator) = truetype_generator() else {
        eprintln!("Skipping TrueType centering test: no system font found");
        return;
    };

    let page = generator.render_page(&DocumentRequest::new(
        "Declaration हमीपत्र",
        "Sahayak form body",
        "",
    ));
    for role in [LineRole::Title, LineRole::Body] {
        let line = page
            .layout
            .lines_with_role(role)
            .next()
            .expect("placed line");
        assert!(line.extent.width() > 0, "{role:?} has no ink");
        let span = line.ink_left() + line.ink_right();
        assert!(
            (span - PAGE_WIDTH as i32).abs() <= 1,
            "{role:?} ink spans {}..{}",
            line.ink_left(),
            line.ink_right()
        );

        let (left, right) =
            ink_columns(&page.image, line.ink_top(), line.ink_bottom()).expect("drawn ink");
        let midpoint = (left + right + 1) as f64 / 2.0;
        assert!(
            (midpoint - PAGE_WIDTH as f64 / 2.0).abs() <= 2.0,
            "{role:?} drawn midpoint {midpoint}"
        );
    }
}

#[test]
fn truetype_footer_columns_meet_the_margins() {
    let Some(generator) = truetype_generator() else {
        eprintln!("Skipping TrueType footer test: no system font found");
        return;
    };

    let page = generator.render_page(&DocumentRequest::new(
        "",
        "Body",
        "Date: ______    Signature: ______",
    ));
    let left = page
        .layout
        .lines_with_role(LineRole::FooterLeft)
        .next()
        .expect("left column");
    let right = page
        .layout
        .lines_with_role(LineRole::FooterRight)
        .next()
        .expect("right column");
    assert_eq!(left.ink_left(), 260);
    assert_eq!(right.ink_right(), PAGE_WIDTH as i32 - 260);

    let top = left.ink_top().min(right.ink_top());
    let bottom = left.ink_bottom().max(right.ink_bottom());
    let (min_x, max_x) = ink_columns(&page.image, top, bottom).expect("footer ink");
    assert!(min_x.abs_diff(260) <= 2, "left edge {min_x}");
    assert!((max_x + 1).abs_diff(PAGE_WIDTH - 260) <= 2, "right edge {max_x}");
}

#[test]
fn truetype_rendering_is_deterministic() {
    let (Some(first), Some(second)) = (truetype_generator(), truetype_generator()) else {
        eprintln!("Skipping TrueType determinism test: no system font found");
        return;
    };

    let request = FormTemplate::SelfDeclaration.request();
    let first = first.generate(&request).expect("first");
    let second = second.generate(&request).expect("second");
    assert_eq!(
        Sha256::digest(&first.bytes),
        Sha256::digest(&second.bytes),
        "PDF renders must be byte-identical"
    );
}
