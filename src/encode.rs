//! Single-page PDF encoding of a page canvas.
//!
//! The page image is embedded as one Flate-compressed `DeviceRGB` image
//! XObject and stretched over a page box sized from the pixel dimensions and
//! the canvas resolution. The document carries no timestamps or random IDs, so
//! equal images always encode to equal bytes.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::{Error, Result};

const POINTS_PER_INCH: f64 = 72.0;
const IMAGE_NAME: &str = "Im0";

/// Converts a pixel length at `dpi` into PDF points.
pub fn px_to_pt(px: u32, dpi: f64) -> f32 {
    (POINTS_PER_INCH * px as f64 / dpi) as f32
}

fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).map_err(Error::Compression)?;
    encoder.finish().map_err(Error::Compression)
}

/// Encodes `image` as a one-page PDF whose page box matches the image at `dpi`.
pub fn encode_page(image: &RgbImage, dpi: f64) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidPage(format!(
            "page image is {width}x{height} pixels"
        )));
    }
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(Error::InvalidPage(format!("resolution {dpi} DPI")));
    }

    let width_pt = px_to_pt(width, dpi);
    let height_pt = px_to_pt(height, dpi);
    let pixels = deflate(image.as_raw())?;

    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let image_id = document.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        pixels,
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width_pt.into(),
                    0.into(),
                    0.into(),
                    height_pt.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![IMAGE_NAME.into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = document.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    });

    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}
