//! Per-format encoding
//!
//! Everything is encoded into memory first so that a failing encoder never
//! leaves a half-written file in the output folder.

use crate::formats::OutputEncoding;
use crate::metadata::embed_jpeg_exif;
use crate::{ResizeError, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;

/// Encode `img`; `exif` is only honoured by encodings that embed it.
pub fn encode_image(
    img: &DynamicImage,
    encoding: OutputEncoding,
    exif: Option<&[u8]>,
) -> Result<Vec<u8>> {
    match encoding {
        OutputEncoding::Jpeg { quality } => {
            let jpeg = encode_jpeg(img, quality)?;
            match exif {
                Some(exif) => embed_jpeg_exif(jpeg, exif),
                None => Ok(jpeg),
            }
        }
        OutputEncoding::Png => {
            let mut buf = Vec::new();
            let encoder =
                PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive);
            img.write_with_encoder(encoder)?;
            Ok(buf)
        }
        OutputEncoding::WebP { quality, method } => encode_webp(img, quality, method),
        OutputEncoding::Heif { quality } => encode_heif(img, quality, exif),
        OutputEncoding::Native(format) => {
            let mut cursor = Cursor::new(Vec::new());
            img.write_to(&mut cursor, format)?;
            Ok(cursor.into_inner())
        }
    }
}

/// JPEG has no alpha and no 16-bit; flatten to RGB8 (or L8 for grayscale).
/// Huffman tables are optimized per image.
fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    compress_jpeg(img, quality, true)
}

fn compress_jpeg(img: &DynamicImage, quality: u8, optimize: bool) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let (color_space, pixels) = if img.color().has_color() {
        (mozjpeg::ColorSpace::JCS_RGB, img.to_rgb8().into_raw())
    } else {
        (mozjpeg::ColorSpace::JCS_GRAYSCALE, img.to_luma8().into_raw())
    };

    let mut comp = mozjpeg::Compress::new(color_space);
    comp.set_size(width as usize, height as usize);
    comp.set_quality(quality as f32);
    comp.set_optimize_coding(optimize);

    let jpeg_err = |e: std::io::Error| ResizeError::Encode(format!("JPEG encoding failed: {}", e));
    let mut comp = comp.start_compress(Vec::new()).map_err(jpeg_err)?;
    comp.write_scanlines(&pixels).map_err(jpeg_err)?;
    comp.finish().map_err(jpeg_err)
}

fn encode_webp(img: &DynamicImage, quality: u8, method: i32) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut config = webp::WebPConfig::new()
        .map_err(|_| ResizeError::Encode("Failed to initialise WebP config".to_string()))?;
    config.quality = quality as f32;
    config.method = method;

    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        webp::Encoder::from_rgba(&rgba, width, height).encode_advanced(&config)
    } else {
        let rgb = img.to_rgb8();
        webp::Encoder::from_rgb(&rgb, width, height).encode_advanced(&config)
    }
    .map_err(|e| ResizeError::Encode(format!("WebP encoding failed: {:?}", e)))?;

    Ok(encoded.to_vec())
}

#[cfg(feature = "heif")]
fn encode_heif(img: &DynamicImage, quality: u8, exif: Option<&[u8]>) -> Result<Vec<u8>> {
    crate::heif::encode(img, quality, exif)
}

#[cfg(not(feature = "heif"))]
fn encode_heif(_img: &DynamicImage, _quality: u8, _exif: Option<&[u8]>) -> Result<Vec<u8>> {
    Err(ResizeError::HeifUnavailable)
}
