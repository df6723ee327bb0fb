//! HEIC/HEIF capability and codec glue
//!
//! HEIF decoding/encoding is backed by system libheif and only compiled in
//! with the `heif` cargo feature. The capability is probed once at startup
//! and passed into the batch explicitly.

use std::sync::Once;
use tracing::warn;

#[cfg(feature = "heif")]
use crate::{ResizeError, Result};
#[cfg(feature = "heif")]
use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};
#[cfg(feature = "heif")]
use libheif_rs::{
    Channel, ColorSpace, CompressionFormat, EncoderQuality, HeifContext, Image, LibHeif, RgbChroma,
};
#[cfg(feature = "heif")]
use std::path::Path;

pub const HEIF_UNAVAILABLE_WARNING: &str =
    "⚠️ Warning: HEIF support is not available. HEIC files will be skipped.";

static WARN_ONCE: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeifSupport {
    Available,
    Unavailable,
}

impl HeifSupport {
    /// Probe for a usable HEIF codec. Prints the warning line (once per
    /// process) when HEIC/HEIF files will be skipped.
    pub fn detect() -> Self {
        let support = Self::probe();
        if !support.is_available() {
            WARN_ONCE.call_once(|| {
                println!("{}", HEIF_UNAVAILABLE_WARNING);
                warn!("HEIF codec unavailable, heic/heif inputs excluded");
            });
        }
        support
    }

    #[cfg(feature = "heif")]
    fn probe() -> Self {
        if LibHeif::new()
            .encoder_for_format(CompressionFormat::Hevc)
            .is_ok()
        {
            HeifSupport::Available
        } else {
            HeifSupport::Unavailable
        }
    }

    #[cfg(not(feature = "heif"))]
    fn probe() -> Self {
        HeifSupport::Unavailable
    }

    pub fn is_available(self) -> bool {
        self == HeifSupport::Available
    }
}

#[cfg(feature = "heif")]
fn heif_err(context: &'static str) -> impl Fn(libheif_rs::HeifError) -> ResizeError {
    move |e| ResizeError::Heif(format!("{}: {}", context, e))
}

/// Decode the primary image to 8-bit RGB(A).
#[cfg(feature = "heif")]
pub fn decode(path: &Path) -> Result<DynamicImage> {
    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_file(&path.to_string_lossy())
        .map_err(heif_err("Failed to read HEIF"))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(heif_err("Failed to get primary image"))?;

    let has_alpha = handle.has_alpha_channel();
    let chroma = if has_alpha {
        RgbChroma::Rgba
    } else {
        RgbChroma::Rgb
    };
    let image = lib_heif
        .decode(&handle, ColorSpace::Rgb(chroma), None)
        .map_err(heif_err("Failed to decode HEIF"))?;

    let planes = image.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| ResizeError::Heif("No interleaved plane in decoded image".to_string()))?;

    let (width, height) = (plane.width, plane.height);
    let row_len = width as usize * if has_alpha { 4 } else { 3 };
    let mut data = Vec::with_capacity(row_len * height as usize);
    for row in plane.data.chunks(plane.stride).take(height as usize) {
        data.extend_from_slice(&row[..row_len]);
    }

    let decoded = if has_alpha {
        RgbaImage::from_raw(width, height, data).map(DynamicImage::ImageRgba8)
    } else {
        RgbImage::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
    };
    decoded.ok_or_else(|| ResizeError::Heif("Decoded plane size mismatch".to_string()))
}

/// Encode as HEVC-in-HEIF at `quality`, attaching `exif` to the primary image.
#[cfg(feature = "heif")]
pub fn encode(img: &DynamicImage, quality: u8, exif: Option<&[u8]>) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let (chroma, raw, channels) = if img.color().has_alpha() {
        (RgbChroma::Rgba, img.to_rgba8().into_raw(), 4)
    } else {
        (RgbChroma::Rgb, img.to_rgb8().into_raw(), 3)
    };

    let mut image = Image::new(width, height, ColorSpace::Rgb(chroma))
        .map_err(heif_err("Failed to allocate HEIF image"))?;
    image
        .create_plane(Channel::Interleaved, width, height, 8)
        .map_err(heif_err("Failed to create HEIF plane"))?;
    {
        let planes = image.planes_mut();
        let plane = planes
            .interleaved
            .ok_or_else(|| ResizeError::Heif("No interleaved plane to fill".to_string()))?;
        let stride = plane.stride;
        let row_len = width as usize * channels;
        for (y, src) in raw.chunks_exact(row_len).enumerate() {
            let start = y * stride;
            plane.data[start..start + row_len].copy_from_slice(src);
        }
    }

    let lib_heif = LibHeif::new();
    let mut ctx = HeifContext::new().map_err(heif_err("Failed to create HEIF context"))?;
    let mut encoder = lib_heif
        .encoder_for_format(CompressionFormat::Hevc)
        .map_err(heif_err("No HEVC encoder"))?;
    encoder
        .set_quality(EncoderQuality::Lossy(quality))
        .map_err(heif_err("Failed to set quality"))?;
    let handle = ctx
        .encode_image(&image, &mut encoder, None)
        .map_err(heif_err("Failed to encode HEIF"))?;

    if let Some(exif) = exif {
        ctx.add_exif_metadata(&handle, exif)
            .map_err(heif_err("Failed to attach EXIF"))?;
    }

    ctx.write_to_bytes().map_err(heif_err("Failed to write HEIF"))
}
