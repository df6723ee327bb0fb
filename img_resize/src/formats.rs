//! Extension dispatch
//!
//! The on-disk kind of a source image is decided by its extension alone;
//! the output format and options follow from the kind.

use crate::heif::HeifSupport;
use image::ImageFormat;
use std::path::Path;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "tiff", "bmp", "heic", "heif"];

pub const HEIF_EXTENSIONS: &[&str] = &["heic", "heif"];

/// WebP compression effort, 0 (fast) .. 6 (smallest)
pub const WEBP_METHOD: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
    WebP,
    Tiff,
    Bmp,
    Heif,
}

impl ImageKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "webp" => Some(ImageKind::WebP),
            "tiff" => Some(ImageKind::Tiff),
            "bmp" => Some(ImageKind::Bmp),
            "heic" | "heif" => Some(ImageKind::Heif),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Kinds whose EXIF block is read from the source.
    pub fn carries_exif(self) -> bool {
        matches!(self, ImageKind::Jpeg | ImageKind::Heif | ImageKind::Tiff)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "JPEG",
            ImageKind::Png => "PNG",
            ImageKind::WebP => "WEBP",
            ImageKind::Tiff => "TIFF",
            ImageKind::Bmp => "BMP",
            ImageKind::Heif => "HEIF",
        }
    }
}

/// Extensions the resizer picks up; HEIC/HEIF only when the codec is present.
pub fn supported_extensions(heif: HeifSupport) -> Vec<&'static str> {
    IMAGE_EXTENSIONS
        .iter()
        .copied()
        .filter(|ext| heif.is_available() || !HEIF_EXTENSIONS.contains(ext))
        .collect()
}

/// How a processed image is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEncoding {
    Jpeg { quality: u8 },
    Heif { quality: u8 },
    /// Lossless; maximum compression effort
    Png,
    WebP { quality: u8, method: i32 },
    /// Whatever the decoder detected, TIFF when unknown. No extra options.
    Native(ImageFormat),
}

impl OutputEncoding {
    pub fn for_kind(kind: ImageKind, quality: u8, detected: Option<ImageFormat>) -> Self {
        match kind {
            ImageKind::Jpeg => OutputEncoding::Jpeg { quality },
            ImageKind::Heif => OutputEncoding::Heif { quality },
            ImageKind::Png => OutputEncoding::Png,
            ImageKind::WebP => OutputEncoding::WebP {
                quality,
                method: WEBP_METHOD,
            },
            ImageKind::Tiff | ImageKind::Bmp => {
                OutputEncoding::Native(detected.unwrap_or(ImageFormat::Tiff))
            }
        }
    }

    /// Only JPEG and HEIF outputs get the source EXIF re-embedded.
    pub fn embeds_exif(&self) -> bool {
        matches!(self, OutputEncoding::Jpeg { .. } | OutputEncoding::Heif { .. })
    }
}
