//! EXIF carry-over
//!
//! 读取: kamadak-exif, 任意容器 (JPEG / HEIF / TIFF) 中的原始 TIFF 结构
//! 写入: img-parts, 作为 APP1 段插入 JPEG

use crate::{ResizeError, Result};
use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Raw EXIF (TIFF-structured) bytes, or `None` when absent or unreadable.
pub fn read_exif(path: &Path) -> Option<Vec<u8>> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Some(exif.buf().to_vec()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No EXIF carried");
            None
        }
    }
}

/// Insert `exif` into an encoded JPEG, replacing any existing EXIF segment.
pub fn embed_jpeg_exif(jpeg: Vec<u8>, exif: &[u8]) -> Result<Vec<u8>> {
    let mut jpeg = Jpeg::from_bytes(jpeg.into()).map_err(|e| ResizeError::Exif(e.to_string()))?;
    jpeg.set_exif(Some(exif.to_vec().into()));
    Ok(jpeg.encoder().bytes().to_vec())
}

/// Minimal little-endian TIFF block: one IFD0 entry, Orientation = `orientation`.
#[cfg(test)]
pub(crate) fn orientation_exif(orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II*\0");
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff
}
