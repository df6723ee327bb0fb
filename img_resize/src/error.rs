use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HEIF support is not available in this build")]
    HeifUnavailable,

    #[error("HEIF error: {0}")]
    Heif(String),

    #[error("Resized width is zero ({width}x{height} scaled to height {target_height})")]
    DegenerateDimensions {
        width: u32,
        height: u32,
        target_height: u32,
    },

    #[error("Failed to embed EXIF: {0}")]
    Exif(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file path: {0}")]
    InvalidPath(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ResizeError>;
