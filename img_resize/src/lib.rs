//! img-resize - Batch Fixed-Height Image Resizer
//!
//! Every image in a flat folder is scaled down to a fixed height:
//! - Lanczos3 resampling, width follows the aspect ratio and is kept even
//! - images at or below the target height keep their dimensions
//! - same format out as in (JPEG / PNG / WebP / TIFF / BMP / HEIC)
//! - EXIF carried over into JPEG and HEIF output
//!
//! HEIC/HEIF needs the `heif` feature and system libheif; without it those
//! files are skipped with a one-time warning.
//!
//! ```rust,ignore
//! use img_resize::{resize_folder, HeifSupport, ResizeConfig};
//! use std::path::Path;
//!
//! let result = resize_folder(
//!     Path::new("photos"),
//!     Path::new("resized_1500px"),
//!     &ResizeConfig::default(),
//!     HeifSupport::detect(),
//! )?;
//! ```

pub mod encode;
pub mod error;
pub mod formats;
pub mod geometry;
pub mod heif;
pub mod metadata;
pub mod resize_api;

pub use encode::encode_image;
pub use error::{ResizeError, Result};
pub use formats::{supported_extensions, ImageKind, OutputEncoding, IMAGE_EXTENSIONS};
pub use geometry::{plan_resize, ResizePlan};
pub use heif::HeifSupport;
pub use metadata::{embed_jpeg_exif, read_exif};
pub use resize_api::{
    resize_file, resize_folder, resize_folder_with_progress, ImageFile, ResizeConfig,
    DEFAULT_QUALITY, DEFAULT_TARGET_HEIGHT,
};
