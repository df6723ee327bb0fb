//! Image Resize API Module
//!
//! Flat-folder batch: every supported image in `input_dir` is decoded,
//! scaled down to a fixed height with Lanczos resampling, re-encoded in its
//! own format and written to `output_dir` under the same file name.

use crate::encode::encode_image;
use crate::formats::{supported_extensions, ImageKind, OutputEncoding};
use crate::geometry::{plan_resize, ResizePlan};
use crate::heif::HeifSupport;
use crate::metadata::read_exif;
use crate::{ResizeError, Result};
use anyhow::Context;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use shared_utils::{display_name, hidden_progress, print_line, BatchResult, ProgressBar};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_TARGET_HEIGHT: u32 = 1500;
pub const DEFAULT_QUALITY: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeConfig {
    /// Images taller than this are scaled down to exactly this height.
    pub target_height: u32,
    /// Lossy quality for JPEG / WebP / HEIF, 1..=100
    pub quality: u8,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            target_height: DEFAULT_TARGET_HEIGHT,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ResizeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.target_height == 0 {
            return Err(ResizeError::InvalidConfig(
                "target height must be positive".to_string(),
            ));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ResizeError::InvalidConfig(format!(
                "quality must be within 1..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// A decoded source image.
pub struct ImageFile {
    pub path: PathBuf,
    pub kind: ImageKind,
    pub pixels: DynamicImage,
    /// Container format sniffed from the file contents, if any
    pub detected_format: Option<ImageFormat>,
    /// Raw EXIF, only read for kinds that carry it
    pub exif: Option<Vec<u8>>,
}

impl ImageFile {
    pub fn open(path: &Path, kind: ImageKind) -> Result<Self> {
        let (pixels, detected_format) = match kind {
            ImageKind::Heif => (decode_heif(path)?, None),
            _ => {
                let reader = ImageReader::open(path)?.with_guessed_format()?;
                let format = reader.format();
                (reader.decode()?, format)
            }
        };

        let exif = if kind.carries_exif() {
            read_exif(path)
        } else {
            None
        };

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            pixels,
            detected_format,
            exif,
        })
    }

    /// Same file name inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> Result<PathBuf> {
        let name = self
            .path
            .file_name()
            .ok_or_else(|| ResizeError::InvalidPath(self.path.clone()))?;
        Ok(output_dir.join(name))
    }
}

#[cfg(feature = "heif")]
fn decode_heif(path: &Path) -> Result<DynamicImage> {
    crate::heif::decode(path)
}

#[cfg(not(feature = "heif"))]
fn decode_heif(_path: &Path) -> Result<DynamicImage> {
    Err(ResizeError::HeifUnavailable)
}

/// Resize and re-encode one file into `output_dir`. Existing output is
/// overwritten. Nothing is written when decoding or encoding fails.
pub fn resize_file(path: &Path, output_dir: &Path, config: &ResizeConfig) -> Result<PathBuf> {
    let kind =
        ImageKind::from_path(path).ok_or_else(|| ResizeError::InvalidPath(path.to_path_buf()))?;
    let source = ImageFile::open(path, kind)?;
    let output = source.output_path(output_dir)?;

    let ImageFile {
        pixels,
        detected_format,
        exif,
        ..
    } = source;

    let (width, height) = pixels.dimensions();
    let resized = match plan_resize(width, height, config.target_height)? {
        ResizePlan::Keep => pixels,
        ResizePlan::Resize {
            width: new_width,
            height: new_height,
        } => {
            debug!(
                file = %path.display(),
                from = %format!("{}x{}", width, height),
                to = %format!("{}x{}", new_width, new_height),
                "Lanczos resize"
            );
            pixels.resize_exact(new_width, new_height, FilterType::Lanczos3)
        }
    };

    let encoding = OutputEncoding::for_kind(kind, config.quality, detected_format);
    let exif = if encoding.embeds_exif() {
        exif.as_deref()
    } else {
        None
    };
    let bytes = encode_image(&resized, encoding, exif)?;

    fs::write(&output, bytes).map_err(|source| ResizeError::Write {
        path: output.clone(),
        source,
    })?;
    Ok(output)
}

pub fn resize_folder(
    input_dir: &Path,
    output_dir: &Path,
    config: &ResizeConfig,
    heif: HeifSupport,
) -> anyhow::Result<BatchResult> {
    resize_folder_with_progress(input_dir, output_dir, config, heif, &hidden_progress())
}

/// Same as [`resize_folder`], drawing per-file lines above `progress`.
pub fn resize_folder_with_progress(
    input_dir: &Path,
    output_dir: &Path,
    config: &ResizeConfig,
    heif: HeifSupport,
    progress: &ProgressBar,
) -> anyhow::Result<BatchResult> {
    config.validate()?;
    shared_utils::ensure_dir_exists(output_dir)?;
    let extensions = supported_extensions(heif);
    let files = shared_utils::collect_files(input_dir, &extensions)
        .with_context(|| format!("Failed to scan {}", input_dir.display()))?;

    info!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        files = files.len(),
        target_height = config.target_height,
        quality = config.quality,
        heif = heif.is_available(),
        "Starting resize batch"
    );
    progress.set_length(files.len() as u64);

    let mut batch = BatchResult::new();
    for path in files {
        let name = display_name(&path);
        progress.set_message(name.clone());
        print_line(progress, &format!("🖼️ Processing: {}", name));

        match resize_file(&path, output_dir, config) {
            Ok(output) => {
                print_line(progress, &format!("✅ Saved: {}", display_name(&output)));
                info!(file = %name, output = %output.display(), outcome = "saved", "Image resized");
                batch.success();
            }
            Err(e) => {
                print_line(progress, &format!("❌ Failed: {} – {}", name, e));
                info!(file = %name, outcome = "failed", error = %e, "Image resize failed");
                batch.fail(path, e.to_string());
            }
        }
        progress.inc(1);
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    fn save(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    fn dims(path: &Path) -> (u32, u32) {
        image::image_dimensions(path).unwrap()
    }

    fn config(target_height: u32) -> ResizeConfig {
        ResizeConfig {
            target_height,
            ..Default::default()
        }
    }

    fn sorted_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_default_config() {
        let config = ResizeConfig::default();
        assert_eq!(config.target_height, 1500);
        assert_eq!(config.quality, 85);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(config(0).validate().is_err());
        let bad_quality = ResizeConfig {
            quality: 0,
            ..Default::default()
        };
        assert!(bad_quality.validate().is_err());
        let too_high = ResizeConfig {
            quality: 101,
            ..Default::default()
        };
        assert!(too_high.validate().is_err());
    }

    #[test]
    fn test_tall_image_resized_to_even_width() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let src = save(input.path(), "portrait.jpg", &gradient(302, 400));

        let out = resize_file(&src, output.path(), &config(150)).unwrap();
        assert_eq!(out, output.path().join("portrait.jpg"));
        assert_eq!(dims(&out), (114, 150));
    }

    #[test]
    fn test_short_image_keeps_dimensions() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let src = save(input.path(), "small.png", &gradient(99, 60));

        let out = resize_file(&src, output.path(), &config(150)).unwrap();
        assert_eq!(dims(&out), (99, 60));
        // PNG is lossless; pass-through is pixel exact
        assert_eq!(
            image::open(&out).unwrap().to_rgb8(),
            image::open(&src).unwrap().to_rgb8()
        );
    }

    #[test]
    fn test_output_format_follows_extension() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let img = gradient(40, 200);
        for name in ["a.jpg", "b.png", "c.webp", "d.tiff", "e.bmp"] {
            let src = save(input.path(), name, &img);
            resize_file(&src, output.path(), &config(100)).unwrap();
        }

        let format = |name: &str| image::ImageReader::open(output.path().join(name))
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(format("a.jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(format("b.png"), Some(ImageFormat::Png));
        assert_eq!(format("c.webp"), Some(ImageFormat::WebP));
        assert_eq!(format("d.tiff"), Some(ImageFormat::Tiff));
        assert_eq!(format("e.bmp"), Some(ImageFormat::Bmp));
        assert_eq!(dims(&output.path().join("c.webp")), (20, 100));
    }

    #[test]
    fn test_jpeg_exif_preserved() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let mut jpeg = Vec::new();
        gradient(60, 300)
            .write_with_encoder(image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 90))
            .unwrap();
        let tagged =
            crate::metadata::embed_jpeg_exif(jpeg, &crate::metadata::orientation_exif(6)).unwrap();
        let src = input.path().join("camera.jpg");
        fs::write(&src, tagged).unwrap();

        let out = resize_file(&src, output.path(), &config(150)).unwrap();
        assert_eq!(dims(&out), (30, 150));

        let exif = read_exif(&out).expect("EXIF carried over");
        assert_eq!(exif, crate::metadata::orientation_exif(6));
    }

    #[test]
    fn test_degenerate_width_is_per_file_error() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let src = save(input.path(), "sliver.png", &gradient(1, 400));

        let err = resize_file(&src, output.path(), &config(10)).unwrap_err();
        assert!(matches!(err, ResizeError::DegenerateDimensions { .. }));
        assert!(!output.path().join("sliver.png").exists());
    }

    #[test]
    fn test_folder_mixed_inputs() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let img = gradient(80, 400);
        save(input.path(), "one.jpg", &img);
        save(input.path(), "two.png", &img);
        fs::write(input.path().join("notes.txt"), b"hello").unwrap();
        fs::write(input.path().join("clip.heic"), b"not decoded").unwrap();
        fs::create_dir(input.path().join("nested.jpg")).unwrap();

        let result = resize_folder(
            input.path(),
            output.path(),
            &config(200),
            HeifSupport::Unavailable,
        )
        .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.succeeded, 2);
        assert_eq!(sorted_names(output.path()), vec!["one.jpg", "two.png"]);
        assert_eq!(dims(&output.path().join("one.jpg")), (40, 200));
    }

    #[cfg(not(feature = "heif"))]
    #[test]
    fn test_heic_without_codec_fails_per_file() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        save(input.path(), "a.png", &gradient(20, 40));
        fs::write(input.path().join("phone.heic"), b"ftypheic").unwrap();

        let result = resize_folder(
            input.path(),
            output.path(),
            &config(20),
            HeifSupport::Available,
        )
        .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors[0].0, input.path().join("phone.heic"));
        assert_eq!(
            result.errors[0].1,
            ResizeError::HeifUnavailable.to_string()
        );
        assert_eq!(sorted_names(output.path()), vec!["a.png"]);
    }

    #[test]
    fn test_corrupt_file_does_not_stop_batch() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        save(input.path(), "good.png", &gradient(50, 300));
        fs::write(input.path().join("broken.jpg"), b"\xFF\xD8 definitely not a jpeg").unwrap();
        fs::write(input.path().join("empty.webp"), b"").unwrap();

        let result =
            resize_folder(input.path(), output.path(), &config(150), HeifSupport::Unavailable)
                .unwrap();

        assert_eq!(result.total, 3);
        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failed, 2);
        assert_eq!(sorted_names(output.path()), vec!["good.png"]);
    }

    #[test]
    fn test_second_run_is_noop_on_dimensions() {
        let input = TempDir::new().unwrap();
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        save(input.path(), "p.png", &gradient(303, 500));

        resize_folder(input.path(), first.path(), &config(250), HeifSupport::Unavailable).unwrap();
        resize_folder(first.path(), second.path(), &config(250), HeifSupport::Unavailable).unwrap();

        let once = dims(&first.path().join("p.png"));
        assert_eq!(once, (152, 250));
        assert_eq!(dims(&second.path().join("p.png")), once);
    }

    #[test]
    fn test_output_dir_created_and_overwritten() {
        let input = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let output = root.path().join("resized").join("1500px");
        save(input.path(), "a.png", &gradient(20, 20));
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("a.png"), b"stale").unwrap();

        resize_folder(input.path(), &output, &ResizeConfig::default(), HeifSupport::Unavailable)
            .unwrap();

        assert_eq!(dims(&output.join("a.png")), (20, 20));
    }

    #[test]
    fn test_missing_input_dir_is_error() {
        let root = TempDir::new().unwrap();
        let result = resize_folder(
            &root.path().join("missing"),
            &root.path().join("out"),
            &ResizeConfig::default(),
            HeifSupport::Unavailable,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config_rejected_before_scan() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let result = resize_folder(input.path(), output.path(), &config(0), HeifSupport::Unavailable);
        assert!(result.is_err());
    }
}
