//! Video Conversion API Module - HEVC/H.265 720p
//!
//! Flat-folder batch: every supported video in `input_dir` is handed to an
//! [`Encoder`] once, in filesystem order, and written to `output_dir` under
//! the same file name. A failing file is reported and the batch moves on.

use crate::encoder::{Encoder, TranscodeParams};
use crate::{Result, VidHevcError};
use anyhow::Context;
use shared_utils::{display_name, hidden_progress, print_line, BatchResult, ProgressBar};
use std::path::{Path, PathBuf};
use tracing::info;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "mov", "avi", "webm", "flv", "wmv"];

/// A source video. Never decoded in-process; only its path is handed to the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub path: PathBuf,
}

impl VideoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Same file name inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> Result<PathBuf> {
        let name = self
            .path
            .file_name()
            .ok_or_else(|| VidHevcError::InvalidPath(self.path.clone()))?;
        Ok(output_dir.join(name))
    }
}

/// Transcodes one file. The output is overwritten if it exists; a failed
/// encode may leave a partial output behind.
pub fn transcode_file(
    video: &VideoFile,
    output_dir: &Path,
    params: &TranscodeParams,
    encoder: &dyn Encoder,
) -> Result<PathBuf> {
    let output = video.output_path(output_dir)?;
    encoder.encode(&video.path, &output, params)?;
    Ok(output)
}

pub fn transcode_folder(
    input_dir: &Path,
    output_dir: &Path,
    params: &TranscodeParams,
    encoder: &dyn Encoder,
) -> anyhow::Result<BatchResult> {
    transcode_folder_with_progress(input_dir, output_dir, params, encoder, &hidden_progress())
}

/// Same as [`transcode_folder`], drawing per-file lines above `progress`.
pub fn transcode_folder_with_progress(
    input_dir: &Path,
    output_dir: &Path,
    params: &TranscodeParams,
    encoder: &dyn Encoder,
    progress: &ProgressBar,
) -> anyhow::Result<BatchResult> {
    shared_utils::ensure_dir_exists(output_dir)?;
    let files = shared_utils::collect_files(input_dir, VIDEO_EXTENSIONS)
        .with_context(|| format!("Failed to scan {}", input_dir.display()))?;

    info!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        files = files.len(),
        preset = %params.preset,
        bitrate = %params.bitrate,
        "Starting HEVC batch"
    );
    progress.set_length(files.len() as u64);

    let mut batch = BatchResult::new();
    for path in files {
        let name = display_name(&path);
        progress.set_message(name.clone());
        print_line(progress, &format!("🚀 Compressing (HEVC GPU): {} ...", name));

        match transcode_file(&VideoFile::new(&path), output_dir, params, encoder) {
            Ok(output) => {
                print_line(progress, &format!("✅ Done: {}", name));
                info!(file = %name, output = %output.display(), outcome = "done", "Video transcoded");
                batch.success();
            }
            Err(e) => {
                print_line(progress, &format!("❌ Failed: {} – {}", name, e));
                info!(file = %name, outcome = "failed", error = %e, "Video transcode failed");
                batch.fail(path, e.to_string());
            }
        }
        progress.inc(1);
    }

    Ok(batch)
}
