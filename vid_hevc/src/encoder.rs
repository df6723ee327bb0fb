//! Encoder backends
//!
//! [`Encoder`] is the seam between the batch loop and whatever actually
//! produces the HEVC file. The production backend is [`FfmpegNvencEncoder`],
//! which runs one synchronous ffmpeg process per file.

use crate::{Result, VidHevcError};
use shared_utils::FfmpegProcess;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

pub const HWACCEL: &str = "cuda";
/// Height 720, width derived from the aspect ratio and rounded to an even value.
pub const SCALE_FILTER: &str = "scale=-2:720";
pub const HEVC_ENCODER: &str = "hevc_nvenc";
pub const BUFFER_SIZE: &str = "3M";
pub const HEVC_PROFILE: &str = "main";
pub const AUDIO_CODEC: &str = "aac";
pub const AUDIO_BITRATE: &str = "128k";

pub const DEFAULT_PRESET: &str = "p4";
pub const DEFAULT_BITRATE: &str = "1.5M";

/// Per-run encoder settings. Both values are passed to ffmpeg verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeParams {
    /// NVENC preset, p1 (fastest) .. p7 (best compression)
    pub preset: String,
    /// Target and maximum video bitrate, e.g. "1.5M"
    pub bitrate: String,
}

impl TranscodeParams {
    pub fn new(preset: impl Into<String>, bitrate: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            bitrate: bitrate.into(),
        }
    }
}

impl Default for TranscodeParams {
    fn default() -> Self {
        Self::new(DEFAULT_PRESET, DEFAULT_BITRATE)
    }
}

pub trait Encoder {
    /// Transcode `input` into `output`, overwriting it if present.
    fn encode(&self, input: &Path, output: &Path, params: &TranscodeParams) -> Result<()>;
}

/// ffmpeg argument list (without the program name) for one file.
pub fn build_ffmpeg_args(input: &Path, output: &Path, params: &TranscodeParams) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-hwaccel".into(),
        HWACCEL.into(),
        "-i".into(),
        input.into(),
    ];
    args.extend(
        [
            "-vf",
            SCALE_FILTER,
            "-c:v",
            HEVC_ENCODER,
            "-preset",
            params.preset.as_str(),
            "-b:v",
            params.bitrate.as_str(),
            "-maxrate",
            params.bitrate.as_str(),
            "-bufsize",
            BUFFER_SIZE,
            "-profile:v",
            HEVC_PROFILE,
            "-c:a",
            AUDIO_CODEC,
            "-b:a",
            AUDIO_BITRATE,
            "-map_metadata",
            "0",
            "-y",
        ]
        .map(OsString::from),
    );
    args.push(output.into());
    args
}

/// Runs `ffmpeg` with CUDA decoding and the `hevc_nvenc` encoder.
///
/// The executable is resolved from `PATH` at spawn time; a missing binary
/// fails each file individually.
#[derive(Debug, Clone)]
pub struct FfmpegNvencEncoder {
    program: PathBuf,
}

impl FfmpegNvencEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for FfmpegNvencEncoder {
    fn default() -> Self {
        Self::with_program("ffmpeg")
    }
}

impl Encoder for FfmpegNvencEncoder {
    fn encode(&self, input: &Path, output: &Path, params: &TranscodeParams) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(build_ffmpeg_args(input, output, params));

        let process = FfmpegProcess::spawn(&mut cmd).map_err(|source| VidHevcError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        let result = process.wait_with_output()?;

        if !result.status.success() {
            return Err(VidHevcError::FfmpegFailed {
                exit_code: result.status.code(),
                diagnostics: result.stderr,
            });
        }

        debug!(
            input = %input.display(),
            output = %output.display(),
            duration_secs = result.duration.as_secs_f64(),
            "HEVC encode finished"
        );
        Ok(())
    }
}
