//! vid-hevc - Batch 720p HEVC/H.265 Transcoder
//!
//! Every video in a flat folder is re-encoded through ffmpeg with CUDA
//! decoding and the `hevc_nvenc` encoder:
//! - 720p, width derived from the aspect ratio (even)
//! - HEVC Main profile, target = max bitrate, 3M buffer
//! - AAC 128k audio, container metadata copied
//!
//! ```rust,ignore
//! use vid_hevc::{transcode_folder, FfmpegNvencEncoder, TranscodeParams};
//! use std::path::Path;
//!
//! let result = transcode_folder(
//!     Path::new("videos"),
//!     Path::new("compressed_720p_hevc"),
//!     &TranscodeParams::new("p5", "2M"),
//!     &FfmpegNvencEncoder::new(),
//! )?;
//! ```

pub mod conversion_api;
pub mod encoder;
pub mod error;

pub use conversion_api::{
    transcode_file, transcode_folder, transcode_folder_with_progress, VideoFile, VIDEO_EXTENSIONS,
};
pub use encoder::{build_ffmpeg_args, Encoder, FfmpegNvencEncoder, TranscodeParams};
pub use error::{Result, VidHevcError};
