//! Shared Utilities for the media batch shrink tools
//!
//! Common functionality used by both `img-resize` and `vid-hevc`:
//! - Logging initialization (tracing, rolling log file)
//! - Flat directory scanning and batch result aggregation
//! - Progress bar and end-of-run summary
//! - FFmpeg child process wrapper (stderr drained on a thread)

pub mod batch;
pub mod common_utils;
pub mod ffmpeg_process;
pub mod logging;
pub mod progress;
pub mod report;

pub use batch::{collect_files, BatchResult};
pub use common_utils::{display_name, ensure_dir_exists, get_extension_lowercase, has_extension};
pub use ffmpeg_process::{format_ffmpeg_error, FfmpegOutput, FfmpegProcess};
pub use progress::{create_batch_progress, format_duration, hidden_progress, print_line};
pub use indicatif::ProgressBar;
pub use report::print_summary_report;
