use shared_utils::format_ffmpeg_error;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VidHevcError {
    /// The encoder executable could not be started (missing from PATH, not executable).
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("FFmpeg failed{}: {}", exit_code_suffix(.exit_code), format_ffmpeg_error(.diagnostics))]
    FfmpegFailed {
        exit_code: Option<i32>,
        /// Full stderr of the encoder process
        diagnostics: String,
    },

    #[error("Invalid file path: {0}")]
    InvalidPath(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" (exit code {})", c))
        .unwrap_or_else(|| " (terminated by signal)".to_string())
}

pub type Result<T> = std::result::Result<T, VidHevcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffmpeg_failed_message_uses_error_line() {
        let err = VidHevcError::FfmpegFailed {
            exit_code: Some(1),
            diagnostics: "Input #0, mov\n[in#0] Error opening input: Invalid data found\n"
                .to_string(),
        };
        assert_eq!(
            err.to_string(),
            "FFmpeg failed (exit code 1): [in#0] Error opening input: Invalid data found"
        );
    }

    #[test]
    fn test_ffmpeg_failed_without_exit_code() {
        let err = VidHevcError::FfmpegFailed {
            exit_code: None,
            diagnostics: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "FFmpeg failed (terminated by signal): Unknown FFmpeg error"
        );
    }

    #[test]
    fn test_spawn_message_names_program() {
        let err = VidHevcError::Spawn {
            program: PathBuf::from("ffmpeg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert!(err.to_string().starts_with("Failed to start ffmpeg:"));
    }
}
