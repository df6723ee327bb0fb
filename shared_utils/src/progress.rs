//! Progress Bar Module
//!
//! 批量处理的统一进度条样式：████████▓▓░░░░░░
//!
//! 逐文件的结果行通过 [`ProgressBar::suspend`] 打印：进度条被隐藏
//! （非终端输出、测试）时照样输出。

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const PROGRESS_CHARS: &str = "█▓░";
pub const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
pub const BATCH_TEMPLATE: &str = "{spinner:.green} {prefix:.cyan.bold} ▕{bar:35.green/black}▏ {percent:>3}% • {pos}/{len} • ⏱️ {elapsed_precise} • {msg}";

/// 批量进度条（stderr，终端不可见时自动隐藏）
pub fn create_batch_progress(total: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(BATCH_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(PROGRESS_CHARS)
        .tick_chars(SPINNER_CHARS);
    pb.set_style(style);
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 库函数默认使用的不可见进度条
pub fn hidden_progress() -> ProgressBar {
    ProgressBar::hidden()
}

/// 在进度条上方打印一行（进度条隐藏时直接打印）
pub fn print_line(pb: &ProgressBar, line: &str) {
    pb.suspend(|| println!("{}", line));
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }

    #[test]
    fn test_batch_template_is_valid() {
        assert!(ProgressStyle::with_template(BATCH_TEMPLATE).is_ok());
    }

    #[test]
    fn test_hidden_progress_counts() {
        let pb = hidden_progress();
        pb.set_length(3);
        pb.inc(2);
        print_line(&pb, "still printed");
        assert_eq!(pb.position(), 2);
    }
}
