//! Report Module
//!
//! End-of-run summary for the batch tools.

use crate::batch::BatchResult;
use crate::progress::format_duration;
use console::style;
use std::time::Duration;

pub fn print_summary_report(result: &BatchResult, duration: Duration, operation_name: &str) {
    println!();
    println!("╔══════════════════════════════════════════════╗");
    println!("║  📊 {:<40} ║", format!("{} Summary", operation_name));
    println!("╠══════════════════════════════════════════════╣");
    println!("║  📁 Files Processed:    {:>10}           ║", result.total);
    println!(
        "║  ✅ Succeeded:          {:>10}           ║",
        style(result.succeeded).green()
    );
    println!(
        "║  ❌ Failed:             {:>10}           ║",
        style(result.failed).red()
    );
    println!(
        "║  📈 Success Rate:       {:>9.1}%           ║",
        result.success_rate()
    );
    println!(
        "║  ⏱️  Total Time:         {:>10}           ║",
        format_duration(duration)
    );
    println!("╚══════════════════════════════════════════════╝");

    if !result.errors.is_empty() {
        println!();
        println!("{}", style("❌ Errors encountered:").red().bold());
        for (path, error) in &result.errors {
            println!("   {} → {}", path.display(), error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_summary_report_no_panic() {
        let mut result = BatchResult::new();
        result.success();
        result.fail(std::path::PathBuf::from("clip.mkv"), "Error".to_string());
        print_summary_report(&result, Duration::from_secs(10), "HEVC Video");
        print_summary_report(&BatchResult::new(), Duration::ZERO, "Image Resize");
    }
}
