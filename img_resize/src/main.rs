use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use img_resize::{resize_folder_with_progress, HeifSupport, ResizeConfig};

#[derive(Parser)]
#[command(name = "img-resize")]
#[command(version, about = "Resize a folder of images to a fixed height, keeping EXIF", long_about = None)]
struct Cli {
    /// Folder with the source images (not searched recursively)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output folder, created if missing
    #[arg(short, long, default_value = "resized_1500px")]
    output: PathBuf,

    /// Target height in pixels; shorter images are left at their size
    #[arg(long, default_value_t = img_resize::DEFAULT_TARGET_HEIGHT,
          value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Quality for JPEG / WebP / HEIC output (1-100)
    #[arg(short, long, default_value_t = img_resize::DEFAULT_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = shared_utils::logging::init_logging(
        "img_resize",
        shared_utils::logging::LogConfig::default().with_verbose(cli.verbose),
    ) {
        eprintln!("⚠️  Could not initialize logging: {:#}", e);
    }

    let heif = HeifSupport::detect();
    let config = ResizeConfig {
        target_height: cli.height,
        quality: cli.quality,
    };

    info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        heif = heif.is_available(),
        "img-resize run"
    );
    println!(
        "📐 Resize to {}px height • quality {}",
        config.target_height, config.quality
    );

    let start = Instant::now();
    let progress = shared_utils::create_batch_progress(0, "Resize");
    let result = resize_folder_with_progress(&cli.input, &cli.output, &config, heif, &progress);
    progress.finish_and_clear();
    let result = result?;

    shared_utils::print_summary_report(&result, start.elapsed(), "Image Resize");
    Ok(())
}
