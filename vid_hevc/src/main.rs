use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use vid_hevc::{transcode_folder_with_progress, FfmpegNvencEncoder, TranscodeParams};

#[derive(Parser)]
#[command(name = "vid-hevc")]
#[command(version, about = "Compress a folder of videos to 720p HEVC using NVIDIA NVENC", long_about = None)]
struct Cli {
    /// Folder with the source videos (not searched recursively)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output folder, created if missing
    #[arg(short, long, default_value = "compressed_720p_hevc")]
    output: PathBuf,

    /// NVENC preset: p1 (fastest) .. p7 (best quality)
    #[arg(long, default_value = "p5")]
    preset: String,

    /// Target and maximum video bitrate, e.g. 1.2M, 1.5M, 2M
    #[arg(long, default_value = "2M")]
    bitrate: String,

    /// ffmpeg executable to run
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = shared_utils::logging::init_logging(
        "vid_hevc",
        shared_utils::logging::LogConfig::default().with_verbose(cli.verbose),
    ) {
        eprintln!("⚠️  Could not initialize logging: {:#}", e);
    }

    let params = TranscodeParams::new(cli.preset, cli.bitrate);
    let encoder = FfmpegNvencEncoder::with_program(cli.ffmpeg);

    info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        ffmpeg = %encoder.program().display(),
        "vid-hevc run"
    );
    println!("🎬 HEVC 720p (NVENC) • preset {} • {}", params.preset, params.bitrate);

    let start = Instant::now();
    let progress = shared_utils::create_batch_progress(0, "HEVC");
    let result =
        transcode_folder_with_progress(&cli.input, &cli.output, &params, &encoder, &progress);
    progress.finish_and_clear();
    let result = result?;

    shared_utils::print_summary_report(&result, start.elapsed(), "HEVC Video");
    Ok(())
}
