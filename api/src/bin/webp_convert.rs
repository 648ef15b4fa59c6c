//! Convert every JPEG/PNG under a directory into a WebP sibling

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use vg_infra::convert_tree;

#[derive(Debug, Parser)]
#[command(name = "webp_convert", version, about = "Write a .webp next to every JPEG and PNG image")]
struct Args {
    /// Directory to walk
    #[arg(long, default_value = "images")]
    root: PathBuf,

    /// Accepted for compatibility; output is lossless
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: u8,
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    if !args.root.is_dir() {
        anyhow::bail!("{} is not a directory", args.root.display());
    }
    if args.quality != 80 {
        warn!("--quality {} ignored, WebP output is lossless", args.quality);
    }

    info!("Converting images under {}", args.root.display());
    let summary = convert_tree(&args.root);

    println!(
        "Converted {} image(s), {} failed",
        summary.converted.len(),
        summary.failed.len()
    );
    Ok(())
}
