//! Batch WebP conversion
//!
//! Walks a directory tree and writes a lossless `.webp` sibling next to every
//! JPEG or PNG it finds. Failures are reported per file and never stop the walk.

use image::codecs::webp::WebPEncoder;
use image::ExtendedColorType;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::InfrastructureError;

const SOURCE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Outcome of a tree conversion
#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl ConversionSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Whether `path` has a convertible extension, ignoring case
pub fn is_convertible(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
        .unwrap_or(false)
}

/// Convert one image, writing `<stem>.webp` in the same directory
pub fn convert_to_webp(path: &Path) -> Result<PathBuf, InfrastructureError> {
    let rgb = image::open(path)?.to_rgb8();
    let target = path.with_extension("webp");

    let writer = BufWriter::new(File::create(&target)?);
    WebPEncoder::new_lossless(writer).encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;

    Ok(target)
}

/// Convert every JPEG/PNG under `root`, recursing into subdirectories
pub fn convert_tree(root: &Path) -> ConversionSummary {
    let mut summary = ConversionSummary::default();
    walk(root, &mut summary);
    summary
}

fn walk(dir: &Path, summary: &mut ConversionSummary) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed {} {}", dir.display(), e);
            summary.failed.push((dir.to_path_buf(), e.to_string()));
            return;
        }
    };

    // file_type does not follow symlinks, so linked directories are skipped
    let mut paths: Vec<(PathBuf, bool)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            (entry.path(), is_dir)
        })
        .collect();
    paths.sort();

    for (path, is_dir) in paths {
        if is_dir {
            walk(&path, summary);
        } else if is_convertible(&path) {
            match convert_to_webp(&path) {
                Ok(target) => {
                    info!("Saved {}", target.display());
                    summary.converted.push(target);
                }
                Err(e) => {
                    error!("Failed {} {}", path.display(), e);
                    summary.failed.push((path, e.to_string()));
                }
            }
        }
    }
}
