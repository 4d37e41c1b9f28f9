use crate::decoder::config::max_image_dim;
use crate::error::{FailureKind, ScanFailure};
use crate::{LumaFrame, ScanConfig, try_scan_line};
use image::GenericImageView;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions picked up by [`image_iter`]
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// A decoded luma plane with its dimensions
#[derive(Debug, Clone)]
pub struct LumaImage {
    /// Packed rows, one byte per pixel
    pub pixels: Vec<u8>,
    /// Pixels per row
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl LumaImage {
    /// View as a packed [`LumaFrame`]
    pub fn frame(&self) -> Option<LumaFrame<'_>> {
        LumaFrame::packed(&self.pixels, self.width, self.height)
    }
}

/// Load an image file as a luma plane, downscaling when `POD_MAX_DIM` is set.
pub fn load_luma<P: AsRef<Path>>(path: P) -> Result<LumaImage, image::ImageError> {
    let img = image::open(path)?;
    let (w, h) = img.dimensions();
    let luma = match max_image_dim() {
        Some(limit) if w.max(h) > limit => img
            .resize(limit, limit, image::imageops::FilterType::Triangle)
            .to_luma8(),
        _ => img.to_luma8(),
    };
    let (width, height) = luma.dimensions();
    Ok(LumaImage {
        pixels: luma.into_raw(),
        width: width as usize,
        height: height as usize,
    })
}

/// Luma range of an image, for judging exposure before scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrayStats {
    /// Darkest sample (255 for an empty plane)
    pub min: u8,
    /// Brightest sample
    pub max: u8,
    /// Mean, rounded down
    pub avg: u8,
}

/// Min, max and mean luma of a plane
pub fn grayscale_stats(luma: &[u8]) -> GrayStats {
    let (min, max, sum) = luma
        .iter()
        .fold((u8::MAX, u8::MIN, 0u64), |(lo, hi, sum), &v| {
            (lo.min(v), hi.max(v), sum + v as u64)
        });
    let avg = sum.checked_div(luma.len() as u64).unwrap_or(0) as u8;
    GrayStats { min, max, avg }
}

/// Per-frame breakdown of why rows failed to decode
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Rows with a readable scan window
    pub rows_tried: usize,
    /// Rows rejected as [`FailureKind::Structural`]
    pub structural: usize,
    /// Rows rejected as [`FailureKind::Lookup`]
    pub lookup: usize,
    /// Rows rejected as [`FailureKind::Checksum`]
    pub checksum: usize,
    /// First successful row and its value
    pub decoded: Option<(usize, u32)>,
    /// Most recent failure, for display
    pub last_failure: Option<ScanFailure>,
}

/// Scan every configured row of a frame, collecting failure counts.
/// Stops at the first successful row like the regular scan.
pub fn scan_report(frame: &LumaFrame<'_>, config: &ScanConfig) -> ScanReport {
    let mut report = ScanReport::default();
    for y in config.rows(frame.height()) {
        let Some(line) = frame.scanline(y) else {
            continue;
        };
        report.rows_tried += 1;
        match try_scan_line(line) {
            Ok(value) => {
                report.decoded = Some((y, value));
                break;
            }
            Err(failure) => {
                match failure.kind() {
                    FailureKind::Structural => report.structural += 1,
                    FailureKind::Lookup => report.lookup += 1,
                    FailureKind::Checksum => report.checksum += 1,
                }
                report.last_failure = Some(failure);
            }
        }
    }
    report
}

/// Scan a set of image files in parallel, one result per file
pub fn scan_files(paths: &[PathBuf], config: &ScanConfig) -> Vec<(PathBuf, Option<u32>)> {
    paths
        .par_iter()
        .map(|path| {
            let value = match load_luma(path) {
                Ok(img) => img.frame().and_then(|f| crate::scan_frame(&f, config)),
                Err(err) => {
                    tracing::warn!("failed to load {}: {err}", path.display());
                    None
                }
            };
            (path.clone(), value)
        })
        .collect()
}

/// Iterate image paths under `root`, sorted, with an optional limit.
pub fn image_iter<P: AsRef<Path>>(root: P, limit: Option<usize>) -> impl Iterator<Item = PathBuf> {
    let mut images = collect_images(root.as_ref());
    images.sort();
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    images.into_iter()
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

// Unreadable directories are skipped
fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut pending = vec![root.to_path_buf()];
    let mut images = Vec::new();
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if is_image(&path) {
                images.push(path);
            }
        }
    }
    images
}
