//! pod_barcode - scanline barcode reader and writer for drink-pod recipes
//!
//! Recognizes a fixed six-symbol barcode from a single row of camera luma,
//! validates its checksum, and unpacks the decoded integer into a drink
//! recipe. The reverse path packs a recipe into an integer and produces the
//! bar widths to print or display.
//!
//! ```
//! use pod_barcode::{Calibration, Glass, Liquor, Recipe, render, scan_line};
//!
//! let cal = Calibration::default();
//! let recipe = Recipe::new(Glass::Shaker)
//!     .with_pour(Liquor::Gin, 1.05)
//!     .with_water(3.0)
//!     .with_drink_id(42);
//! let word = recipe.to_word(&cal).unwrap();
//!
//! let line = render::render_scanline(word, 3, 0, 255);
//! assert_eq!(scan_line(&line), Some(word));
//! assert_eq!(Recipe::from_word(word, &cal).unwrap(), recipe);
//! ```

#![warn(missing_docs)]

/// Symbol table, symbology codec, calibration and recipe packing
pub mod decoder;
/// Run-length segmentation and module normalization
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (Recipe, LumaFrame, DrinkCatalog)
pub mod models;
mod pipeline;
/// Command-line helpers (image loading, batch scanning)
pub mod tools;
/// Thresholding and rendering
pub mod utils;

pub use decoder::calibration::Calibration;
pub use error::{CalibrationError, CatalogError, FailureKind, RecipeError, ScanFailure};
pub use models::{DrinkCatalog, Glass, Liquor, LumaFrame, Recipe, Strength};
pub use utils::render;

use pipeline::{ScanBuffers, scan_line_with};
use rayon::prelude::*;

/// Decode a single scanline
///
/// # Arguments
/// * `scanline` - Luma samples of one row (1 byte per pixel)
///
/// # Returns
/// The decoded integer, or None when this line holds no valid code
pub fn scan_line(scanline: &[u8]) -> Option<u32> {
    match try_scan_line(scanline) {
        Ok(value) => Some(value),
        Err(failure) => {
            tracing::trace!(kind = ?failure.kind(), "scanline rejected: {failure}");
            None
        }
    }
}

/// Decode a single scanline, reporting why it failed
pub fn try_scan_line(scanline: &[u8]) -> Result<u32, ScanFailure> {
    scan_line_with(scanline, &mut ScanBuffers::default())
}

/// Module widths to draw for a value, alternating bar/space starting with a
/// bar after the quiet zone
pub fn encode(value: u32) -> Vec<u8> {
    decoder::symbology::encode_value(value)
}

/// Device orientation, which decides the band of rows scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Rows 40%..=60% of the height
    Portrait,
    /// Rows 30%..=70% of the height
    #[default]
    Landscape,
}

impl Orientation {
    /// First scanned row, in tenths of the frame height
    fn band_start_tenths(&self) -> usize {
        match self {
            Orientation::Portrait => 4,
            Orientation::Landscape => 3,
        }
    }
}

/// Which rows of a frame are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Decides the band of rows
    pub orientation: Orientation,
    /// Distance between tried rows; 0 is treated as 1
    pub row_step: usize,
}

impl ScanConfig {
    /// Config for an orientation, row step from `POD_SCAN_ROW_STEP`
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            row_step: decoder::config::scan_row_step(),
        }
    }

    /// Rows to scan: the middle band of the frame, both ends inclusive
    pub fn rows(&self, height: usize) -> impl Iterator<Item = usize> {
        let start = self.orientation.band_start_tenths();
        let first = height * start / 10;
        let last = (height * (10 - start) / 10).min(height.saturating_sub(1));
        let band = if height == 0 { 1..=0 } else { first..=last };
        band.step_by(self.row_step.max(1))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

/// Try rows of a frame in order until one decodes
pub fn scan_frame(frame: &LumaFrame<'_>, config: &ScanConfig) -> Option<u32> {
    Scanner::new(*config).scan_frame(frame)
}

/// Scan a batch of frames in parallel, one result per frame
///
/// Each worker owns its scratch buffers, so frames never share state.
pub fn scan_frames(frames: &[LumaFrame<'_>], config: &ScanConfig) -> Vec<Option<u32>> {
    frames
        .par_iter()
        .map_init(|| Scanner::new(*config), |scanner, frame| scanner.scan_frame(frame))
        .collect()
}

/// Scanner with reusable scratch buffers
///
/// Use one per thread when scanning many frames of similar width.
#[derive(Debug)]
pub struct Scanner {
    config: ScanConfig,
    buffers: ScanBuffers,
}

impl Scanner {
    /// Scanner with empty buffers
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            buffers: ScanBuffers::with_capacity(256),
        }
    }

    /// Rows this scanner tries
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Decode a single scanline with this scanner's buffers
    pub fn scan_line(&mut self, scanline: &[u8]) -> Option<u32> {
        match scan_line_with(scanline, &mut self.buffers) {
            Ok(value) => Some(value),
            Err(failure) => {
                tracing::trace!(kind = ?failure.kind(), "scanline rejected: {failure}");
                None
            }
        }
    }

    /// Try the configured rows of a frame, first success wins
    pub fn scan_frame(&mut self, frame: &LumaFrame<'_>) -> Option<u32> {
        let config = self.config;
        let mut tried = 0usize;
        for y in config.rows(frame.height()) {
            let Some(line) = frame.scanline(y) else {
                continue;
            };
            tried += 1;
            if let Some(value) = self.scan_line(line) {
                tracing::debug!(row = y, value, "barcode decoded");
                return Some(value);
            }
        }
        tracing::debug!(rows = tried, "no barcode in frame");
        None
    }

    /// Scan a frame and unpack the decoded word into a recipe
    pub fn scan_recipe(
        &mut self,
        frame: &LumaFrame<'_>,
        calibration: &Calibration,
    ) -> Option<Result<Recipe, RecipeError>> {
        self.scan_frame(frame)
            .map(|word| Recipe::from_word(word, calibration))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::render::render_scanline;

    #[test]
    fn test_scan_empty() {
        assert_eq!(scan_line(&[]), None);
        assert_eq!(scan_line(&[0u8; 300]), None);
    }

    #[test]
    fn test_encode_matches_symbology() {
        assert_eq!(encode(77), decoder::symbology::encode_value(77));
        assert_eq!(encode(77).iter().map(|&m| m as u32).sum::<u32>(), 68);
    }

    #[test]
    fn test_rows_band() {
        let landscape = ScanConfig {
            orientation: Orientation::Landscape,
            row_step: 1,
        };
        let rows: Vec<usize> = landscape.rows(100).collect();
        assert_eq!(rows.first(), Some(&30));
        assert_eq!(rows.last(), Some(&70));

        let portrait = ScanConfig {
            orientation: Orientation::Portrait,
            row_step: 5,
        };
        let rows: Vec<usize> = portrait.rows(100).collect();
        assert_eq!(rows, vec![40, 45, 50, 55, 60]);

        assert_eq!(landscape.rows(0).count(), 0);
    }

    #[test]
    fn test_scanner_reuse() {
        let mut scanner = Scanner::default();
        for value in [5u32, 1_000_001, 2_147_483_647] {
            let line = render_scanline(value, 2, 30, 220);
            assert_eq!(scanner.scan_line(&line), Some(value));
        }
        assert_eq!(scanner.scan_line(&[128u8; 40]), None);
    }
}
