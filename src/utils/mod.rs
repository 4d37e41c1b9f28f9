//! Utility functions for scanline processing
//!
//! - Histogram thresholding of raw luma samples
//! - Rasterizing encoded values back into bars

/// Bar layout and raster output
pub mod render;
/// Per-scanline histogram threshold
pub mod threshold;
