//! Scanline segmentation
//!
//! Turns a thresholded scanline into module widths:
//! - Run-length segmentation into alternating light/dark runs
//! - Quiet-zone trimming and scale-free normalization

/// Pixel runs -> module widths
pub mod normalize;
/// Scanline -> alternating run lengths
pub mod runs;
