//! Barcode and recipe decoding
//!
//! This module contains everything after a scanline has been reduced to
//! module widths:
//! - The fixed symbol width table
//! - Symbology decode/encode with checksum validation
//! - Calibration tables and level quantization
//! - Recipe word bit packing

/// Calibration tables (level -> ounces) and nearest-level quantization
pub mod calibration;
/// Environment-driven settings
pub mod config;
/// Recipe word <-> Recipe bit packing
pub mod recipe;
/// Module widths <-> payload integer
pub mod symbology;
/// Symbol width patterns
pub mod tables;
