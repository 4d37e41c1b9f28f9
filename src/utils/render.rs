//! Rasterizing encoded values into bars

use image::{GrayImage, Luma};

use crate::decoder::symbology::{TOTAL_MODULES, encode_value};

/// Light margin on each side of the symbol, in modules
pub const QUIET_ZONE_MODULES: u32 = 34;

/// Full printed width in modules, quiet zones included
pub const PRINTED_MODULES: u32 = QUIET_ZONE_MODULES * 2 + TOTAL_MODULES;

/// One dark bar, in module units from the left edge of the quiet zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    /// Left edge
    pub x: u32,
    /// Width in modules
    pub width: u32,
}

/// Dark bars of an encoded value. Elements alternate bar/space starting with
/// a bar right after the quiet zone.
pub fn bar_layout(value: u32) -> Vec<Bar> {
    let mut bars = Vec::new();
    let mut x = QUIET_ZONE_MODULES;
    for (i, &width) in encode_value(value).iter().enumerate() {
        let width = width as u32;
        if i % 2 == 0 {
            bars.push(Bar { x, width });
        }
        x += width;
    }
    bars
}

/// One row of intensities for an encoded value, `module_px` pixels per module
pub fn render_scanline(value: u32, module_px: u32, dark: u8, light: u8) -> Vec<u8> {
    let len = (PRINTED_MODULES * module_px) as usize;
    let mut row = vec![light; len];
    for bar in bar_layout(value) {
        let start = (bar.x * module_px) as usize;
        let end = ((bar.x + bar.width) * module_px) as usize;
        row[start..end].fill(dark);
    }
    row
}

/// Render an encoded value as a black-on-white image
pub fn render_image(value: u32, module_px: u32, height: u32) -> GrayImage {
    let row = render_scanline(value, module_px.max(1), 0, 255);
    let mut canvas = GrayImage::new(row.len() as u32, height);
    for (x, _, pixel) in canvas.enumerate_pixels_mut() {
        *pixel = Luma([row[x as usize]]);
    }
    canvas
}
