//! End-to-end scanning tests on synthetic camera data
//!
//! Codes are rendered with the crate's own writer, then degraded (noise,
//! low contrast, framing) before being read back through the public API.

use pod_barcode::decoder::tables::{pattern_for_symbol, unpack_widths};
use pod_barcode::render::{QUIET_ZONE_MODULES, render_scanline};
use pod_barcode::{
    Calibration, FailureKind, Glass, Liquor, LumaFrame, Orientation, Recipe, ScanConfig,
    ScanFailure, Scanner, encode, scan_frame, scan_frames, scan_line, try_scan_line,
};

const WIDTH: usize = 640;
const HEIGHT: usize = 480;

/// Deterministic +/- `amp` noise
struct Noise(u32);

impl Noise {
    fn next(&mut self, amp: i32) -> i32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 % (2 * amp as u32 + 1)) as i32 - amp
    }
}

fn add_noise(line: &mut [u8], amp: i32, seed: u32) {
    let mut noise = Noise(seed);
    for px in line.iter_mut() {
        *px = (*px as i32 + noise.next(amp)).clamp(0, 255) as u8;
    }
}

/// Rasterize raw module widths with quiet zones, bar first
fn rasterize(widths: &[u8], module_px: usize) -> Vec<u8> {
    let quiet = QUIET_ZONE_MODULES as usize * module_px;
    let mut line = vec![230u8; quiet];
    for (i, &w) in widths.iter().enumerate() {
        let value = if i % 2 == 0 { 20 } else { 230 };
        line.extend(std::iter::repeat_n(value, w as usize * module_px));
    }
    line.extend(std::iter::repeat_n(230u8, quiet));
    line
}

/// A frame with the code drawn on rows `rows`, centred in the scan window
fn frame_with_code(value: u32, rows: std::ops::Range<usize>) -> Vec<u8> {
    let mut pixels = vec![210u8; WIDTH * HEIGHT];
    let code = render_scanline(value, 2, 25, 210);
    let start = WIDTH / 4 + (WIDTH / 2 - code.len()) / 2;
    for y in rows {
        let row = y * WIDTH + start;
        pixels[row..row + code.len()].copy_from_slice(&code);
    }
    pixels
}

fn every_row(orientation: Orientation) -> ScanConfig {
    ScanConfig {
        orientation,
        row_step: 1,
    }
}

#[test]
fn test_clean_lines_at_several_scales() {
    for module_px in 1..=6 {
        for value in [0u32, 7, 99, 100, 31_337, 4_294_967_295] {
            let line = render_scanline(value, module_px, 0, 255);
            assert_eq!(scan_line(&line), Some(value), "value {value} at {module_px}px");
        }
    }
}

#[test]
fn test_noisy_lines() {
    for (seed, value) in [(1u32, 55u32), (2, 123_456_789), (3, 3_000_000_000)] {
        let mut line = render_scanline(value, 3, 30, 220);
        add_noise(&mut line, 15, seed);
        assert_eq!(scan_line(&line), Some(value), "seed {seed}");
    }
}

#[test]
fn test_low_contrast_line() {
    let line = render_scanline(8_675_309, 4, 100, 140);
    assert_eq!(scan_line(&line), Some(8_675_309));
}

#[test]
fn test_clutter_outside_quiet_zones() {
    let code = render_scanline(424_242, 2, 20, 230);
    let mut line = vec![230u8; 40];
    // Short bars well away from the code, narrower than either quiet zone
    for x in (4..36).step_by(8) {
        line[x] = 20;
        line[x + 1] = 20;
    }
    line.extend_from_slice(&code);
    line.extend_from_slice(&[20, 20, 230, 230, 20, 230, 230, 230]);
    assert_eq!(scan_line(&line), Some(424_242));
}

#[test]
fn test_checksum_mismatch_is_reported() {
    let mut widths = encode(0);
    let one = unpack_widths(pattern_for_symbol(1).unwrap());
    widths[..6].copy_from_slice(&one);
    let line = rasterize(&widths, 3);
    let failure = try_scan_line(&line).unwrap_err();
    assert_eq!(failure, ScanFailure::Checksum { expected: 3, found: 2 });
    assert_eq!(failure.kind(), FailureKind::Checksum);
    assert_eq!(scan_line(&line), None);
}

#[test]
fn test_truncated_code_is_structural() {
    let widths = encode(1_234);
    let line = rasterize(&widths[..30], 2);
    let failure = try_scan_line(&line).unwrap_err();
    assert_eq!(failure.kind(), FailureKind::Structural);
}

#[test]
fn test_blank_and_empty_lines() {
    assert_eq!(scan_line(&[]), None);
    assert_eq!(scan_line(&[255u8; 500]), None);
    let mut noise = vec![128u8; 500];
    add_noise(&mut noise, 120, 99);
    assert_eq!(scan_line(&noise), None);
}

#[test]
fn test_scan_frame_finds_band_rows() {
    let pixels = frame_with_code(271_828, 200..280);
    let frame = LumaFrame::packed(&pixels, WIDTH, HEIGHT).unwrap();
    assert_eq!(scan_frame(&frame, &every_row(Orientation::Landscape)), Some(271_828));
    assert_eq!(scan_frame(&frame, &every_row(Orientation::Portrait)), Some(271_828));
}

#[test]
fn test_scan_frame_ignores_rows_outside_band() {
    // Landscape scans rows 144..=336, portrait 192..=288
    let top = frame_with_code(1, 0..100);
    let frame = LumaFrame::packed(&top, WIDTH, HEIGHT).unwrap();
    assert_eq!(scan_frame(&frame, &every_row(Orientation::Landscape)), None);

    let edge = frame_with_code(2, 150..180);
    let frame = LumaFrame::packed(&edge, WIDTH, HEIGHT).unwrap();
    assert_eq!(scan_frame(&frame, &every_row(Orientation::Landscape)), Some(2));
    assert_eq!(scan_frame(&frame, &every_row(Orientation::Portrait)), None);
}

#[test]
fn test_scan_frame_with_padded_stride() {
    let (width, stride) = (600usize, 640usize);
    let mut pixels = vec![0u8; stride * HEIGHT];
    let code = render_scanline(99_999, 2, 25, 210);
    // Window starts at width / 4 and spans stride / 2
    let start = width / 4 + 14;
    for y in 0..HEIGHT {
        let row = &mut pixels[y * stride..y * stride + width];
        row.fill(210);
        if (220..260).contains(&y) {
            row[start..start + code.len()].copy_from_slice(&code);
        }
    }
    let frame = LumaFrame::new(&pixels, width, HEIGHT, stride).unwrap();
    assert_eq!(scan_frame(&frame, &every_row(Orientation::Landscape)), Some(99_999));
}

#[test]
fn test_scan_frames_keeps_order() {
    let values = [10u32, 20_000, 3_000_000, 400_000_000];
    let buffers: Vec<Vec<u8>> = values
        .iter()
        .map(|&v| frame_with_code(v, 230..250))
        .chain(std::iter::once(vec![210u8; WIDTH * HEIGHT]))
        .collect();
    let frames: Vec<LumaFrame<'_>> = buffers
        .iter()
        .map(|b| LumaFrame::packed(b, WIDTH, HEIGHT).unwrap())
        .collect();

    let results = scan_frames(&frames, &every_row(Orientation::Landscape));
    assert_eq!(
        results,
        vec![Some(10), Some(20_000), Some(3_000_000), Some(400_000_000), None]
    );
}

#[test]
fn test_scan_recipe_from_frame() {
    let cal = Calibration::default();
    let recipe = Recipe::new(Glass::Lowball)
        .with_pour(Liquor::Rum, 1.4)
        .with_pour(Liquor::Tequila, 0.55)
        .with_pour(Liquor::Whiskey, 3.0)
        .with_water(1.5)
        .with_drink_id(511);
    let word = recipe.to_word(&cal).unwrap();

    let pixels = frame_with_code(word, 236..244);
    let frame = LumaFrame::packed(&pixels, WIDTH, HEIGHT).unwrap();
    let mut scanner = Scanner::new(every_row(Orientation::Portrait));
    assert_eq!(scanner.scan_recipe(&frame, &cal), Some(Ok(recipe)));

    let blank = vec![210u8; WIDTH * HEIGHT];
    let frame = LumaFrame::packed(&blank, WIDTH, HEIGHT).unwrap();
    assert_eq!(scanner.scan_recipe(&frame, &cal), None);
}
