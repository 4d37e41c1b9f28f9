use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pod_barcode::render::render_scanline;
use pod_barcode::utils::threshold::histogram_threshold;
use pod_barcode::{Calibration, Glass, Liquor, LumaFrame, Recipe, ScanConfig, Scanner, encode};

/// A 640-wide camera row with the code in the middle half
fn camera_row(value: u32) -> Vec<u8> {
    let code = render_scanline(value, 2, 40, 210);
    let mut row = vec![210u8; 640];
    let start = 160 + (320 - code.len()) / 2;
    row[start..start + code.len()].copy_from_slice(&code);
    row
}

fn bench_threshold(c: &mut Criterion) {
    let row = camera_row(123_456);
    c.bench_function("histogram_threshold_640", |b| {
        b.iter(|| histogram_threshold(black_box(&row)))
    });
}

fn bench_scan_line_hit(c: &mut Criterion) {
    let line = render_scanline(2_000_000_001, 3, 30, 220);
    let mut scanner = Scanner::default();
    c.bench_function("scan_line_hit", |b| {
        b.iter(|| scanner.scan_line(black_box(&line)))
    });
}

fn bench_scan_line_miss(c: &mut Criterion) {
    let line: Vec<u8> = (0..320u32).map(|x| ((x * 37) % 251) as u8).collect();
    let mut scanner = Scanner::default();
    c.bench_function("scan_line_noise", |b| {
        b.iter(|| scanner.scan_line(black_box(&line)))
    });
}

fn bench_scan_frame_480p(c: &mut Criterion) {
    // Bars only on the last scanned row so every band row is tried
    let mut pixels = vec![200u8; 640 * 480];
    let y = 480 * 7 / 10;
    pixels[y * 640..(y + 1) * 640].copy_from_slice(&camera_row(42));
    let config = ScanConfig {
        row_step: 1,
        ..ScanConfig::default()
    };
    c.bench_function("scan_frame_640x480_worst_row", |b| {
        b.iter(|| {
            let frame = LumaFrame::packed(black_box(&pixels), 640, 480).unwrap();
            pod_barcode::scan_frame(&frame, &config)
        })
    });
}

fn bench_encode(c: &mut Criterion) {
    let cal = Calibration::default();
    let recipe = Recipe::new(Glass::Highball)
        .with_pour(Liquor::Rum, 1.4)
        .with_pour(Liquor::Whiskey, 0.8)
        .with_water(2.5)
        .with_drink_id(300);
    c.bench_function("recipe_to_widths", |b| {
        b.iter(|| {
            let word = black_box(&recipe).to_word(&cal).unwrap();
            encode(word)
        })
    });
}

criterion_group!(
    benches,
    bench_threshold,
    bench_scan_line_hit,
    bench_scan_line_miss,
    bench_scan_frame_480p,
    bench_encode
);
criterion_main!(benches);
