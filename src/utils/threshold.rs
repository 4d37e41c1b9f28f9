//! Histogram valley thresholding for a single scanline
//!
//! Samples are binned by their top `BUCKET_BITS` bits. The two dominant
//! buckets are taken as the bar and space populations, and the emptiest
//! bucket between them becomes the threshold.

/// Histogram resolution in bits (32 buckets)
pub const BUCKET_BITS: u32 = 5;
const BUCKETS: usize = 1 << BUCKET_BITS;
const SHIFT: u32 = 8 - BUCKET_BITS;

/// Minimum index distance between the two peaks, so a shoulder of the
/// dominant peak is not mistaken for the second population.
const PEAK_SEPARATION: usize = 2;

/// Calculate the bar/space threshold of a scanline
pub fn histogram_threshold(scanline: &[u8]) -> u8 {
    let histogram = build_histogram(scanline);

    let peak_a = first_max(histogram.iter().copied().enumerate());
    let peak_b = first_max(
        histogram
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, _)| i.abs_diff(peak_a) > PEAK_SEPARATION),
    );

    let (lo, hi) = (peak_a.min(peak_b), peak_a.max(peak_b));
    let mut valley = lo;
    for i in lo..=hi {
        if histogram[i] < histogram[valley] {
            valley = i;
        }
    }

    (valley << SHIFT) as u8
}

fn build_histogram(scanline: &[u8]) -> [u32; BUCKETS] {
    let mut histogram = [0u32; BUCKETS];
    for &sample in scanline {
        histogram[(sample >> SHIFT) as usize] += 1;
    }
    histogram
}

// Earliest index wins on ties
fn first_max(buckets: impl Iterator<Item = (usize, u32)>) -> usize {
    let mut best: Option<(usize, u32)> = None;
    for (i, count) in buckets {
        match best {
            Some((_, c)) if count <= c => {}
            _ => best = Some((i, count)),
        }
    }
    best.map(|(i, _)| i).unwrap_or(0)
}
