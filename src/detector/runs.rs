/// Run-length segmentation of a thresholded scanline
///
/// Samples brighter than the threshold are light. Runs alternate starting
/// with light (the quiet zone), so a scanline that begins dark yields a
/// leading run of length zero.
pub fn segment_runs(scanline: &[u8], threshold: u8) -> Vec<usize> {
    let mut runs = Vec::new();
    segment_runs_into(scanline, threshold, &mut runs);
    runs
}

/// Same as [`segment_runs`], writing into a caller-owned buffer
pub fn segment_runs_into(scanline: &[u8], threshold: u8, runs: &mut Vec<usize>) {
    runs.clear();

    let mut current_light = true;
    let mut count = 0usize;
    for &sample in scanline {
        let light = sample > threshold;
        if light != current_light {
            runs.push(count);
            count = 0;
            current_light = light;
        }
        count += 1;
    }
    runs.push(count);
}
