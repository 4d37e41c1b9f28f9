use crate::decoder::symbology::decode_modules;
use crate::detector::normalize::normalize_runs_into;
use crate::detector::runs::segment_runs_into;
use crate::error::ScanFailure;
use crate::utils::threshold::histogram_threshold;

/// Scratch space for one scanline attempt
#[derive(Debug, Default)]
pub(crate) struct ScanBuffers {
    pub(crate) runs: Vec<usize>,
    pub(crate) modules: Vec<u8>,
}

impl ScanBuffers {
    pub(crate) fn with_capacity(runs: usize) -> Self {
        Self {
            runs: Vec::with_capacity(runs),
            modules: Vec::with_capacity(runs),
        }
    }
}

/// Threshold -> runs -> modules -> payload for one scanline
pub(crate) fn scan_line_with(
    scanline: &[u8],
    buffers: &mut ScanBuffers,
) -> Result<u32, ScanFailure> {
    let threshold = histogram_threshold(scanline);

    segment_runs_into(scanline, threshold, &mut buffers.runs);
    if buffers.runs.len() < 2 {
        return Err(ScanFailure::TooFewRuns(buffers.runs.len()));
    }

    if !normalize_runs_into(&buffers.runs, &mut buffers.modules) {
        return Err(ScanFailure::EmptyBody);
    }

    decode_modules(&buffers.modules)
}
