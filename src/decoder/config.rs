use std::sync::OnceLock;

use super::calibration::DEFAULT_VERSION;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_string(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

static SCAN_ROW_STEP: OnceLock<usize> = OnceLock::new();

/// Rows skipped between scanline attempts within a frame
pub(crate) fn scan_row_step() -> usize {
    *SCAN_ROW_STEP.get_or_init(|| parse_env_usize("POD_SCAN_ROW_STEP", 1).clamp(1, 64))
}

static MAX_IMAGE_DIM: OnceLock<Option<u32>> = OnceLock::new();

/// Longest image side kept by the loaders; unset or 0 disables downscaling
pub(crate) fn max_image_dim() -> Option<u32> {
    *MAX_IMAGE_DIM.get_or_init(|| dim_limit(parse_env_usize("POD_MAX_DIM", 0)))
}

fn dim_limit(raw: usize) -> Option<u32> {
    match raw {
        0 => None,
        v => Some(u32::try_from(v).unwrap_or(u32::MAX)),
    }
}

static CALIBRATION_VERSION: OnceLock<String> = OnceLock::new();

/// Calibration version pinned for this deployment
pub fn calibration_version() -> &'static str {
    CALIBRATION_VERSION.get_or_init(|| parse_env_string("POD_CALIBRATION", DEFAULT_VERSION))
}
