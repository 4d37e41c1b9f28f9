/// Quantization of pixel run lengths into module widths
///
/// The two quiet zones are the widest runs on the line, so anything narrower
/// than the second-widest run outside them is noise. Between the quiet zones
/// the narrowest run is one module, which makes the result independent of
/// the pixels-per-module scale.
pub fn normalize_runs(runs: &[usize]) -> Option<Vec<u8>> {
    let mut modules = Vec::new();
    normalize_runs_into(runs, &mut modules).then_some(modules)
}

/// Same as [`normalize_runs`], writing into a caller-owned buffer.
/// Returns false when no barcode body could be isolated.
pub fn normalize_runs_into(runs: &[usize], modules: &mut Vec<u8>) -> bool {
    modules.clear();

    let Some(body) = barcode_body(runs) else {
        return false;
    };
    let unit = match body.iter().min() {
        Some(&unit) if unit > 0 => unit as f32,
        _ => return false,
    };

    // Float-to-int `as` saturates, so oversized runs clamp to u8::MAX
    modules.extend(body.iter().map(|&run| (run as f32 / unit).round() as u8));
    true
}

/// Slice of runs between the two quiet zones
pub fn barcode_body(runs: &[usize]) -> Option<&[usize]> {
    let second = second_largest(runs)?;

    let start = runs.iter().position(|&r| r >= second)?;
    let end = runs.iter().rposition(|&r| r >= second)?;

    // Drop the quiet zones themselves
    let (start, end) = (start + 1, end);
    if start >= end {
        return None;
    }
    Some(&runs[start..end])
}

fn second_largest(runs: &[usize]) -> Option<usize> {
    if runs.len() < 2 {
        return None;
    }
    let mut sorted = runs.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    Some(sorted[1])
}
