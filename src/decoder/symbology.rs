//! Symbology codec: module widths <-> payload integer
//!
//! A code is six symbols of six elements each followed by a two-module stop
//! bar. The first five symbols are base-100 data digits, most significant
//! first; the sixth is a weighted checksum over them.

use super::tables::{
    ELEMENTS_PER_SYMBOL, MODULES_PER_SYMBOL, pack_widths, pattern_for_symbol, symbol_for_pattern,
    unpack_widths,
};
use crate::error::ScanFailure;

/// Data symbols per code
pub const DATA_SYMBOLS: usize = 5;

/// Data symbols plus checksum
pub const TOTAL_SYMBOLS: usize = DATA_SYMBOLS + 1;

/// Width of the trailing stop bar in modules
pub const STOP_WIDTH: u8 = 2;

/// Total width of a code in modules
pub const TOTAL_MODULES: u32 = TOTAL_SYMBOLS as u32 * MODULES_PER_SYMBOL + STOP_WIDTH as u32;

/// Widest element the symbology uses
pub const MAX_ELEMENT_WIDTH: u8 = 4;

/// Elements in an encoded module sequence
pub const SEQUENCE_LEN: usize = TOTAL_SYMBOLS * ELEMENTS_PER_SYMBOL + 1;

const CHECKSUM_START: u32 = 2;
const CHECKSUM_MODULUS: u32 = 103;
const DIGIT_BASE: u64 = 100;

/// Weighted checksum over the data symbols: start at 2, add `i * v` for the
/// 1-indexed position `i`, reduce mod 103.
pub fn checksum(data: &[u8]) -> u8 {
    let sum = data
        .iter()
        .enumerate()
        .fold(CHECKSUM_START, |acc, (i, &v)| acc + (i as u32 + 1) * v as u32);
    (sum % CHECKSUM_MODULUS) as u8
}

/// Check the overall shape of a module sequence before symbol lookup
pub fn validate_shape(modules: &[u8]) -> Result<(), ScanFailure> {
    let sum: u32 = modules.iter().map(|&m| m as u32).sum();
    if sum != TOTAL_MODULES {
        return Err(ScanFailure::WidthSum(sum));
    }
    match modules.last() {
        Some(&STOP_WIDTH) => {}
        Some(&w) => return Err(ScanFailure::StopWidth(w)),
        None => return Err(ScanFailure::EmptyBody),
    }
    if let Some(&w) = modules.iter().find(|&&m| m == 0 || m > MAX_ELEMENT_WIDTH) {
        return Err(ScanFailure::ModuleWidth(w));
    }
    Ok(())
}

/// Map six-element windows to symbol values.
/// Trailing elements that do not fill a window (the stop bar) are ignored.
pub fn read_symbols(modules: &[u8]) -> Result<Vec<u8>, ScanFailure> {
    modules
        .chunks_exact(ELEMENTS_PER_SYMBOL)
        .map(|window| {
            let pattern = pack_widths(window);
            symbol_for_pattern(pattern).ok_or(ScanFailure::UnknownPattern(pattern))
        })
        .collect()
}

/// Decode a normalized module sequence into its payload
pub fn decode_modules(modules: &[u8]) -> Result<u32, ScanFailure> {
    validate_shape(modules)?;

    let symbols = read_symbols(modules)?;
    if symbols.len() != TOTAL_SYMBOLS {
        return Err(ScanFailure::SymbolCount(symbols.len()));
    }

    let (data, check) = symbols.split_at(DATA_SYMBOLS);
    let expected = checksum(data);
    if expected != check[0] {
        return Err(ScanFailure::Checksum {
            expected,
            found: check[0],
        });
    }

    let mut value = 0u64;
    for &digit in data {
        if digit as u64 >= DIGIT_BASE {
            return Err(ScanFailure::DataSymbol(digit));
        }
        value = value * DIGIT_BASE + digit as u64;
    }
    u32::try_from(value).map_err(|_| ScanFailure::PayloadOverflow(value))
}

/// Split a value into its five base-100 data symbols, most significant first
pub fn data_symbols(value: u32) -> [u8; DATA_SYMBOLS] {
    let mut digits = [0u8; DATA_SYMBOLS];
    let mut rest = value as u64;
    for slot in digits.iter_mut().rev() {
        *slot = (rest % DIGIT_BASE) as u8;
        rest /= DIGIT_BASE;
    }
    digits
}

/// Encode a value into module widths, stop bar included.
/// Elements alternate bar/space starting with a bar.
pub fn encode_value(value: u32) -> Vec<u8> {
    let data = data_symbols(value);
    let check = checksum(&data);

    let mut modules = Vec::with_capacity(SEQUENCE_LEN);
    for symbol in data.into_iter().chain(std::iter::once(check)) {
        // Data digits are < 100 and the checksum < 103, all inside the table
        if let Some(pattern) = pattern_for_symbol(symbol) {
            modules.extend_from_slice(&unpack_widths(pattern));
        }
    }
    modules.push(STOP_WIDTH);
    modules
}
