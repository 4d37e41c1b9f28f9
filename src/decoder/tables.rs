use std::collections::HashMap;
use std::sync::OnceLock;

/// Number of symbols in the alphabet
pub const SYMBOL_COUNT: usize = 107;

/// Elements (bars and spaces) per symbol
pub const ELEMENTS_PER_SYMBOL: usize = 6;

/// Modules per symbol; every row of the table sums to this
pub const MODULES_PER_SYMBOL: u32 = 11;

/// Bar/space widths of every symbol, indexed by symbol value. Each entry packs
/// six widths as base-10 digits, first element most significant.
pub static WIDTH_PATTERNS: [u32; SYMBOL_COUNT] = [
    212222, 222122, 222221, 121223, 121322, 131222, 122213, 122312, 132212, 221213, // 0-9
    221312, 231212, 112232, 122132, 122231, 113222, 123122, 123221, 223211, 221132, // 10-19
    221231, 213212, 223112, 312131, 311222, 321122, 321221, 312212, 322112, 322211, // 20-29
    212123, 212321, 232121, 111323, 131123, 131321, 112313, 132113, 132311, 211313, // 30-39
    231113, 231311, 112133, 112331, 132131, 113123, 113321, 133121, 313121, 211331, // 40-49
    231131, 213113, 213311, 213131, 311123, 311321, 331121, 312113, 312311, 332111, // 50-59
    314111, 221411, 431111, 111224, 111422, 121124, 121421, 141122, 141221, 112214, // 60-69
    112412, 122114, 122411, 142112, 142211, 241211, 221114, 413111, 241112, 134111, // 70-79
    111242, 121142, 121241, 114212, 124112, 124211, 411212, 421112, 421211, 212141, // 80-89
    214121, 412121, 111143, 111341, 131141, 114113, 114311, 411113, 411311, 113141, // 90-99
    114131, 311141, 411131, 211412, 211214, 211232, 233111, // 100-106
];

static PATTERN_TO_SYMBOL: OnceLock<HashMap<u32, u8>> = OnceLock::new();

fn pattern_index() -> &'static HashMap<u32, u8> {
    PATTERN_TO_SYMBOL.get_or_init(|| {
        WIDTH_PATTERNS
            .iter()
            .enumerate()
            .map(|(value, &pattern)| (pattern, value as u8))
            .collect()
    })
}

/// Look up the symbol value of a packed width pattern
pub fn symbol_for_pattern(pattern: u32) -> Option<u8> {
    pattern_index().get(&pattern).copied()
}

/// Packed width pattern of a symbol value
pub fn pattern_for_symbol(symbol: u8) -> Option<u32> {
    WIDTH_PATTERNS.get(symbol as usize).copied()
}

/// Fold six element widths into a packed pattern
pub fn pack_widths(widths: &[u8]) -> u32 {
    widths.iter().fold(0u32, |acc, &w| acc * 10 + w as u32)
}

/// Unpack a pattern into its element widths, first element first
pub fn unpack_widths(pattern: u32) -> [u8; ELEMENTS_PER_SYMBOL] {
    let mut widths = [0u8; ELEMENTS_PER_SYMBOL];
    let mut rest = pattern;
    for slot in widths.iter_mut().rev() {
        *slot = (rest % 10) as u8;
        rest /= 10;
    }
    widths
}
