use std::fmt::{Display, Error, Formatter};

// Scan failures
//------------------------------------------------------------------------------

/// Coarse classification of a rejected scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Module sequence has the wrong shape
    Structural,
    /// A width group is not in the symbol table
    Lookup,
    /// Embedded checksum does not match the data symbols
    Checksum,
}

/// Why a scanline did not produce a value.
///
/// These are expected during live scanning and never fatal: the caller moves
/// on to the next row or frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFailure {
    /// Fewer than two runs: the line never crosses the threshold
    TooFewRuns(usize),
    /// Nothing between the two quiet zones
    EmptyBody,
    /// Module widths do not add up to a full code
    WidthSum(u32),
    /// Last element is not the stop bar
    StopWidth(u8),
    /// An element is zero or wider than four modules
    ModuleWidth(u8),
    /// Wrong number of six-element symbols
    SymbolCount(usize),
    /// A data symbol is not a base-100 digit
    DataSymbol(u8),
    /// Five digits fold past `u32::MAX`
    PayloadOverflow(u64),
    /// Width group missing from the symbol table
    UnknownPattern(u32),
    /// Checksum symbol disagrees with the data
    Checksum {
        /// Computed from the data symbols
        expected: u8,
        /// Read from the code
        found: u8,
    },
}

impl ScanFailure {
    /// Coarse class for diagnostics
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::TooFewRuns(_)
            | Self::EmptyBody
            | Self::WidthSum(_)
            | Self::StopWidth(_)
            | Self::ModuleWidth(_)
            | Self::SymbolCount(_)
            | Self::DataSymbol(_)
            | Self::PayloadOverflow(_) => FailureKind::Structural,
            Self::UnknownPattern(_) => FailureKind::Lookup,
            Self::Checksum { .. } => FailureKind::Checksum,
        }
    }
}

impl Display for ScanFailure {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::TooFewRuns(n) => write!(f, "only {n} runs in scanline"),
            Self::EmptyBody => f.write_str("no barcode body between quiet zones"),
            Self::WidthSum(sum) => write!(f, "module widths sum to {sum}, expected 68"),
            Self::StopWidth(w) => write!(f, "stop bar is {w} modules wide, expected 2"),
            Self::ModuleWidth(w) => write!(f, "module width {w} outside 1..=4"),
            Self::SymbolCount(n) => write!(f, "found {n} symbols, expected 6"),
            Self::DataSymbol(v) => write!(f, "data symbol {v} is not a base-100 digit"),
            Self::PayloadOverflow(v) => write!(f, "payload {v} does not fit in 32 bits"),
            Self::UnknownPattern(p) => write!(f, "unknown width pattern {p}"),
            Self::Checksum { expected, found } => {
                write!(f, "checksum {found} does not match computed {expected}")
            }
        }
    }
}

impl std::error::Error for ScanFailure {}

// Recipe errors
//------------------------------------------------------------------------------

/// Recipe word packing and unpacking errors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecipeError {
    /// Both glass bits set in this word
    InvalidGlass(u32),
    /// More liquors than level fields
    TooManyLiquors(usize),
    /// Level index past the end of the calibration table
    LevelOutOfRange {
        /// Index read from the word
        level: u8,
        /// Entries in the table
        len: usize,
    },
    /// Drink id does not fit in nine bits
    DrinkIdOutOfRange(u16),
    /// Negative, NaN or infinite amount
    InvalidAmount(f32),
}

impl Display for RecipeError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::InvalidGlass(word) => write!(f, "glass type unknown in word {word:#x}"),
            Self::TooManyLiquors(n) => write!(f, "{n} liquors present, at most 3 fit"),
            Self::LevelOutOfRange { level, len } => {
                write!(f, "level {level} outside calibration table of {len} entries")
            }
            Self::DrinkIdOutOfRange(id) => write!(f, "drink id {id} exceeds 511"),
            Self::InvalidAmount(amount) => write!(f, "invalid pour amount {amount}"),
        }
    }
}

impl std::error::Error for RecipeError {}

// Calibration errors
//------------------------------------------------------------------------------

/// Calibration table loading and validation errors
#[derive(Debug)]
pub enum CalibrationError {
    /// Named table has no entries
    EmptyTable(&'static str),
    /// More entries than the level field can address
    TableTooLong {
        /// `"liquor"` or `"water"`
        table: &'static str,
        /// Entries given
        len: usize,
        /// Entries allowed
        max: usize,
    },
    /// An entry is not above the one before it
    NotIncreasing {
        /// `"liquor"` or `"water"`
        table: &'static str,
        /// Offending entry
        index: usize,
    },
    /// Entry is negative or not finite, or a zero liquor level
    InvalidValue {
        /// `"liquor"` or `"water"`
        table: &'static str,
        /// Offending entry
        index: usize,
    },
    /// No built-in table by that name
    UnknownVersion(String),
    /// Malformed JSON
    Json(serde_json::Error),
}

impl Display for CalibrationError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::EmptyTable(table) => write!(f, "{table} table is empty"),
            Self::TableTooLong { table, len, max } => {
                write!(f, "{table} table has {len} entries, at most {max} allowed")
            }
            Self::NotIncreasing { table, index } => {
                write!(f, "{table} table is not strictly increasing at index {index}")
            }
            Self::InvalidValue { table, index } => {
                write!(f, "{table} table has an invalid amount at index {index}")
            }
            Self::UnknownVersion(name) => write!(f, "unknown calibration version {name:?}"),
            Self::Json(err) => write!(f, "malformed calibration: {err}"),
        }
    }
}

impl std::error::Error for CalibrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CalibrationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

// Catalog errors
//------------------------------------------------------------------------------

/// Drink catalog parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Line has no comma
    MissingName {
        /// 1-based line number
        line: usize,
    },
    /// Id is not a `u16`
    InvalidId {
        /// 1-based line number
        line: usize,
        /// Text found in the id column
        id: String,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::MissingName { line } => write!(f, "line {line}: expected `id,name`"),
            Self::InvalidId { line, id } => write!(f, "line {line}: invalid drink id {id:?}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Result alias for recipe packing
pub type RecipeResult<T> = Result<T, RecipeError>;
