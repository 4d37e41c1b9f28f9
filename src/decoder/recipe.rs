//! Recipe word bit packing
//!
//! Layout, least significant bit first:
//! - bit 0: format marker, always 1
//! - bits 1-2: glass
//! - bits 3-7: water level
//! - bits 8-12: presence bit per liquor (gin, rum, vodka, tequila, whiskey)
//! - bits 13-21: one 3-bit level per present liquor, in presence order
//! - bits 22-30: drink id

use super::calibration::Calibration;
use crate::error::{RecipeError, RecipeResult};
use crate::models::recipe::{Glass, LIQUOR_COUNT, Liquor, Recipe};

/// Bit 0 of every recipe word
pub const FORMAT_MARKER: u32 = 1;
const GLASS_SHIFT: u32 = 1;
const GLASS_MASK: u32 = 0b11;
const WATER_SHIFT: u32 = 3;
const WATER_MASK: u32 = 0b1_1111;
const PRESENCE_SHIFT: u32 = 8;
const LEVEL_SHIFT: u32 = 13;
const LEVEL_BITS: u32 = 3;
const LEVEL_MASK: u32 = 0b111;
const DRINK_ID_SHIFT: u32 = 22;
const DRINK_ID_MASK: u32 = 0b1_1111_1111;

/// Level fields available in a word
pub const MAX_LIQUORS: usize = 3;

/// Largest drink id the word can carry
pub const MAX_DRINK_ID: u16 = DRINK_ID_MASK as u16;

fn field(word: u32, shift: u32, mask: u32) -> u32 {
    (word >> shift) & mask
}

impl Recipe {
    /// Unpack a recipe word, converting levels to ounces with `calibration`
    pub fn from_word(word: u32, calibration: &Calibration) -> RecipeResult<Self> {
        let glass = Glass::from_bits(field(word, GLASS_SHIFT, GLASS_MASK) as u8)
            .ok_or(RecipeError::InvalidGlass(word))?;

        let present: Vec<Liquor> = Liquor::ALL
            .into_iter()
            .filter(|l| word & (1 << (PRESENCE_SHIFT + l.index() as u32)) != 0)
            .collect();
        if present.len() > MAX_LIQUORS {
            return Err(RecipeError::TooManyLiquors(present.len()));
        }

        let mut pours = [0.0f32; LIQUOR_COUNT];
        for (slot, liquor) in present.iter().enumerate() {
            let level = field(word, LEVEL_SHIFT + LEVEL_BITS * slot as u32, LEVEL_MASK) as u8;
            pours[liquor.index()] = calibration.liquor_amount(level).ok_or(
                RecipeError::LevelOutOfRange {
                    level,
                    len: calibration.liquor_levels().len(),
                },
            )?;
        }

        let water_level = field(word, WATER_SHIFT, WATER_MASK) as u8;
        let water = calibration
            .water_amount(water_level)
            .ok_or(RecipeError::LevelOutOfRange {
                level: water_level,
                len: calibration.water_levels().len(),
            })?;

        Ok(Self {
            glass,
            pours,
            water,
            drink_id: field(word, DRINK_ID_SHIFT, DRINK_ID_MASK) as u16,
        })
    }

    /// Pack the recipe into a word, snapping amounts to the nearest
    /// calibration level
    pub fn to_word(&self, calibration: &Calibration) -> RecipeResult<u32> {
        if self.drink_id > MAX_DRINK_ID {
            return Err(RecipeError::DrinkIdOutOfRange(self.drink_id));
        }
        if let Some(&bad) = self
            .pours
            .iter()
            .chain(std::iter::once(&self.water))
            .find(|v| !v.is_finite() || **v < 0.0)
        {
            return Err(RecipeError::InvalidAmount(bad));
        }

        let count = self.liquor_count();
        if count > MAX_LIQUORS {
            return Err(RecipeError::TooManyLiquors(count));
        }

        let mut word = FORMAT_MARKER;
        word |= (self.glass.bits() as u32) << GLASS_SHIFT;
        let water_level = calibration.water_level(self.water) as u32 & WATER_MASK;
        word |= water_level << WATER_SHIFT;
        for (slot, (liquor, amount)) in self.liquors().enumerate() {
            word |= 1 << (PRESENCE_SHIFT + liquor.index() as u32);
            // Fields never spill into their neighbours
            let level = calibration.liquor_level(amount) as u32 & LEVEL_MASK;
            word |= level << (LEVEL_SHIFT + LEVEL_BITS * slot as u32);
        }
        word |= (self.drink_id as u32) << DRINK_ID_SHIFT;
        Ok(word)
    }
}
