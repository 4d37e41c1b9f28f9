use std::fmt;

use serde::{Deserialize, Serialize};

/// Glass the drink is served in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Glass {
    /// Short tumbler (bits 00)
    Lowball,
    /// Tall glass (bit 1 set)
    Highball,
    /// Shaker (bit 2 set)
    Shaker,
}

impl Glass {
    /// Every glass, in bit order
    pub const ALL: [Glass; 3] = [Glass::Lowball, Glass::Highball, Glass::Shaker];

    /// Get glass from the two glass bits (bit 1 = highball, bit 2 = shaker)
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0b11 {
            0b00 => Some(Glass::Lowball),
            0b01 => Some(Glass::Highball),
            0b10 => Some(Glass::Shaker),
            _ => None,
        }
    }

    /// The two glass bits, before shifting into place
    pub fn bits(&self) -> u8 {
        match self {
            Glass::Lowball => 0b00,
            Glass::Highball => 0b01,
            Glass::Shaker => 0b10,
        }
    }

    /// Lowercase label name
    pub fn name(&self) -> &'static str {
        match self {
            Glass::Lowball => "lowball",
            Glass::Highball => "highball",
            Glass::Shaker => "shaker",
        }
    }
}

impl fmt::Display for Glass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Liquor kinds, in presence-bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liquor {
    /// Presence bit 8
    Gin = 0,
    /// Presence bit 9
    Rum = 1,
    /// Presence bit 10
    Vodka = 2,
    /// Presence bit 11
    Tequila = 3,
    /// Presence bit 12
    Whiskey = 4,
}

/// Number of liquor kinds
pub const LIQUOR_COUNT: usize = 5;

impl Liquor {
    /// Every liquor, in presence-bit order
    pub const ALL: [Liquor; LIQUOR_COUNT] = [
        Liquor::Gin,
        Liquor::Rum,
        Liquor::Vodka,
        Liquor::Tequila,
        Liquor::Whiskey,
    ];

    /// Position in presence-bit order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lowercase label name
    pub fn name(&self) -> &'static str {
        match self {
            Liquor::Gin => "gin",
            Liquor::Rum => "rum",
            Liquor::Vodka => "vodka",
            Liquor::Tequila => "tequila",
            Liquor::Whiskey => "whiskey",
        }
    }
}

impl fmt::Display for Liquor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strength variants printed on a recipe label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    /// Pours as encoded
    Standard,
    /// Liquor ×1.5
    Strong,
    /// Liquor ×0.5
    Light,
    /// No liquor; its volume goes to water
    Mocktail,
}

impl Strength {
    /// Every strength, standard first
    pub const ALL: [Strength; 4] = [
        Strength::Standard,
        Strength::Strong,
        Strength::Light,
        Strength::Mocktail,
    ];

    /// Multiplier applied to every liquor pour
    pub fn liquor_factor(&self) -> f32 {
        match self {
            Strength::Standard => 1.0,
            Strength::Strong => 1.5,
            Strength::Light => 0.5,
            Strength::Mocktail => 0.0,
        }
    }
}

/// A drink recipe: glass, pour amounts in ounces, water, drink id
///
/// A pour of 0 means the liquor is absent. The packed word is derived on
/// demand with [`Recipe::to_word`] and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Serving glass
    pub glass: Glass,
    /// Ounces per liquor, indexed by [`Liquor::index`]
    pub pours: [f32; LIQUOR_COUNT],
    /// Ounces of water
    pub water: f32,
    /// Catalog id, 0..=511
    pub drink_id: u16,
}

impl Recipe {
    /// An empty recipe in the given glass
    pub fn new(glass: Glass) -> Self {
        Self {
            glass,
            pours: [0.0; LIQUOR_COUNT],
            water: 0.0,
            drink_id: 0,
        }
    }

    /// Ounces of a liquor (0 when absent)
    pub fn pour(&self, liquor: Liquor) -> f32 {
        self.pours[liquor.index()]
    }

    /// Set the ounces of one liquor (0 removes it)
    pub fn set_pour(&mut self, liquor: Liquor, amount: f32) {
        self.pours[liquor.index()] = amount;
    }

    /// Builder-style [`Recipe::set_pour`]
    pub fn with_pour(mut self, liquor: Liquor, amount: f32) -> Self {
        self.set_pour(liquor, amount);
        self
    }

    /// Builder-style water amount
    pub fn with_water(mut self, amount: f32) -> Self {
        self.water = amount;
        self
    }

    /// Builder-style drink id
    pub fn with_drink_id(mut self, drink_id: u16) -> Self {
        self.drink_id = drink_id;
        self
    }

    /// Liquors with a non-zero pour, in presence-bit order
    pub fn liquors(&self) -> impl Iterator<Item = (Liquor, f32)> + '_ {
        Liquor::ALL
            .into_iter()
            .map(|liquor| (liquor, self.pour(liquor)))
            .filter(|&(_, amount)| amount > 0.0)
    }

    /// Number of liquors with a non-zero pour
    pub fn liquor_count(&self) -> usize {
        self.liquors().count()
    }

    /// Total liquor volume in ounces
    pub fn liquor_volume(&self) -> f32 {
        self.pours.iter().sum()
    }

    /// Scale the recipe for a label strength. Mocktails move all liquor
    /// volume into water.
    pub fn with_strength(&self, strength: Strength) -> Self {
        let mut scaled = self.clone();
        match strength {
            Strength::Mocktail => {
                scaled.water += self.liquor_volume();
                scaled.pours = [0.0; LIQUOR_COUNT];
            }
            _ => {
                let factor = strength.liquor_factor();
                scaled.pours.iter_mut().for_each(|p| *p *= factor);
            }
        }
        scaled
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Drink #{} in a {} glass", self.drink_id, self.glass)?;
        for (liquor, amount) in self.liquors() {
            writeln!(f, "  {liquor}: {amount:.2} oz")?;
        }
        write!(f, "  water: {:.2} oz", self.water)
    }
}
