//! Versioned calibration tables for pour amounts
//!
//! A recipe word only stores small level indices. The ounces each level
//! stands for are defined by a calibration table, and codes printed under one
//! table read back as different amounts under another, so every table is
//! named and deployments pin the version they print with.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// Largest liquor table addressable by the 3-bit level field
pub const MAX_LIQUOR_LEVELS: usize = 1 << 3;

/// Largest water table addressable by the 5-bit level field
pub const MAX_WATER_LEVELS: usize = 1 << 5;

/// Name of the calibration used when none is configured
pub const DEFAULT_VERSION: &str = "v1";

const V1_LIQUOR: [f32; 8] = [0.55, 0.8, 1.05, 1.4, 1.75, 2.15, 2.35, 3.0];

const V1_WATER: [f32; 32] = [
    0.0, 0.05, 0.1, 0.15, 0.25, 0.6, 0.9, 1.1, 1.3, 1.5, 1.8, 2.2, 2.6, 3.0, 3.5, 4.0, 4.45, 4.9,
    5.3, 5.75, 6.15, 6.6, 7.0, 7.45, 7.9, 8.4, 8.9, 9.25, 10.2, 10.65, 11.0, 12.0,
];

/// Level -> ounces tables for liquor pours and water
///
/// Every way of building one, deserialization included, validates the tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalibration")]
pub struct Calibration {
    version: String,
    liquor_levels: Vec<f32>,
    water_levels: Vec<f32>,
}

/// Unvalidated wire form of [`Calibration`]
#[derive(Deserialize)]
struct RawCalibration {
    version: String,
    liquor_levels: Vec<f32>,
    water_levels: Vec<f32>,
}

impl TryFrom<RawCalibration> for Calibration {
    type Error = CalibrationError;

    fn try_from(raw: RawCalibration) -> Result<Self, Self::Error> {
        Calibration::new(raw.version, raw.liquor_levels, raw.water_levels)
    }
}

impl Calibration {
    /// Build and validate a calibration
    pub fn new(
        version: impl Into<String>,
        liquor_levels: Vec<f32>,
        water_levels: Vec<f32>,
    ) -> Result<Self, CalibrationError> {
        let calibration = Self {
            version: version.into(),
            liquor_levels,
            water_levels,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Look up a calibration shipped with the crate
    pub fn builtin(version: &str) -> Result<Self, CalibrationError> {
        match version {
            "v1" => Ok(Self {
                version: version.to_string(),
                liquor_levels: V1_LIQUOR.to_vec(),
                water_levels: V1_WATER.to_vec(),
            }),
            other => Err(CalibrationError::UnknownVersion(other.to_string())),
        }
    }

    /// Parse and validate a calibration from JSON
    ///
    /// ```
    /// use pod_barcode::Calibration;
    ///
    /// let json = r#"{"version":"bar-7","liquor_levels":[0.5,1.0],"water_levels":[0.0,2.0]}"#;
    /// let cal = Calibration::from_json(json).unwrap();
    /// assert_eq!(cal.version(), "bar-7");
    /// ```
    pub fn from_json(text: &str) -> Result<Self, CalibrationError> {
        let raw: RawCalibration = serde_json::from_str(text)?;
        Self::try_from(raw)
    }

    /// Name this table is published under
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Ounces per liquor level, strictly increasing
    pub fn liquor_levels(&self) -> &[f32] {
        &self.liquor_levels
    }

    /// Ounces per water level, strictly increasing
    pub fn water_levels(&self) -> &[f32] {
        &self.water_levels
    }

    /// Ounces for a liquor level, if the table has it
    pub fn liquor_amount(&self, level: u8) -> Option<f32> {
        self.liquor_levels.get(level as usize).copied()
    }

    /// Ounces for a water level, if the table has it
    pub fn water_amount(&self, level: u8) -> Option<f32> {
        self.water_levels.get(level as usize).copied()
    }

    /// Nearest liquor level for an amount
    pub fn liquor_level(&self, amount: f32) -> u8 {
        nearest_level(&self.liquor_levels, amount) as u8
    }

    /// Nearest water level for an amount
    pub fn water_level(&self, amount: f32) -> u8 {
        nearest_level(&self.water_levels, amount) as u8
    }

    fn validate(&self) -> Result<(), CalibrationError> {
        // A zero pour means "absent", so liquor levels must be positive
        validate_table("liquor", &self.liquor_levels, MAX_LIQUOR_LEVELS, false)?;
        validate_table("water", &self.water_levels, MAX_WATER_LEVELS, true)
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            liquor_levels: V1_LIQUOR.to_vec(),
            water_levels: V1_WATER.to_vec(),
        }
    }
}

fn validate_table(
    table: &'static str,
    levels: &[f32],
    max: usize,
    allow_zero: bool,
) -> Result<(), CalibrationError> {
    if levels.is_empty() {
        return Err(CalibrationError::EmptyTable(table));
    }
    if levels.len() > max {
        return Err(CalibrationError::TableTooLong {
            table,
            len: levels.len(),
            max,
        });
    }
    let invalid = |v: f32| !v.is_finite() || v < 0.0 || (v == 0.0 && !allow_zero);
    if let Some(index) = levels.iter().position(|&v| invalid(v)) {
        return Err(CalibrationError::InvalidValue { table, index });
    }
    if let Some(index) = levels.windows(2).position(|w| w[1] <= w[0]) {
        return Err(CalibrationError::NotIncreasing {
            table,
            index: index + 1,
        });
    }
    Ok(())
}

/// Index of the entry closest to `value` in a strictly increasing slice.
///
/// Values below the first or above the last entry clamp to the ends. When
/// `value` sits exactly between two entries the higher index wins.
/// Returns 0 for an empty slice.
pub fn nearest_level<T>(levels: &[T], value: T) -> usize
where
    T: Copy + PartialOrd + Sub<Output = T>,
{
    let upper = levels.partition_point(|&level| level < value);
    if upper == 0 {
        return 0;
    }
    if upper == levels.len() {
        return levels.len() - 1;
    }

    let below = value - levels[upper - 1];
    let above = levels[upper] - value;
    if below < above { upper - 1 } else { upper }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_level_exact_and_between() {
        let levels = [1, 3, 7, 10];
        assert_eq!(nearest_level(&levels, 1), 0);
        assert_eq!(nearest_level(&levels, 7), 2);
        assert_eq!(nearest_level(&levels, 4), 1);
        assert_eq!(nearest_level(&levels, 6), 2);
    }

    #[test]
    fn test_nearest_level_tie_goes_up() {
        let levels = [1, 3, 7];
        assert_eq!(nearest_level(&levels, 2), 1);
        assert_eq!(nearest_level(&levels, 5), 2);
    }

    #[test]
    fn test_nearest_level_clamps() {
        let levels = [0.5f32, 1.0, 2.0];
        assert_eq!(nearest_level(&levels, -3.0), 0);
        assert_eq!(nearest_level(&levels, 0.0), 0);
        assert_eq!(nearest_level(&levels, 9.0), 2);
        assert_eq!(nearest_level::<i32>(&[], 4), 0);
    }

    #[test]
    fn test_builtin_tables_are_valid() {
        let cal = Calibration::builtin("v1").unwrap();
        assert!(cal.validate().is_ok());
        assert_eq!(cal, Calibration::default());
        assert_eq!(cal.liquor_levels().len(), MAX_LIQUOR_LEVELS);
        assert_eq!(cal.water_levels().len(), MAX_WATER_LEVELS);
    }

    #[test]
    fn test_every_level_quantizes_to_itself() {
        let cal = Calibration::default();
        for (i, &amount) in cal.liquor_levels().iter().enumerate() {
            assert_eq!(cal.liquor_level(amount) as usize, i);
        }
        for (i, &amount) in cal.water_levels().iter().enumerate() {
            assert_eq!(cal.water_level(amount) as usize, i);
        }
    }

    #[test]
    fn test_unknown_version() {
        assert!(matches!(
            Calibration::builtin("v0"),
            Err(CalibrationError::UnknownVersion(_))
        ));
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(matches!(
            Calibration::new("x", vec![], vec![1.0]),
            Err(CalibrationError::EmptyTable("liquor"))
        ));
        assert!(matches!(
            Calibration::new("x", vec![1.0; 9], vec![1.0]),
            Err(CalibrationError::TableTooLong { table: "liquor", .. })
        ));
        assert!(matches!(
            Calibration::new("x", vec![1.0], vec![0.0, 0.25, 0.5, 0.15]),
            Err(CalibrationError::NotIncreasing {
                table: "water",
                index: 3
            })
        ));
        assert!(matches!(
            Calibration::new("x", vec![f32::NAN], vec![1.0]),
            Err(CalibrationError::InvalidValue { table: "liquor", .. })
        ));
    }

    #[test]
    fn test_rejects_zero_liquor_level() {
        assert!(matches!(
            Calibration::new("z", vec![0.0, 1.0, 2.0], vec![0.0, 1.0]),
            Err(CalibrationError::InvalidValue {
                table: "liquor",
                index: 0
            })
        ));
        // Water may start at zero
        assert!(Calibration::new("z", vec![0.5, 1.0], vec![0.0, 1.0]).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let oversized = r#"{"version":"big","liquor_levels":[1,2,3,4,5,6,7,8,9,10,11,12],"water_levels":[0.0]}"#;
        assert!(serde_json::from_str::<Calibration>(oversized).is_err());
        assert!(matches!(
            Calibration::from_json(oversized),
            Err(CalibrationError::TableTooLong {
                table: "liquor",
                len: 12,
                max: 8
            })
        ));

        let zero = r#"{"version":"z","liquor_levels":[0.0,1.0],"water_levels":[0.0]}"#;
        assert!(serde_json::from_str::<Calibration>(zero).is_err());

        let json = serde_json::to_string(&Calibration::default()).unwrap();
        assert_eq!(
            serde_json::from_str::<Calibration>(&json).unwrap(),
            Calibration::default()
        );
    }

    #[test]
    fn test_json_round_trip() {
        let cal = Calibration::default();
        let json = serde_json::to_string(&cal).unwrap();
        assert_eq!(Calibration::from_json(&json).unwrap(), cal);
        assert!(matches!(
            Calibration::from_json("{not json"),
            Err(CalibrationError::Json(_))
        ));
    }
}
