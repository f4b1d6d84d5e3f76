//! Coordinate value type and parsing of textual degrees.

use crate::model::school::SchoolValidationError;
use serde::Serialize;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Rejects non-finite values and values outside the degree ranges.
    pub fn validate(&self) -> Result<(), SchoolValidationError> {
        check_range("latitude", self.latitude, LATITUDE_RANGE)?;
        check_range("longitude", self.longitude, LONGITUDE_RANGE)
    }
}

/// Parses a textual degree value such as `"41.38"` or `" -2.5 "`.
///
/// Blank input is reported as a missing field. Text that is not a decimal
/// number is rejected rather than read as NaN; `"NaN"` and `"inf"` parse but
/// are caught by [`Coordinate::validate`].
pub fn parse_degrees(field: &'static str, raw: &str) -> Result<f64, SchoolValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SchoolValidationError::MissingField(field));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| SchoolValidationError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

fn check_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), SchoolValidationError> {
    // NaN fails `contains`, so it lands here too.
    if !(min..=max).contains(&value) {
        return Err(SchoolValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
