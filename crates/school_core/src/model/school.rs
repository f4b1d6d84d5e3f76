//! School domain model.
//!
//! # Responsibility
//! - Define the stored `School` record and the `NewSchool` create draft.
//! - Reject drafts with blank text fields or unusable coordinates.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another school.
//! - `name` and `address` are non-blank; stored values are trimmed.
//! - `latitude` is within [-90, 90] and `longitude` within [-180, 180].

use crate::geo::coordinate::Coordinate;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the store on creation.
pub type SchoolId = Uuid;

/// Validation failure for school drafts and query coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum SchoolValidationError {
    /// A required field was absent, null or blank.
    MissingField(&'static str),
    /// A proximity query arrived without both coordinates.
    MissingOrigin,
    /// A coordinate could not be read as a decimal number.
    InvalidNumber { field: &'static str, value: String },
    /// A coordinate is not a finite value inside its allowed range.
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl SchoolValidationError {
    /// Returns the offending field name, when the error concerns one field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) => Some(*field),
            Self::MissingOrigin => None,
            Self::InvalidNumber { field, .. } | Self::OutOfRange { field, .. } => Some(*field),
        }
    }
}

impl Display for SchoolValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(_) => write!(f, "All fields are required"),
            Self::MissingOrigin => write!(f, "Latitude and longitude are required"),
            Self::InvalidNumber { field, value } => {
                write!(f, "`{field}` must be a decimal number, got `{value}`")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "`{field}` must be within [{min}, {max}], got {value}"),
        }
    }
}

impl Error for SchoolValidationError {}

/// Create draft for a school. Carries every field except identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewSchool {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            latitude,
            longitude,
        }
    }

    /// Checks the draft against the record invariants.
    ///
    /// Fields are checked in declaration order; the first failure wins.
    pub fn validate(&self) -> Result<(), SchoolValidationError> {
        validate_text("name", &self.name)?;
        validate_text("address", &self.address)?;
        self.coordinate().validate()
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Stored school record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl School {
    /// Builds the stored shape for a draft under a freshly assigned identity.
    ///
    /// Text fields are trimmed; the draft is expected to be validated.
    pub fn from_draft(id: SchoolId, draft: &NewSchool) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            address: draft.address.trim().to_string(),
            latitude: draft.latitude,
            longitude: draft.longitude,
        }
    }

    pub fn validate(&self) -> Result<(), SchoolValidationError> {
        validate_text("name", &self.name)?;
        validate_text("address", &self.address)?;
        self.coordinate().validate()
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

fn validate_text(field: &'static str, value: &str) -> Result<(), SchoolValidationError> {
    if value.trim().is_empty() {
        return Err(SchoolValidationError::MissingField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewSchool, School, SchoolValidationError};
    use uuid::Uuid;

    #[test]
    fn validate_reports_first_failing_field() {
        let draft = NewSchool::new("", "", 100.0, 0.0);
        assert_eq!(
            draft.validate().unwrap_err(),
            SchoolValidationError::MissingField("name")
        );

        let draft = NewSchool::new("n", " ", 100.0, 0.0);
        assert_eq!(
            draft.validate().unwrap_err(),
            SchoolValidationError::MissingField("address")
        );
    }

    #[test]
    fn validation_messages_match_api_wording() {
        assert_eq!(
            SchoolValidationError::MissingField("name").to_string(),
            "All fields are required"
        );
        assert_eq!(
            SchoolValidationError::MissingOrigin.to_string(),
            "Latitude and longitude are required"
        );
        assert_eq!(SchoolValidationError::MissingOrigin.field(), None);
    }

    #[test]
    fn school_serializes_with_id_and_four_fields() {
        let id = Uuid::new_v4();
        let school = School::from_draft(id, &NewSchool::new("A", "X", 1.5, -2.5));

        let value = serde_json::to_value(&school).unwrap();
        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["name"], "A");
        assert_eq!(value["address"], "X");
        assert_eq!(value["latitude"], 1.5);
        assert_eq!(value["longitude"], -2.5);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
