//! Inbound request shapes and their conversion into domain values.
//!
//! Bodies and query strings are parsed by hand rather than with the
//! `Json`/`Form`/`Query` extractors so that a missing or malformed field always
//! answers `400` with the service's own error body.

use crate::error::ApiError;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use school_core::{parse_degrees, Coordinate, NewSchool, SchoolValidationError};
use serde::Deserialize;

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Encoding of a create request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Form,
}

impl BodyFormat {
    /// Form bodies are recognised by content type; anything else is read as
    /// JSON.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let is_form = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_ascii_lowercase().starts_with(FORM_MEDIA_TYPE))
            .unwrap_or(false);
        if is_form {
            Self::Form
        } else {
            Self::Json
        }
    }
}

/// A degree value as sent by the client: a JSON number or numeric text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    fn degrees(&self, field: &'static str) -> Result<f64, SchoolValidationError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(raw) => parse_degrees(field, raw),
        }
    }
}

/// Body of `POST /addSchool`. Every field is optional here so absence can be
/// reported as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddSchoolRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<CoordinateInput>,
    pub longitude: Option<CoordinateInput>,
}

#[derive(Debug, Default, Deserialize)]
struct AddSchoolForm {
    name: Option<String>,
    address: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

impl From<AddSchoolForm> for AddSchoolRequest {
    fn from(form: AddSchoolForm) -> Self {
        Self {
            name: form.name,
            address: form.address,
            latitude: form.latitude.map(CoordinateInput::Text),
            longitude: form.longitude.map(CoordinateInput::Text),
        }
    }
}

impl AddSchoolRequest {
    /// Decodes a body. An empty JSON body reads as an empty request.
    pub fn parse(format: BodyFormat, body: &[u8]) -> Result<Self, ApiError> {
        match format {
            BodyFormat::Form => serde_urlencoded::from_bytes::<AddSchoolForm>(body)
                .map(Self::from)
                .map_err(|err| ApiError::MalformedBody(format!("invalid form body: {err}"))),
            BodyFormat::Json => {
                if body.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Self::default());
                }
                serde_json::from_slice(body)
                    .map_err(|err| ApiError::MalformedBody(format!("invalid JSON body: {err}")))
            }
        }
    }

    /// Checks presence of all four fields, then the draft invariants.
    pub fn into_new_school(self) -> Result<NewSchool, SchoolValidationError> {
        let name = require_text("name", self.name)?;
        let address = require_text("address", self.address)?;
        let latitude = require_degrees("latitude", self.latitude)?;
        let longitude = require_degrees("longitude", self.longitude)?;

        let draft = NewSchool::new(name, address, latitude, longitude);
        draft.validate()?;
        Ok(draft)
    }
}

/// Query string of `GET /listSchools`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSchoolsParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl ListSchoolsParams {
    /// Decodes a raw query string. No query string reads as no parameters.
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        serde_urlencoded::from_str(raw.unwrap_or_default())
            .map_err(|err| ApiError::MalformedBody(format!("invalid query string: {err}")))
    }

    /// Resolves the query origin. Absent or blank coordinates are reported
    /// together as a missing origin.
    pub fn origin(&self) -> Result<Coordinate, SchoolValidationError> {
        let (Some(latitude), Some(longitude)) =
            (self.latitude.as_deref(), self.longitude.as_deref())
        else {
            return Err(SchoolValidationError::MissingOrigin);
        };
        if latitude.trim().is_empty() || longitude.trim().is_empty() {
            return Err(SchoolValidationError::MissingOrigin);
        }

        let origin = Coordinate::new(
            parse_degrees("latitude", latitude)?,
            parse_degrees("longitude", longitude)?,
        );
        origin.validate()?;
        Ok(origin)
    }
}

fn require_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, SchoolValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(SchoolValidationError::MissingField(field)),
    }
}

fn require_degrees(
    field: &'static str,
    value: Option<CoordinateInput>,
) -> Result<f64, SchoolValidationError> {
    value
        .ok_or(SchoolValidationError::MissingField(field))?
        .degrees(field)
}
