//! HTTP error mapping.
//!
//! Validation problems become `400` with a descriptive body. Every store
//! failure collapses into one generic `500`; the cause only goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use school_core::{RepoError, SchoolValidationError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub enum ApiError {
    Validation(SchoolValidationError),
    MalformedBody(String),
    Storage,
}

/// JSON error envelope shared by every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            Self::Validation(err) => ErrorBody {
                error: err.to_string(),
                field: err.field(),
            },
            Self::MalformedBody(message) => ErrorBody {
                error: message.clone(),
                field: None,
            },
            Self::Storage => ErrorBody {
                error: INTERNAL_ERROR_MESSAGE.to_string(),
                field: None,
            },
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::MalformedBody(message) => write!(f, "{message}"),
            Self::Storage => write!(f, "{INTERNAL_ERROR_MESSAGE}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchoolValidationError> for ApiError {
    fn from(value: SchoolValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => {
                error!("event=store_call module=http status=error error={other}");
                Self::Storage
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
