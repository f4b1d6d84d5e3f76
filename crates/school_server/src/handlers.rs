//! HTTP handlers.
//!
//! # Responsibility
//! - Translate requests into service calls and results into responses.
//! - Leave presentation to `render` and error shaping to `error`.

use crate::error::ApiError;
use crate::render::{self, ResponseFormat};
use crate::request::{AddSchoolRequest, BodyFormat, ListSchoolsParams};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use log::debug;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn home() -> Html<String> {
    render::home_page()
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: school_core::core_version(),
    })
}

/// `POST /addSchool`.
///
/// JSON callers get `201` with the stored record. Form posts come from the
/// HTML page and are redirected back to it.
pub async fn add_school(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let format = BodyFormat::from_headers(&headers);
    let draft = AddSchoolRequest::parse(format, &body)?.into_new_school()?;

    let school = state.run(move |service| service.add_school(&draft)).await?;
    debug!(
        "event=http_add_school module=http status=ok school_id={} format={:?}",
        school.id, format
    );

    Ok(match format {
        BodyFormat::Json => (StatusCode::CREATED, Json(school)).into_response(),
        BodyFormat::Form => Redirect::to("/").into_response(),
    })
}

/// `GET /listSchools?latitude=..&longitude=..`.
pub async fn list_schools(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let origin = ListSchoolsParams::parse(query.as_deref())?.origin()?;
    let ranked = state
        .run(move |service| service.list_nearest(origin))
        .await?;

    Ok(render::school_list(
        ResponseFormat::negotiate(&headers),
        origin,
        &ranked,
    ))
}
