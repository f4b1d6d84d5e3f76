//! Response formatting.
//!
//! Handlers produce structured data; this module decides whether the client
//! sees it as JSON or as the HTML page.

use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use school_core::{Coordinate, RankedSchool};
use std::fmt::Write;

/// Presentation chosen for a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Html,
}

impl ResponseFormat {
    /// Picks HTML only when the client lists `text/html` before
    /// `application/json` in `Accept`. Wildcards and absent headers get JSON.
    pub fn negotiate(headers: &HeaderMap) -> Self {
        let Some(accept) = headers.get(ACCEPT).and_then(|value| value.to_str().ok()) else {
            return Self::Json;
        };

        for media_range in accept.split(',') {
            let media_type = media_range
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            match media_type.as_str() {
                "text/html" | "application/xhtml+xml" => return Self::Html,
                "application/json" => return Self::Json,
                _ => {}
            }
        }
        Self::Json
    }
}

/// Renders the ranked list in the negotiated format.
pub fn school_list(format: ResponseFormat, origin: Coordinate, ranked: &[RankedSchool]) -> Response {
    match format {
        ResponseFormat::Json => (StatusCode::OK, Json(ranked)).into_response(),
        ResponseFormat::Html => Html(render_page(Some((origin, ranked)))).into_response(),
    }
}

/// Landing page with both forms and no results.
pub fn home_page() -> Html<String> {
    Html(render_page(None))
}

fn render_page(results: Option<(Coordinate, &[RankedSchool])>) -> String {
    let mut page = String::from(PAGE_HEAD);

    if let Some((origin, ranked)) = results {
        let _ = writeln!(
            page,
            "<h2>Schools near {:.4}, {:.4}</h2>",
            origin.latitude, origin.longitude
        );
        if ranked.is_empty() {
            page.push_str("<p>No schools stored yet.</p>\n");
        } else {
            page.push_str(
                "<table>\n<tr><th>Name</th><th>Address</th><th>Latitude</th><th>Longitude</th><th>Distance (km)</th></tr>\n",
            );
            for entry in ranked {
                let school = &entry.item;
                let _ = writeln!(
                    page,
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
                    escape_html(&school.name),
                    escape_html(&school.address),
                    school.latitude,
                    school.longitude,
                    entry.distance_km
                );
            }
            page.push_str("</table>\n");
        }
    }

    page.push_str(PAGE_TAIL);
    page
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>School Locator</title>
</head>
<body>
<h1>School Locator</h1>
<h2>Add a school</h2>
<form action="/addSchool" method="post">
<label>Name <input name="name" required></label>
<label>Address <input name="address" required></label>
<label>Latitude <input name="latitude" type="number" step="any" min="-90" max="90" required></label>
<label>Longitude <input name="longitude" type="number" step="any" min="-180" max="180" required></label>
<button type="submit">Add</button>
</form>
<h2>Find nearby schools</h2>
<form action="/listSchools" method="get">
<label>Latitude <input name="latitude" type="number" step="any" min="-90" max="90" required></label>
<label>Longitude <input name="longitude" type="number" step="any" min="-180" max="180" required></label>
<button type="submit">Search</button>
</form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";
