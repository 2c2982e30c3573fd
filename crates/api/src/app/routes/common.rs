use axum::http::{HeaderMap, StatusCode};
use chrono::{DateTime, Utc};

use crate::app::errors;

/// Gate for destructive admin endpoints.
///
/// Actor identity comes from the trusted presentation layer; the `x-role`
/// header is its role claim. No token validation happens here.
pub fn require_admin(headers: &HeaderMap) -> Result<(), axum::response::Response> {
    let role = headers
        .get("x-role")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if role.eq_ignore_ascii_case("admin") {
        Ok(())
    } else {
        Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "unauthorized",
            "admin role required",
        ))
    }
}

/// Parse an RFC 3339 query timestamp.
pub fn parse_timestamp(
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, axum::response::Response> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_timestamp",
                format!("{field}: {e}"),
            )
        })
}
