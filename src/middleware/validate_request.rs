use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Path, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error as _;

use crate::error::ApiError;
use crate::validation::{self, FieldError, RequestSnapshot, RuleSet};

/// Per-route validation stage.
///
/// Reads path params and the JSON body into a [`RequestSnapshot`], runs every
/// rule of the route against it, and hands the failures to [`collect_errors`].
/// Only a request with no failures reaches the handler, which finds the
/// snapshot in the request extensions.
pub async fn validate_request(
    State(rules): State<RuleSet>,
    params: Option<Path<HashMap<String, String>>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let params = params.map(|Path(params)| params).unwrap_or_default();

    let (mut parts, body) = request.into_parts();
    let bytes = read_body(body).await?;

    let snapshot = RequestSnapshot::new(params, parse_body(&parts.headers, &bytes)?);

    collect_errors(validation::evaluate(rules, &snapshot))?;

    parts.extensions.insert(snapshot);
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Buffer the body; the global limit layer makes oversize bodies fail here
async fn read_body(body: Body) -> Result<Bytes, ApiError> {
    to_bytes(body, usize::MAX).await.map_err(|e| {
        if exceeds_length_limit(&e) {
            tracing::debug!("Rejected oversize request body");
            ApiError::payload_too_large("El cuerpo de la petición es demasiado grande")
        } else {
            tracing::warn!("Failed to read request body: {}", e);
            ApiError::bad_request("No se pudo leer el cuerpo de la petición")
        }
    })
}

fn exceeds_length_limit(err: &axum::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<LengthLimitError>() {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Error collector: any accumulated failure ends the request with 400
pub fn collect_errors(errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        return Ok(());
    }
    tracing::debug!("Request rejected with {} validation error(s)", errors.len());
    Err(ApiError::validation(errors))
}

/// JSON bodies only; anything else (or nothing) reads as `{}`
fn parse_body(headers: &HeaderMap, bytes: &[u8]) -> Result<Value, ApiError> {
    if !is_json(headers) || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RequestSnapshot::empty_body());
    }

    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        tracing::debug!("Rejected malformed JSON body: {}", e);
        ApiError::invalid_json("El cuerpo de la petición no es JSON válido")
    })?;

    // Top-level scalars are not accepted as a body
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        _ => Err(ApiError::invalid_json("El cuerpo de la petición debe ser un objeto JSON")),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}
