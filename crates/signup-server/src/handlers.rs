// File: src/handlers.rs
// Purpose: HTTP endpoints for registration and single-field validation

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use signup_validation::{
    sanitize_form, sanitize_input, Field, FieldError, FieldValue, FormInput, ProbeError,
    Registration, RuleSet, Submission,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<RuleSet>,
}

impl AppState {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(register_handler))
        .route("/api/validate", post(validate_field_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Body for POST /api/register responses
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "ordered_map")]
    pub errors: Option<Vec<(&'static str, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Registration>,
}

impl RegisterResponse {
    fn no_data() -> Self {
        Self {
            success: false,
            message: "No data provided",
            errors: Some(vec![("general", "Request must include JSON data".to_string())]),
            data: None,
        }
    }
}

/// Keeps error entries in evaluation order
fn ordered_map<S: Serializer>(
    errors: &Option<Vec<(&'static str, String)>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match errors {
        Some(entries) => serializer.collect_map(entries.iter().map(|(k, v)| (k, v))),
        None => serializer.serialize_none(),
    }
}

/// Body for POST /api/validate responses
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResponse {
    fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn invalid(error: impl ToString) -> Self {
        Self {
            valid: false,
            error: Some(error.to_string()),
        }
    }
}

/// POST /api/register
/// Sanitize, validate, and echo back the accepted non-secret fields
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Response {
    let input = payload
        .ok()
        .and_then(|Json(json)| FormInput::from_json(&json))
        .filter(|input| !input.is_empty());

    let Some(input) = input else {
        warn!("registration request without JSON data");
        return (StatusCode::BAD_REQUEST, Json(RegisterResponse::no_data())).into_response();
    };

    let input = sanitize_form(&input);

    match state.rules.submit(&input) {
        Submission::Accepted(registration) => {
            info!("registration accepted");
            let body = RegisterResponse {
                success: true,
                message: "Registration successful",
                errors: None,
                data: Some(registration),
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Submission::Rejected(context) => {
            info!(errors = context.outcome.error_count(), "registration rejected");
            let body = RegisterResponse {
                success: false,
                message: "Validation failed",
                errors: Some(context.outcome.messages()),
                data: None,
            };
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}

/// POST /api/validate
/// Check a single field, e.g. while the user is still typing
pub async fn validate_field_handler(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Response {
    match probe(&state.rules, payload.ok().map(|Json(json)| json)) {
        Ok(Ok(())) => (StatusCode::OK, Json(ProbeResponse::valid())).into_response(),
        Ok(Err(error)) => (StatusCode::OK, Json(ProbeResponse::invalid(error))).into_response(),
        Err(error) => (StatusCode::BAD_REQUEST, Json(ProbeResponse::invalid(error))).into_response(),
    }
}

fn probe(
    rules: &RuleSet,
    body: Option<JsonValue>,
) -> Result<Result<(), FieldError>, ProbeError> {
    let body = body.ok_or(ProbeError::MissingValue)?;
    let field = body
        .get("field")
        .and_then(JsonValue::as_str)
        .ok_or(ProbeError::MissingValue)?;
    let raw = body.get("value").ok_or(ProbeError::MissingValue)?;

    let secret = field
        .parse::<Field>()
        .map(|f| f.is_secret())
        .unwrap_or(false);

    let value = match FieldValue::from(raw) {
        FieldValue::Text(text) if !secret => FieldValue::Text(sanitize_input(&text)),
        other => other,
    };

    rules.validate_field(field, &value)
}

pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "message": "Endpoint not found",
        })),
    )
        .into_response()
}
