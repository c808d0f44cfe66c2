use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Machine-readable error detail carried inside the response envelope
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,

    /// Stable error code identifier
    pub code: String,

    /// Optional extra context (validation detail, provider response body)
    #[oai(skip_serializing_if_is_none)]
    pub details: Option<String>,
}

/// Failure variant of the uniform response envelope
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
}

/// Domain error taxonomy. Each variant carries its HTTP status and the
/// serialized envelope; handlers return these directly and poem renders them.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed input or a failed provider exchange
    #[oai(status = 400)]
    BadRequest(Json<ErrorEnvelope>),

    /// Bad credentials, or a bad/missing token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorEnvelope>),

    /// Authenticated but lacking a required role
    #[oai(status = 403)]
    Forbidden(Json<ErrorEnvelope>),

    /// Referenced entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorEnvelope>),

    /// Uniqueness violation (duplicate email or name)
    #[oai(status = 409)]
    Conflict(Json<ErrorEnvelope>),

    /// Unclassified internal failure; detail is logged, never returned
    #[oai(status = 500)]
    Internal(Json<ErrorEnvelope>),
}

fn envelope(message: &str, code: &str, details: Option<String>) -> Json<ErrorEnvelope> {
    Json(ErrorEnvelope {
        success: false,
        error: ErrorBody {
            message: message.to_string(),
            code: code.to_string(),
            details,
        },
    })
}

impl ApiError {
    pub fn validation(details: impl Into<String>) -> Self {
        ApiError::BadRequest(envelope("Validation error", "validation_error", Some(details.into())))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(envelope(&message.into(), "bad_request", None))
    }

    /// Identical shape for unknown email and wrong password, so responses do
    /// not reveal whether an account exists.
    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(envelope("Invalid credentials", "invalid_credentials", None))
    }

    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(envelope("Invalid token", "invalid_token", None))
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(envelope("Forbidden error", "forbidden", None))
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound(envelope("User not found", "user_not_found", None))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(envelope(&message.into(), "not_found", None))
    }

    pub fn user_exists() -> Self {
        ApiError::Conflict(envelope("User already exists", "user_exists", None))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(envelope(&message.into(), "conflict", None))
    }

    /// Logs the detail and returns a generic 500; internal context never
    /// reaches the client.
    pub fn internal(detail: impl fmt::Display) -> Self {
        tracing::error!("internal error: {}", detail);
        ApiError::Internal(envelope("Internal server error", "internal_error", None))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::Internal(json) => &json.0.error.message,
        }
    }

    /// Get the stable code from the error variant
    pub fn code(&self) -> &str {
        match self {
            ApiError::BadRequest(json)
            | ApiError::Unauthorized(json)
            | ApiError::Forbidden(json)
            | ApiError::NotFound(json)
            | ApiError::Conflict(json)
            | ApiError::Internal(json) => &json.0.error.code,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
