//! Application error type.
//!
//! Every failure surfaced by the API is an [`AppError`]: a taxonomy
//! [`ErrorKind`], the HTTP status it maps to, and an [`anyhow::Error`]
//! carrying the human-readable message. Responses always have the shape
//! `{"msg": "..."}`, optionally followed by an `errors` array of
//! field-level problems.
//!
//! Internal errors never leak their cause to the client. The body is
//! `{"msg": "Server Error"}` and the cause is logged instead.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Client-facing messages shared by the gates and handlers.
pub mod messages {
    pub const NO_TOKEN: &str = "No token, authorization denied";
    pub const INVALID_TOKEN: &str = "Token is not valid";
    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const USER_NOT_FOUND: &str = "User not found";
    pub const ACCOUNT_EXISTS: &str = "Account already exists";
    pub const ACCOUNT_NOT_FOUND: &str = "Account not found";
    pub const SERVER_ERROR: &str = "Server Error";
}

/// Failure categories surfaced by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No token was presented.
    Unauthenticated,
    /// The token failed signature or expiry verification.
    InvalidToken,
    /// The caller's role is not in the route's allow-list.
    ///
    /// Rendered as 401 rather than 403 for wire compatibility with
    /// existing clients.
    Forbidden,
    /// The authenticated subject has no user record.
    UserNotFound,
    ValidationFailed,
    DuplicateResource,
    NotFound,
    InternalError,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Unauthenticated | ErrorKind::InvalidToken | ErrorKind::Forbidden => {
                StatusCode::UNAUTHORIZED
            }
            ErrorKind::UserNotFound
            | ErrorKind::ValidationFailed
            | ErrorKind::DuplicateResource
            | ErrorKind::NotFound => StatusCode::BAD_REQUEST,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A single field-level problem, e.g. a failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            param: Some(param.into()),
            msg: msg.into(),
        }
    }

    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            param: None,
            msg: msg.into(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub error: Error,
    pub details: Vec<FieldError>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            status: kind.status(),
            error: err.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = details;
        self
    }

    pub fn unauthenticated() -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow!(messages::NO_TOKEN))
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorKind::InvalidToken, anyhow!(messages::INVALID_TOKEN))
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden, anyhow!(messages::UNAUTHORIZED))
    }

    pub fn user_not_found() -> Self {
        Self::new(ErrorKind::UserNotFound, anyhow!(messages::USER_NOT_FOUND))
            .with_details(vec![FieldError::message(messages::USER_NOT_FOUND)])
    }

    /// Builds a validation failure whose top-level message is the first
    /// field error.
    pub fn validation(details: Vec<FieldError>) -> Self {
        let msg = details
            .first()
            .map(|d| d.msg.clone())
            .unwrap_or_else(|| "Invalid request body".to_string());
        Self::new(ErrorKind::ValidationFailed, anyhow!(msg)).with_details(details)
    }

    pub fn duplicate(msg: &str) -> Self {
        Self::new(ErrorKind::DuplicateResource, anyhow!(msg.to_string()))
            .with_details(vec![FieldError::message(msg)])
    }

    pub fn not_found(msg: &str) -> Self {
        Self::new(ErrorKind::NotFound, anyhow!(msg.to_string()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InternalError, err)
    }

    /// The body this error renders to.
    pub fn to_body(&self) -> ErrorResponse {
        if self.kind == ErrorKind::InternalError {
            return ErrorResponse {
                msg: messages::SERVER_ERROR.to_string(),
                errors: Vec::new(),
            };
        }

        ErrorResponse {
            msg: self.error.to_string(),
            errors: self.details.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::InternalError {
            tracing::error!(error = ?self.error, "Internal server error");
        }

        (self.status, Json(self.to_body())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
