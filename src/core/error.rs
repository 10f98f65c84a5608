//! Typed error handling for the BizTime API
//!
//! Every handler returns a [`BizResult`]. Failures are never written to the
//! response by the handler itself: they bubble up as a [`BizError`], and its
//! [`IntoResponse`] implementation is the one place where the HTTP status and
//! the JSON error envelope are decided.
//!
//! # Error Categories
//!
//! - [`EntityError`]: expected domain failures on a resource (e.g. unknown code)
//! - [`RequestError`]: malformed requests and unmatched routes
//! - [`StorageError`]: faults raised by the relational store
//! - [`BizError::Http`]: ad-hoc domain errors built from a message and a status
//!
//! # Envelope
//!
//! ```json
//! { "error": { "message": "Can't find company with code of ibm", "status": 404 } }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The main error type of the API
#[derive(Debug)]
pub enum BizError {
    /// Entity-related errors (lookups and updates on a resource)
    Entity(EntityError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Store-level faults
    Storage(StorageError),

    /// Domain error carrying an explicit message and status
    Http { message: String, status: StatusCode },
}

impl BizError {
    /// Build a domain error from a message and a status code.
    ///
    /// Codes outside the 4xx/5xx range are not error statuses; they are
    /// coerced to 500 so the envelope never reports a success status.
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        let status = StatusCode::from_u16(status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        BizError::Http {
            message: message.into(),
            status,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BizError::Entity(e) => e.status_code(),
            BizError::Request(e) => e.status_code(),
            BizError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BizError::Http { status, .. } => *status,
        }
    }

    /// Message shown to the client in the error envelope
    pub fn public_message(&self) -> String {
        match self {
            BizError::Storage(e) => e.public_message(),
            other => other.to_string(),
        }
    }

    /// Convert to the wire envelope
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorBody {
                message: self.public_message(),
                status: self.status_code().as_u16(),
            },
        }
    }
}

const INTERNAL_MESSAGE: &str = "Internal Server Error";

impl fmt::Display for BizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BizError::Entity(e) => write!(f, "{}", e),
            BizError::Request(e) => write!(f, "{}", e),
            BizError::Storage(e) => write!(f, "{}", e),
            BizError::Http { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for BizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BizError::Entity(e) => Some(e),
            BizError::Request(e) => Some(e),
            BizError::Storage(e) => Some(e),
            BizError::Http { .. } => None,
        }
    }
}

/// Error envelope returned for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Body of the error envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

impl IntoResponse for BizError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(self.to_envelope())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to operations on a single resource
#[derive(Debug)]
pub enum EntityError {
    /// Lookup found no row
    NotFound {
        entity_type: &'static str,
        key_name: &'static str,
        key: String,
    },

    /// Update matched no row
    UpdateTargetMissing {
        entity_type: &'static str,
        key_name: &'static str,
        key: String,
    },
}

impl EntityError {
    pub fn company_not_found(code: &str) -> Self {
        EntityError::NotFound {
            entity_type: "company",
            key_name: "code",
            key: code.to_string(),
        }
    }

    pub fn company_not_updated(code: &str) -> Self {
        EntityError::UpdateTargetMissing {
            entity_type: "company",
            key_name: "code",
            key: code.to_string(),
        }
    }

    pub fn invoice_not_found(id: i32) -> Self {
        EntityError::NotFound {
            entity_type: "invoice",
            key_name: "id",
            key: id.to_string(),
        }
    }

    pub fn invoice_not_updated(id: i32) -> Self {
        EntityError::UpdateTargetMissing {
            entity_type: "invoice",
            key_name: "id",
            key: id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::UpdateTargetMissing { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound {
                entity_type,
                key_name,
                key,
            } => write!(f, "Can't find {} with {} of {}", entity_type, key_name, key),
            EntityError::UpdateTargetMissing {
                entity_type,
                key_name,
                key,
            } => write!(f, "Can't update {} with {} of {}", entity_type, key_name, key),
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for BizError {
    fn from(err: EntityError) -> Self {
        BizError::Entity(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// No route matched the method and path
    RouteNotFound,

    /// Request body is not valid JSON for the expected payload
    InvalidBody { message: String },

    /// Path segment could not be decoded
    InvalidPath { message: String },

    /// Path identifier has the wrong format
    InvalidEntityId { id: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::RouteNotFound => StatusCode::NOT_FOUND,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::RouteNotFound => write!(f, "Not Found"),
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::InvalidPath { message } => write!(f, "{}", message),
            RequestError::InvalidEntityId { id } => {
                write!(f, "Invalid entity ID format: '{}'", id)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl From<RequestError> for BizError {
    fn from(err: RequestError) -> Self {
        BizError::Request(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Faults raised by the relational store.
///
/// Constraint violations keep the database's own wording. Everything else is
/// unclassified and hidden from clients behind a generic message.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{message}")]
    UniqueViolation { message: String },

    #[error("{message}")]
    ForeignKeyViolation { message: String },

    #[error("{message}")]
    NotNullViolation { message: String },

    #[error("{message}")]
    CheckViolation { message: String },

    #[error("{backend} connection error: {message}")]
    Connection {
        backend: &'static str,
        message: String,
    },

    #[error("{backend} query error: {message}")]
    Query {
        backend: &'static str,
        message: String,
    },
}

impl StorageError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StorageError::UniqueViolation { .. }
                | StorageError::ForeignKeyViolation { .. }
                | StorageError::NotNullViolation { .. }
                | StorageError::CheckViolation { .. }
        )
    }

    pub fn public_message(&self) -> String {
        if self.is_constraint_violation() {
            self.to_string()
        } else {
            INTERNAL_MESSAGE.to_string()
        }
    }
}

impl From<StorageError> for BizError {
    fn from(err: StorageError) -> Self {
        BizError::Storage(err)
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        const BACKEND: &str = "PostgreSQL";

        match &err {
            sqlx::Error::Database(db) => {
                let message = db.message().to_string();
                match db.kind() {
                    ErrorKind::UniqueViolation => StorageError::UniqueViolation { message },
                    ErrorKind::ForeignKeyViolation => StorageError::ForeignKeyViolation { message },
                    ErrorKind::NotNullViolation => StorageError::NotNullViolation { message },
                    ErrorKind::CheckViolation => StorageError::CheckViolation { message },
                    _ => StorageError::Query {
                        backend: BACKEND,
                        message,
                    },
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StorageError::Connection {
                backend: BACKEND,
                message: err.to_string(),
            },
            _ => StorageError::Query {
                backend: BACKEND,
                message: err.to_string(),
            },
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for BizError {
    fn from(err: sqlx::Error) -> Self {
        BizError::Storage(err.into())
    }
}

impl From<serde_json::Error> for BizError {
    fn from(err: serde_json::Error) -> Self {
        BizError::Request(RequestError::InvalidBody {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type aliases
// =============================================================================

/// A specialized Result type for handlers
pub type BizResult<T> = Result<T, BizError>;

/// A specialized Result type for store operations
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Tests
// =============================================================================
