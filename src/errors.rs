use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Not Found",
    "message": "Car with id 99 not found",
    "request_id": "4d1f6c1e-6a55-4f0e-9a3f-0f6d1d1c2b7a",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Conflict")
    #[schema(example = "Not Found")]
    pub error: String,
    /// Human-readable error description
    #[schema(example = "Car with id 99 not found")]
    pub message: String,
    /// Every violated precondition when a request fails for more than one reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Request identifier echoed from `x-request-id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

/// The persisted entity kinds, used to tag not-found and conflict errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum EntityKind {
    Car,
    Buyer,
    Seller,
    Stock,
    Sale,
    User,
}

/// A precondition that failed while recording a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SaleViolation {
    CarNotFound(i32),
    BuyerNotFound(i32),
    SellerNotFound(i32),
    StockNotFound(i32),
}

impl std::fmt::Display for SaleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CarNotFound(id) => write!(f, "car {} does not exist", id),
            Self::BuyerNotFound(id) => write!(f, "buyer {} does not exist", id),
            Self::SellerNotFound(id) => write!(f, "seller {} does not exist", id),
            Self::StockNotFound(car_id) => write!(f, "stock for car {} does not exist", car_id),
        }
    }
}

fn join_violations(violations: &[SaleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: EntityKind, id: i32 },

    #[error("{entity} with {field} '{value}' not found")]
    NotFoundBy {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },

    #[error("{entity} with {field} '{value}' already exists")]
    AlreadyExists {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },

    #[error("Insufficient stock for car {car_id}: requested {requested}, available {available}")]
    InsufficientStock {
        car_id: i32,
        requested: i32,
        available: i32,
    },

    #[error("{}", join_violations(.0))]
    SaleRejected(Vec<SaleViolation>),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("User {0} is inactive")]
    InactiveUser(i32),

    #[error("Hash error: {0}")]
    HashError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(errors.to_string())
    }
}

impl ServiceError {
    pub fn not_found(entity: EntityKind, id: i32) -> Self {
        ServiceError::NotFound { entity, id }
    }

    pub fn already_exists(
        entity: EntityKind,
        field: &'static str,
        value: impl ToString,
    ) -> Self {
        ServiceError::AlreadyExists {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) | Self::HashError(_) | Self::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound { .. } | Self::NotFoundBy { .. } | Self::SaleRejected(_) => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::InactiveUser(_) => StatusCode::FORBIDDEN,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::HashError(_) | Self::InternalError(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Lists each collected violation separately for multi-cause rejections.
    pub fn details(&self) -> Option<Vec<String>> {
        match self {
            Self::SaleRejected(violations) => {
                Some(violations.iter().map(ToString::to_string).collect())
            }
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            errors: self.details(),
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}
