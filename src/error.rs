use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// ApiError
///
/// The single error taxonomy surfaced to callers. Every failure a handler
/// can produce maps onto one of these variants; the variant alone decides
/// the HTTP status, and the message becomes the `detail` field of the JSON
/// body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing/invalid/expired token, or a token whose claim no longer
    /// resolves to a live user. Deliberately undifferentiated so a caller
    /// cannot tell which check failed.
    #[error("Could not validate credentials")]
    Unauthorized,

    /// Acting user is authenticated but not permitted. Only produced when
    /// the ownership check is switched on.
    #[error("{0}")]
    Forbidden(String),

    /// Entity absent by id, or an empty filtered list (the legacy service
    /// conflates the two).
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation: duplicate email/phone/town/category/favorite.
    #[error("{0}")]
    Conflict(String),

    /// Malformed field data rejected before or by the store's type layer.
    #[error("{0}")]
    InvalidInput(String),

    /// Unexpected database or filesystem failure. Not fatal to the
    /// process; the request fails hard and the next one proceeds.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            // The legacy service answered malformed input with 409 rather
            // than 422; reproduced.
            ApiError::InvalidInput(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::NotFound("record not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict("value already exists".to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                ApiError::InvalidInput("referenced record does not exist".to_string())
            }
            _ => {
                tracing::error!("database error: {err:?}");
                ApiError::Internal("database error".to_string())
            }
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Internal(format!("attachment store error: {err}"))
    }
}
