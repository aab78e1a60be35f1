use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use toybox_core::error::CoreError;
use toybox_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Implements [`IntoResponse`] to produce consistent JSON error
/// responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `toybox_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the toy store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(CoreError::InvalidIdentifier(raw)) => (
                StatusCode::BAD_REQUEST,
                "INVALID_IDENTIFIER",
                format!("'{raw}' is not a valid toy id"),
            ),
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Store(err) => classify_store_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Connection-level failures map to 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    if err.is_unavailable() {
        tracing::error!(error = %err, "Toy store unavailable");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "STORAGE_UNAVAILABLE",
            "The toy store is currently unavailable".to_string(),
        );
    }

    tracing::error!(error = %err, "Toy store error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
