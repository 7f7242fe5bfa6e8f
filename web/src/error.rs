//! Error types for web handlers.
//!
//! [`AppError`] bridges store, template and session failures to HTTP
//! responses. Form validation failures never reach this type: they are
//! rendered inline by the handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use todolist_core::StoreError;

/// Application error type for web handlers.
///
/// The body is plain text; the source error is logged for 5xx responses
/// and never sent to the client.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<AppState<S>>) -> WebResult<Html<String>> {
///     let item = state.store.find_by_name(&name).await?
///         .ok_or_else(|| AppError::not_found("Todo", &name))?;
///     Ok(state.views.edit_form(&item.into(), None)?)
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for logs)
    code: &'static str,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Attach the underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, key: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} {key} not found"),
            "NOT_FOUND",
        )
    }

    /// Create a 409 Conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message, "CONFLICT")
    }

    /// Create a 422 Unprocessable Entity error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message, "VALIDATION_ERROR")
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_SERVER_ERROR")
    }

    /// HTTP status this error renders with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                ),
                None => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    "Internal server error"
                ),
            }
        }

        (self.status, self.message).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => Self::not_found("Todo", key),
            StoreError::DuplicateName(_) => Self::conflict(err.to_string()),
            StoreError::Validation(message) => Self::validation(message),
            StoreError::DatabaseError(_) => {
                Self::internal("An internal error occurred").with_source(anyhow::Error::new(err))
            }
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        Self::internal("Failed to render page").with_source(anyhow::Error::new(err))
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::internal("Session unavailable").with_source(anyhow::Error::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::validation("Todo name is required");
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] Todo name is required");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::not_found("Todo", "Lunch");
        assert_eq!(err.to_string(), "[NOT_FOUND] Todo Lunch not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_errors_map_to_statuses() {
        let cases = [
            (StoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (StoreError::DuplicateName("x".into()), StatusCode::CONFLICT),
            (StoreError::Validation("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (StoreError::DatabaseError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (store_err, status) in cases {
            assert_eq!(AppError::from(store_err).status(), status);
        }
    }

    #[test]
    fn test_database_error_keeps_source_out_of_message() {
        let err = AppError::from(StoreError::DatabaseError("password=hunter2".into()));
        assert!(!err.to_string().contains("hunter2"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_response_is_plain_text() {
        let response = AppError::conflict("taken").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        assert_eq!(content_type, Some("text/plain; charset=utf-8"));
    }
}
