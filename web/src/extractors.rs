//! Custom Axum extractors.
//!
//! # Examples
//!
//! ```ignore
//! use todolist_web::extractors::CorrelationId;
//!
//! async fn handler(correlation_id: CorrelationId) -> &'static str {
//!     tracing::info!(correlation_id = %correlation_id, "Listing todos");
//!     "ok"
//! }
//! ```

use crate::middleware::CORRELATION_ID_HEADER;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::fmt;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// # Priority
///
/// 1. The id stored by `correlation_id_layer()` in request extensions
/// 2. A valid UUID in the `X-Correlation-ID` header
/// 3. A freshly generated UUID v4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}
