//! Tower middleware for request tracking and HTML form method override.
//!
//! - **Correlation ID**: extract or generate an id, open an `http_request`
//!   span around the handler, echo the id in `X-Correlation-ID`
//! - **Method override**: `POST /todos?_method=PUT` is routed as `PUT /todos`
//!
//! # Example
//!
//! ```ignore
//! use tower::Layer;
//! use todolist_web::middleware::{correlation_id_layer, method_override_layer};
//!
//! let router = Router::new()
//!     .route("/todos", get(list).put(update))
//!     .layer(correlation_id_layer());
//!
//! // Must wrap the router itself: route matching happens inside it.
//! let app = method_override_layer().layer(router);
//! ```

use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    response::Response,
};
use serde::Deserialize;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Create a layer that adds correlation ID tracking to all requests.
///
/// The id is stored in request extensions as a [`Uuid`], which the
/// [`CorrelationId`](crate::CorrelationId) extractor reads.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Copy, Debug)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Middleware service for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            uri = %req.uri(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(header_value) = HeaderValue::from_str(&correlation_id.to_string()) {
                response
                    .headers_mut()
                    .insert(CORRELATION_ID_HEADER, header_value);
            }

            Ok(response)
        })
    }
}

/// Create a layer that rewrites `POST ?_method=...` into the named method.
///
/// Only `PUT`, `DELETE` and `PATCH` are accepted (case-insensitive). Any
/// other value, or a non-POST request, passes through untouched.
#[must_use]
pub const fn method_override_layer() -> MethodOverrideLayer {
    MethodOverrideLayer
}

/// Layer for HTML form method override.
#[derive(Clone, Copy, Debug)]
pub struct MethodOverrideLayer;

impl<S> Layer<S> for MethodOverrideLayer {
    type Service = MethodOverride<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MethodOverride { inner }
    }
}

/// Middleware service for HTML form method override.
#[derive(Clone, Debug)]
pub struct MethodOverride<S> {
    inner: S,
}

#[derive(Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Resolve the method a request should be routed as.
fn overridden_method(method: &Method, query: Option<&str>) -> Option<Method> {
    if method != Method::POST {
        return None;
    }

    let requested = serde_urlencoded::from_str::<OverrideQuery>(query?)
        .ok()?
        .method?
        .to_ascii_uppercase();

    match requested.as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        "PATCH" => Some(Method::PATCH),
        _ => None,
    }
}

impl<S> Service<Request> for MethodOverride<S>
where
    S: Service<Request>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        if let Some(method) = overridden_method(req.method(), req.uri().query()) {
            tracing::trace!(%method, uri = %req.uri(), "Method override");
            *req.method_mut() = method;
        }

        self.inner.call(req)
    }
}
