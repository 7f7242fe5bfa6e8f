//! Axum web layer for the todolist app.
//!
//! This crate is the imperative shell around `todolist-core`: it parses
//! forms, drives the core commands against an injected [`TodoStore`], and
//! turns the outcome into a rendered page or a redirect with a flash message.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, forms, cookies
//! │  - Method override, correlation ids     │  ← Sessions / flash
//! │  - Page rendering (minijinja)           │  ← Logging, metrics
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - Validation rules                     │  ← Testable without I/O
//! │  - Add / edit / mark-done commands      │
//! │  - TodoStore trait (injected)           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Request Flow
//!
//! 1. **Method override** turns `POST ?_method=PUT|DELETE` into the real verb
//! 2. **Router** dispatches to a handler with `AppState<S>`
//! 3. **Handler** extracts the form and runs a core command
//! 4. **Success**: set a flash message, redirect to `/todos`
//! 5. **Rejection**: re-render the form with the submitted values and the reason
//!
//! # Example
//!
//! ```ignore
//! use todolist_web::{build_app, flash, AppState, Views};
//!
//! let state = AppState::new(store, Views::new("Primidi")?);
//! let app = build_app(state, flash::session_layer(60, false));
//! axum::serve(listener, axum::ServiceExt::<axum::extract::Request>::into_make_service(app)).await?;
//! ```
//!
//! [`TodoStore`]: todolist_core::TodoStore

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod flash;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod views;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::CorrelationId;
pub use flash::Flash;
pub use middleware::{
    correlation_id_layer, method_override_layer, MethodOverride, CORRELATION_ID_HEADER,
};
pub use router::{build_app, build_router, App};
pub use state::AppState;
pub use views::Views;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
