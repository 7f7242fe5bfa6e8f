//! # Todolist Core
//!
//! Domain types and rules for the todolist application.
//!
//! This crate is the functional core of the app. It knows nothing about HTTP,
//! sessions or SQL:
//!
//! - **Types**: [`TodoId`], [`TodoItem`], [`TodoDraft`]
//! - **Store**: the [`TodoStore`] trait every backend implements, plus [`StoreError`]
//! - **Validation**: pure checks ([`validation::check_add`], [`validation::check_edit`])
//!   and their store-backed wrappers
//! - **Commands**: the add / edit / mark-done transitions the route handlers drive
//!
//! ## Request Flow
//!
//! ```text
//! Received ──▶ Validated ──▶ Mutated ──▶ Responded
//!                  │                         ▲
//!                  └──── Rejected ───────────┘   (no mutation)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use todolist_core::{commands, TodoDraft};
//!
//! async fn example<S: todolist_core::TodoStore>(store: &S) {
//!     match commands::add(store, TodoDraft::new("Breakfast", Some("Eat first".into()))).await {
//!         Ok(item) => println!("created {}", item.id),
//!         Err(commands::SubmitError::Invalid(reason)) => println!("rejected: {reason}"),
//!         Err(commands::SubmitError::Store(e)) => eprintln!("store failure: {e}"),
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod store;
pub mod todo;
pub mod validation;

// Re-export key types for convenience
pub use commands::{DoneTarget, EditTodo, SubmitError};
pub use store::{StoreError, TodoStore};
pub use todo::{TodoDraft, TodoId, TodoItem};
pub use validation::ValidationError;
