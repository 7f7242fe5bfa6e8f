//! Todo store trait and related types.
//!
//! The `TodoStore` trait abstracts over the persistence backend. Production
//! code uses the `PostgreSQL` implementation; tests use an in-memory one.
//!
//! Every operation is a single atomic write or read. Uniqueness of the todo
//! name is owned by the store: a backend must reject a second record with the
//! same name with [`StoreError::DuplicateName`], even if the caller skipped
//! validation.
//!
//! # Example
//!
//! ```ignore
//! use todolist_core::{TodoDraft, TodoStore};
//!
//! async fn example<S: TodoStore>(store: &S) -> Result<(), todolist_core::StoreError> {
//!     let item = store.insert(TodoDraft::new("Breakfast", None)).await?;
//!     assert!(store.find_by_name("Breakfast").await?.is_some());
//!     store.delete(item.id).await
//! }
//! ```

use crate::todo::{TodoDraft, TodoId, TodoItem};
use std::future::Future;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The draft itself is unacceptable (empty name).
    #[error("Invalid todo: {0}")]
    Validation(String),

    /// Another record already uses this name.
    #[error("Todo \"{0}\" already exists")]
    DuplicateName(String),

    /// No record matches the given id or name.
    #[error("Todo {0} not found")]
    NotFound(String),

    /// Backend connection or query failure.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent collection of todo items.
///
/// Methods return `impl Future + Send` so stores can be used behind generic
/// axum handlers.
pub trait TodoStore: Send + Sync + 'static {
    /// Return every current item, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the backend query fails.
    fn list(&self) -> impl Future<Output = Result<Vec<TodoItem>>> + Send;

    /// Look up an item by its identifier.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the backend query fails.
    fn find_by_id(&self, id: TodoId) -> impl Future<Output = Result<Option<TodoItem>>> + Send;

    /// Look up an item by its exact (case-sensitive) name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the backend query fails.
    fn find_by_name(&self, name: &str)
    -> impl Future<Output = Result<Option<TodoItem>>> + Send;

    /// Insert a new item. The store assigns the id and creation time.
    ///
    /// # Errors
    ///
    /// - `Validation`: the name is blank
    /// - `DuplicateName`: the name is already taken
    /// - `DatabaseError`: the backend write fails
    fn insert(&self, draft: TodoDraft) -> impl Future<Output = Result<TodoItem>> + Send;

    /// Replace the name and description of an existing item.
    ///
    /// # Errors
    ///
    /// - `Validation`: the name is blank
    /// - `NotFound`: no item has this id
    /// - `DuplicateName`: a different item already has the new name
    /// - `DatabaseError`: the backend write fails
    fn update(&self, id: TodoId, draft: TodoDraft)
    -> impl Future<Output = Result<TodoItem>> + Send;

    /// Delete the item with this id.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no item has this id
    /// - `DatabaseError`: the backend write fails
    fn delete(&self, id: TodoId) -> impl Future<Output = Result<()>> + Send;

    /// Delete the item with this exact name.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no item has this name
    /// - `DatabaseError`: the backend write fails
    fn delete_by_name(&self, name: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Store-level guard shared by every backend: a todo must have a name.
///
/// # Errors
///
/// Returns `StoreError::Validation` if `todo` is empty or whitespace.
pub fn require_name(todo: &str) -> Result<()> {
    if todo.trim().is_empty() {
        return Err(StoreError::Validation("todo name cannot be empty".to_string()));
    }
    Ok(())
}
