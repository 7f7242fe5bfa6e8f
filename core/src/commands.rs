//! The mutating transitions behind the todo routes.
//!
//! Each command validates against the store, then performs a single store
//! write. A rejection never mutates. A constraint violation reported by the
//! store at write time is folded into the same [`SubmitError::Invalid`] a
//! failed pre-check produces, so callers handle both paths identically.

use crate::store::{StoreError, TodoStore};
use crate::todo::{TodoDraft, TodoId, TodoItem};
use crate::validation::{self, ValidationError};
use thiserror::Error;

/// Outcome of a rejected add or edit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The submission was refused; re-display the form with this reason.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The store failed; nothing to show the user but a server error.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(todo) => {
                Self::Invalid(ValidationError::DuplicateName { todo })
            }
            StoreError::NotFound(_) => Self::Invalid(ValidationError::Vanished),
            StoreError::Validation(_) => Self::Invalid(ValidationError::Empty),
            StoreError::DatabaseError(_) => Self::Store(err),
        }
    }
}

/// An edit request: record `id`, previously named `old_todo`, becomes `draft`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditTodo {
    /// Record being edited
    pub id: TodoId,
    /// Name the form was opened with
    pub old_todo: String,
    /// New field values
    pub draft: TodoDraft,
}

/// Which record a "mark done" request refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DoneTarget {
    /// By stable identifier
    Id(TodoId),
    /// By display name
    Name(String),
}

/// Add a new todo.
///
/// # Errors
///
/// - `Invalid` if the name is bad or already taken
/// - `Store` if the backend fails
pub async fn add<S: TodoStore>(store: &S, draft: TodoDraft) -> Result<TodoItem, SubmitError> {
    validation::validate_add(store, &draft).await??;

    let item = store.insert(draft).await?;
    tracing::info!(todo_id = %item.id, todo = %item.todo, "Todo added");
    Ok(item)
}

/// Apply an edit to an existing todo.
///
/// # Errors
///
/// - `Invalid` if the new name is bad, collides with another record, or the
///   record no longer exists
/// - `Store` if the backend fails
pub async fn edit<S: TodoStore>(store: &S, edit: EditTodo) -> Result<TodoItem, SubmitError> {
    validation::validate_edit(store, edit.id, &edit.old_todo, &edit.draft).await??;

    let item = store.update(edit.id, edit.draft).await?;
    tracing::info!(todo_id = %item.id, todo = %item.todo, "Todo edited");
    Ok(item)
}

/// Mark a todo as done, which removes it.
///
/// Returns `false` when no record matched; that is not an error.
///
/// # Errors
///
/// Returns the store error if the backend fails.
pub async fn mark_done<S: TodoStore>(store: &S, target: DoneTarget) -> Result<bool, StoreError> {
    let result = match &target {
        DoneTarget::Id(id) => store.delete(*id).await,
        DoneTarget::Name(name) => store.delete_by_name(name).await,
    };

    match result {
        Ok(()) => {
            tracing::info!(done = ?target, "Todo done");
            Ok(true)
        }
        Err(StoreError::NotFound(_)) => {
            tracing::debug!(done = ?target, "Todo already gone, nothing to mark done");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
