//! Validation of submitted todo forms against the current store contents.
//!
//! Each rule comes in two halves. The `check_*` functions are pure: they
//! decide from the submission and the record the store returned for the
//! submitted name. The `validate_*` functions perform that lookup and then
//! delegate to the pure check.
//!
//! Validation is a pre-check only. Two concurrent requests can both pass it,
//! so the store's unique constraint remains the final word on duplicates.

use crate::store::{Result as StoreResult, TodoStore};
use crate::todo::{TodoDraft, TodoId, TodoItem};
use thiserror::Error;

/// Longest accepted todo name, in characters.
pub const MAX_TODO_LEN: usize = 500;

/// Reasons a submitted form is rejected. The display text is shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The name is empty or whitespace.
    #[error("Todo name is required")]
    Empty,

    /// The name exceeds [`MAX_TODO_LEN`].
    #[error("Todo name is too long (max {max} characters)")]
    TooLong {
        /// Maximum length in characters
        max: usize,
    },

    /// A different record already uses the name.
    #[error("The todo \"{todo}\" is already in use, please choose another name!")]
    DuplicateName {
        /// The colliding name
        todo: String,
    },

    /// The record being edited was removed in the meantime.
    #[error("This todo no longer exists.")]
    Vanished,
}

fn check_name(todo: &str) -> Result<(), ValidationError> {
    if todo.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if todo.chars().count() > MAX_TODO_LEN {
        return Err(ValidationError::TooLong { max: MAX_TODO_LEN });
    }
    Ok(())
}

/// Check a new todo. `existing` is the record currently holding `todo`, if any.
///
/// # Errors
///
/// - `Empty` / `TooLong` for a bad name
/// - `DuplicateName` if any record already has the name
pub fn check_add(todo: &str, existing: Option<&TodoItem>) -> Result<(), ValidationError> {
    check_name(todo)?;
    if existing.is_some() {
        return Err(ValidationError::DuplicateName {
            todo: todo.to_string(),
        });
    }
    Ok(())
}

/// Check an edit of record `id` from `old_todo` to `todo`.
///
/// Keeping the name unchanged is never a collision. A rename collides only
/// with a record other than the one being edited.
///
/// # Errors
///
/// - `Empty` / `TooLong` for a bad name
/// - `DuplicateName` if a different record already has the new name
pub fn check_edit(
    id: TodoId,
    todo: &str,
    old_todo: &str,
    existing: Option<&TodoItem>,
) -> Result<(), ValidationError> {
    check_name(todo)?;
    if todo == old_todo {
        return Ok(());
    }
    match existing {
        Some(other) if other.id != id => Err(ValidationError::DuplicateName {
            todo: todo.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validate an add against the store.
///
/// The outer `Result` carries store failures; the inner one the verdict.
///
/// # Errors
///
/// Returns the store error if the name lookup fails.
pub async fn validate_add<S: TodoStore>(
    store: &S,
    draft: &TodoDraft,
) -> StoreResult<Result<(), ValidationError>> {
    let existing = store.find_by_name(&draft.todo).await?;
    Ok(check_add(&draft.todo, existing.as_ref()))
}

/// Validate an edit against the store.
///
/// # Errors
///
/// Returns the store error if the name lookup fails.
pub async fn validate_edit<S: TodoStore>(
    store: &S,
    id: TodoId,
    old_todo: &str,
    draft: &TodoDraft,
) -> StoreResult<Result<(), ValidationError>> {
    let existing = store.find_by_name(&draft.todo).await?;
    Ok(check_edit(id, &draft.todo, old_todo, existing.as_ref()))
}
