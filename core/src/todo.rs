//! Domain types for todo items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a todo item.
///
/// Assigned by the store on insert and never changed afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A single todo item as held by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Name of the todo, unique across the store
    pub todo: String,
    /// Optional free text
    pub description: Option<String>,
    /// When the store accepted the todo
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a todo item from its parts.
    #[must_use]
    pub const fn new(
        id: TodoId,
        todo: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            todo,
            description,
            created_at,
        }
    }
}

/// The user-editable fields of a todo, as submitted on add or edit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    /// Requested name
    pub todo: String,
    /// Requested description
    pub description: Option<String>,
}

impl TodoDraft {
    /// Creates a draft. A blank description is treated as absent.
    #[must_use]
    pub fn new(todo: impl Into<String>, description: Option<String>) -> Self {
        Self {
            todo: todo.into(),
            description: description.filter(|d| !d.trim().is_empty()),
        }
    }
}

impl From<&TodoItem> for TodoDraft {
    fn from(item: &TodoItem) -> Self {
        Self {
            todo: item.todo.clone(),
            description: item.description.clone(),
        }
    }
}
