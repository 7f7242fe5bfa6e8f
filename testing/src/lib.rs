//! # Todolist Testing
//!
//! Testing utilities for the todolist workspace.
//!
//! This crate provides:
//! - [`InMemoryTodoStore`]: a substitute for the `PostgreSQL` store
//! - [`fixtures`]: builders for common store states
//!
//! ## Example
//!
//! ```ignore
//! use todolist_testing::{fixtures, InMemoryTodoStore};
//!
//! #[tokio::test]
//! async fn test_edit_flow() {
//!     let store = fixtures::store_with(&[("Lunch", None)]);
//!     let lunch = store.snapshot().remove(0);
//!     // drive the web layer or `todolist_core::commands` against `store`
//! }
//! ```

pub mod store_mocks;

pub use store_mocks::InMemoryTodoStore;

/// Builders for test data.
pub mod fixtures {
    use super::InMemoryTodoStore;
    use chrono::{Duration, TimeZone, Utc};
    use todolist_core::{TodoDraft, TodoId, TodoItem};

    /// Build a draft from string slices.
    #[must_use]
    pub fn draft(todo: &str, description: Option<&str>) -> TodoDraft {
        TodoDraft::new(todo, description.map(str::to_string))
    }

    /// Build a stored item with a fresh id.
    ///
    /// Creation times count up from 2025-01-01 in `seq` minutes so ordering
    /// assertions are deterministic.
    #[must_use]
    pub fn item(todo: &str, description: Option<&str>, seq: i64) -> TodoItem {
        let base = Utc
            .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        TodoItem::new(
            TodoId::new(),
            todo.to_string(),
            description.map(str::to_string),
            base + Duration::minutes(seq),
        )
    }

    /// Build an in-memory store pre-filled with `(todo, description)` pairs.
    #[must_use]
    pub fn store_with(entries: &[(&str, Option<&str>)]) -> InMemoryTodoStore {
        let items = entries
            .iter()
            .zip(0_i64..)
            .map(|((todo, description), seq)| item(todo, *description, seq))
            .collect();
        InMemoryTodoStore::with_items(items)
    }
}
