//! Application state for Axum handlers.

use crate::views::Views;
use std::sync::Arc;
use todolist_core::TodoStore;

/// Application state shared across all HTTP handlers.
///
/// Generic over the store so tests can substitute an in-memory one.
///
/// # Examples
///
/// ```ignore
/// async fn handler<S: TodoStore>(
///     State(state): State<AppState<S>>,
/// ) -> WebResult<Html<String>> {
///     let todos = state.store.list().await?;
///     Ok(state.views.todos(&todos, &[])?)
/// }
/// ```
pub struct AppState<S: TodoStore> {
    /// Todo persistence
    pub store: Arc<S>,
    /// Page renderer
    pub views: Arc<Views>,
}

// Manual impl: deriving would require `S: Clone`.
impl<S: TodoStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            views: Arc::clone(&self.views),
        }
    }
}

impl<S: TodoStore> AppState<S> {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: S, views: Views) -> Self {
        Self {
            store: Arc::new(store),
            views: Arc::new(views),
        }
    }
}
