//! Static pages.

use crate::{state::AppState, WebResult};
use axum::{extract::State, response::Html};
use todolist_core::TodoStore;

/// `GET /`
///
/// # Errors
///
/// Returns 500 if the page fails to render.
#[allow(clippy::unused_async)]
pub async fn home<S: TodoStore>(State(state): State<AppState<S>>) -> WebResult<Html<String>> {
    Ok(state.views.home()?)
}

/// `GET /about`
///
/// # Errors
///
/// Returns 500 if the page fails to render.
#[allow(clippy::unused_async)]
pub async fn about<S: TodoStore>(State(state): State<AppState<S>>) -> WebResult<Html<String>> {
    Ok(state.views.about()?)
}
