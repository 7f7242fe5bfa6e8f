//! Todo list routes.
//!
//! Each mutating handler runs one command from `todolist_core::commands`:
//!
//! - accepted: push a flash message, `303 See Other` to `/todos`
//! - rejected: re-render the form with the submitted values, `422`
//! - store failure: `500` through [`AppError`](crate::AppError)

use crate::{
    extractors::CorrelationId,
    flash::{self, Flash},
    forms::{AddTodoForm, DoneForm, EditTodoForm},
    state::AppState,
    AppError, WebResult,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use todolist_core::{commands, SubmitError, TodoStore};

const TODOS_PATH: &str = "/todos";

/// `GET /todos`: every todo, plus pending flash messages (consumed).
///
/// # Errors
///
/// Returns 500 if the store or the session fails.
pub async fn list_todos<S: TodoStore>(
    State(state): State<AppState<S>>,
    correlation_id: CorrelationId,
    flash: Flash,
) -> WebResult<Html<String>> {
    let todos = state.store.list().await?;
    let messages = flash.take().await?;

    tracing::debug!(
        correlation_id = %correlation_id,
        count = todos.len(),
        flashes = messages.len(),
        "Listing todos"
    );

    Ok(state.views.todos(&todos, &messages)?)
}

/// `GET /todos/add`: empty add form.
///
/// # Errors
///
/// Returns 500 if the page fails to render.
#[allow(clippy::unused_async)]
pub async fn add_form<S: TodoStore>(State(state): State<AppState<S>>) -> WebResult<Html<String>> {
    Ok(state.views.add_form(&AddTodoForm::default(), None)?)
}

/// `POST /todos`: add a todo.
///
/// # Errors
///
/// Returns 500 if the store, the session or rendering fails.
pub async fn create_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    correlation_id: CorrelationId,
    flash: Flash,
    Form(form): Form<AddTodoForm>,
) -> WebResult<Response> {
    match commands::add(state.store.as_ref(), form.draft()).await {
        Ok(item) => {
            metrics::counter!("todos.created").increment(1);
            tracing::info!(correlation_id = %correlation_id, todo_id = %item.id, "Todo created");
            flash.push(flash::TODO_ADDED).await?;
            Ok(Redirect::to(TODOS_PATH).into_response())
        }
        Err(SubmitError::Invalid(reason)) => {
            metrics::counter!("todos.rejected", "form" => "add").increment(1);
            tracing::info!(correlation_id = %correlation_id, reason = %reason, "Add rejected");
            let page = state.views.add_form(&form, Some(&reason))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(SubmitError::Store(e)) => Err(e.into()),
    }
}

/// `GET /todos/edit/:todo`: edit form for the named todo.
///
/// # Errors
///
/// Returns 404 if no todo has that name, 500 if the store or rendering fails.
pub async fn edit_form<S: TodoStore>(
    State(state): State<AppState<S>>,
    Path(todo): Path<String>,
) -> WebResult<Html<String>> {
    let item = state
        .store
        .find_by_name(&todo)
        .await?
        .ok_or_else(|| AppError::not_found("Todo", &todo))?;

    Ok(state.views.edit_form(&EditTodoForm::from(&item), None)?)
}

/// `PUT /todos`: apply an edit.
///
/// # Errors
///
/// Returns 500 if the store, the session or rendering fails.
pub async fn update_todo<S: TodoStore>(
    State(state): State<AppState<S>>,
    correlation_id: CorrelationId,
    flash: Flash,
    Form(form): Form<EditTodoForm>,
) -> WebResult<Response> {
    match commands::edit(state.store.as_ref(), form.command()).await {
        Ok(item) => {
            metrics::counter!("todos.edited").increment(1);
            tracing::info!(correlation_id = %correlation_id, todo_id = %item.id, "Todo updated");
            flash.push(flash::TODO_EDITED).await?;
            Ok(Redirect::to(TODOS_PATH).into_response())
        }
        Err(SubmitError::Invalid(reason)) => {
            metrics::counter!("todos.rejected", "form" => "edit").increment(1);
            tracing::info!(
                correlation_id = %correlation_id,
                todo_id = %form.id,
                reason = %reason,
                "Edit rejected"
            );
            let page = state.views.edit_form(&form, Some(&reason))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(SubmitError::Store(e)) => Err(e.into()),
    }
}

/// `DELETE /todos`: mark a todo done. An already-absent todo is not an error.
///
/// # Errors
///
/// Returns 500 if the store or the session fails.
pub async fn mark_done<S: TodoStore>(
    State(state): State<AppState<S>>,
    correlation_id: CorrelationId,
    flash: Flash,
    Form(form): Form<DoneForm>,
) -> WebResult<Redirect> {
    let removed = commands::mark_done(state.store.as_ref(), form.target()).await?;
    if removed {
        metrics::counter!("todos.done").increment(1);
    }
    tracing::info!(correlation_id = %correlation_id, removed, "Todo marked done");

    flash.push(flash::TODO_DONE).await?;
    Ok(Redirect::to(TODOS_PATH))
}
