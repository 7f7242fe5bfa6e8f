//! Router composition.

use crate::handlers::{health, pages, todos};
use crate::middleware::{correlation_id_layer, method_override_layer, MethodOverride};
use crate::state::AppState;
use axum::{routing::get, Router};
use todolist_core::TodoStore;
use tower::Layer;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// The fully layered application service.
pub type App = MethodOverride<Router>;

/// Create the router with every page and health endpoint.
///
/// # Routes
///
/// ## Pages
/// - `GET /` - Landing page
/// - `GET /about` - About page
///
/// ## Todos
/// - `GET /todos` - List todos and pending flash messages
/// - `POST /todos` - Add a todo
/// - `PUT /todos` - Edit a todo
/// - `DELETE /todos` - Mark a todo done
/// - `GET /todos/add` - Add form
/// - `GET /todos/edit/:todo` - Edit form for the named todo
///
/// ## Health
/// - `GET /health` - Liveness
/// - `GET /health/ready` - Store reachability
pub fn build_router<S: TodoStore>(state: AppState<S>) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::home::<S>))
        .route("/about", get(pages::about::<S>))
        // Todos
        .route(
            "/todos",
            get(todos::list_todos::<S>)
                .post(todos::create_todo::<S>)
                .put(todos::update_todo::<S>)
                .delete(todos::mark_done::<S>),
        )
        .route("/todos/add", get(todos::add_form::<S>))
        .route("/todos/edit/:todo", get(todos::edit_form::<S>))
        // Health
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check::<S>))
        .with_state(state)
}

/// Create the servable application: routes, sessions, tracing and method override.
///
/// Method override wraps the router from outside so the rewritten method
/// is the one routing sees.
///
/// # Example
///
/// ```ignore
/// let app = build_app(state, flash::session_layer(60, false));
/// axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
/// ```
pub fn build_app<S: TodoStore>(
    state: AppState<S>,
    sessions: SessionManagerLayer<MemoryStore>,
) -> App {
    let router = build_router(state)
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer());

    method_override_layer().layer(router)
}
