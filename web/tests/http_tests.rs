//! End-to-end HTTP tests for the todo app.
//!
//! Drives the fully layered app (method override, sessions, routes) with
//! `tower::ServiceExt::oneshot` against an in-memory store, carrying the
//! session cookie between requests like a browser would.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code uses expect for clear failure messages

use axum::{
    body::Body,
    extract::Request,
    http::{header, Method, StatusCode},
};
use todolist_core::{TodoId, TodoItem};
use todolist_testing::{fixtures, InMemoryTodoStore};
use todolist_web::{build_app, flash, App, AppState, Views, CORRELATION_ID_HEADER};
use tower::ServiceExt;

struct Page {
    status: StatusCode,
    location: Option<String>,
    correlation_id: Option<String>,
    body: String,
}

/// Browser stand-in: one cookie jar, one app.
struct TestClient {
    app: App,
    cookie: Option<String>,
}

impl TestClient {
    fn new(store: &InMemoryTodoStore) -> Self {
        let views = Views::new("Primidi").expect("templates compile");
        let state = AppState::new(store.clone(), views);
        Self {
            app: build_app(state, flash::session_layer(60, false)),
            cookie: None,
        }
    }

    async fn send(&mut self, method: Method, uri: &str, form: Option<&[(&str, &str)]>) -> Page {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = match form {
            Some(fields) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(serde_urlencoded::to_string(fields).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap_or_default();
            self.cookie = pair
                .split_once('=')
                .filter(|(_, value)| !value.is_empty())
                .map(|_| pair.to_string());
        }

        let header_text = |name: &str| {
            response
                .headers()
                .get(name)
                .map(|v| v.to_str().unwrap().to_string())
        };
        let status = response.status();
        let location = header_text("location");
        let correlation_id = header_text(CORRELATION_ID_HEADER);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        Page {
            status,
            location,
            correlation_id,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn get(&mut self, uri: &str) -> Page {
        self.send(Method::GET, uri, None).await
    }

    /// Submit an HTML form, which browsers can only do with POST.
    async fn submit(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        self.send(Method::POST, uri, Some(form)).await
    }
}

fn find(store: &InMemoryTodoStore, todo: &str) -> Option<TodoItem> {
    store.snapshot().into_iter().find(|item| item.todo == todo)
}

fn assert_redirect_to_list(page: &Page) {
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/todos"));
}

#[tokio::test]
async fn test_static_pages() {
    let store = InMemoryTodoStore::new();
    let mut client = TestClient::new(&store);

    let home = client.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("To Do List App | Home"));
    assert!(home.body.contains("Primidi"));

    let about = client.get("/about").await;
    assert_eq!(about.status, StatusCode::OK);
    assert!(about.body.contains("To Do List App | About"));

    let add = client.get("/todos/add").await;
    assert_eq!(add.status, StatusCode::OK);
    assert!(add.body.contains("To Do List App | Add To Do"));
}

#[tokio::test]
async fn test_add_redirects_and_flashes_once() {
    let store = InMemoryTodoStore::new();
    let mut client = TestClient::new(&store);

    let page = client
        .submit("/todos", &[("todo", "Breakfast"), ("description", "Eggs")])
        .await;
    assert_redirect_to_list(&page);

    let list = client.get("/todos").await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains("New todo added!"));
    assert!(list.body.contains("Breakfast"));
    assert!(list.body.contains("Eggs"));

    let again = client.get("/todos").await;
    assert!(!again.body.contains("New todo added!"));
    assert!(again.body.contains("Breakfast"));

    let stored = find(&store, "Breakfast").expect("stored");
    assert_eq!(stored.description.as_deref(), Some("Eggs"));
}

#[tokio::test]
async fn test_add_without_description_stores_none() {
    let store = InMemoryTodoStore::new();
    let mut client = TestClient::new(&store);

    let page = client
        .submit("/todos", &[("todo", "Lunch"), ("description", "")])
        .await;
    assert_redirect_to_list(&page);
    assert_eq!(find(&store, "Lunch").expect("stored").description, None);
}

#[tokio::test]
async fn test_duplicate_add_rerenders_form_and_leaves_store_unchanged() {
    let store = fixtures::store_with(&[("Breakfast", None)]);
    let before = store.snapshot();
    let mut client = TestClient::new(&store);

    let page = client
        .submit("/todos", &[("todo", "Breakfast"), ("description", "x")])
        .await;

    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("To Do List App | Add To Do"));
    assert!(page.body.contains("is already in use, please choose another name!"));
    assert!(page.body.contains("value=\"Breakfast\""));
    assert!(page.body.contains(">x</textarea>"));
    assert_eq!(store.snapshot(), before);

    let list = client.get("/todos").await;
    assert!(!list.body.contains("New todo added!"));
}

#[tokio::test]
async fn test_blank_add_is_rejected_inline() {
    let store = InMemoryTodoStore::new();
    let mut client = TestClient::new(&store);

    let page = client.submit("/todos", &[("todo", "   ")]).await;
    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("Todo name is required"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_edit_form_is_populated_from_record() {
    let store = fixtures::store_with(&[("Go shopping", Some("Milk"))]);
    let item = find(&store, "Go shopping").unwrap();
    let mut client = TestClient::new(&store);

    let page = client.get("/todos/edit/Go%20shopping").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("To Do List App | Edit To Do"));
    assert!(page.body.contains(&item.id.to_string()));
    assert!(page.body.contains("Milk"));
}

#[tokio::test]
async fn test_edit_link_for_name_with_slash_opens_form() {
    let store = fixtures::store_with(&[("a/b", Some("Slashed"))]);
    let mut client = TestClient::new(&store);

    let list = client.get("/todos").await;
    let start = list.body.find("/todos/edit/").expect("edit link rendered");
    let href = &list.body[start..];
    let href = &href[..href.find('"').unwrap()];
    assert_eq!(href, "/todos/edit/a%2Fb");

    let page = client.get(href).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Slashed"));
}

#[tokio::test]
async fn test_edit_form_for_unknown_name_is_404() {
    let store = InMemoryTodoStore::new();
    let mut client = TestClient::new(&store);

    let page = client.get("/todos/edit/Nothing").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_keeping_own_name_succeeds() {
    let store = fixtures::store_with(&[("Lunch", None)]);
    let lunch = find(&store, "Lunch").unwrap();
    let mut client = TestClient::new(&store);

    let id = lunch.id.to_string();
    let page = client
        .submit(
            "/todos?_method=PUT",
            &[
                ("_id", id.as_str()),
                ("todo", "Lunch"),
                ("description", "Updated"),
                ("oldTodo", "Lunch"),
            ],
        )
        .await;
    assert_redirect_to_list(&page);

    let updated = find(&store, "Lunch").unwrap();
    assert_eq!(updated.id, lunch.id);
    assert_eq!(updated.description.as_deref(), Some("Updated"));

    let list = client.get("/todos").await;
    assert!(list.body.contains("Todo edited!"));
}

#[tokio::test]
async fn test_edit_onto_another_name_is_rejected() {
    let store = fixtures::store_with(&[("Lunch", None), ("Dinner", None)]);
    let before = store.snapshot();
    let lunch = find(&store, "Lunch").unwrap();
    let mut client = TestClient::new(&store);

    let id = lunch.id.to_string();
    let page = client
        .submit(
            "/todos?_method=put",
            &[("_id", id.as_str()), ("todo", "Dinner"), ("oldTodo", "Lunch")],
        )
        .await;

    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("To Do List App | Edit To Do"));
    assert!(page.body.contains("is already in use, please choose another name!"));
    assert!(page.body.contains("value=\"Dinner\""));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_edit_of_vanished_record_is_reported() {
    let store = InMemoryTodoStore::new();
    let mut client = TestClient::new(&store);

    let id = TodoId::new().to_string();
    let page = client
        .submit(
            "/todos?_method=PUT",
            &[("_id", id.as_str()), ("todo", "Ghost"), ("oldTodo", "Ghost")],
        )
        .await;

    assert_eq!(page.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.body.contains("This todo no longer exists."));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_mark_done_twice_is_silent() {
    let store = fixtures::store_with(&[("Dinner", None)]);
    let mut client = TestClient::new(&store);

    let first = client
        .submit("/todos?_method=DELETE", &[("todo", "Dinner")])
        .await;
    assert_redirect_to_list(&first);
    assert!(store.is_empty());

    let second = client
        .submit("/todos?_method=DELETE", &[("todo", "Dinner")])
        .await;
    assert_redirect_to_list(&second);
    assert!(store.is_empty());

    let list = client.get("/todos").await;
    assert!(list.body.contains("Todo done!"));
}

#[tokio::test]
async fn test_mark_done_prefers_id_over_name() {
    let store = fixtures::store_with(&[("Breakfast", None), ("Lunch", None)]);
    let lunch = find(&store, "Lunch").unwrap();
    let mut client = TestClient::new(&store);

    let id = lunch.id.to_string();
    let page = client
        .submit(
            "/todos?_method=DELETE",
            &[("_id", id.as_str()), ("todo", "Breakfast")],
        )
        .await;
    assert_redirect_to_list(&page);

    assert!(find(&store, "Lunch").is_none());
    assert!(find(&store, "Breakfast").is_some());
}

#[tokio::test]
async fn test_list_shows_every_todo_with_actions() {
    let store = fixtures::store_with(&[("Breakfast", Some("Eggs")), ("Lunch", None)]);
    let mut client = TestClient::new(&store);

    let page = client.get("/todos").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("To Do List App | Todos"));
    assert!(page.body.contains("/todos/edit/Breakfast"));
    assert!(page.body.contains("/todos/edit/Lunch"));
    assert!(page.body.contains("/todos?_method=DELETE"));
}

#[tokio::test]
async fn test_store_failure_is_500() {
    let store = fixtures::store_with(&[("Breakfast", None)]);
    let mut client = TestClient::new(&store);
    store.set_unavailable(true);

    let list = client.get("/todos").await;
    assert_eq!(list.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!list.body.contains("unavailable"));

    let add = client.submit("/todos", &[("todo", "Lunch")]).await;
    assert_eq!(add.status, StatusCode::INTERNAL_SERVER_ERROR);

    store.set_unavailable(false);
    assert!(find(&store, "Lunch").is_none());
}

#[tokio::test]
async fn test_health_endpoints() {
    let store = InMemoryTodoStore::new();
    let mut client = TestClient::new(&store);

    let live = client.get("/health").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.body, "ok");

    let ready = client.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);

    store.set_unavailable(true);
    let not_ready = client.get("/health/ready").await;
    assert_eq!(not_ready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(not_ready.body.contains("\"ready\":false"));
}

#[tokio::test]
async fn test_every_response_carries_correlation_id() {
    let store = InMemoryTodoStore::new();
    let mut client = TestClient::new(&store);

    for uri in ["/", "/todos", "/todos/edit/missing", "/nowhere"] {
        let page = client.get(uri).await;
        assert!(page.correlation_id.is_some(), "{uri}");
    }
}
