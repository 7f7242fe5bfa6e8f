//! `PostgreSQL` todo store for the todolist app.
//!
//! This crate provides [`PostgresTodoStore`], the production implementation
//! of the `TodoStore` trait from `todolist-core`. It uses sqlx with runtime
//! queries and embedded migrations, and supports:
//!
//! - Connection pooling
//! - A unique index on the todo name, surfaced as `StoreError::DuplicateName`
//! - Single-statement writes (`RETURNING` the stored row)
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE todos (
//!     id UUID PRIMARY KEY,
//!     todo TEXT NOT NULL,
//!     description TEXT,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! CREATE UNIQUE INDEX todos_todo_key ON todos (todo);
//! ```
//!
//! # Example
//!
//! ```ignore
//! use todolist_postgres::PostgresTodoStore;
//! use std::time::Duration;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresTodoStore::connect("postgres://localhost/todo", 10, Duration::from_secs(30)).await?;
//!     store.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use todolist_core::store::{require_name, Result};
use todolist_core::{StoreError, TodoDraft, TodoId, TodoItem, TodoStore};
use uuid::Uuid;

type TodoRow = (Uuid, String, Option<String>, DateTime<Utc>);

fn into_item((id, todo, description, created_at): TodoRow) -> TodoItem {
    TodoItem::new(TodoId::from_uuid(id), todo, description, created_at)
}

fn read_error(e: &sqlx::Error) -> StoreError {
    StoreError::DatabaseError(format!("Failed to read todos: {e}"))
}

/// Map a failed write, turning constraint violations into domain errors.
fn write_error(e: &sqlx::Error, todo: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateName(todo.to_string());
        }
        if db_err.is_check_violation() {
            return StoreError::Validation("todo name cannot be empty".to_string());
        }
    }
    StoreError::DatabaseError(format!("Failed to write todo: {e}"))
}

/// PostgreSQL-backed todo store.
///
/// Cheap to clone: clones share the connection pool.
#[derive(Clone, Debug)]
pub struct PostgresTodoStore {
    pool: PgPool,
}

impl PostgresTodoStore {
    /// Create a store from an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a fresh pool.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DatabaseError` if the connection fails.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to connect: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    /// Run the embedded migrations (creates `todos` and its unique index).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DatabaseError` if a migration fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Migration failed: {e}")))?;
        tracing::info!("Todo store migrations applied");
        Ok(())
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TodoStore for PostgresTodoStore {
    async fn list(&self) -> Result<Vec<TodoItem>> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, todo, description, created_at FROM todos ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| read_error(&e))?;

        Ok(rows.into_iter().map(into_item).collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>> {
        let row: Option<TodoRow> =
            sqlx::query_as("SELECT id, todo, description, created_at FROM todos WHERE id = $1")
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| read_error(&e))?;

        Ok(row.map(into_item))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TodoItem>> {
        let row: Option<TodoRow> =
            sqlx::query_as("SELECT id, todo, description, created_at FROM todos WHERE todo = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| read_error(&e))?;

        Ok(row.map(into_item))
    }

    async fn insert(&self, draft: TodoDraft) -> Result<TodoItem> {
        require_name(&draft.todo)?;

        let row: TodoRow = sqlx::query_as(
            r"
            INSERT INTO todos (id, todo, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, todo, description, created_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.todo)
        .bind(&draft.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(&e, &draft.todo))?;

        tracing::debug!(todo_id = %row.0, "Inserted todo row");
        Ok(into_item(row))
    }

    async fn update(&self, id: TodoId, draft: TodoDraft) -> Result<TodoItem> {
        require_name(&draft.todo)?;

        let row: Option<TodoRow> = sqlx::query_as(
            r"
            UPDATE todos
            SET todo = $2,
                description = $3
            WHERE id = $1
            RETURNING id, todo, description, created_at
            ",
        )
        .bind(*id.as_uuid())
        .bind(&draft.todo)
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(&e, &draft.todo))?;

        row.map(into_item)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: TodoId) -> Result<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to delete todo: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM todos WHERE todo = $1")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(format!("Failed to delete todo: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(())
    }
}
