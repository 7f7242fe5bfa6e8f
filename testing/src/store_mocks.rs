//! In-memory todo store for fast, deterministic testing.
//!
//! [`InMemoryTodoStore`] honours the full [`TodoStore`] contract, including the
//! unique-name constraint a real backend enforces with an index, so tests can
//! exercise duplicate handling without a database.

use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use todolist_core::store::{require_name, Result};
use todolist_core::{StoreError, TodoDraft, TodoId, TodoItem, TodoStore};

/// In-memory todo store.
///
/// Clones share the same underlying collection.
///
/// # Example
///
/// ```
/// use todolist_testing::InMemoryTodoStore;
/// use todolist_core::{TodoDraft, TodoStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryTodoStore::new();
/// store.insert(TodoDraft::new("Breakfast", None)).await?;
/// assert_eq!(store.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoStore {
    items: Arc<RwLock<Vec<TodoItem>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryTodoStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `items`, in order.
    #[must_use]
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent operation fail with `DatabaseError`, or recover.
    ///
    /// Simulates losing the database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().map_or(0, |items| items.len())
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every stored item, oldest first
    #[must_use]
    pub fn snapshot(&self) -> Vec<TodoItem> {
        self.items.read().map(|items| items.clone()).unwrap_or_default()
    }

    /// Remove all items (for test isolation)
    pub fn clear(&self) {
        if let Ok(mut items) = self.items.write() {
            items.clear();
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<TodoItem>>> {
        self.check_available()?;
        self.items
            .read()
            .map_err(|_| StoreError::DatabaseError("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<TodoItem>>> {
        self.check_available()?;
        self.items
            .write()
            .map_err(|_| StoreError::DatabaseError("store lock poisoned".to_string()))
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::DatabaseError(
                "connection refused (simulated)".to_string(),
            ));
        }
        Ok(())
    }
}

impl TodoStore for InMemoryTodoStore {
    async fn list(&self) -> Result<Vec<TodoItem>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>> {
        Ok(self.read()?.iter().find(|item| item.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<TodoItem>> {
        Ok(self.read()?.iter().find(|item| item.todo == name).cloned())
    }

    async fn insert(&self, draft: TodoDraft) -> Result<TodoItem> {
        require_name(&draft.todo)?;
        let mut items = self.write()?;

        // Emulates the unique index on `todo`
        if items.iter().any(|item| item.todo == draft.todo) {
            return Err(StoreError::DuplicateName(draft.todo));
        }

        let item = TodoItem::new(TodoId::new(), draft.todo, draft.description, Utc::now());
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: TodoId, draft: TodoDraft) -> Result<TodoItem> {
        require_name(&draft.todo)?;
        let mut items = self.write()?;

        if !items.iter().any(|item| item.id == id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        if items
            .iter()
            .any(|item| item.todo == draft.todo && item.id != id)
        {
            return Err(StoreError::DuplicateName(draft.todo));
        }

        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.todo = draft.todo;
        item.description = draft.description;
        Ok(item.clone())
    }

    async fn delete(&self, id: TodoId) -> Result<()> {
        let mut items = self.write()?;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        items.remove(index);
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<()> {
        let mut items = self.write()?;
        let index = items
            .iter()
            .position(|item| item.todo == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        items.remove(index);
        Ok(())
    }
}
