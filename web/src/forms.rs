//! `application/x-www-form-urlencoded` bodies posted by the todo pages.
//!
//! Forms serialize back into the template context so a rejected submission
//! re-renders with exactly what the user typed.

use serde::{Deserialize, Serialize};
use todolist_core::{DoneTarget, EditTodo, TodoDraft, TodoId, TodoItem};

/// Body of `POST /todos`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddTodoForm {
    /// Todo name
    #[serde(default)]
    pub todo: String,
    /// Optional description; empty means absent
    #[serde(default)]
    pub description: Option<String>,
}

impl AddTodoForm {
    /// The draft this submission asks to store.
    #[must_use]
    pub fn draft(&self) -> TodoDraft {
        TodoDraft::new(self.todo.clone(), self.description.clone())
    }
}

/// Body of `PUT /todos`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditTodoForm {
    /// Record being edited
    #[serde(rename(deserialize = "_id"))]
    pub id: TodoId,
    /// New name
    #[serde(default)]
    pub todo: String,
    /// New description; empty means absent
    #[serde(default)]
    pub description: Option<String>,
    /// Name the form was opened with
    #[serde(rename(deserialize = "oldTodo"), default)]
    pub old_todo: String,
}

impl EditTodoForm {
    /// The edit command this submission asks for.
    #[must_use]
    pub fn command(&self) -> EditTodo {
        EditTodo {
            id: self.id,
            old_todo: self.old_todo.clone(),
            draft: TodoDraft::new(self.todo.clone(), self.description.clone()),
        }
    }
}

impl From<&TodoItem> for EditTodoForm {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            todo: item.todo.clone(),
            description: item.description.clone(),
            old_todo: item.todo.clone(),
        }
    }
}

/// Body of `DELETE /todos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoneForm {
    /// Record id; preferred when present and well-formed
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Record name
    #[serde(default)]
    pub todo: String,
}

impl DoneForm {
    /// Which record to mark done: by id when one was sent, else by name.
    #[must_use]
    pub fn target(self) -> DoneTarget {
        match self.id.as_deref().and_then(|id| id.parse::<TodoId>().ok()) {
            Some(id) => DoneTarget::Id(id),
            None => DoneTarget::Name(self.todo),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_form_blank_description_is_absent() {
        let form: AddTodoForm = serde_urlencoded::from_str("todo=Breakfast&description=").unwrap();
        assert_eq!(form.draft(), TodoDraft::new("Breakfast", None));
    }

    #[test]
    fn test_edit_form_reads_wire_names() {
        let id = TodoId::new();
        let body = format!("_id={id}&todo=Lunch&description=Updated&oldTodo=Lunch");
        let form: EditTodoForm = serde_urlencoded::from_str(&body).unwrap();

        let command = form.command();
        assert_eq!(command.id, id);
        assert_eq!(command.old_todo, "Lunch");
        assert_eq!(command.draft.description.as_deref(), Some("Updated"));
    }

    #[test]
    fn test_done_form_prefers_id() {
        let id = TodoId::new();
        let form: DoneForm = serde_urlencoded::from_str(&format!("_id={id}&todo=Dinner")).unwrap();
        assert_eq!(form.target(), DoneTarget::Id(id));
    }

    #[test]
    fn test_done_form_falls_back_to_name() {
        let form: DoneForm = serde_urlencoded::from_str("todo=Dinner").unwrap();
        assert_eq!(form.target(), DoneTarget::Name("Dinner".to_string()));

        let form: DoneForm = serde_urlencoded::from_str("_id=&todo=Dinner").unwrap();
        assert_eq!(form.target(), DoneTarget::Name("Dinner".to_string()));
    }
}
