//! HTML pages rendered with minijinja.
//!
//! Templates are compiled into the binary. Their `.html` names turn on HTML
//! auto-escaping, so user text is always escaped.

use crate::forms::{AddTodoForm, EditTodoForm};
use axum::response::Html;
use minijinja::{context, Environment};
use todolist_core::{TodoItem, ValidationError};

const TITLE_HOME: &str = "To Do List App | Home";
const TITLE_TODOS: &str = "To Do List App | Todos";
const TITLE_ABOUT: &str = "To Do List App | About";
const TITLE_ADD: &str = "To Do List App | Add To Do";
const TITLE_EDIT: &str = "To Do List App | Edit To Do";

const TEMPLATES: [(&str, &str); 6] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("todos.html", include_str!("../templates/todos.html")),
    ("add-todo.html", include_str!("../templates/add-todo.html")),
    ("edit-todo.html", include_str!("../templates/edit-todo.html")),
];

/// Page renderer.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
    creator: String,
}

impl Views {
    /// Compile the page templates. `creator` is shown on the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to parse.
    pub fn new(creator: impl Into<String>) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }

        Ok(Self {
            env,
            creator: creator.into(),
        })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<Html<String>, minijinja::Error> {
        self.env.get_template(name)?.render(ctx).map(Html)
    }

    /// Landing page.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn home(&self) -> Result<Html<String>, minijinja::Error> {
        self.render(
            "index.html",
            context! { title => TITLE_HOME, creator => &self.creator },
        )
    }

    /// Static about page.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn about(&self) -> Result<Html<String>, minijinja::Error> {
        self.render("about.html", context! { title => TITLE_ABOUT })
    }

    /// The todo list with any pending flash messages.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn todos(
        &self,
        todos: &[TodoItem],
        messages: &[String],
    ) -> Result<Html<String>, minijinja::Error> {
        self.render(
            "todos.html",
            context! { title => TITLE_TODOS, todos => todos, messages => messages },
        )
    }

    /// The add form, optionally re-displaying a rejected submission.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn add_form(
        &self,
        form: &AddTodoForm,
        error: Option<&ValidationError>,
    ) -> Result<Html<String>, minijinja::Error> {
        self.render(
            "add-todo.html",
            context! {
                title => TITLE_ADD,
                form => form,
                error => error.map(ToString::to_string),
            },
        )
    }

    /// The edit form for one record, optionally with a rejection reason.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn edit_form(
        &self,
        form: &EditTodoForm,
        error: Option<&ValidationError>,
    ) -> Result<Html<String>, minijinja::Error> {
        self.render(
            "edit-todo.html",
            context! {
                title => TITLE_EDIT,
                form => form,
                error => error.map(ToString::to_string),
            },
        )
    }
}
