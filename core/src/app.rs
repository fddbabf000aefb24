//! Client-side state for a todo list UI.
//!
//! # Design
//! `TodoApp` mirrors the server's list locally and patches it from each
//! successful response instead of re-fetching. Like `TodoClient`, it never
//! performs I/O: every action is a `*_request` method that returns the
//! `HttpRequest` to send and an `apply_*` method that consumes the response.
//!
//! The UI is in exactly one of two modes. `List` accepts add/delete/clear and
//! `begin_edit`; `Edit` holds a single draft until `apply_save` (or
//! `finish_edit`) drops back to `List`. Saving always leaves edit mode, even
//! when the server rejected the update.
//!
//! A failed `apply_*` returns the error and leaves the list untouched. The
//! host decides how to report it.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{DeleteAllRoute, Todo, TodoInput};

/// The record being edited. Saved as a full replacement of both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub id: i64,
    pub description: String,
    pub completed: bool,
}

impl From<&Todo> for Draft {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            description: todo.description.clone(),
            completed: todo.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Edit(Draft),
}

#[derive(Debug, Clone)]
pub struct TodoApp {
    client: TodoClient,
    input: String,
    todos: Vec<Todo>,
    mode: Mode,
}

impl TodoApp {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            input: String::new(),
            todos: Vec::new(),
            mode: Mode::List,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Edit(_))
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.mode {
            Mode::Edit(draft) => Some(draft),
            Mode::List => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.mode {
            Mode::Edit(draft) => Some(draft),
            Mode::List => None,
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    // --- load ---

    pub fn load_request(&self) -> HttpRequest {
        self.client.build_list_todos()
    }

    /// Replace the local list with the server's.
    pub fn apply_load(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        self.todos = self.client.parse_list_todos(response)?;
        Ok(())
    }

    // --- add ---

    /// `Ok(None)` when the input buffer is blank; nothing should be sent.
    pub fn add_request(&self) -> Result<Option<HttpRequest>, ApiError> {
        if self.input.trim().is_empty() {
            return Ok(None);
        }
        let input = TodoInput::new(self.input.clone(), false);
        self.client.build_create_todo(&input).map(Some)
    }

    /// Append the created record. The input buffer is cleared either way; if
    /// the round-trip itself failed, the host calls `clear_input` instead.
    pub fn apply_add(&mut self, response: HttpResponse) -> Result<&Todo, ApiError> {
        self.input.clear();
        let todo = self.client.parse_create_todo(response)?;
        self.todos.push(todo);
        Ok(&self.todos[self.todos.len() - 1])
    }

    // --- edit ---

    /// Enter edit mode for `id`. Returns false if already editing or if the
    /// id is not in the local list.
    pub fn begin_edit(&mut self, id: i64) -> bool {
        if self.is_editing() {
            return false;
        }
        match self.todos.iter().find(|todo| todo.id == id) {
            Some(todo) => {
                self.mode = Mode::Edit(Draft::from(todo));
                true
            }
            None => false,
        }
    }

    /// `Ok(None)` when not in edit mode.
    pub fn save_request(&self) -> Result<Option<HttpRequest>, ApiError> {
        let Some(draft) = self.draft() else {
            return Ok(None);
        };
        let input = TodoInput::new(draft.description.clone(), draft.completed);
        self.client.build_update_todo(draft.id, &input).map(Some)
    }

    /// Leave edit mode, then patch the local record on success.
    ///
    /// The server's copy wins when it returns one; when it reports the id as
    /// gone (`updated: null`) the draft values are applied locally anyway.
    pub fn apply_save(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        let Some(draft) = self.finish_edit() else {
            return Ok(());
        };
        let id = draft.id;
        let updated = self.client.parse_update_todo(response)?;
        let replacement = updated.unwrap_or(Todo {
            id,
            description: draft.description,
            completed: draft.completed,
        });
        if let Some(slot) = self.todos.iter_mut().find(|todo| todo.id == id) {
            *slot = replacement;
        }
        Ok(())
    }

    /// Drop back to list mode without applying anything. Returns the
    /// abandoned draft.
    pub fn finish_edit(&mut self) -> Option<Draft> {
        match std::mem::take(&mut self.mode) {
            Mode::Edit(draft) => Some(draft),
            Mode::List => None,
        }
    }

    // --- delete ---

    pub fn delete_request(&self, id: i64) -> HttpRequest {
        self.client.build_delete_todo(id)
    }

    /// Remove `id` locally once the server confirms.
    pub fn apply_delete(&mut self, id: i64, response: HttpResponse) -> Result<(), ApiError> {
        self.client.parse_delete_todo(response)?;
        self.todos.retain(|todo| todo.id != id);
        Ok(())
    }

    // --- clear ---

    pub fn clear_request(&self) -> HttpRequest {
        self.client.build_delete_all(DeleteAllRoute::Delete)
    }

    pub fn apply_clear(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        self.client.parse_delete_all(response)?;
        self.todos.clear();
        Ok(())
    }
}
