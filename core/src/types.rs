//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently so
//! the client never links the server. Integration tests catch any schema
//! drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    #[serde(rename = "desc")]
    pub description: String,
    pub completed: bool,
}

/// Request payload for both create and update. Updates are full replacements,
/// so both fields are always sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoInput {
    #[serde(rename = "desc")]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoInput {
    pub fn new(description: impl Into<String>, completed: bool) -> Self {
        Self {
            description: description.into(),
            completed,
        }
    }
}

/// Which of the two equivalent delete-all routes to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteAllRoute {
    /// `DELETE /todos`
    #[default]
    Todos,
    /// `DELETE /delete`, kept for older clients.
    Delete,
}

impl DeleteAllRoute {
    pub fn path(self) -> &'static str {
        match self {
            DeleteAllRoute::Todos => "/todos",
            DeleteAllRoute::Delete => "/delete",
        }
    }
}

/// `POST /todos` success body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponse {
    pub success: bool,
    #[serde(rename = "newTodo")]
    pub new_todo: Option<Todo>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// `PUT /todos/{id}` success body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub updated: Option<Todo>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// `DELETE` success body; `T` is `Option<Todo>` or `Vec<Todo>`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteResponse<T> {
    pub success: bool,
    pub deleted: T,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Body of a 4xx/5xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
