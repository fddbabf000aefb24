//! Wire types for the todo API.
//!
//! # Design
//! Reads return raw rows (`Todo`, `Vec<Todo>`, or `null`) while writes wrap
//! their payload in a `{success, ..., msg}` envelope. Existing clients depend
//! on both shapes, so they are kept as-is.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A single todo row as stored and as returned over HTTP.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    #[serde(rename = "desc")]
    pub description: String,
    pub completed: bool,
}

/// Request body shared by create and update.
///
/// Both fields are optional at the serde level so that a missing `desc`
/// reaches validation and gets the same 400 as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct TodoPayload {
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Validated input handed to the store. Updates replace both fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    pub description: String,
    pub completed: bool,
}

impl TodoPayload {
    pub fn validate(self) -> Result<NewTodo, ApiError> {
        let description = match self.desc {
            Some(desc) if !desc.trim().is_empty() => desc,
            _ => return Err(ApiError::Validation("desc is required".to_string())),
        };
        Ok(NewTodo {
            description,
            completed: self.completed.unwrap_or(false),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    pub success: bool,
    pub new_todo: Todo,
    pub msg: &'static str,
}

impl Created {
    pub fn new(todo: Todo) -> Self {
        Self {
            success: true,
            new_todo: todo,
            msg: "Todo Added",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub success: bool,
    pub updated: Option<Todo>,
    pub msg: &'static str,
}

impl Updated {
    pub fn new(todo: Option<Todo>) -> Self {
        Self {
            success: true,
            updated: todo,
            msg: "Todo Updated",
        }
    }
}

/// Envelope for both single and bulk deletes; `T` is `Option<Todo>` or
/// `Vec<Todo>`.
#[derive(Debug, Serialize)]
pub struct Deleted<T> {
    pub success: bool,
    pub msg: &'static str,
    pub deleted: T,
}

impl Deleted<Option<Todo>> {
    pub fn one(todo: Option<Todo>) -> Self {
        Self {
            success: true,
            msg: "Todo Deleted",
            deleted: todo,
        }
    }
}

impl Deleted<Vec<Todo>> {
    pub fn all(todos: Vec<Todo>) -> Self {
        Self {
            success: true,
            msg: "All Todos Deleted",
            deleted: todos,
        }
    }
}

/// Body of every 4xx/5xx response.
#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_description_as_desc() {
        let todo = Todo {
            id: 1,
            description: "buy milk".to_string(),
            completed: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "desc": "buy milk", "completed": false}));
    }

    #[test]
    fn payload_defaults_completed_to_false() {
        let payload: TodoPayload = serde_json::from_str(r#"{"desc":"No completed field"}"#).unwrap();
        let input = payload.validate().unwrap();
        assert_eq!(input.description, "No completed field");
        assert!(!input.completed);
    }

    #[test]
    fn payload_treats_null_completed_as_false() {
        let payload: TodoPayload =
            serde_json::from_str(r#"{"desc":"x","completed":null}"#).unwrap();
        assert!(!payload.validate().unwrap().completed);
    }

    #[test]
    fn payload_keeps_explicit_completed() {
        let payload: TodoPayload = serde_json::from_str(r#"{"desc":"Done","completed":true}"#).unwrap();
        assert!(payload.validate().unwrap().completed);
    }

    #[test]
    fn payload_rejects_missing_desc() {
        let payload: TodoPayload = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        let err = payload.validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref msg) if msg == "desc is required"));
    }

    #[test]
    fn payload_rejects_whitespace_desc() {
        let payload: TodoPayload = serde_json::from_str(r#"{"desc":"  \t "}"#).unwrap();
        assert!(matches!(payload.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn payload_keeps_desc_untrimmed() {
        let payload: TodoPayload = serde_json::from_str(r#"{"desc":"  padded  "}"#).unwrap();
        assert_eq!(payload.validate().unwrap().description, "  padded  ");
    }

    #[test]
    fn created_envelope_uses_camel_case_key() {
        let todo = Todo {
            id: 7,
            description: "x".to_string(),
            completed: true,
        };
        let json = serde_json::to_value(Created::new(todo)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["newTodo"]["id"], 7);
        assert_eq!(json["msg"], "Todo Added");
    }

    #[test]
    fn deleted_envelope_serializes_null_when_absent() {
        let json = serde_json::to_value(Deleted::one(None)).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["deleted"].is_null());
        assert_eq!(json["msg"], "Todo Deleted");
    }
}
