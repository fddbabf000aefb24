//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Reads come back as raw JSON (`Todo`, `[Todo]`, `null`); writes come back
//! wrapped in a `{success, ...}` envelope that the parser unwraps.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateResponse, DeleteAllRoute, DeleteResponse, ErrorResponse, Todo, TodoInput,
    UpdateResponse,
};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Get, self.url("/todos"))
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Get, self.url(&format!("/todos/{id}")))
    }

    pub fn build_create_todo(&self, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::json(HttpMethod::Post, self.url("/todos"), body))
    }

    pub fn build_update_todo(&self, id: i64, input: &TodoInput) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::json(
            HttpMethod::Put,
            self.url(&format!("/todos/{id}")),
            body,
        ))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Delete, self.url(&format!("/todos/{id}")))
    }

    pub fn build_delete_all(&self, route: DeleteAllRoute) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Delete, self.url(route.path()))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// `Ok(None)` when the server answered `null` (no such id).
    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        let envelope: CreateResponse = from_json(&response.body)?;
        ensure_success(envelope.success, envelope.msg)?;
        envelope
            .new_todo
            .ok_or_else(|| ApiError::DeserializationError("missing field `newTodo`".to_string()))
    }

    /// `Ok(None)` when the id did not exist; the server still reports success.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        check_status(&response)?;
        let envelope: UpdateResponse = from_json(&response.body)?;
        ensure_success(envelope.success, envelope.msg)?;
        Ok(envelope.updated)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Option<Todo>, ApiError> {
        check_status(&response)?;
        let envelope: DeleteResponse<Option<Todo>> = from_json(&response.body)?;
        ensure_success(envelope.success, envelope.msg)?;
        Ok(envelope.deleted)
    }

    pub fn parse_delete_all(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        let envelope: DeleteResponse<Vec<Todo>> = from_json(&response.body)?;
        ensure_success(envelope.success, envelope.msg)?;
        Ok(envelope.deleted)
    }
}

fn to_json(input: &TodoInput) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map any non-200 status to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    match serde_json::from_str::<ErrorResponse>(&response.body) {
        Ok(envelope) if !envelope.success => Err(ApiError::Rejected {
            status: response.status,
            message: envelope.error,
        }),
        _ => Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}

fn ensure_success(success: bool, msg: Option<String>) -> Result<(), ApiError> {
    if success {
        Ok(())
    } else {
        Err(ApiError::Unsuccessful(msg.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    #[test]
    fn build_list_todos_produces_correct_request() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo(12);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos/12");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let req = client()
            .build_create_todo(&TodoInput::new("Buy milk", false))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"desc": "Buy milk", "completed": false}));
    }

    #[test]
    fn build_update_todo_sends_both_fields() {
        let req = client()
            .build_update_todo(3, &TodoInput::new("Updated", true))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todos/3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["desc"], "Updated");
        assert_eq!(body["completed"], true);
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(4);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todos/4");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_all_targets_either_route() {
        let c = client();
        assert_eq!(
            c.build_delete_all(DeleteAllRoute::Todos).path,
            "http://localhost:3000/todos"
        );
        assert_eq!(
            c.build_delete_all(DeleteAllRoute::Delete).path,
            "http://localhost:3000/delete"
        );
    }

    #[test]
    fn parse_list_todos_success() {
        let response = HttpResponse::new(200, r#"[{"id":1,"desc":"Test","completed":false}]"#);
        let todos = client().parse_list_todos(response).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].description, "Test");
    }

    #[test]
    fn parse_get_todo_null_is_none() {
        let todo = client().parse_get_todo(HttpResponse::new(200, "null")).unwrap();
        assert!(todo.is_none());
    }

    #[test]
    fn parse_create_todo_unwraps_envelope() {
        let response = HttpResponse::new(
            200,
            r#"{"success":true,"newTodo":{"id":1,"desc":"New","completed":false},"msg":"Todo Added"}"#,
        );
        let todo = client().parse_create_todo(response).unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.description, "New");
    }

    #[test]
    fn parse_create_todo_validation_error() {
        let response = HttpResponse::new(400, r#"{"success":false,"error":"desc is required"}"#);
        let err = client().parse_create_todo(response).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Rejected { status: 400, ref message } if message == "desc is required"
        ));
    }

    #[test]
    fn parse_create_todo_server_error_without_envelope() {
        let response = HttpResponse::new(502, "bad gateway");
        let err = client().parse_create_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 502, .. }));
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn parse_update_todo_missing_id_is_none() {
        let response = HttpResponse::new(200, r#"{"success":true,"updated":null,"msg":"Todo Updated"}"#);
        assert!(client().parse_update_todo(response).unwrap().is_none());
    }

    #[test]
    fn parse_update_todo_success() {
        let response = HttpResponse::new(
            200,
            r#"{"success":true,"updated":{"id":1,"desc":"Updated","completed":true},"msg":"Todo Updated"}"#,
        );
        let todo = client().parse_update_todo(response).unwrap().unwrap();
        assert_eq!(todo.description, "Updated");
        assert!(todo.completed);
    }

    #[test]
    fn parse_delete_todo_returns_removed_record() {
        let response = HttpResponse::new(
            200,
            r#"{"success":true,"msg":"Todo Deleted","deleted":{"id":2,"desc":"x","completed":false}}"#,
        );
        assert_eq!(client().parse_delete_todo(response).unwrap().unwrap().id, 2);
    }

    #[test]
    fn parse_delete_all_returns_every_record() {
        let response = HttpResponse::new(
            200,
            r#"{"success":true,"msg":"All Todos Deleted","deleted":[{"id":1,"desc":"a","completed":false},{"id":2,"desc":"b","completed":true}]}"#,
        );
        assert_eq!(client().parse_delete_all(response).unwrap().len(), 2);
    }

    #[test]
    fn unsuccessful_envelope_is_an_error() {
        let response = HttpResponse::new(200, r#"{"success":false,"deleted":null,"msg":"nope"}"#);
        let err = client().parse_delete_todo(response).unwrap_err();
        assert!(matches!(err, ApiError::Unsuccessful(ref msg) if msg == "nope"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_list_todos();
        assert_eq!(req.path, "http://localhost:3000/todos");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client()
            .parse_list_todos(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
