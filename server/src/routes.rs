use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::model::{Created, Deleted, Todo, TodoPayload, Updated};
use crate::store::SharedStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

type PathId = Result<Path<i64>, PathRejection>;
type JsonBody = Result<Json<TodoPayload>, JsonRejection>;

pub async fn home() -> Json<Value> {
    Json(json!({ "message": "Home Page" }))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<Json<Created>, ApiError> {
    let Json(payload) = body?;
    let input = payload.validate()?;
    let todo = state.store.create(input).await?;
    info!(id = todo.id, "todo created");
    Ok(Json(Created::new(todo)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    id: PathId,
) -> Result<Json<Option<Todo>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.store.get(id).await?))
}

pub async fn update_todo(
    State(state): State<AppState>,
    id: PathId,
    body: JsonBody,
) -> Result<Json<Updated>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = body?;
    let input = payload.validate()?;
    let updated = state.store.update(id, input).await?;
    info!(id, found = updated.is_some(), "todo updated");
    Ok(Json(Updated::new(updated)))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: PathId,
) -> Result<Json<Deleted<Option<Todo>>>, ApiError> {
    let Path(id) = id?;
    let deleted = state.store.delete(id).await?;
    info!(id, found = deleted.is_some(), "todo deleted");
    Ok(Json(Deleted::one(deleted)))
}

/// Served on both `DELETE /todos` and `DELETE /delete`.
pub async fn delete_all_todos(
    State(state): State<AppState>,
) -> Result<Json<Deleted<Vec<Todo>>>, ApiError> {
    let deleted = state.store.delete_all().await?;
    info!(count = deleted.len(), "all todos deleted");
    Ok(Json(Deleted::all(deleted)))
}
