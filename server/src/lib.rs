//! REST backend for the todo list.
//!
//! # Overview
//! One route per operation, one SQL statement per route. Reads return raw
//! rows; writes return a `{success, ..., msg}` envelope; every failure returns
//! `{success: false, error}` with a 400 or 500 status.
//!
//! # Design
//! - The store is injected as `Arc<dyn TodoStore>` so tests can swap in
//!   `MemoryStore` or a mock without touching the handlers.
//! - `DELETE /delete` is an alias of `DELETE /todos`; older clients call it.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use axum::{
    routing::{delete, get},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::Config;
pub use error::{ApiError, StoreError};
pub use model::{NewTodo, Todo};
pub use routes::AppState;
pub use store::{MemoryStore, SharedStore, SqliteStore, TodoStore};

use routes::{
    create_todo, delete_all_todos, delete_todo, get_todo, home, list_todos, update_todo,
};

pub fn app(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(home))
        .route(
            "/todos",
            get(list_todos).post(create_todo).delete(delete_all_todos),
        )
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/delete", delete(delete_all_todos))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { store })
}

pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store)).await
}
