use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{NewTodo, Todo};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0
);
";

/// SQLite-backed store.
///
/// `rusqlite::Connection` is not `Sync`, so it lives behind a mutex and every
/// call runs on tokio's blocking pool rather than on an async worker.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`. `:memory:` is accepted.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn call<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&guard).map_err(StoreError::from)
        })
        .await?
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        description: row.get(1)?,
        completed: row.get(2)?,
    })
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        self.call(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, description, completed FROM todos ORDER BY id")?;
            let todos = stmt
                .query_map([], row_to_todo)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(todos)
        })
        .await
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        self.call(move |conn| {
            conn.query_row(
                "SELECT id, description, completed FROM todos WHERE id = ?1",
                params![id],
                row_to_todo,
            )
            .optional()
        })
        .await
    }

    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError> {
        self.call(move |conn| {
            conn.query_row(
                "INSERT INTO todos (description, completed) VALUES (?1, ?2)
                 RETURNING id, description, completed",
                params![input.description, input.completed],
                row_to_todo,
            )
        })
        .await
    }

    async fn update(&self, id: i64, input: NewTodo) -> Result<Option<Todo>, StoreError> {
        self.call(move |conn| {
            conn.query_row(
                "UPDATE todos SET description = ?1, completed = ?2 WHERE id = ?3
                 RETURNING id, description, completed",
                params![input.description, input.completed, id],
                row_to_todo,
            )
            .optional()
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        self.call(move |conn| {
            conn.query_row(
                "DELETE FROM todos WHERE id = ?1 RETURNING id, description, completed",
                params![id],
                row_to_todo,
            )
            .optional()
        })
        .await
    }

    async fn delete_all(&self) -> Result<Vec<Todo>, StoreError> {
        self.call(|conn| {
            let mut stmt = conn.prepare("DELETE FROM todos RETURNING id, description, completed")?;
            let mut todos = stmt
                .query_map([], row_to_todo)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            todos.sort_by_key(|todo| todo.id);
            Ok(todos)
        })
        .await
    }
}
