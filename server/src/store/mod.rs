//! Persistence for todo rows.
//!
//! Handlers only see `Arc<dyn TodoStore>`; which backend sits behind it is
//! decided at startup. Every method maps to exactly one statement and no
//! method spans a transaction.

mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{NewTodo, Todo};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Shared handle injected into the router state.
pub type SharedStore = Arc<dyn TodoStore>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All rows in the store's natural order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError>;

    /// Insert a row; the store assigns the id.
    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError>;

    /// Replace both fields of `id`. `None` if no such row.
    async fn update(&self, id: i64, input: NewTodo) -> Result<Option<Todo>, StoreError>;

    async fn delete(&self, id: i64) -> Result<Option<Todo>, StoreError>;

    /// Remove every row and return what was removed.
    async fn delete_all(&self) -> Result<Vec<Todo>, StoreError>;
}
