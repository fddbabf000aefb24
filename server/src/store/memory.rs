use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TodoStore;
use crate::error::StoreError;
use crate::model::{NewTodo, Todo};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Todo>,
    last_id: i64,
}

/// In-process store with the same id semantics as the SQLite table: ids
/// start at 1 and are never reused, even after `delete_all`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, input: NewTodo) -> Result<Todo, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let todo = Todo {
            id: table.last_id,
            description: input.description,
            completed: input.completed,
        };
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: i64, input: NewTodo) -> Result<Option<Todo>, StoreError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|todo| {
            todo.description = input.description;
            todo.completed = input.completed;
            todo.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        Ok(self.table.write().await.rows.remove(&id))
    }

    async fn delete_all(&self) -> Result<Vec<Todo>, StoreError> {
        let mut table = self.table.write().await;
        Ok(std::mem::take(&mut table.rows).into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(description: &str) -> NewTodo {
        NewTodo {
            description: description.to_string(),
            completed: false,
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete_all() {
        let store = MemoryStore::new();
        store.create(input("a")).await.unwrap();
        store.create(input("b")).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap().len(), 2);
        assert_eq!(store.create(input("c")).await.unwrap().id, 3);
    }

    #[tokio::test]
    async fn update_missing_leaves_table_untouched() {
        let store = MemoryStore::new();
        store.create(input("a")).await.unwrap();
        assert_eq!(store.update(9, input("b")).await.unwrap(), None);
        assert_eq!(store.list().await.unwrap()[0].description, "a");
    }

    #[tokio::test]
    async fn clones_share_the_same_table() {
        let store = MemoryStore::new();
        let other = store.clone();
        let created = store.create(input("shared")).await.unwrap();
        assert_eq!(other.get(created.id).await.unwrap(), Some(created));
    }
}
