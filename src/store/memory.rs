//! In-memory storage implementation.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::RwLock;

use super::{StorageError, TaskStore};
use crate::tasks::task::Task;

/// In-memory task store.
///
/// Thread-safe storage using RwLock, keyed by task id in insertion order.
/// Data is not persisted across restarts.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<IndexMap<String, Task>>,
}

impl InMemoryTaskStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::LockPoisoned`] if a writer panicked while
    /// holding the lock.
    pub fn len(&self) -> Result<usize, StorageError> {
        let tasks = self.tasks.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(tasks.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    fn filtered(&self, keep: impl Fn(&Task) -> bool) -> Result<Vec<Task>, StorageError> {
        let tasks = self.tasks.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(tasks.values().filter(|t| keep(t)).cloned().collect())
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>, StorageError> {
        let tasks = self.tasks.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(tasks.get(id).cloned())
    }

    async fn save(&self, mut task: Task) -> Result<Task, StorageError> {
        let id = task
            .id
            .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
            .clone();
        let mut tasks = self.tasks.write().map_err(|_| StorageError::LockPoisoned)?;
        tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Task>, StorageError> {
        let needle = name.to_lowercase();
        self.filtered(|t| t.name.to_lowercase().contains(&needle))
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Task>, StorageError> {
        self.filtered(|t| t.owner == owner)
    }

    async fn find_all(&self) -> Result<Vec<Task>, StorageError> {
        self.filtered(|_| true)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        let mut tasks = self.tasks.write().map_err(|_| StorageError::LockPoisoned)?;
        tasks.shift_remove(id);
        Ok(())
    }
}
