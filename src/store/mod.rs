//! Storage abstraction for task records.
//!
//! The service only needs lookup by id, save, substring search by name,
//! lookup by owner, listing, and delete. Backends implement [`TaskStore`];
//! [`InMemoryTaskStore`] ships with the crate for tests and embedding.

mod memory;

pub use memory::InMemoryTaskStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::tasks::task::Task;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested item was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage lock was poisoned.
    #[error("storage lock poisoned")]
    LockPoisoned,

    /// Generic storage error.
    #[error("storage error: {0}")]
    Other(String),
}

/// Persistence for [`Task`] records.
///
/// `save` is a whole-record write: the caller reads a task, appends to its
/// history, and saves it back. Nothing here serializes two such
/// read-modify-write cycles on the same task, so concurrent runs against one
/// task race and the last save wins.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns the task with `id`, if stored.
    async fn find_by_id(&self, id: &str) -> Result<Option<Task>, StorageError>;

    /// Inserts or replaces a task and returns the stored copy.
    ///
    /// A task without an id gets a fresh UUID.
    async fn save(&self, task: Task) -> Result<Task, StorageError>;

    /// Tasks whose name contains `name`, ignoring case.
    async fn find_by_name_containing(&self, name: &str) -> Result<Vec<Task>, StorageError>;

    /// Tasks owned by exactly `owner`.
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Task>, StorageError>;

    /// All tasks in insertion order.
    async fn find_all(&self) -> Result<Vec<Task>, StorageError>;

    /// Removes a task together with its history. Unknown ids are ignored.
    async fn delete_by_id(&self, id: &str) -> Result<(), StorageError>;
}
