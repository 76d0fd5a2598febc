//! Task operations: validated saves, lookups, and recorded runs.
//!
//! [`TaskService`] is the caller the validator and runner expect. Every
//! command is validated before it is stored, and again before it is run, so a
//! record that was written to the store by other means cannot bypass the gate.

use crate::{
    helper::tracing::MaybeInstrument,
    store::TaskStore,
    tasks::{
        error::TaskError, task::Task, tokio::executor::TaskRunner, validator::CommandValidator,
    },
};

/// Result of [`TaskService::get_tasks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskLookup {
    One(Task),
    Many(Vec<Task>),
}

impl TaskLookup {
    pub fn into_vec(self) -> Vec<Task> {
        match self {
            TaskLookup::One(task) => vec![task],
            TaskLookup::Many(tasks) => tasks,
        }
    }
}

/// Task operations over a [`TaskStore`].
///
/// # Examples
/// ```rust
/// use tcrm_runner::{
///     service::TaskService,
///     store::InMemoryTaskStore,
///     tasks::{error::TaskError, task::Task},
/// };
///
/// #[tokio::main]
/// async fn main() -> Result<(), TaskError> {
///     let service = TaskService::new(InMemoryTaskStore::new());
///
///     let task = service
///         .create_or_update(Task::new("greet", "alice", "echo hello"))
///         .await?;
///     let id = task.id.clone().unwrap_or_default();
///
///     let task = service.run_task(&id).await?;
///     assert_eq!(task.executions().len(), 1);
///     assert_eq!(task.executions()[0].output(), "hello");
///
///     let rejected = service
///         .create_or_update(Task::new("wipe", "mallory", "echo hi; rm -rf /"))
///         .await;
///     assert!(matches!(rejected, Err(TaskError::DangerousPattern)));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TaskService<S> {
    store: S,
    runner: TaskRunner,
}

impl<S: TaskStore> TaskService<S> {
    /// Service with a default [`TaskRunner`] (host shell, no timeout).
    pub fn new(store: S) -> Self {
        Self::with_runner(store, TaskRunner::default())
    }

    pub fn with_runner(store: S, runner: TaskRunner) -> Self {
        Self { store, runner }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn runner(&self) -> &TaskRunner {
        &self.runner
    }

    /// Validates the command and saves the task.
    ///
    /// # Errors
    ///
    /// Returns a rejection error (nothing is saved) if the command fails
    /// validation, or [`TaskError::Storage`] if the save fails.
    pub async fn create_or_update(&self, task: Task) -> Result<Task, TaskError> {
        CommandValidator::validate_command(&task.command)?;

        let saved = self.store.save(task).await?;

        #[cfg(feature = "tracing")]
        tracing::info!(task_id = ?saved.id, name = %saved.name, "Task saved");

        Ok(saved)
    }

    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if no task has this id.
    pub async fn get_task(&self, id: &str) -> Result<Task, TaskError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(format!("Task not found with id: {id}")))
    }

    /// Case-insensitive substring search on task names.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::NotFound`] if nothing matches.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Task>, TaskError> {
        let tasks = self.store.find_by_name_containing(name).await?;
        if tasks.is_empty() {
            return Err(TaskError::NotFound(format!(
                "No tasks found with name: {name}"
            )));
        }
        Ok(tasks)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn find_by_owner(&self, owner: &str) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.find_by_owner(owner).await?)
    }

    /// Single lookup entry point: a non-empty `id` wins, then a non-empty
    /// `name`, otherwise every task is returned.
    pub async fn get_tasks(
        &self,
        id: Option<&str>,
        name: Option<&str>,
    ) -> Result<TaskLookup, TaskError> {
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            return self.get_task(id).await.map(TaskLookup::One);
        }
        if let Some(name) = name.filter(|name| !name.is_empty()) {
            return self.search_by_name(name).await.map(TaskLookup::Many);
        }
        self.list_tasks().await.map(TaskLookup::Many)
    }

    /// Deletes a task and its history. Unknown ids are not an error.
    pub async fn delete_task(&self, id: &str) -> Result<(), TaskError> {
        self.store.delete_by_id(id).await?;

        #[cfg(feature = "tracing")]
        tracing::info!(task_id = id, "Task deleted");

        Ok(())
    }

    /// Runs the task's command, appends the record, and saves the task.
    ///
    /// A command that fails to run still produces an appended record; only a
    /// missing task, a rejected command, or a store failure is an error.
    ///
    /// The read, run, and save are not atomic: two concurrent runs of the
    /// same task each append to their own copy and the later save wins.
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] if no task has this id
    /// - a rejection error if the stored command no longer validates
    /// - [`TaskError::Storage`] if the store fails
    pub async fn run_task(&self, id: &str) -> Result<Task, TaskError> {
        let mut task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound("Task not found".to_string()))?;

        CommandValidator::validate_command(&task.command)?;

        let execution = self
            .runner
            .run_command(&task.command)
            .maybe_instrument("run_task", id)
            .await;

        #[cfg(feature = "tracing")]
        tracing::info!(
            task_id = id,
            success = execution.is_success(),
            history_len = task.executions().len() + 1,
            "Task executed"
        );

        task.append_execution(execution);
        Ok(self.store.save(task).await?)
    }
}
