use crate::tasks::execution::TaskExecution;

/// A named, owned record pairing a shell command with its run history.
///
/// `id` is `None` until a [`TaskStore`](crate::store::TaskStore) assigns one
/// on the first save. `task_executions` only grows through
/// [`append_execution`](Task::append_execution); its order is run order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Task {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    pub name: String,
    pub owner: String,
    pub command: String,
    task_executions: Vec<TaskExecution>,
}

impl Task {
    pub fn new(name: impl Into<String>, owner: impl Into<String>, command: impl Into<String>) -> Self {
        Task {
            name: name.into(),
            owner: owner.into(),
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Appends a run to the end of the history.
    pub fn append_execution(&mut self, execution: TaskExecution) {
        self.task_executions.push(execution);
    }

    /// Run history, oldest first.
    pub fn executions(&self) -> &[TaskExecution] {
        &self.task_executions
    }

    pub fn last_execution(&self) -> Option<&TaskExecution> {
        self.task_executions.last()
    }
}
