use std::io;

use thiserror::Error;

use crate::store::StorageError;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Command cannot be empty")]
    EmptyCommand,

    #[error(
        "Command '{0}' is not allowed. Allowed commands: [{allowed}]",
        allowed = crate::tasks::validator::ALLOWED_COMMANDS.join(", ")
    )]
    CommandNotWhitelisted(String),

    #[error("Command contains dangerous patterns and is not allowed")]
    DangerousPattern,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IO(String),

    #[error("Process timed out after {0} ms")]
    ProcessTimeout(u64),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TaskError {
    /// Returns `true` for the three command rejection kinds.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TaskError::EmptyCommand
                | TaskError::CommandNotWhitelisted(_)
                | TaskError::DangerousPattern
        )
    }
}

impl From<io::Error> for TaskError {
    fn from(err: io::Error) -> Self {
        TaskError::IO(err.to_string())
    }
}
