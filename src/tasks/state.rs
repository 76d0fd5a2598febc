/// Lifecycle of a single command execution.
///
/// `NotStarted -> Running -> {Completed | FailedCaptured}`. Both terminal
/// states produce a stored record; nothing retries or cancels a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    NotStarted,
    Running,
    Completed,
    // Spawn, read, wait, or timeout failure turned into record text
    FailedCaptured,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExecutionState::Completed | ExecutionState::FailedCaptured)
    }
}
