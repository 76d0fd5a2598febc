use std::{process::Stdio, sync::Arc, time::Duration};

use chrono::Utc;
use tokio::process::{Child, Command};

use crate::{
    helper::tracing::MaybeInstrument,
    tasks::{
        config::RunnerConfig,
        error::TaskError,
        execution::TaskExecution,
        shell::{ShellStrategy, TaskShell},
    },
};

#[cfg(feature = "tracing")]
use crate::tasks::state::ExecutionState;

/// Runs one command per call through a host shell and records the result.
///
/// The runner does no validation of its own: callers check the command with
/// [`CommandValidator`](crate::tasks::validator::CommandValidator) first.
///
/// # Examples
/// ```rust
/// use tcrm_runner::tasks::{tokio::executor::TaskRunner, validator::CommandValidator};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let command = "echo hello";
///     CommandValidator::validate_command(command)?;
///
///     let runner = TaskRunner::default();
///     let execution = runner.run_command(command).await;
///
///     assert_eq!(execution.output(), "hello");
///     assert!(execution.end_time() >= execution.start_time());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TaskRunner {
    shell: Arc<dyn ShellStrategy>,
    timeout_ms: Option<u64>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self {
            shell: Arc::new(TaskShell::Auto),
            timeout_ms: None,
        }
    }
}

impl TaskRunner {
    /// Creates a runner from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidConfiguration`] if the configuration is invalid.
    pub fn new(config: RunnerConfig) -> Result<Self, TaskError> {
        config.validate()?;
        Ok(Self {
            shell: Arc::new(config.shell),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Creates a runner that spawns through a caller-supplied shell strategy.
    pub fn with_shell(shell: impl ShellStrategy + 'static) -> Self {
        Self {
            shell: Arc::new(shell),
            timeout_ms: None,
        }
    }

    pub fn shell(&self) -> &dyn ShellStrategy {
        self.shell.as_ref()
    }

    pub fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    /// Executes `command` and returns its record.
    ///
    /// Never fails: a spawn, read, or wait error (or an expired timeout) is
    /// returned as a record whose output starts with
    /// `"Error executing command: "`. A non-zero exit code still produces a
    /// successful record holding whatever was written to stdout.
    pub async fn run_command(&self, command: &str) -> TaskExecution {
        let start_time = Utc::now();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            shell = self.shell.program(),
            command,
            state = ?ExecutionState::NotStarted,
            "Starting command"
        );

        let result = self
            .capture(command)
            .maybe_instrument("run_command", command)
            .await;
        let end_time = Utc::now();

        match result {
            Ok(output) => {
                let execution = TaskExecution::completed(start_time, end_time, output);

                #[cfg(feature = "tracing")]
                tracing::debug!(
                    state = ?ExecutionState::Completed,
                    duration_ms = execution.duration().num_milliseconds(),
                    "Command finished"
                );

                execution
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    error = %e,
                    state = ?ExecutionState::FailedCaptured,
                    "Command execution failed"
                );

                TaskExecution::captured_error(start_time, end_time, e)
            }
        }
    }

    /// Spawns the child and returns its trimmed stdout once it has exited.
    async fn capture(&self, command: &str) -> Result<String, TaskError> {
        let mut child = self.spawn_child(self.setup_command(command))?;

        #[cfg(feature = "tracing")]
        tracing::trace!(pid = ?child.id(), state = ?ExecutionState::Running, "Child process spawned");

        let Some(timeout_ms) = self.timeout_ms else {
            return Self::collect(&mut child).await;
        };

        let limited =
            tokio::time::timeout(Duration::from_millis(timeout_ms), Self::collect(&mut child)).await;
        match limited {
            Ok(result) => result,
            Err(_) => {
                Self::kill_child(&mut child).await;
                Err(TaskError::ProcessTimeout(timeout_ms))
            }
        }
    }

    async fn collect(child: &mut Child) -> Result<String, TaskError> {
        let output = Self::read_stdout(child).await?;
        Self::wait_child(child).await?;
        Ok(output)
    }

    /// Creates the shell process with stdout piped and stderr discarded.
    pub(crate) fn setup_command(&self, command: &str) -> Command {
        let mut cmd = self.shell.build(command);

        cmd.kill_on_drop(true);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        cmd
    }

    fn spawn_child(&self, mut cmd: Command) -> Result<Child, TaskError> {
        cmd.spawn().map_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %e, shell = self.shell.program(), "Failed to spawn child process");

            TaskError::IO(format!(
                "Failed to spawn '{}': {}",
                self.shell.program(),
                e
            ))
        })
    }
}
