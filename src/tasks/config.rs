use crate::tasks::{error::TaskError, shell::TaskShell};

/// Settings for a [`TaskRunner`](crate::tasks::tokio::executor::TaskRunner).
///
/// The default runs through the host shell and waits for the child with no
/// time limit.
///
/// # Examples
/// ```rust
/// use tcrm_runner::tasks::{config::RunnerConfig, shell::TaskShell};
///
/// let config = RunnerConfig::new().shell(TaskShell::Posix).timeout_ms(5_000);
/// assert!(config.validate().is_ok());
///
/// assert!(RunnerConfig::new().timeout_ms(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RunnerConfig {
    /// Shell used to interpret the command
    pub shell: TaskShell,

    /// Maximum allowed runtime in milliseconds, `None` waits forever
    pub timeout_ms: Option<u64>,
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shell(mut self, shell: TaskShell) -> Self {
        self.shell = shell;
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout_ms = Some(timeout);
        self
    }

    /// # Errors
    ///
    /// Returns [`TaskError::InvalidConfiguration`] if:
    /// - `timeout_ms` is `Some(0)`
    /// - a custom shell has an empty program
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.timeout_ms == Some(0) {
            return Err(TaskError::InvalidConfiguration(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        if let TaskShell::Custom { program, .. } = &self.shell {
            if program.trim().is_empty() {
                return Err(TaskError::InvalidConfiguration(
                    "Shell program cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
