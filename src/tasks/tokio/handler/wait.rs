use tokio::process::Child;

use crate::tasks::{error::TaskError, tokio::executor::TaskRunner};

impl TaskRunner {
    /// Blocks until the child exits.
    ///
    /// The exit status is logged but never turns the run into a failure; only
    /// an OS error while waiting does.
    pub(crate) async fn wait_child(child: &mut Child) -> Result<(), TaskError> {
        match child.wait().await {
            Ok(_status) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(exit_code = ?_status.code(), "Child process finished");
                Ok(())
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %e, "Child process wait failed");

                Err(TaskError::IO(format!(
                    "Failed to wait for child process: {}",
                    e
                )))
            }
        }
    }

    /// Kills a child that outlived its timeout and reaps it.
    pub(crate) async fn kill_child(child: &mut Child) {
        if let Err(_e) = child.kill().await {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "Failed to kill timed out child process");
        }
    }
}
