use crate::{
    helper::tracing::init_test_logging,
    tasks::{
        execution::{CAPTURED_ERROR_PREFIX, ExecutionOutcome},
        shell::TaskShell,
        state::ExecutionState,
        tokio::executor::TaskRunner,
    },
};

fn missing_shell() -> TaskRunner {
    TaskRunner::with_shell(TaskShell::Custom {
        program: "/nonexistent/path/to/tcrm-shell".to_string(),
        args: vec!["-c".to_string()],
    })
}

#[tokio::test]
async fn spawn_failure_is_captured() {
    init_test_logging();
    let runner = missing_shell();

    let execution = runner.run_command("echo hello").await;

    assert!(!execution.is_success());
    assert_eq!(execution.state(), ExecutionState::FailedCaptured);
    assert!(
        execution.output().starts_with(CAPTURED_ERROR_PREFIX),
        "unexpected output: {}",
        execution.output()
    );
    assert!(execution.output().contains("/nonexistent/path/to/tcrm-shell"));
    assert!(execution.end_time() >= execution.start_time());
}

#[tokio::test]
async fn spawn_failure_is_repeatable() {
    let runner = missing_shell();

    let first = runner.run_command("date").await;
    let second = runner.run_command("date").await;

    assert!(matches!(first.outcome(), ExecutionOutcome::CapturedError(_)));
    assert_eq!(first.output(), second.output());
}

#[cfg(unix)]
#[tokio::test]
async fn unknown_program_inside_shell_is_completed() {
    // The shell itself starts; its complaint goes to stderr, which is dropped
    let runner = TaskRunner::default();

    let execution = runner.run_command("tcrm-definitely-missing-program").await;

    assert!(execution.is_success());
    assert_eq!(execution.output(), "");
}
