use crate::{
    helper::tracing::init_test_logging,
    tasks::{state::ExecutionState, tokio::executor::TaskRunner},
};

#[tokio::test]
async fn echo_command_captures_output() {
    init_test_logging();
    let runner = TaskRunner::default();

    let execution = runner.run_command("echo hello").await;

    assert_eq!(execution.output(), "hello");
    assert_eq!(execution.state(), ExecutionState::Completed);
    assert!(execution.end_time() >= execution.start_time());
}

#[cfg(unix)]
#[tokio::test]
async fn multi_line_output_is_joined_and_trimmed() {
    let runner = TaskRunner::default();

    let execution = runner
        .run_command("printf '  first\\nsecond\\r\\n\\nthird\\n\\n\\n'")
        .await;

    assert!(execution.is_success());
    assert_eq!(execution.output(), "first\nsecond\n\nthird");
}

#[cfg(unix)]
#[tokio::test]
async fn lone_carriage_return_ends_a_line() {
    let runner = TaskRunner::default();

    let execution = runner.run_command("printf 'a\\rb\\n'").await;

    assert!(execution.is_success());
    assert_eq!(execution.output(), "a\nb");
}

#[cfg(unix)]
#[tokio::test]
async fn stderr_is_not_captured() {
    let runner = TaskRunner::default();

    let execution = runner.run_command("echo out; echo err 1>&2").await;

    assert_eq!(execution.output(), "out");
}

#[cfg(unix)]
#[tokio::test]
async fn non_zero_exit_is_still_completed() {
    let runner = TaskRunner::default();

    let execution = runner.run_command("echo partial; exit 3").await;

    assert!(execution.is_success());
    assert_eq!(execution.output(), "partial");
}

#[cfg(unix)]
#[tokio::test]
async fn command_without_output_yields_empty_string() {
    let runner = TaskRunner::default();

    let execution = runner.run_command("true").await;

    assert!(execution.is_success());
    assert_eq!(execution.output(), "");
}

#[cfg(unix)]
#[tokio::test]
async fn shell_interprets_the_whole_string() {
    let runner = TaskRunner::default();

    let execution = runner.run_command("echo one && echo two").await;

    assert_eq!(execution.output(), "one\ntwo");
}

#[cfg(windows)]
#[tokio::test]
async fn cmd_runs_builtin() {
    let runner = TaskRunner::default();

    let execution = runner.run_command("echo hello world").await;

    assert!(execution.is_success());
    assert_eq!(execution.output(), "hello world");
}
