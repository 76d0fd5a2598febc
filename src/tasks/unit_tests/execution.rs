use chrono::{TimeDelta, TimeZone, Utc};

use crate::tasks::{
    error::TaskError,
    execution::{CAPTURED_ERROR_PREFIX, ExecutionOutcome, TaskExecution},
    state::ExecutionState,
    task::Task,
};

fn at(millis: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000 + millis).unwrap()
}

#[test]
fn completed_record() {
    let execution = TaskExecution::completed(at(0), at(25), "hello".to_string());
    assert_eq!(execution.output(), "hello");
    assert!(execution.is_success());
    assert_eq!(execution.state(), ExecutionState::Completed);
    assert!(execution.state().is_terminal());
    assert_eq!(execution.duration(), TimeDelta::milliseconds(25));
}

#[test]
fn captured_error_record() {
    let execution = TaskExecution::captured_error(at(0), at(1), TaskError::ProcessTimeout(10));
    assert_eq!(
        execution.output(),
        "Error executing command: Process timed out after 10 ms"
    );
    assert!(!execution.is_success());
    assert_eq!(execution.state(), ExecutionState::FailedCaptured);
}

#[test]
fn end_time_never_precedes_start_time() {
    let execution = TaskExecution::completed(at(100), at(50), String::new());
    assert_eq!(execution.end_time(), execution.start_time());
}

#[test]
fn outcome_from_output_uses_prefix() {
    assert_eq!(
        ExecutionOutcome::from_output("hi".to_string()),
        ExecutionOutcome::Completed("hi".to_string())
    );
    let text = format!("{CAPTURED_ERROR_PREFIX}boom");
    assert_eq!(
        ExecutionOutcome::from_output(text.clone()),
        ExecutionOutcome::CapturedError(text)
    );
}

#[test]
fn non_terminal_states() {
    assert!(!ExecutionState::NotStarted.is_terminal());
    assert!(!ExecutionState::Running.is_terminal());
}

#[test]
fn task_history_is_append_only_in_order() {
    let mut task = Task::new("greet", "alice", "echo hi");
    assert!(task.executions().is_empty());
    assert!(task.last_execution().is_none());

    for i in 0..4 {
        task.append_execution(TaskExecution::completed(at(i), at(i + 1), i.to_string()));
    }

    let outputs: Vec<_> = task.executions().iter().map(|e| e.output()).collect();
    assert_eq!(outputs, ["0", "1", "2", "3"]);
    assert_eq!(task.last_execution().map(|e| e.output()), Some("3"));
}

#[cfg(feature = "serde")]
mod serde_shape {
    use super::*;
    use serde_json::json;

    #[test]
    fn execution_serializes_flat() {
        let execution = TaskExecution::completed(at(123), at(456), "hello".to_string());
        let value = serde_json::to_value(&execution).unwrap();
        assert_eq!(
            value,
            json!({
                "startTime": "2023-11-14T22:13:20.123Z",
                "endTime": "2023-11-14T22:13:20.456Z",
                "output": "hello",
            })
        );
    }

    #[test]
    fn captured_error_serializes_to_same_shape() {
        let execution = TaskExecution::captured_error(at(0), at(1), "boom");
        let value = serde_json::to_value(&execution).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(value["output"], "Error executing command: boom");
    }

    #[test]
    fn execution_reads_back_outcome() {
        let raw = r#"{
            "startTime": "2024-01-02T03:04:05.006Z",
            "endTime": "2024-01-02T03:04:06.007Z",
            "output": "Error executing command: IO error: broken pipe"
        }"#;
        let execution: TaskExecution = serde_json::from_str(raw).unwrap();
        assert_eq!(execution.state(), ExecutionState::FailedCaptured);
        assert_eq!(execution.duration(), TimeDelta::milliseconds(1001));
    }

    #[test]
    fn task_uses_camel_case_and_defaults() {
        let task: Task = serde_json::from_str(r#"{ "name": "greet", "command": "echo hi" }"#)
            .unwrap();
        assert_eq!(task.id, None);
        assert_eq!(task.owner, "");
        assert!(task.executions().is_empty());

        let mut task = task.with_id("t-1");
        task.append_execution(TaskExecution::completed(at(0), at(0), "hi".to_string()));
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], "t-1");
        assert_eq!(value["taskExecutions"][0]["output"], "hi");
        assert!(value.get("task_executions").is_none());
    }
}
