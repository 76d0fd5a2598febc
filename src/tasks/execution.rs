use chrono::{DateTime, Utc};

use crate::tasks::state::ExecutionState;

/// Prefix placed in front of the failure description of a captured error.
pub const CAPTURED_ERROR_PREFIX: &str = "Error executing command: ";

/// How a run ended.
///
/// Both variants carry plain text and serialize to the same `output` field;
/// a failed run is still a normal history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Captured stdout of a process that ran to exit.
    Completed(String),
    /// `"Error executing command: <description>"` for a run that could not
    /// be spawned, read, or waited on.
    CapturedError(String),
}

impl ExecutionOutcome {
    /// Builds a [`ExecutionOutcome::CapturedError`] from a failure description.
    pub fn captured(description: impl std::fmt::Display) -> Self {
        ExecutionOutcome::CapturedError(format!("{CAPTURED_ERROR_PREFIX}{description}"))
    }

    /// Reads a stored output back into an outcome.
    ///
    /// Only the text survives storage, so the prefix decides the variant.
    pub fn from_output(output: String) -> Self {
        if output.starts_with(CAPTURED_ERROR_PREFIX) {
            ExecutionOutcome::CapturedError(output)
        } else {
            ExecutionOutcome::Completed(output)
        }
    }

    pub fn output(&self) -> &str {
        match self {
            ExecutionOutcome::Completed(output) | ExecutionOutcome::CapturedError(output) => {
                output
            }
        }
    }
}

/// One immutable record of a single run.
///
/// Created by [`TaskRunner`](crate::tasks::tokio::executor::TaskRunner) and
/// appended to a [`Task`](crate::tasks::task::Task) history. There are no
/// setters; `end_time` is never before `start_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "ExecutionRecord", from = "ExecutionRecord")
)]
pub struct TaskExecution {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    outcome: ExecutionOutcome,
}

impl TaskExecution {
    /// Creates a record, clamping `end_time` up to `start_time` if the wall
    /// clock stepped backwards during the run.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, outcome: ExecutionOutcome) -> Self {
        Self {
            start_time,
            end_time: end_time.max(start_time),
            outcome,
        }
    }

    pub fn completed(start_time: DateTime<Utc>, end_time: DateTime<Utc>, output: String) -> Self {
        Self::new(start_time, end_time, ExecutionOutcome::Completed(output))
    }

    pub fn captured_error(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        description: impl std::fmt::Display,
    ) -> Self {
        Self::new(start_time, end_time, ExecutionOutcome::captured(description))
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn outcome(&self) -> &ExecutionOutcome {
        &self.outcome
    }

    /// Captured stdout, or the error text for a failed run.
    pub fn output(&self) -> &str {
        self.outcome.output()
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ExecutionOutcome::Completed(_))
    }

    /// Terminal state this record represents.
    pub fn state(&self) -> ExecutionState {
        match self.outcome {
            ExecutionOutcome::Completed(_) => ExecutionState::Completed,
            ExecutionOutcome::CapturedError(_) => ExecutionState::FailedCaptured,
        }
    }

    pub fn duration(&self) -> chrono::TimeDelta {
        self.end_time - self.start_time
    }
}

/// Flat wire shape of a [`TaskExecution`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionRecord {
    #[serde(with = "timestamp")]
    start_time: DateTime<Utc>,
    #[serde(with = "timestamp")]
    end_time: DateTime<Utc>,
    #[serde(default)]
    output: String,
}

#[cfg(feature = "serde")]
impl From<TaskExecution> for ExecutionRecord {
    fn from(execution: TaskExecution) -> Self {
        let output = match execution.outcome {
            ExecutionOutcome::Completed(output) | ExecutionOutcome::CapturedError(output) => {
                output
            }
        };
        Self {
            start_time: execution.start_time,
            end_time: execution.end_time,
            output,
        }
    }
}

#[cfg(feature = "serde")]
impl From<ExecutionRecord> for TaskExecution {
    fn from(record: ExecutionRecord) -> Self {
        TaskExecution::new(
            record.start_time,
            record.end_time,
            ExecutionOutcome::from_output(record.output),
        )
    }
}

/// `yyyy-MM-dd'T'HH:mm:ss.SSS'Z'` timestamps.
#[cfg(feature = "serde")]
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
    // Accepts any fraction length on the way in
    const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

    pub(super) fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, PARSE_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
