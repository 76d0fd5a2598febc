//! # tcrm-runner
//!
//! Stores shell command tasks and runs them on the host, keeping a record of
//! every run. Commands pass a whitelist and deny-pattern gate before they are
//! stored or executed.
//!
//! ## Features
//!
//! - **Command Gate**: only `echo, date, time, whoami, hostname, pwd, ls, dir`
//!   may run, and never with shell metacharacters, path traversal, or
//!   destructive, network, account, or shell keywords
//! - **Recorded Runs**: start/end time and captured stdout for each run
//! - **Failures as Records**: a run that cannot start still produces a record
//!   with the error text as its output
//! - **Pluggable Storage**: a [`TaskStore`](store::TaskStore) trait with an
//!   in-memory implementation
//! - **Serialization**: optional serde support producing the
//!   `{ startTime, endTime, output }` record shape
//!
//! ## Quick Start
//!
//! ```rust
//! use tcrm_runner::{service::TaskService, store::InMemoryTaskStore, tasks::task::Task};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = TaskService::new(InMemoryTaskStore::new());
//!
//!     let task = service
//!         .create_or_update(Task::new("who", "alice", "whoami"))
//!         .await?;
//!     let id = task.id.clone().unwrap_or_default();
//!
//!     let task = service.run_task(&id).await?;
//!     for run in task.executions() {
//!         println!("{} -> {}: {}", run.start_time(), run.end_time(), run.output());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Running Without a Store
//!
//! ```rust
//! use tcrm_runner::tasks::{
//!     config::RunnerConfig, tokio::executor::TaskRunner, validator::CommandValidator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let command = "echo hello world";
//!     CommandValidator::validate_command(command)?;
//!
//!     // No timeout unless one is configured
//!     let runner = TaskRunner::new(RunnerConfig::new().timeout_ms(30_000))?;
//!     let execution = runner.run_command(command).await;
//!     assert_eq!(execution.output(), "hello world");
//!     Ok(())
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `serde` (default): Serialization support for tasks, records, and config
//! - `tracing`: Structured logging integration

pub mod helper;
pub mod service;
pub mod store;
pub mod tasks;
