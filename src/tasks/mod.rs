pub mod config;
pub mod error;
pub mod execution;
pub mod shell;
pub mod state;
pub mod task;
pub mod tokio;
pub mod validator;
