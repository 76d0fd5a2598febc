use std::fmt::Debug;

use tokio::process::Command;

/// Turns a command string into one host process invocation.
///
/// The whole command string is handed to the shell as a single argument; the
/// shell does any further interpretation.
pub trait ShellStrategy: Debug + Send + Sync {
    /// Executable to spawn.
    fn program(&self) -> &str;

    /// Arguments passed to [`program`](ShellStrategy::program), ending with
    /// the command string itself.
    fn args(&self, command: &str) -> Vec<String>;

    /// Builds the unconfigured process for `command`.
    fn build(&self, command: &str) -> Command {
        let mut cmd = Command::new(self.program());
        cmd.args(self.args(command));
        cmd
    }
}

/// Built-in shell selection.
///
/// # Examples
/// ```rust
/// use tcrm_runner::tasks::shell::{ShellStrategy, TaskShell};
///
/// let shell = TaskShell::Posix;
/// assert_eq!(shell.program(), "/bin/sh");
/// assert_eq!(shell.args("echo hi"), vec!["-c", "echo hi"]);
///
/// let shell = TaskShell::Cmd;
/// assert_eq!(shell.program(), "cmd.exe");
/// assert_eq!(shell.args("dir"), vec!["/c", "dir"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TaskShell {
    /// `Cmd` on Windows-family hosts, `Posix` everywhere else.
    #[default]
    Auto,
    /// `/bin/sh -c <command>`
    Posix,
    /// `cmd.exe /c <command>`
    Cmd,
    /// `<program> <args...> <command>`
    Custom { program: String, args: Vec<String> },
}

impl TaskShell {
    /// Resolves `Auto` for the current host. Other variants are returned as is.
    pub fn resolve(&self) -> TaskShell {
        match self {
            TaskShell::Auto if cfg!(windows) => TaskShell::Cmd,
            TaskShell::Auto => TaskShell::Posix,
            other => other.clone(),
        }
    }
}

impl ShellStrategy for TaskShell {
    fn program(&self) -> &str {
        match self {
            TaskShell::Auto if cfg!(windows) => "cmd.exe",
            TaskShell::Auto | TaskShell::Posix => "/bin/sh",
            TaskShell::Cmd => "cmd.exe",
            TaskShell::Custom { program, .. } => program,
        }
    }

    fn args(&self, command: &str) -> Vec<String> {
        let mut args = match self.resolve() {
            TaskShell::Cmd => vec!["/c".to_string()],
            TaskShell::Custom { args, .. } => args,
            TaskShell::Auto | TaskShell::Posix => vec!["-c".to_string()],
        };
        args.push(command.to_string());
        args
    }
}
