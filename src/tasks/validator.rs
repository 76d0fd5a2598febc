use std::sync::LazyLock;

use regex::RegexSet;

use crate::tasks::error::TaskError;

/// Base commands a task is allowed to run.
pub const ALLOWED_COMMANDS: [&str; 8] = [
    "echo", "date", "time", "whoami", "hostname", "pwd", "ls", "dir",
];

/// Deny patterns, each matched against the whole command text.
///
/// `(?s)` lets `.` cross newlines, so a token on a later line of a multi-line
/// command is still caught. Keywords fold case over ASCII only (`(?i-u:..)`);
/// `ſ` or the Kelvin sign do not stand in for `s` or `k`.
const DANGEROUS_PATTERNS: [&str; 8] = [
    r"(?s)^.*\b(?i-u:rm|del|delete|format|rmdir)\b.*$",
    r"(?s)^.*\b(?i-u:shutdown|reboot|restart)\b.*$",
    r"(?s)^.*\b(?i-u:net\s+user|useradd|adduser)\b.*$",
    r"(?s)^.*\b(?i-u:taskkill|kill|pkill)\b.*$",
    r"(?s)^.*\b(?i-u:wget|curl|invoke-webrequest)\b.*$",
    r"(?s)^.*\b(?i-u:powershell|bash|sh|cmd)\b.*$",
    r"(?s)^.*[;&|><`$\\].*$",
    r"(?s)^.*\.\..*$",
];

// Patterns are literals above; a compile failure is a programming error.
static DANGEROUS_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(DANGEROUS_PATTERNS).expect("deny patterns are valid regular expressions")
});

/// Security gate for task commands.
///
/// A command passes only when its first token is one of [`ALLOWED_COMMANDS`]
/// and none of the deny patterns match anywhere in the original text. The
/// whitelist only looks at the first token, the deny patterns look at the
/// whole string, so `echo hi; rm -rf /` passes the first check and fails the
/// second.
pub struct CommandValidator;

impl CommandValidator {
    /// Validates a command before it is stored or executed.
    ///
    /// # Errors
    ///
    /// - [`TaskError::EmptyCommand`] if the command is empty or whitespace-only
    /// - [`TaskError::CommandNotWhitelisted`] if the base command is not allowed
    /// - [`TaskError::DangerousPattern`] if any deny pattern matches
    ///
    /// # Examples
    /// ```rust
    /// use tcrm_runner::tasks::{error::TaskError, validator::CommandValidator};
    ///
    /// assert!(CommandValidator::validate_command("echo hello world").is_ok());
    ///
    /// let result = CommandValidator::validate_command("echo hi; rm -rf /");
    /// assert!(matches!(result, Err(TaskError::DangerousPattern)));
    ///
    /// let result = CommandValidator::validate_command("cat /etc/passwd");
    /// assert!(matches!(result, Err(TaskError::CommandNotWhitelisted(_))));
    /// ```
    pub fn validate_command(command: &str) -> Result<(), TaskError> {
        let Some(base) = Self::base_command(command) else {
            #[cfg(feature = "tracing")]
            tracing::warn!("Rejected empty command");
            return Err(TaskError::EmptyCommand);
        };

        if !Self::is_whitelisted(&base) {
            #[cfg(feature = "tracing")]
            tracing::warn!(base_command = %base, "Rejected command outside whitelist");
            return Err(TaskError::CommandNotWhitelisted(base));
        }

        if Self::contains_dangerous_pattern(command) {
            #[cfg(feature = "tracing")]
            tracing::warn!(command, "Rejected command matching deny pattern");
            return Err(TaskError::DangerousPattern);
        }

        Ok(())
    }

    /// Same as [`validate_command`](Self::validate_command) for a command that
    /// may be absent. `None` is rejected as [`TaskError::EmptyCommand`].
    pub fn validate_optional(command: Option<&str>) -> Result<(), TaskError> {
        match command {
            Some(command) => Self::validate_command(command),
            None => Err(TaskError::EmptyCommand),
        }
    }

    /// Extracts the lower-cased first token, split on ASCII whitespace the
    /// way `/bin/sh` splits words.
    ///
    /// Returns `None` for empty or ASCII-whitespace-only input. Other Unicode
    /// spaces are part of the token, so `"\u{a0}whoami"` yields
    /// `"\u{a0}whoami"` and is not whitelisted.
    pub fn base_command(command: &str) -> Option<String> {
        command
            .split_ascii_whitespace()
            .next()
            .map(|token| token.to_lowercase())
    }

    /// Checks a normalized base command against [`ALLOWED_COMMANDS`].
    pub fn is_whitelisted(base: &str) -> bool {
        ALLOWED_COMMANDS.contains(&base)
    }

    /// Returns `true` when any deny pattern matches the command text.
    pub fn contains_dangerous_pattern(command: &str) -> bool {
        DANGEROUS_SET.is_match(command)
    }
}
