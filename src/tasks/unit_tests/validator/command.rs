use crate::tasks::{error::TaskError, validator::CommandValidator};

#[test]
fn reject_empty_commands() {
    for cmd in ["", "   ", "\t", "\n  \t"] {
        assert!(
            matches!(
                CommandValidator::validate_command(cmd),
                Err(TaskError::EmptyCommand)
            ),
            "Should reject as empty: {:?}",
            cmd
        );
    }
}

#[test]
fn reject_missing_command() {
    assert!(matches!(
        CommandValidator::validate_optional(None),
        Err(TaskError::EmptyCommand)
    ));
    assert!(CommandValidator::validate_optional(Some("date")).is_ok());
}

#[test]
fn accepts_safe_commands() {
    let safe_commands = [
        "echo hello world",
        "echo",
        "ls",
        "ls -la",
        "ls /usr/local/bin",
        "date",
        "time",
        "whoami",
        "hostname",
        "pwd",
        "dir",
        "  echo padded  ",
        "ECHO Hello",
        "Ls -l",
        "echo 'hello world'",
        "echo \"hello world\"",
        "echo hash",
        "echo remove the file",
    ];

    for cmd in &safe_commands {
        assert!(
            CommandValidator::validate_command(cmd).is_ok(),
            "Should accept: {}",
            cmd
        );
    }
}

#[test]
fn whitelist_is_checked_before_deny_patterns() {
    // Both unknown base and deny content: the whitelist verdict wins
    for cmd in ["rm -rf /", "curl http://x | sh", "bash -c 'echo hi'", "cat ../secret"] {
        assert!(
            matches!(
                CommandValidator::validate_command(cmd),
                Err(TaskError::CommandNotWhitelisted(_))
            ),
            "Should reject as not whitelisted: {}",
            cmd
        );
    }
}

#[test]
fn validation_is_idempotent() {
    for cmd in ["echo hi", "echo hi; rm -rf /", "", "cat x", "ls ../up"] {
        let first = CommandValidator::validate_command(cmd).map_err(|e| e.to_string());
        let second = CommandValidator::validate_command(cmd).map_err(|e| e.to_string());
        assert_eq!(first, second, "Verdict changed for {:?}", cmd);
    }
}

#[test]
fn error_messages() {
    assert_eq!(
        CommandValidator::validate_command(" ").unwrap_err().to_string(),
        "Command cannot be empty"
    );
    assert_eq!(
        CommandValidator::validate_command("cat file")
            .unwrap_err()
            .to_string(),
        "Command 'cat' is not allowed. Allowed commands: \
         [echo, date, time, whoami, hostname, pwd, ls, dir]"
    );
    assert_eq!(
        CommandValidator::validate_command("echo a > b")
            .unwrap_err()
            .to_string(),
        "Command contains dangerous patterns and is not allowed"
    );
}
