//! Shared CLI error type and exit codes.

use std::fmt;

/// Process exit codes used by subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// IO or serialization failure
    IoError = 1,
    /// Bad arguments or invalid configuration
    ValidationError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// IO or serialization failure
    Io,
    /// Bad arguments or invalid configuration
    Validation,
}

/// Error returned by CLI subcommands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category
    pub kind: CliErrorKind,
    /// Human-readable message
    pub message: String,
}

impl CliError {
    /// IO failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Io => ExitCode::IoError,
            CliErrorKind::Validation => ExitCode::ValidationError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI subcommands.
pub type CliResult<T> = Result<T, CliError>;

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::io("x").exit_code().code(), 1);
        assert_eq!(CliError::validation("x").exit_code().code(), 2);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_display_is_message() {
        assert_eq!(CliError::validation("bad input").to_string(), "bad input");
    }
}
