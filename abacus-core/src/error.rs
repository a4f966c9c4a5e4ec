//! Structured errors
//!
//! Every failure surfaced at the prompt is an `AbacusError`: a
//! machine-readable code plus a one-line message the REPL prints as
//! `Error: <message>`.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_OPERAND: &str = "INVALID_OPERAND";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const UNDEFINED_FIELD: &str = "UNDEFINED_FIELD";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const PLUGIN_NOT_FOUND: &str = "PLUGIN_NOT_FOUND";
    pub const UNKNOWN_COMMAND: &str = "UNKNOWN_COMMAND";
}

/// Structured error shared by every Abacus crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbacusError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl AbacusError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_operand(text: &str) -> Self {
        Self::new(codes::INVALID_OPERAND, format!("Invalid number: {}", text))
            .with_suggestion("Operands must be decimal numbers, e.g. 3, -2.5, 1e3")
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "Cannot divide by zero.")
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, details.into())
    }

    pub fn arg_count(command: &str, expected: &str) -> Self {
        Self::new(codes::ARG_COUNT, format!("{} command requires {}", command, expected))
            .with_suggestion(format!("Use 'help {}' for usage", command))
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn undefined_field(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FIELD, format!("Undefined field: {}", name))
    }

    pub fn storage(details: impl Into<String>) -> Self {
        Self::new(codes::STORAGE_ERROR, details.into())
    }

    pub fn plugin_not_found(command: &str) -> Self {
        Self::new(codes::PLUGIN_NOT_FOUND, format!("Plugin '{}' not found", command))
            .with_suggestion("Type 'menu' to see available commands")
    }

    pub fn unknown_command(command: &str) -> Self {
        Self::new(codes::UNKNOWN_COMMAND, format!("Unknown command: {}", command))
            .with_suggestion("Type 'menu' to see available commands")
    }
}

impl std::fmt::Display for AbacusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for AbacusError {}

impl From<NumberError> for AbacusError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::invalid_operand(&s),
            NumberError::DivisionByZero => Self::div_zero(),
            NumberError::DomainError(s) => Self::domain_error(s),
            NumberError::Overflow => Self::new(codes::OVERFLOW, "Numeric overflow"),
        }
    }
}
