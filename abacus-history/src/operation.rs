//! The four built-in arithmetic operations

use abacus_core::{codes, AbacusError, Number, NumberError};
use serde::{Deserialize, Serialize};

pub fn add(a: &Number, b: &Number) -> Number {
    a.add(b)
}

pub fn subtract(a: &Number, b: &Number) -> Number {
    a.sub(b)
}

pub fn multiply(a: &Number, b: &Number) -> Number {
    a.mul(b)
}

/// Fails with `DivisionByZero` when `b` is exactly zero
pub fn divide(a: &Number, b: &Number) -> Result<Number, NumberError> {
    a.checked_div(b)
}

/// Built-in binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Name stored in history rows and typed at the prompt
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::Add => "Add two numbers",
            Operation::Subtract => "Subtract two numbers",
            Operation::Multiply => "Multiply two numbers",
            Operation::Divide => "Divide two numbers",
        }
    }

    pub fn apply(self, a: &Number, b: &Number) -> Result<Number, NumberError> {
        match self {
            Operation::Add => Ok(add(a, b)),
            Operation::Subtract => Ok(subtract(a, b)),
            Operation::Multiply => Ok(multiply(a, b)),
            Operation::Divide => divide(a, b),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Operation {
    type Err = AbacusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| AbacusError::new(codes::UNKNOWN_COMMAND, format!("Unknown operation: {}", s)))
    }
}
