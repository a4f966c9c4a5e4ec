//! A single calculation: two operands and an operation

use crate::Operation;
use abacus_core::{Number, NumberError};

/// Immutable pairing of operands and operation; evaluated on demand
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    a: Number,
    b: Number,
    operation: Operation,
}

impl Calculation {
    pub fn new(a: Number, b: Number, operation: Operation) -> Self {
        Self { a, b, operation }
    }

    pub fn create(a: Number, b: Number, operation: Operation) -> Self {
        Self::new(a, b, operation)
    }

    pub fn a(&self) -> &Number {
        &self.a
    }

    pub fn b(&self) -> &Number {
        &self.b
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn perform(&self) -> Result<Number, NumberError> {
        self.operation.apply(&self.a, &self.b)
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Calculation({}, {}, {})", self.a, self.b, self.operation)
    }
}
