//! Helper functions shared by the standard commands
//!
//! Common utilities for turning argument words into numbers.

use abacus_core::{codes, AbacusError, Number};

/// Parse every argument word as a decimal number
pub fn parse_numbers(args: &[String]) -> Result<Vec<Number>, AbacusError> {
    args.iter()
        .map(|word| Number::from_str(word).map_err(|_| AbacusError::invalid_operand(word)))
        .collect()
}

/// Require at least `min` argument words
pub fn require_args(args: &[String], min: usize, message: &str) -> Result<(), AbacusError> {
    if args.len() < min {
        return Err(AbacusError::new(codes::ARG_COUNT, message));
    }
    Ok(())
}

/// Calculate sum of numbers
pub fn sum(numbers: &[Number]) -> Number {
    numbers
        .iter()
        .fold(Number::from_i64(0), |acc, n| acc.add(n))
}

/// Calculate mean of numbers
pub fn mean(numbers: &[Number]) -> Result<Number, AbacusError> {
    if numbers.is_empty() {
        return Err(AbacusError::domain_error("Cannot calculate mean of empty list"));
    }
    let count = Number::from_i64(numbers.len() as i64);
    sum(numbers).checked_div(&count).map_err(|e| e.into())
}
