//! Math commands: square root and power

use abacus_plugin::prelude::*;
use tracing::info;
use crate::helpers::{parse_numbers, require_args};

pub struct Sqrt;
pub struct Power;

static SQRT_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Number", "Value (must be non-negative)")];
static SQRT_EXAMPLES: [&str; 2] = ["sqrt 16", "sqrt 2"];

static POWER_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("base", "Number", "Base value"),
    ArgMeta::required("exponent", "Number", "Exponent (integer or fractional)"),
];
static POWER_EXAMPLES: [&str; 2] = ["power 2 3", "power 9 0.5"];

impl CommandPlugin for Sqrt {
    fn meta(&self) -> CommandMeta {
        CommandMeta {
            name: "sqrt",
            description: "Calculate the square root of a number",
            usage: "sqrt <x>",
            args: &SQRT_ARGS,
            examples: &SQRT_EXAMPLES,
        }
    }

    fn execute(&self, args: &[String]) -> Result<Value, AbacusError> {
        require_args(args, 1, "Please provide a number to calculate the square root of")?;
        let numbers = parse_numbers(&args[..1])?;
        let result = numbers[0].sqrt(DEFAULT_PRECISION)?;
        info!("Calculated square root of {}: {}", numbers[0], result);
        Ok(Value::Number(result))
    }
}

impl CommandPlugin for Power {
    fn meta(&self) -> CommandMeta {
        CommandMeta {
            name: "power",
            description: "Calculate a number raised to a power",
            usage: "power <base> <exponent>",
            args: &POWER_ARGS,
            examples: &POWER_EXAMPLES,
        }
    }

    fn execute(&self, args: &[String]) -> Result<Value, AbacusError> {
        require_args(args, 2, "Please provide a base and exponent (e.g., power 2 3)")?;
        let numbers = parse_numbers(&args[..2])?;
        let (base, exponent) = (&numbers[0], &numbers[1]);
        let result = base.pow_real(exponent, DEFAULT_PRECISION)?;
        info!("Calculated {} raised to {}: {}", base, exponent, result);
        Ok(Value::Number(result))
    }
}
