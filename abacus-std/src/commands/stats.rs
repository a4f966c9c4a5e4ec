//! Summary statistics over the numbers given on the command line

use abacus_plugin::prelude::*;
use std::collections::BTreeMap;
use tracing::info;
use crate::helpers::{mean, parse_numbers, require_args};

pub struct Stats;

static STATS_ARGS: [ArgMeta; 1] = [ArgMeta::required("values", "Number...", "Numbers to summarize")];
static STATS_EXAMPLES: [&str; 2] = ["stats 10 20 30", "stats 1.5 -2 7"];

impl CommandPlugin for Stats {
    fn meta(&self) -> CommandMeta {
        CommandMeta {
            name: "stats",
            description: "Calculate statistics (mean, min, max) on a list of numbers",
            usage: "stats <x1> <x2> ...",
            args: &STATS_ARGS,
            examples: &STATS_EXAMPLES,
        }
    }

    fn execute(&self, args: &[String]) -> Result<Value, AbacusError> {
        require_args(args, 1, "Please provide numbers to calculate statistics for")?;
        let numbers = parse_numbers(args)?;

        let average = mean(&numbers)?;
        // Non-empty, checked above
        let minimum = numbers.iter().min().cloned().unwrap_or_else(|| Number::from_i64(0));
        let maximum = numbers.iter().max().cloned().unwrap_or_else(|| Number::from_i64(0));

        let mut result = BTreeMap::new();
        result.insert("mean".to_string(), Value::Number(average));
        result.insert("min".to_string(), Value::Number(minimum));
        result.insert("max".to_string(), Value::Number(maximum));
        result.insert("count".to_string(), Value::from(numbers.len() as i64));

        info!("Calculated statistics for {} numbers", numbers.len());
        Ok(Value::Object(result))
    }
}
