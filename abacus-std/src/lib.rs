//! Abacus Standard Library
//!
//! The sample plugin unit shipped with the calculator:
//! - `sqrt` square root
//! - `power` integer and fractional powers
//! - `stats` count, mean, min and max of a list of numbers

pub mod commands;
mod helpers;

use abacus_plugin::{PluginRegistry, PluginUnit};

/// Plugin unit listed by the calculator at start-up
pub const STANDARD_UNIT: PluginUnit = PluginUnit {
    name: "abacus-std",
    register,
};

/// Register every standard command
pub fn register(registry: &mut PluginRegistry) {
    registry.register(commands::Sqrt);
    registry.register(commands::Power);
    registry.register(commands::Stats);
}

/// Create registry with standard library
pub fn standard_registry() -> PluginRegistry {
    PluginRegistry::from_units(&[STANDARD_UNIT])
}
