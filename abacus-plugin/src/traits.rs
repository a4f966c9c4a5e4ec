//! Plugin traits

use abacus_core::{AbacusError, Value};
use serde::Serialize;

/// Metadata about a command argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    pub typ: &'static str,
    pub description: &'static str,
    pub optional: bool,
}

impl ArgMeta {
    pub const fn required(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, description, optional: false }
    }
}

/// Metadata for a command plugin
#[derive(Debug, Clone, Serialize)]
pub struct CommandMeta {
    /// Word typed at the prompt; the registry key
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgMeta],
    pub examples: &'static [&'static str],
}

/// Command plugin
///
/// Arguments arrive as the raw words that followed the command name.
/// Errors are returned as-is to the caller; the registry does not wrap them.
pub trait CommandPlugin: Send + Sync {
    fn meta(&self) -> CommandMeta;

    fn execute(&self, args: &[String]) -> Result<Value, AbacusError>;

    fn command(&self) -> &'static str {
        self.meta().name
    }

    fn description(&self) -> &'static str {
        self.meta().description
    }
}
