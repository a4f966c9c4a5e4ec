//! Abacus Plugin System
//!
//! Provides the `CommandPlugin` trait every extra calculator command
//! implements, and the `PluginRegistry` that resolves a typed command
//! word to its plugin at call time.

mod traits;
mod registry;

pub use traits::{CommandPlugin, CommandMeta, ArgMeta};
pub use registry::{PluginRegistry, PluginDescriptor, PluginUnit};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        CommandPlugin, CommandMeta, ArgMeta,
        PluginRegistry, PluginDescriptor, PluginUnit,
    };
    pub use abacus_core::prelude::*;
}
