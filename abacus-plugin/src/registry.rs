//! Plugin Registry
//!
//! Maps command words to plugins. The map is rebuilt from a list of
//! plugin units by `discover`; a unit is a registration function, so new
//! commands are added by listing another unit without touching dispatch.

use crate::{CommandPlugin, CommandMeta};
use abacus_core::{AbacusError, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A group of plugins registered together (one crate, one module)
#[derive(Clone, Copy)]
pub struct PluginUnit {
    pub name: &'static str,
    pub register: fn(&mut PluginRegistry),
}

impl std::fmt::Debug for PluginUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginUnit").field("name", &self.name).finish()
    }
}

/// Registered plugin with its command key and description
#[derive(Clone)]
pub struct PluginDescriptor {
    pub command: String,
    pub description: String,
    plugin: Arc<dyn CommandPlugin>,
}

impl PluginDescriptor {
    pub fn meta(&self) -> CommandMeta {
        self.plugin.meta()
    }

    pub fn execute(&self, args: &[String]) -> Result<Value, AbacusError> {
        self.plugin.execute(args)
    }
}

impl std::fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("command", &self.command)
            .field("description", &self.description)
            .finish()
    }
}

/// Central plugin registry
pub struct PluginRegistry {
    commands: HashMap<String, PluginDescriptor>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Build a registry from plugin units
    pub fn from_units(units: &[PluginUnit]) -> Self {
        let mut registry = Self::new();
        registry.discover(units);
        registry
    }

    /// Rebuild the command map from scratch.
    ///
    /// Units run in slice order; when two units register the same command
    /// the later one wins. Returns the number of registered commands.
    pub fn discover(&mut self, units: &[PluginUnit]) -> usize {
        self.commands.clear();
        for unit in units {
            debug!("Loading plugin unit: {}", unit.name);
            (unit.register)(self);
        }
        info!("Plugin discovery complete: {} commands", self.commands.len());
        self.commands.len()
    }

    /// Register a plugin under its command name, replacing any previous entry
    pub fn register<C: CommandPlugin + 'static>(&mut self, plugin: C) -> Option<PluginDescriptor> {
        let meta = plugin.meta();
        let descriptor = PluginDescriptor {
            command: meta.name.to_string(),
            description: meta.description.to_string(),
            plugin: Arc::new(plugin),
        };

        let previous = self.commands.insert(descriptor.command.clone(), descriptor);
        if previous.is_some() {
            warn!("Plugin command '{}' already registered. Overwriting.", meta.name);
        }
        info!("Loaded plugin: {} - {}", meta.name, meta.description);
        previous
    }

    pub fn with_command<C: CommandPlugin + 'static>(mut self, plugin: C) -> Self {
        self.register(plugin);
        self
    }

    pub fn lookup(&self, command: &str) -> Option<&PluginDescriptor> {
        self.commands.get(command)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    pub fn commands(&self) -> BTreeSet<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn descriptions(&self) -> BTreeMap<String, String> {
        self.commands.iter()
            .map(|(name, d)| (name.clone(), d.description.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run a plugin by command name
    pub fn execute(&self, command: &str, args: &[String]) -> Result<Value, AbacusError> {
        let Some(descriptor) = self.lookup(command) else {
            let mut err = AbacusError::plugin_not_found(command);
            let similar = self.find_similar_commands(command);
            if !similar.is_empty() {
                let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                err = err.with_suggestion(format!(
                    "Similar: {}. Type 'menu' for the full list.",
                    suggestions.join(", ")
                ));
            }
            // A mistyped command is user input, not a fault
            debug!("{}", err);
            return Err(err);
        };

        info!("Executing plugin: {}", command);
        descriptor.execute(args).inspect_err(|e| {
            warn!("Plugin '{}' failed: {}", command, e);
        })
    }

    /// Find command names similar to the given name (for error suggestions)
    fn find_similar_commands(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self.commands.keys()
            .filter_map(|command| {
                let score = Self::similarity_score(&name_lower, &command.to_lowercase());
                if score > 0 {
                    Some((command.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        // Higher score first, name as tie-breaker
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    /// Calculate similarity score between two strings
    fn similarity_score(query: &str, candidate: &str) -> usize {
        if query.is_empty() {
            return 0;
        }

        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        // Shared characters
        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();

        // A single shared letter is noise
        if score == 0 && common < 2 {
            return 0;
        }
        score += common * 2;

        // Penalize length difference
        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 {
            score += 5 - len_diff;
        }

        score
    }

    /// Help for a single command
    pub fn help(&self, command: &str) -> Option<Value> {
        self.lookup(command).map(|d| Value::Object(Self::command_to_help(&d.meta())))
    }

    fn command_to_help(meta: &CommandMeta) -> BTreeMap<String, Value> {
        let mut help = BTreeMap::new();
        help.insert("name".to_string(), Value::Text(meta.name.to_string()));
        help.insert("description".to_string(), Value::Text(meta.description.to_string()));
        help.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
        help.insert("args".to_string(), Value::List(
            meta.args.iter().map(|a| {
                let mut arg = BTreeMap::new();
                arg.insert("name".to_string(), Value::Text(a.name.to_string()));
                arg.insert("type".to_string(), Value::Text(a.typ.to_string()));
                arg.insert("description".to_string(), Value::Text(a.description.to_string()));
                arg.insert("optional".to_string(), Value::Bool(a.optional));
                Value::Object(arg)
            }).collect()
        ));
        help.insert("examples".to_string(), Value::List(
            meta.examples.iter().map(|e| Value::Text(e.to_string())).collect()
        ));
        help
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
