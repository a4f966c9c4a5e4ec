//! Abacus - command-line decimal calculator
//!
//! `Calculator` routes one prompt line to a built-in operation, the
//! history store or a plugin command, and returns the text to print.

mod command;
mod render;

pub use command::{parse, Command, HistoryCommand, HISTORY_SUBCOMMANDS};
pub use render::Renderer;

use abacus_core::{codes, AbacusError, Number, Value};
use abacus_history::{Calculation, HistoryStore, Operation, DEFAULT_HISTORY_FILE};
use abacus_plugin::PluginRegistry;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What the prompt loop does after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (may be empty) and read the next line
    Continue(String),
    /// Print the text and end the session
    Exit(String),
}

impl Outcome {
    pub fn output(&self) -> &str {
        match self {
            Outcome::Continue(text) | Outcome::Exit(text) => text,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Outcome::Exit(_))
    }
}

/// Main calculator engine
pub struct Calculator {
    history: HistoryStore,
    registry: PluginRegistry,
    history_file: PathBuf,
    renderer: Renderer,
}

impl Calculator {
    pub fn new(history: HistoryStore, registry: PluginRegistry) -> Self {
        info!("Calculator initialized with {} plugin commands", registry.len());
        Self {
            history,
            registry,
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            renderer: Renderer::new(),
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(HistoryStore::new(), abacus_std::standard_registry())
    }

    /// File used by `history save|load|delete` when no name is given
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = path.into();
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn history_file(&self) -> &Path {
        &self.history_file
    }

    /// Load the configured history file if it exists
    pub fn autoload(&mut self) -> Result<bool, AbacusError> {
        Ok(self.history.load(&self.history_file)?)
    }

    /// Parse both operands, evaluate and record the calculation
    pub fn calculate(&mut self, operation: Operation, a: &str, b: &str) -> Result<Number, AbacusError> {
        let a = Number::from_str(a)?;
        let b = Number::from_str(b)?;
        let calculation = Calculation::new(a, b, operation);
        Ok(self.history.add(&calculation)?)
    }

    /// Run one prompt line
    pub fn execute_line(&mut self, line: &str) -> Outcome {
        let command = command::parse(line);
        debug!("Parsed command: {:?}", command);

        let result = match command {
            Command::Empty => Ok(String::new()),
            Command::Exit => return Outcome::Exit("Goodbye!".to_string()),
            Command::Arithmetic { operation, args } => self.arithmetic(operation, &args),
            Command::History(sub) => self.history_command(sub),
            Command::Menu => Ok(self.renderer.menu(&self.registry.descriptions())),
            Command::Help(topic) => self.help(topic),
            Command::Plugin { name, args } => self.plugin(name, &args),
        };

        Outcome::Continue(result.unwrap_or_else(|err| render_error(&err)))
    }

    fn arithmetic(&mut self, operation: Operation, args: &[&str]) -> Result<String, AbacusError> {
        let [a, b] = args else {
            return Err(AbacusError::arg_count(operation.name(), "exactly 2 numbers"));
        };
        let result = self.calculate(operation, a, b)?;
        Ok(format!("Result: {}", result))
    }

    fn history_command(&mut self, sub: HistoryCommand<'_>) -> Result<String, AbacusError> {
        match sub {
            HistoryCommand::Show => {
                let rows = self.history.all();
                if rows.is_empty() {
                    Ok("No calculations in history".to_string())
                } else {
                    Ok(self.renderer.rows(&rows))
                }
            }
            HistoryCommand::Clear => {
                self.history.clear();
                Ok("History cleared".to_string())
            }
            HistoryCommand::Save(file) => {
                let path = self.resolve(file);
                self.history.save(&path)?;
                Ok(format!("History saved to {}", path.display()))
            }
            HistoryCommand::Load(file) => {
                let path = self.resolve(file);
                if self.history.load(&path)? {
                    Ok(format!("History loaded from {}", path.display()))
                } else {
                    Ok(format!("History file {} not found", path.display()))
                }
            }
            HistoryCommand::Delete(file) => {
                let path = self.resolve(file);
                if self.history.delete_file(&path)? {
                    Ok(format!("History file {} deleted", path.display()))
                } else {
                    Ok(format!("History file {} not found", path.display()))
                }
            }
            HistoryCommand::Stats => Ok(self.renderer.stats(&self.history.statistics())),
            HistoryCommand::Filter(None) => {
                Err(AbacusError::arg_count("history filter", "an operation name"))
            }
            HistoryCommand::Filter(Some(name)) => {
                let rows = self.history.filter_by_operation(name);
                if rows.is_empty() {
                    Ok(format!("No {} calculations in history", name))
                } else {
                    Ok(self.renderer.rows(&rows))
                }
            }
            HistoryCommand::Unknown(sub) => {
                warn!("Unknown history command: {}", sub);
                Ok(format!(
                    "Unknown history command: {}\nAvailable commands: {}",
                    sub,
                    HISTORY_SUBCOMMANDS.join(", ")
                ))
            }
        }
    }

    fn help(&self, topic: Option<&str>) -> Result<String, AbacusError> {
        let Some(topic) = topic else {
            return Ok(self.renderer.menu(&self.registry.descriptions()));
        };

        if let Ok(operation) = topic.parse::<Operation>() {
            return Ok(format!("{} <a> <b> - {}", operation, operation.description()));
        }
        if topic == "history" {
            return Ok(self.renderer.history_help());
        }

        self.registry.help(topic)
            .map(|help| self.renderer.command_help(&help))
            .ok_or_else(|| AbacusError::unknown_command(topic))
    }

    fn plugin(&self, name: &str, args: &[&str]) -> Result<String, AbacusError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        match self.registry.execute(name, &args) {
            Ok(value) => Ok(render_result(&value)),
            Err(err) if err.is(codes::PLUGIN_NOT_FOUND) => {
                let hint = err.suggestion.as_deref().unwrap_or("Type 'menu' to see available commands");
                Ok(format!("Unknown command: {}\n{}", name, hint))
            }
            Err(err) => Err(err),
        }
    }

    fn resolve(&self, file: Option<&str>) -> PathBuf {
        file.map(PathBuf::from).unwrap_or_else(|| self.history_file.clone())
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

fn render_result(value: &Value) -> String {
    format!("Result: {}", value)
}

/// One line, message only; the code stays in the log
fn render_error(err: &AbacusError) -> String {
    debug!("Command failed: {}", err);
    format!("Error: {}", err.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn calc() -> Calculator {
        Calculator::with_standard_library()
    }

    fn run(calculator: &mut Calculator, line: &str) -> String {
        calculator.execute_line(line).output().to_string()
    }

    #[test]
    fn test_arithmetic() {
        let mut c = calc();
        assert_eq!(run(&mut c, "add 10 5"), "Result: 15");
        assert_eq!(run(&mut c, "subtract 20 10"), "Result: 10");
        assert_eq!(run(&mut c, "multiply 4 5"), "Result: 20");
        assert_eq!(run(&mut c, "divide 20 4"), "Result: 5");
        assert_eq!(run(&mut c, "add 0.1 0.2"), "Result: 0.3");
        assert_eq!(c.history().len(), 5);
    }

    #[test]
    fn test_results_keep_decimal_digits() {
        let mut c = calc();
        assert_eq!(run(&mut c, "add 12345678901234567 2"), "Result: 12345678901234569");
        assert_eq!(run(&mut c, "multiply 99999999999999999999 1"), "Result: 99999999999999999999");
        assert_eq!(run(&mut c, "divide 1 3"), "Result: 0.3333333333333333333333333333");
        assert_eq!(run(&mut c, "add 0.00000012345 0"), "Result: 0.00000012345");
    }

    #[test]
    fn test_huge_magnitude_is_scientific() {
        let mut c = calc();
        assert_eq!(run(&mut c, "add 1e100000000 1"), "Result: 1E+100000000");
    }

    #[test]
    fn test_power_overflow_keeps_session() {
        let mut c = calc();
        assert_eq!(run(&mut c, "power 2 1e19"), "Error: Numeric overflow");
        assert_eq!(run(&mut c, "power 2 10"), "Result: 1024");
    }

    #[test]
    fn test_wrong_operand_count() {
        let mut c = calc();
        assert_eq!(run(&mut c, "add 1"), "Error: add command requires exactly 2 numbers");
        assert_eq!(run(&mut c, "divide 1 2 3"), "Error: divide command requires exactly 2 numbers");
        assert!(c.history().is_empty());
    }

    #[test]
    fn test_invalid_operand() {
        let mut c = calc();
        assert_eq!(run(&mut c, "add ten 5"), "Error: Invalid number: ten");
        assert_eq!(run(&mut c, "add 1/3 0"), "Error: Invalid number: 1/3");
        assert!(c.history().is_empty());
    }

    #[test]
    fn test_divide_by_zero_keeps_session() {
        let mut c = calc();
        let outcome = c.execute_line("divide 10 0");
        assert_eq!(outcome, Outcome::Continue("Error: Cannot divide by zero.".to_string()));
        assert!(c.history().is_empty());
        assert_eq!(run(&mut c, "add 1 1"), "Result: 2");
    }

    #[test]
    fn test_empty_line_is_ignored() {
        let mut c = calc();
        assert_eq!(c.execute_line("   "), Outcome::Continue(String::new()));
    }

    #[test]
    fn test_exit() {
        let mut c = calc();
        let outcome = c.execute_line("exit");
        assert!(outcome.is_exit());
        assert_eq!(outcome.output(), "Goodbye!");
        assert!(c.execute_line("quit").is_exit());
    }

    #[test]
    fn test_history_show_and_clear() {
        let mut c = calc();
        assert_eq!(run(&mut c, "history"), "No calculations in history");

        run(&mut c, "add 10 5");
        let table = run(&mut c, "history");
        assert!(table.contains("operation"));
        assert!(table.contains("add"));
        assert!(table.lines().nth(1).unwrap().ends_with("15"));

        assert_eq!(run(&mut c, "history clear"), "History cleared");
        assert_eq!(run(&mut c, "history"), "No calculations in history");
    }

    #[test]
    fn test_history_stats() {
        let mut c = calc();
        assert_eq!(run(&mut c, "history stats"), "No calculations in history");

        run(&mut c, "add 10 5");
        run(&mut c, "subtract 10 5");
        run(&mut c, "multiply 10 5");
        let stats = run(&mut c, "history stats");
        assert!(stats.contains("Total calculations: 3"));
        assert!(stats.contains("Minimum result: 5"));
        assert!(stats.contains("Maximum result: 50"));
    }

    #[test]
    fn test_history_filter() {
        let mut c = calc();
        run(&mut c, "add 1 2");
        run(&mut c, "multiply 3 4");

        let rows = run(&mut c, "history filter add");
        assert_eq!(rows.lines().count(), 2);
        assert!(!rows.contains("multiply"));

        assert_eq!(run(&mut c, "history filter divide"), "No divide calculations in history");
        assert!(run(&mut c, "history filter").starts_with("Error: history filter command requires"));
    }

    #[test]
    fn test_history_unknown_subcommand() {
        let mut c = calc();
        let out = run(&mut c, "history purge");
        assert!(out.starts_with("Unknown history command: purge"));
        assert!(out.contains("clear, save, load, delete, stats, filter"));
    }

    #[test]
    fn test_history_save_load_delete() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let path_text = path.display().to_string();

        let mut c = calc();
        run(&mut c, "add 10 5");
        run(&mut c, "divide 1 4");

        assert_eq!(run(&mut c, &format!("history save {}", path_text)), format!("History saved to {}", path_text));
        run(&mut c, "history clear");
        assert_eq!(run(&mut c, &format!("history load {}", path_text)), format!("History loaded from {}", path_text));
        assert_eq!(c.history().len(), 2);
        assert_eq!(c.history().latest().unwrap().result, 0.25);

        assert_eq!(run(&mut c, &format!("history delete {}", path_text)), format!("History file {} deleted", path_text));
        assert!(!path.exists());
        assert_eq!(run(&mut c, &format!("history delete {}", path_text)), format!("History file {} not found", path_text));
        assert_eq!(run(&mut c, &format!("history load {}", path_text)), format!("History file {} not found", path_text));
        assert_eq!(c.history().len(), 2);
    }

    #[test]
    fn test_history_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("default.csv");

        let mut c = calc().with_history_file(&path);
        run(&mut c, "add 2 2");
        run(&mut c, "history save");
        assert!(path.exists());

        let mut fresh = calc().with_history_file(&path);
        assert!(fresh.autoload().unwrap());
        assert_eq!(fresh.history().len(), 1);
    }

    #[test]
    fn test_history_load_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "timestamp,operation,a,b,result\nnot-a-date,add,x,y,z\n").unwrap();

        let mut c = calc();
        run(&mut c, "add 1 1");
        let out = run(&mut c, &format!("history load {}", path.display()));
        assert!(out.starts_with("Error: Malformed history file"), "got: {}", out);
        assert_eq!(c.history().len(), 1);
    }

    #[test]
    fn test_plugins() {
        let mut c = calc();
        assert_eq!(run(&mut c, "sqrt 16"), "Result: 4");
        assert_eq!(run(&mut c, "power 2 3"), "Result: 8");
        assert_eq!(run(&mut c, "stats 10 20 30"), "Result: {count: 3, max: 30, mean: 20, min: 10}");
        // Plugin results are not recorded
        assert!(c.history().is_empty());
    }

    #[test]
    fn test_plugin_errors() {
        let mut c = calc();
        assert_eq!(run(&mut c, "sqrt"), "Error: Please provide a number to calculate the square root of");
        assert!(run(&mut c, "sqrt -4").starts_with("Error: "));
        assert_eq!(run(&mut c, "power 2"), "Error: Please provide a base and exponent (e.g., power 2 3)");
    }

    #[test]
    fn test_unknown_command() {
        let mut c = calc();
        let out = run(&mut c, "frobnicate");
        assert!(out.starts_with("Unknown command: frobnicate\n"));
        assert!(out.contains("menu"));

        let out = run(&mut c, "sqr 9");
        assert!(out.contains("Similar: sqrt"), "got: {}", out);
    }

    #[test]
    fn test_menu() {
        let mut c = calc();
        let menu = run(&mut c, "menu");
        assert!(menu.contains("Built-in Commands:"));
        assert!(menu.contains("  divide <a> <b> - Divide two numbers"));
        assert!(menu.contains("  power - Calculate a number raised to a power"));
        assert_eq!(run(&mut c, "help"), menu);
    }

    #[test]
    fn test_help_topics() {
        let mut c = calc();
        assert_eq!(run(&mut c, "help add"), "add <a> <b> - Add two numbers");
        assert!(run(&mut c, "help history").contains("filter <operation>"));
        assert!(run(&mut c, "help power").starts_with("power - Calculate a number raised to a power"));
        assert_eq!(run(&mut c, "help nope"), "Error: Unknown command: nope");
    }

    #[test]
    fn test_injected_registry() {
        let registry = PluginRegistry::new();
        let mut c = Calculator::new(HistoryStore::new(), registry);
        assert!(run(&mut c, "sqrt 16").starts_with("Unknown command: sqrt"));
        assert_eq!(run(&mut c, "add 1 2"), "Result: 3");
    }
}
