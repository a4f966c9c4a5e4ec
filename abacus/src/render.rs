//! Text renderer
//!
//! Formats history rows, statistics, the command menu and command help
//! for the terminal.

use abacus_core::Value;
use abacus_history::{HistoryRow, HistoryStats, Operation, COLUMNS};
use std::collections::BTreeMap;

/// Prompt text renderer
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Right-aligned table with a header row
    pub fn rows(&self, rows: &[HistoryRow]) -> String {
        let cells: Vec<[String; 5]> = rows.iter()
            .map(|row| [
                row.timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
                row.operation.clone(),
                row.a.to_string(),
                row.b.to_string(),
                row.result.to_string(),
            ])
            .collect();

        let mut widths = COLUMNS.map(str::len);
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.len());
            }
        }

        let mut output = Vec::with_capacity(cells.len() + 1);
        output.push(Self::table_line(COLUMNS.iter().copied(), &widths));
        for line in &cells {
            output.push(Self::table_line(line.iter().map(String::as_str), &widths));
        }
        output.join("\n")
    }

    fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize; 5]) -> String {
        cells.zip(widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    }

    pub fn stats(&self, stats: &HistoryStats) -> String {
        let (Some(operations), Some(avg), Some(min), Some(max)) =
            (&stats.operations, stats.avg_result, stats.min_result, stats.max_result)
        else {
            return "No calculations in history".to_string();
        };

        let used: Vec<String> = operations.iter()
            .map(|(name, count)| format!("{}: {}", name, count))
            .collect();

        [
            format!("Total calculations: {}", stats.count),
            format!("Operations used: {}", used.join(", ")),
            format!("Average result: {}", avg),
            format!("Minimum result: {}", min),
            format!("Maximum result: {}", max),
        ].join("\n")
    }

    /// Built-in commands, then plugin commands with their descriptions
    pub fn menu(&self, plugins: &BTreeMap<String, String>) -> String {
        let mut lines = vec![String::new(), "Built-in Commands:".to_string()];
        for op in Operation::ALL {
            lines.push(format!("  {} <a> <b> - {}", op, op.description()));
        }
        lines.push("  history [subcommand] - Manage calculation history".to_string());
        lines.push("  help [command] - Show help for a command".to_string());
        lines.push("  menu - Show this menu".to_string());
        lines.push("  exit - Exit the calculator".to_string());

        if !plugins.is_empty() {
            lines.push(String::new());
            lines.push("Plugin Commands:".to_string());
            for (command, description) in plugins {
                lines.push(format!("  {} - {}", command, description));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }

    pub fn history_help(&self) -> String {
        [
            "history [subcommand] - Manage calculation history",
            "  (none) - Show all calculations",
            "  clear - Clear the history",
            "  save [file] - Save history to a file",
            "  load [file] - Load history from a file",
            "  delete [file] - Delete a history file",
            "  stats - Show statistics about the history",
            "  filter <operation> - Show calculations of one operation",
        ].join("\n")
    }

    /// Plugin help object as produced by the registry
    pub fn command_help(&self, help: &Value) -> String {
        let text = |key: &str| {
            help.get(key).ok()
                .and_then(Value::as_text)
                .unwrap_or_default()
                .to_string()
        };

        let mut lines = vec![
            format!("{} - {}", text("name"), text("description")),
            format!("Usage: {}", text("usage")),
        ];

        let args = help.get("args").ok().and_then(Value::as_list).unwrap_or_default();
        if !args.is_empty() {
            lines.push("Arguments:".to_string());
            for arg in args {
                let field = |key: &str| {
                    arg.get(key).ok().and_then(Value::as_text).unwrap_or_default()
                };
                let optional = arg.get("optional").ok()
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                lines.push(format!(
                    "  {} ({}{}) - {}",
                    field("name"),
                    field("type"),
                    if optional { ", optional" } else { "" },
                    field("description"),
                ));
            }
        }

        let examples = help.get("examples").ok().and_then(Value::as_list).unwrap_or_default();
        if !examples.is_empty() {
            lines.push("Examples:".to_string());
            for example in examples {
                lines.push(format!("  {}", example));
            }
        }
        lines.join("\n")
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
