//! Command line parser
//!
//! Splits one prompt line into a `Command`. Words are separated by
//! whitespace; the first word selects the command and is case-sensitive.

use abacus_history::Operation;

#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    Empty,
    Arithmetic { operation: Operation, args: Vec<&'a str> },
    History(HistoryCommand<'a>),
    Menu,
    Help(Option<&'a str>),
    Exit,
    /// Anything else; resolved against the plugin registry
    Plugin { name: &'a str, args: Vec<&'a str> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryCommand<'a> {
    Show,
    Clear,
    Save(Option<&'a str>),
    Load(Option<&'a str>),
    Delete(Option<&'a str>),
    Stats,
    Filter(Option<&'a str>),
    Unknown(&'a str),
}

/// Subcommands listed when an unknown one is given
pub const HISTORY_SUBCOMMANDS: &[&str] = &["clear", "save", "load", "delete", "stats", "filter"];

pub fn parse(line: &str) -> Command<'_> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Command::Empty;
    };
    let args: Vec<&str> = words.collect();

    if let Ok(operation) = first.parse::<Operation>() {
        return Command::Arithmetic { operation, args };
    }

    match first {
        "history" => Command::History(parse_history(&args)),
        "menu" => Command::Menu,
        "help" => Command::Help(args.first().copied()),
        "exit" | "quit" => Command::Exit,
        name => Command::Plugin { name, args },
    }
}

fn parse_history<'a>(args: &[&'a str]) -> HistoryCommand<'a> {
    let Some(&sub) = args.first() else {
        return HistoryCommand::Show;
    };
    let target = args.get(1).copied();

    // Subcommands are matched case-insensitively
    match sub.to_lowercase().as_str() {
        "clear" => HistoryCommand::Clear,
        "save" => HistoryCommand::Save(target),
        "load" => HistoryCommand::Load(target),
        "delete" => HistoryCommand::Delete(target),
        "stats" => HistoryCommand::Stats,
        "filter" => HistoryCommand::Filter(target),
        _ => HistoryCommand::Unknown(sub),
    }
}
